#[cfg(test)]
mod tests {
    use quill::{FieldDef, FieldType, Record, RecordType};
    use rust_decimal::Decimal;
    use std::{sync::Arc, time::Duration};
    use uuid::Uuid;

    #[allow(dead_code)]
    enum Status {
        Open,
        Closed,
    }

    #[allow(dead_code)]
    #[derive(Record)]
    struct Plain {
        a: i8,
        b: String,
        c: Option<u64>,
    }

    #[allow(dead_code)]
    #[derive(Record)]
    #[record(rename_all = "PascalCase")]
    struct Invoice {
        invoice_id: i64,
        #[record(name = "Number")]
        code: String,
        total: Decimal,
        issued: time::Date,
        due: Option<time::PrimitiveDateTime>,
        grace: Duration,
        reference: Uuid,
        scan: Vec<u8>,
        #[record(enumeration)]
        status: Status,
        #[record(enumeration)]
        previous: Option<Status>,
        lines: Vec<String>,
        owner: Arc<String>,
        #[record(skip)]
        cached: Option<Box<Invoice>>,
    }

    #[test]
    fn plain_struct_keeps_field_names() {
        assert_eq!(Plain::type_name(), "Plain");
        assert_eq!(
            Plain::fields(),
            &[
                FieldDef::new("a", FieldType::Int8),
                FieldDef::new("b", FieldType::String),
                FieldDef::new("c", FieldType::Optional(&FieldType::UInt64)),
            ]
        );
    }

    #[test]
    fn attributes() {
        let fields = Invoice::fields();
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "InvoiceId",
                "Number",
                "Total",
                "Issued",
                "Due",
                "Grace",
                "Reference",
                "Scan",
                "Status",
                "Previous",
                "Lines",
                "Owner",
            ]
        );
        let types: Vec<_> = fields.iter().map(|f| f.ty).collect();
        assert_eq!(types[0], FieldType::Int64);
        assert_eq!(types[1], FieldType::String);
        assert_eq!(types[2], FieldType::Decimal);
        assert_eq!(types[3], FieldType::Date);
        assert_eq!(types[4], FieldType::Optional(&FieldType::DateTime));
        assert_eq!(types[5], FieldType::TimeSpan);
        assert_eq!(types[6], FieldType::Uuid);
        assert_eq!(types[7], FieldType::Bytes);
        assert_eq!(types[8], FieldType::Enum);
        assert_eq!(types[9], FieldType::Optional(&FieldType::Enum));
        assert!(matches!(types[10], FieldType::Other(..)));
        assert_eq!(types[11], FieldType::String);
    }

    #[test]
    fn field_tags() {
        assert_eq!(
            Invoice::code,
            FieldDef::new("Number", FieldType::String)
        );
        assert_eq!(Invoice::invoice_id.name, "InvoiceId");
        assert_eq!(Plain::c.ty, FieldType::Optional(&FieldType::UInt64));
    }

    #[test]
    fn record_type_identity() {
        let invoice = RecordType::of::<Invoice>();
        assert_eq!(invoice, RecordType::of::<Invoice>());
        assert_ne!(invoice, RecordType::of::<Plain>());
        assert_eq!(invoice.name, "Invoice");
        assert_eq!(invoice.field("Number").map(|f| f.ty), Some(FieldType::String));
        assert!(invoice.field("code").is_none());
    }
}
