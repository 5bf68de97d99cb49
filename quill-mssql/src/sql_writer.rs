use quill_core::{
    ColumnSelection, DEFAULT_NON_PRIMITIVE_TYPES, Dialect, Error, FieldType, MERGE_SELECTION,
    Naming, PropertyDescriptor, RecordType, Result, SchemaRegistry, SqlWriter, insert_selection,
    separated_by,
};

#[derive(Debug, Clone, Default)]
pub struct SqlServerSqlWriter {
    naming: Naming,
    non_primitive_types: Option<Vec<FieldType>>,
}

impl SqlServerSqlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_non_primitive_types(
        mut self,
        types: impl IntoIterator<Item = FieldType>,
    ) -> Self {
        self.non_primitive_types = Some(types.into_iter().collect());
        self
    }

    fn write_output_column(&self, out: &mut String, property: &PropertyDescriptor) {
        out.push_str("INSERTED.");
        let column = self.column_name(property);
        self.write_identifier_quoted(out, &column);
        if column != property.name() {
            out.push_str(" AS ");
            self.write_identifier_quoted(out, property.name());
        }
    }
}

impl SqlWriter for SqlServerSqlWriter {
    fn dialect(&self) -> Dialect {
        Dialect::SqlServer
    }

    fn naming(&self) -> &Naming {
        &self.naming
    }

    fn non_primitive_types(&self) -> &[FieldType] {
        self.non_primitive_types
            .as_deref()
            .unwrap_or(DEFAULT_NON_PRIMITIVE_TYPES)
    }

    /// Bracketed identifiers ([name]), embedded brackets are copied as they are.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('[');
        out.push_str(value);
        out.push(']');
    }

    /// The generated keys come back through `OUTPUT INSERTED`, which cannot name computed
    /// columns.
    fn write_insert_return(
        &self,
        out: &mut String,
        registry: &SchemaRegistry,
        record: &RecordType,
        insert_keys: bool,
        column_set: Option<&str>,
    ) -> Result<()> {
        let selection = insert_selection(insert_keys);
        let properties = registry.properties_of(record, selection, column_set)?;
        let keys = registry.properties_of(
            record,
            ColumnSelection::KEYS | ColumnSelection::COMPUTED,
            None,
        )?;
        if let Some(key) = keys.iter().find(|p| p.is_computed()) {
            return Err(Error::unsupported(format!(
                "Computed key `{}` of `{}` cannot be returned from INSERT",
                key.name(),
                record.name
            )));
        }
        out.push_str("INSERT INTO ");
        self.write_record_table(out, registry, record);
        out.push_str(" (");
        self.write_columns(out, &properties, selection, None, ",");
        out.push(')');
        if !keys.is_empty() {
            out.push_str(" OUTPUT ");
            separated_by(
                out,
                keys.iter(),
                |out, key| self.write_output_column(out, key),
                ",",
            );
        }
        out.push_str(" VALUES (");
        self.write_params(out, &properties, selection, ",");
        out.push(')');
        Ok(())
    }

    /// Update or insert inside a serializable transaction, the existence check holds an update
    /// lock on the matched rows.
    fn write_merge(
        &self,
        out: &mut String,
        registry: &SchemaRegistry,
        record: &RecordType,
        merge_set: &str,
        insert_keys: bool,
        column_set: Option<&str>,
    ) -> Result<()> {
        let merge = registry.properties_of(record, MERGE_SELECTION, Some(merge_set))?;
        out.push_str("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE;BEGIN TRAN;");
        out.push_str("IF EXISTS (SELECT * FROM ");
        self.write_record_table(out, registry, record);
        out.push_str(" WITH (UPDLOCK) WHERE ");
        self.write_column_equal_params(out, &merge, None, " AND ");
        out.push_str(") ");
        self.write_update(out, registry, record, column_set)?;
        out.push_str("; ELSE ");
        self.write_insert(out, registry, record, insert_keys, column_set)?;
        out.push_str("; COMMIT");
        Ok(())
    }
}
