#[cfg(test)]
mod tests {
    use quill_core::{
        ColumnSelection, Dialect, FieldDef, FieldType, Record, SchemaRegistry, SqlWriter,
    };
    use quill_postgres::PostgresSqlWriter;
    use quill_tests::init_logs;
    use std::sync::Arc;

    struct TestProduct;
    impl Record for TestProduct {
        fn type_name() -> &'static str {
            "TestProduct"
        }
        fn fields() -> &'static [FieldDef] {
            const FIELDS: &[FieldDef] = &[
                FieldDef::new("Id", FieldType::Int32),
                FieldDef::new("Kind", FieldType::Int32),
                FieldDef::new("Name", FieldType::String),
                FieldDef::new("Content", FieldType::String),
                FieldDef::new("Value", FieldType::Int32),
                FieldDef::new("Struct", FieldType::Other("(i32, String)")),
                FieldDef::new("Class", FieldType::Other("std::io::Error")),
                FieldDef::new("Enum", FieldType::Enum),
                FieldDef::new("MaybeDate", FieldType::Optional(&FieldType::DateTime)),
                FieldDef::new("Date", FieldType::DateTime),
                FieldDef::new("MaybeGuid", FieldType::Optional(&FieldType::Uuid)),
                FieldDef::new("Guid", FieldType::Uuid),
                FieldDef::new("Duration", FieldType::TimeSpan),
                FieldDef::new("Last", FieldType::Bool),
            ];
            FIELDS
        }
    }

    struct TestOrder;
    impl Record for TestOrder {
        fn type_name() -> &'static str {
            "TestOrder"
        }
        fn fields() -> &'static [FieldDef] {
            const FIELDS: &[FieldDef] = &[
                FieldDef::new("OrderId", FieldType::Int32),
                FieldDef::new("ProductId", FieldType::Int32),
                FieldDef::new("Count", FieldType::Int32),
            ];
            FIELDS
        }
    }

    fn registry() -> SchemaRegistry {
        init_logs();
        let registry = SchemaRegistry::new(Arc::new(PostgresSqlWriter::new()));
        registry
            .has_default_key_column("Id", |p| {
                p.has_column_name("id");
            })
            .entity::<TestProduct>(|e| {
                e.property("Kind").has_column_name("Type");
                e.ignore("Name");
                e.property_for("Content", Dialect::Postgres)
                    .has_column_type("json");
                e.property_for("Value", Dialect::Postgres)
                    .has_computed_column_sql("\"Id\" + 1");
                e.property_for("Value", Dialect::SqlServer)
                    .has_computed_column_sql("[Id] + 1");
            })
            .entity::<TestOrder>(|e| {
                e.to_table("orders");
                e.has_key(["OrderId"]);
                e.property("OrderId").has_column_name("Id");
                e.has_column_set("unique_order", ["OrderId", "ProductId"]);
            });
        registry
    }

    #[test]
    fn columns_product() {
        let registry = registry();
        assert_eq!(
            registry
                .columns::<TestProduct>(ColumnSelection::SELECT, None)
                .unwrap(),
            "\"id\" AS \"Id\",\"Type\" AS \"Kind\",\"Content\",\"Id\" + 1 AS \"Value\",\"Enum\",\"MaybeDate\",\"Date\",\"MaybeGuid\",\"Guid\",\"Duration\",\"Last\""
        );
        assert_eq!(
            registry
                .columns::<TestProduct>(ColumnSelection::KEYS, None)
                .unwrap(),
            "\"id\" AS \"Id\""
        );
        assert_eq!(
            registry
                .columns::<TestProduct>(ColumnSelection::NON_KEYS | ColumnSelection::COMPUTED, None)
                .unwrap(),
            "\"Type\" AS \"Kind\",\"Content\",\"Id\" + 1 AS \"Value\",\"Enum\",\"MaybeDate\",\"Date\",\"MaybeGuid\",\"Guid\",\"Duration\",\"Last\""
        );
    }

    #[test]
    fn columns_order() {
        let registry = registry();
        assert_eq!(
            registry
                .columns::<TestOrder>(ColumnSelection::SELECT, None)
                .unwrap(),
            "\"Id\" AS \"OrderId\",\"ProductId\",\"Count\""
        );
        assert_eq!(
            registry
                .columns::<TestOrder>(ColumnSelection::KEYS, None)
                .unwrap(),
            "\"Id\" AS \"OrderId\""
        );
        assert_eq!(
            registry
                .columns::<TestOrder>(ColumnSelection::NON_KEYS | ColumnSelection::COMPUTED, None)
                .unwrap(),
            "\"ProductId\",\"Count\""
        );
    }

    #[test]
    fn column_equal_params_product() {
        let registry = registry();
        assert_eq!(
            registry
                .column_equal_params::<TestProduct>(ColumnSelection::ALL, None)
                .unwrap(),
            "\"id\"=@Id,\"Type\"=@Kind,\"Content\"=CAST(@Content AS json),\"Enum\"=@Enum,\"MaybeDate\"=@MaybeDate,\"Date\"=@Date,\"MaybeGuid\"=@MaybeGuid,\"Guid\"=@Guid,\"Duration\"=@Duration,\"Last\"=@Last"
        );
        assert_eq!(
            registry
                .column_equal_params::<TestProduct>(ColumnSelection::KEYS, None)
                .unwrap(),
            "\"id\"=@Id"
        );
    }

    #[test]
    fn params_cast_only_when_writing() {
        let registry = registry();
        assert_eq!(
            registry
                .params::<TestProduct>(ColumnSelection::KEYS | ColumnSelection::NON_KEYS, None)
                .unwrap(),
            "@Id,@Kind,@Content,@Enum,@MaybeDate,@Date,@MaybeGuid,@Guid,@Duration,@Last"
        );
        assert_eq!(
            registry
                .params::<TestProduct>(ColumnSelection::NON_KEYS | ColumnSelection::WRITE, None)
                .unwrap(),
            "@Kind,CAST(@Content AS json),@Enum,@MaybeDate,@Date,@MaybeGuid,@Guid,@Duration,@Last"
        );
    }

    #[test]
    fn insert() {
        let registry = registry();
        assert_eq!(
            &*registry.insert::<TestProduct>(None, false).unwrap(),
            "INSERT INTO \"TestProducts\" (\"Type\",\"Content\",\"Enum\",\"MaybeDate\",\"Date\",\"MaybeGuid\",\"Guid\",\"Duration\",\"Last\") VALUES (@Kind,CAST(@Content AS json),@Enum,@MaybeDate,@Date,@MaybeGuid,@Guid,@Duration,@Last)"
        );
        assert_eq!(
            &*registry.insert::<TestProduct>(None, true).unwrap(),
            "INSERT INTO \"TestProducts\" (\"id\",\"Type\",\"Content\",\"Enum\",\"MaybeDate\",\"Date\",\"MaybeGuid\",\"Guid\",\"Duration\",\"Last\") VALUES (@Id,@Kind,CAST(@Content AS json),@Enum,@MaybeDate,@Date,@MaybeGuid,@Guid,@Duration,@Last)"
        );
    }

    #[test]
    fn insert_return() {
        let registry = registry();
        assert_eq!(
            &*registry.insert_return::<TestProduct>(None, false).unwrap(),
            "INSERT INTO \"TestProducts\" (\"Type\",\"Content\",\"Enum\",\"MaybeDate\",\"Date\",\"MaybeGuid\",\"Guid\",\"Duration\",\"Last\") VALUES (@Kind,CAST(@Content AS json),@Enum,@MaybeDate,@Date,@MaybeGuid,@Guid,@Duration,@Last) RETURNING \"id\" AS \"Id\""
        );
        assert_eq!(
            &*registry.insert_return::<TestProduct>(None, true).unwrap(),
            "INSERT INTO \"TestProducts\" (\"id\",\"Type\",\"Content\",\"Enum\",\"MaybeDate\",\"Date\",\"MaybeGuid\",\"Guid\",\"Duration\",\"Last\") VALUES (@Id,@Kind,CAST(@Content AS json),@Enum,@MaybeDate,@Date,@MaybeGuid,@Guid,@Duration,@Last) RETURNING \"id\" AS \"Id\""
        );
    }

    #[test]
    fn insert_orders() {
        let registry = registry();
        assert_eq!(
            &*registry.insert::<TestOrder>(None, false).unwrap(),
            "INSERT INTO \"orders\" (\"ProductId\",\"Count\") VALUES (@ProductId,@Count)"
        );
        assert_eq!(
            &*registry.insert::<TestOrder>(None, true).unwrap(),
            "INSERT INTO \"orders\" (\"Id\",\"ProductId\",\"Count\") VALUES (@OrderId,@ProductId,@Count)"
        );
    }

    #[test]
    fn update() {
        let registry = registry();
        assert_eq!(
            &*registry.update::<TestProduct>(None).unwrap(),
            "UPDATE \"TestProducts\" SET \"Type\"=@Kind,\"Content\"=CAST(@Content AS json),\"Enum\"=@Enum,\"MaybeDate\"=@MaybeDate,\"Date\"=@Date,\"MaybeGuid\"=@MaybeGuid,\"Guid\"=@Guid,\"Duration\"=@Duration,\"Last\"=@Last WHERE \"id\"=@Id"
        );
        assert_eq!(
            &*registry.update::<TestOrder>(None).unwrap(),
            "UPDATE \"orders\" SET \"ProductId\"=@ProductId,\"Count\"=@Count WHERE \"Id\"=@OrderId"
        );
    }

    #[test]
    fn delete() {
        let registry = registry();
        assert_eq!(
            &*registry.delete::<TestProduct>().unwrap(),
            "DELETE FROM \"TestProducts\" WHERE \"id\"=@Id"
        );
    }

    #[test]
    fn merge() {
        let registry = registry();
        assert_eq!(
            &*registry.merge::<TestOrder>("unique_order", None, false).unwrap(),
            "INSERT INTO \"orders\" (\"ProductId\",\"Count\") VALUES (@ProductId,@Count) ON CONFLICT(\"Id\",\"ProductId\") DO UPDATE SET \"ProductId\"=@ProductId,\"Count\"=@Count WHERE \"Id\"=@OrderId AND \"ProductId\"=@ProductId"
        );
    }

    #[test]
    fn select_where_alias() {
        let registry = registry();
        registry.entity::<TestProduct>(|e| {
            e.has_column_set("by_kind", ["Kind"]);
            e.has_column_set("short", ["Id", "Kind", "Value"]);
        });
        assert_eq!(
            &*registry
                .select_where::<TestProduct>("by_kind", Some("short"), Some("x"))
                .unwrap(),
            "SELECT x.\"id\" AS \"Id\",x.\"Type\" AS \"Kind\",\"Id\" + 1 AS \"Value\" FROM \"TestProducts\" x WHERE x.\"Type\"=@Kind"
        );
        assert_eq!(
            &*registry
                .select_single::<TestProduct>(Some("short"), None)
                .unwrap(),
            "SELECT \"id\" AS \"Id\",\"Type\" AS \"Kind\",\"Id\" + 1 AS \"Value\" FROM \"TestProducts\" WHERE \"id\"=@Id"
        );
    }

    #[test]
    fn table() {
        let registry = registry();
        assert_eq!(registry.table::<TestOrder>().unwrap(), "\"orders\"");
        assert_eq!(registry.table::<TestProduct>().unwrap(), "\"TestProducts\"");
        assert_eq!(
            PostgresSqlWriter::new().table_exists(),
            "SELECT COUNT(1) FROM information_schema.tables WHERE table_name = @table"
        );
    }
}
