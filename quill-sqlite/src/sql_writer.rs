use quill_core::{
    ColumnSelection, DEFAULT_NON_PRIMITIVE_TYPES, Dialect, Error, FieldType, Naming, RecordType,
    Result, SchemaRegistry, SqlWriter,
};

#[derive(Debug, Clone, Default)]
pub struct SqliteSqlWriter {
    naming: Naming,
    non_primitive_types: Option<Vec<FieldType>>,
}

impl SqliteSqlWriter {
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
}

impl SqlWriter for SqliteSqlWriter {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn naming(&self) -> &Naming {
        &self.naming
    }

    fn non_primitive_types(&self) -> &[FieldType] {
        self.non_primitive_types
            .as_deref()
            .unwrap_or(DEFAULT_NON_PRIMITIVE_TYPES)
    }

    /// Insert followed by a `last_insert_rowid()` query, the entity must have exactly one key.
    fn write_insert_return(
        &self,
        out: &mut String,
        registry: &SchemaRegistry,
        record: &RecordType,
        insert_keys: bool,
        column_set: Option<&str>,
    ) -> Result<()> {
        let keys = registry.properties_of(record, ColumnSelection::KEYS, None)?;
        let [key] = &keys[..] else {
            return Err(Error::unsupported(format!(
                "last_insert_rowid() returns one key, `{}` has {}",
                record.name,
                keys.len()
            )));
        };
        self.write_insert(out, registry, record, insert_keys, column_set)?;
        out.push_str("; SELECT last_insert_rowid() AS ");
        self.write_identifier_quoted(out, &self.column_name(key));
        Ok(())
    }

    fn table_exists(&self) -> &str {
        "SELECT count(*) FROM sqlite_master WHERE type='table' AND name=@table"
    }
}
