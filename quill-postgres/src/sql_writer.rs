use quill_core::{Dialect, FieldType, Naming, SqlWriter};

/// Postgres maps binary fields to `bytea`, on top of the generic types.
pub const POSTGRES_NON_PRIMITIVE_TYPES: &[FieldType] = &[
    FieldType::Decimal,
    FieldType::String,
    FieldType::Date,
    FieldType::Time,
    FieldType::DateTime,
    FieldType::TimeSpan,
    FieldType::Uuid,
    FieldType::Bytes,
];

#[derive(Debug, Clone, Default)]
pub struct PostgresSqlWriter {
    naming: Naming,
    non_primitive_types: Option<Vec<FieldType>>,
}

impl PostgresSqlWriter {
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

impl SqlWriter for PostgresSqlWriter {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn naming(&self) -> &Naming {
        &self.naming
    }

    fn non_primitive_types(&self) -> &[FieldType] {
        self.non_primitive_types
            .as_deref()
            .unwrap_or(POSTGRES_NON_PRIMITIVE_TYPES)
    }
}
