/// Mapping metadata of one record property.
///
/// The property name is fixed at creation; everything else is adjusted through the fluent
/// setters while configuring an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: String,
    /// Explicit column name, `None` derives it from the writer's column converters.
    pub column_name: Option<String>,
    /// Database type, parameters get wrapped in `CAST(.. AS type)` when set.
    pub column_type: Option<String>,
    pub key: bool,
    pub numeric: bool,
    pub ignored: bool,
    /// Expression of a read only column.
    pub computed_sql: Option<String>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_name: None,
            column_type: None,
            key: false,
            numeric: false,
            ignored: false,
            computed_sql: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_computed(&self) -> bool {
        self.computed_sql.is_some()
    }

    pub fn has_column_name(&mut self, column_name: impl Into<String>) -> &mut Self {
        self.column_name = Some(column_name.into());
        self
    }

    pub fn has_column_type(&mut self, column_type: impl Into<String>) -> &mut Self {
        self.column_type = Some(column_type.into());
        self
    }

    pub fn has_computed_column_sql(&mut self, sql: impl Into<String>) -> &mut Self {
        self.computed_sql = Some(sql.into());
        self
    }

    /// Marks the key as numeric, independently of the field type.
    pub fn has_numeric_key(&mut self) -> &mut Self {
        self.numeric = true;
        self
    }

    pub fn ignore(&mut self) -> &mut Self {
        self.ignored = true;
        self
    }
}
