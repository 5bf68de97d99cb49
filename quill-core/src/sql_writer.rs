use crate::{
    ColumnSelection, Dialect, FieldType, NameConverter, Naming, PropertyDescriptor, RecordType,
    Result, SchemaRegistry, separated_by,
};
use std::borrow::Cow;

/// Non primitive field types every writer accepts unless configured otherwise.
pub const DEFAULT_NON_PRIMITIVE_TYPES: &[FieldType] = &[
    FieldType::Decimal,
    FieldType::String,
    FieldType::Date,
    FieldType::Time,
    FieldType::DateTime,
    FieldType::TimeSpan,
    FieldType::Uuid,
];

/// Which rows a SELECT statement filters on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectFilter {
    /// No WHERE clause.
    All,
    /// `WHERE` over the key columns.
    Keys,
    /// `WHERE` over the members of a column set.
    Set(String),
}

/// Dialect printer turning resolved mappings into SQL text.
///
/// The provided methods render the generic dialect, implementors override what differs.
pub trait SqlWriter: Send + Sync {
    fn dialect(&self) -> Dialect {
        Dialect::Generic
    }

    /// Converter chains for derived table and column names.
    fn naming(&self) -> &Naming;

    /// Whitelist of non primitive field types that map to a column.
    fn non_primitive_types(&self) -> &[FieldType] {
        DEFAULT_NON_PRIMITIVE_TYPES
    }

    /// Quote identifiers ("name"), embedded quotes are copied as they are.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        out.push_str(value);
        out.push('"');
    }

    fn write_table_name(&self, out: &mut String, value: &str) {
        self.write_identifier_quoted(out, value);
    }

    /// Whether a field of this type maps to a column at all.
    fn accept_type(&self, ty: &FieldType) -> bool {
        let ty = ty.unwrap_optional();
        ty.is_primitive() || *ty == FieldType::Enum || self.non_primitive_types().contains(ty)
    }

    fn is_selected(&self, property: &PropertyDescriptor, selection: ColumnSelection) -> bool {
        let kind = if property.key {
            ColumnSelection::KEYS
        } else {
            ColumnSelection::NON_KEYS
        };
        !property.ignored
            && selection.contains(kind)
            && (!property.is_computed() || selection.contains(ColumnSelection::COMPUTED))
    }

    /// Physical column: the declared name or the column converters applied to the property name.
    fn column_name<'a>(&self, property: &'a PropertyDescriptor) -> Cow<'a, str> {
        match &property.column_name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(self.naming().column.convert(property.name())),
        }
    }

    /// Physical table: the declared name or the table converters applied to the type name.
    fn table_name(&self, declared: Option<&str>, type_name: &str) -> String {
        match declared {
            Some(name) => name.to_string(),
            None => self.naming().table.convert(type_name),
        }
    }

    fn write_record_table(
        &self,
        out: &mut String,
        registry: &SchemaRegistry,
        record: &RecordType,
    ) {
        let declared = registry.declared_table_name(record);
        let name = self.table_name(declared.as_deref(), record.name);
        self.write_table_name(out, &name);
    }

    fn write_column(
        &self,
        out: &mut String,
        property: &PropertyDescriptor,
        selection: ColumnSelection,
        alias: Option<&str>,
    ) {
        if let Some(sql) = &property.computed_sql {
            out.push_str(sql);
            out.push_str(" AS ");
            self.write_identifier_quoted(out, property.name());
            return;
        }
        if let Some(alias) = alias {
            out.push_str(alias);
            out.push('.');
        }
        let column = self.column_name(property);
        self.write_identifier_quoted(out, &column);
        if column != property.name() && !selection.contains(ColumnSelection::WRITE) {
            out.push_str(" AS ");
            self.write_identifier_quoted(out, property.name());
        }
    }

    fn write_param(
        &self,
        out: &mut String,
        property: &PropertyDescriptor,
        selection: ColumnSelection,
    ) {
        match &property.column_type {
            Some(ty) if selection.contains(ColumnSelection::WRITE) => {
                self.write_cast_param(out, property.name(), ty)
            }
            _ => {
                out.push('@');
                out.push_str(property.name());
            }
        }
    }

    fn write_cast_param(&self, out: &mut String, name: &str, ty: &str) {
        out.push_str("CAST(@");
        out.push_str(name);
        out.push_str(" AS ");
        out.push_str(ty);
        out.push(')');
    }

    /// `column=@Param`, the parameter is cast whenever the column has a type.
    fn write_column_equal_param(
        &self,
        out: &mut String,
        property: &PropertyDescriptor,
        alias: Option<&str>,
    ) {
        if let Some(alias) = alias {
            out.push_str(alias);
            out.push('.');
        }
        self.write_identifier_quoted(out, &self.column_name(property));
        out.push('=');
        match &property.column_type {
            Some(ty) => self.write_cast_param(out, property.name(), ty),
            None => {
                out.push('@');
                out.push_str(property.name());
            }
        }
    }

    fn write_columns(
        &self,
        out: &mut String,
        properties: &[PropertyDescriptor],
        selection: ColumnSelection,
        alias: Option<&str>,
        separator: &str,
    ) {
        separated_by(
            out,
            properties,
            |out, p| self.write_column(out, p, selection, alias),
            separator,
        );
    }

    fn write_params(
        &self,
        out: &mut String,
        properties: &[PropertyDescriptor],
        selection: ColumnSelection,
        separator: &str,
    ) {
        separated_by(
            out,
            properties,
            |out, p| self.write_param(out, p, selection),
            separator,
        );
    }

    fn write_column_equal_params(
        &self,
        out: &mut String,
        properties: &[PropertyDescriptor],
        alias: Option<&str>,
        separator: &str,
    ) {
        separated_by(
            out,
            properties,
            |out, p| self.write_column_equal_param(out, p, alias),
            separator,
        );
    }

    fn write_insert(
        &self,
        out: &mut String,
        registry: &SchemaRegistry,
        record: &RecordType,
        insert_keys: bool,
        column_set: Option<&str>,
    ) -> Result<()> {
        let selection = insert_selection(insert_keys);
        let properties = registry.properties_of(record, selection, column_set)?;
        out.push_str("INSERT INTO ");
        self.write_record_table(out, registry, record);
        out.push_str(" (");
        self.write_columns(out, &properties, selection, None, ",");
        out.push_str(") VALUES (");
        self.write_params(out, &properties, selection, ",");
        out.push(')');
        Ok(())
    }

    /// Insert returning the generated keys, nothing is returned when the entity has no key.
    fn write_insert_return(
        &self,
        out: &mut String,
        registry: &SchemaRegistry,
        record: &RecordType,
        insert_keys: bool,
        column_set: Option<&str>,
    ) -> Result<()> {
        self.write_insert(out, registry, record, insert_keys, column_set)?;
        let keys = registry.properties_of(record, ColumnSelection::KEYS, None)?;
        if !keys.is_empty() {
            out.push_str(" RETURNING ");
            self.write_columns(out, &keys, ColumnSelection::KEYS, None, ",");
        }
        Ok(())
    }

    fn write_update(
        &self,
        out: &mut String,
        registry: &SchemaRegistry,
        record: &RecordType,
        column_set: Option<&str>,
    ) -> Result<()> {
        let values = registry.properties_of(
            record,
            ColumnSelection::NON_KEYS | ColumnSelection::WRITE,
            column_set,
        )?;
        let keys = registry.properties_of(
            record,
            ColumnSelection::KEYS | ColumnSelection::WRITE,
            None,
        )?;
        out.push_str("UPDATE ");
        self.write_record_table(out, registry, record);
        out.push_str(" SET ");
        self.write_column_equal_params(out, &values, None, ",");
        out.push_str(" WHERE ");
        self.write_column_equal_params(out, &keys, None, " AND ");
        Ok(())
    }

    fn write_delete(
        &self,
        out: &mut String,
        registry: &SchemaRegistry,
        record: &RecordType,
    ) -> Result<()> {
        let keys = registry.properties_of(
            record,
            ColumnSelection::KEYS | ColumnSelection::WRITE,
            None,
        )?;
        out.push_str("DELETE FROM ");
        self.write_record_table(out, registry, record);
        out.push_str(" WHERE ");
        self.write_column_equal_params(out, &keys, None, " AND ");
        Ok(())
    }

    /// Upsert keyed on the columns of `merge_set`.
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
        let values = registry.properties_of(
            record,
            ColumnSelection::NON_KEYS | ColumnSelection::WRITE,
            column_set,
        )?;
        self.write_insert(out, registry, record, insert_keys, column_set)?;
        out.push_str(" ON CONFLICT(");
        self.write_columns(out, &merge, MERGE_SELECTION, None, ",");
        out.push_str(") DO UPDATE SET ");
        self.write_column_equal_params(out, &values, None, ",");
        out.push_str(" WHERE ");
        self.write_column_equal_params(out, &merge, None, " AND ");
        Ok(())
    }

    fn write_select(
        &self,
        out: &mut String,
        registry: &SchemaRegistry,
        record: &RecordType,
        filter: &SelectFilter,
        column_set: Option<&str>,
        alias: Option<&str>,
    ) -> Result<()> {
        let columns = registry.properties_of(record, ColumnSelection::SELECT, column_set)?;
        let condition = match filter {
            SelectFilter::All => None,
            SelectFilter::Keys => Some(registry.properties_of(
                record,
                ColumnSelection::KEYS | ColumnSelection::WRITE,
                None,
            )?),
            SelectFilter::Set(set) => Some(registry.properties_of(
                record,
                ColumnSelection::ALL | ColumnSelection::WRITE,
                Some(set),
            )?),
        };
        out.push_str("SELECT ");
        self.write_columns(out, &columns, ColumnSelection::SELECT, alias, ",");
        out.push_str(" FROM ");
        self.write_record_table(out, registry, record);
        if let Some(alias) = alias {
            out.push(' ');
            out.push_str(alias);
        }
        if let Some(condition) = condition {
            out.push_str(" WHERE ");
            self.write_column_equal_params(out, &condition, alias, " AND ");
        }
        Ok(())
    }

    /// Probe counting tables named `@table`.
    fn table_exists(&self) -> &str {
        "SELECT COUNT(1) FROM information_schema.tables WHERE table_name = @table"
    }
}

/// Selection of the columns an upsert matches on.
pub const MERGE_SELECTION: ColumnSelection = ColumnSelection::KEYS
    .union(ColumnSelection::NON_KEYS)
    .union(ColumnSelection::WRITE);

/// Selection of the columns an INSERT writes.
pub fn insert_selection(insert_keys: bool) -> ColumnSelection {
    if insert_keys {
        ColumnSelection::ALL | ColumnSelection::WRITE
    } else {
        ColumnSelection::NON_KEYS | ColumnSelection::WRITE
    }
}

/// Writer for the generic dialect.
#[derive(Debug, Clone, Default)]
pub struct GenericSqlWriter {
    naming: Naming,
    non_primitive_types: Option<Vec<FieldType>>,
}

impl GenericSqlWriter {
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

impl SqlWriter for GenericSqlWriter {
    fn naming(&self) -> &Naming {
        &self.naming
    }

    fn non_primitive_types(&self) -> &[FieldType] {
        self.non_primitive_types
            .as_deref()
            .unwrap_or(DEFAULT_NON_PRIMITIVE_TYPES)
    }
}
