use crate::{
    ColumnSelection, Dialect, EntityBuilder, EntityDescriptor, Error, PropertyDescriptor,
    PropertySelector, Record, RecordType, Result, SelectFilter, SqlWriter,
    entity::structural_default, truncate_long,
};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::{any::TypeId, collections::HashMap, fmt, sync::Arc};

/// Statement kinds with the arguments that shape their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Insert {
        insert_keys: bool,
        column_set: Option<String>,
    },
    InsertReturn {
        insert_keys: bool,
        column_set: Option<String>,
    },
    Update {
        column_set: Option<String>,
    },
    Delete,
    Merge {
        merge_set: String,
        insert_keys: bool,
        column_set: Option<String>,
    },
    Select {
        filter: SelectFilter,
        column_set: Option<String>,
        alias: Option<String>,
    },
}

#[derive(Debug, Default)]
struct ModelState {
    shared: EntityDescriptor,
    entities: HashMap<TypeId, EntityDescriptor>,
}

type PropertiesKey = (TypeId, ColumnSelection, Option<String>);

/// Mapping model bound to one [`SqlWriter`], plus memoized resolutions and statements.
///
/// Configure every entity before generating statements for it: generated text is cached and
/// later configuration changes do not invalidate it. Configuration callbacks must not call back
/// into the same registry.
pub struct SchemaRegistry {
    model: Arc<RwLock<ModelState>>,
    writer: RwLock<Option<Arc<dyn SqlWriter>>>,
    properties: DashMap<PropertiesKey, Arc<[PropertyDescriptor]>>,
    statements: DashMap<(TypeId, Statement), Arc<str>>,
}

impl SchemaRegistry {
    pub fn new(writer: Arc<dyn SqlWriter>) -> Self {
        let registry = Self::unbound();
        *registry.writer.write() = Some(writer);
        registry
    }

    /// Registry without a writer, generation fails until one is bound.
    pub fn unbound() -> Self {
        Self {
            model: Default::default(),
            writer: RwLock::new(None),
            properties: DashMap::new(),
            statements: DashMap::new(),
        }
    }

    /// Unbound registry sharing the mapping model of `source`, with caches of its own.
    pub fn seeded_from(source: &SchemaRegistry) -> Self {
        Self {
            model: source.model.clone(),
            ..Self::unbound()
        }
    }

    /// Binds `writer`, dropping everything generated with the previous one.
    pub fn bind(&self, writer: Arc<dyn SqlWriter>) {
        *self.writer.write() = Some(writer);
        self.clear_caches();
    }

    /// Binds the writer produced by `f` unless one is bound already.
    pub fn bind_if_unbound(&self, f: impl FnOnce() -> Arc<dyn SqlWriter>) -> Arc<dyn SqlWriter> {
        if let Some(writer) = self.writer.read().as_ref() {
            return writer.clone();
        }
        let mut guard = self.writer.write();
        guard.get_or_insert_with(f).clone()
    }

    pub fn is_bound(&self) -> bool {
        self.writer.read().is_some()
    }

    pub fn writer(&self) -> Result<Arc<dyn SqlWriter>> {
        self.writer
            .read()
            .clone()
            .ok_or_else(|| Error::configuration("No SqlWriter is bound to the registry"))
    }

    /// Forgets every declaration and cached result, the bound writer stays.
    pub fn reset(&self) {
        *self.model.write() = ModelState::default();
        self.clear_caches();
    }

    fn clear_caches(&self) {
        self.properties.clear();
        self.statements.clear();
    }

    /// Configures the mapping of `T`.
    pub fn entity<T: Record>(&self, f: impl FnOnce(&mut EntityBuilder<T>)) -> &Self {
        let mut guard = self.model.write();
        let state = &mut *guard;
        let entity = state.entities.entry(TypeId::of::<T>()).or_default();
        f(&mut EntityBuilder::new(entity, &state.shared));
        self
    }

    /// Declares a key property every entity falls back to.
    pub fn has_default_key_column(
        &self,
        name: &str,
        options: impl FnOnce(&mut PropertyDescriptor),
    ) -> &Self {
        self.default_key_column(name, None, options)
    }

    pub fn has_default_key_column_for(
        &self,
        name: &str,
        dialect: Dialect,
        options: impl FnOnce(&mut PropertyDescriptor),
    ) -> &Self {
        self.default_key_column(name, Some(dialect), options)
    }

    fn default_key_column(
        &self,
        name: &str,
        dialect: Option<Dialect>,
        options: impl FnOnce(&mut PropertyDescriptor),
    ) -> &Self {
        let mut state = self.model.write();
        let neutral = state.shared.get(name, None).cloned();
        let property = state.shared.property_mut(name, dialect, || {
            neutral.unwrap_or_else(|| PropertyDescriptor::new(name))
        });
        property.key = true;
        options(property);
        self
    }

    pub fn has_column_set<T: Record, S: PropertySelector>(
        &self,
        name: &str,
        selectors: impl IntoIterator<Item = S>,
    ) -> &Self {
        self.entity::<T>(|e| {
            e.has_column_set(name, selectors);
        })
    }

    /// Whether `T` declares the dialect neutral column set `name`.
    pub fn declares_column_set<T: Record>(&self, name: &str) -> bool {
        self.model
            .read()
            .entities
            .get(&TypeId::of::<T>())
            .is_some_and(|e| e.declares_column_set(name, None))
    }

    /// Table name declared with `to_table`, if any.
    pub fn declared_table_name(&self, record: &RecordType) -> Option<String> {
        self.model
            .read()
            .entities
            .get(&record.id)
            .and_then(|e| e.table_name.clone())
    }

    pub fn table_name_of(&self, record: &RecordType) -> Result<String> {
        let writer = self.writer()?;
        Ok(writer.table_name(self.declared_table_name(record).as_deref(), record.name))
    }

    /// Resolved properties of `record` for `selection`, in field order.
    pub fn properties_of(
        &self,
        record: &RecordType,
        selection: ColumnSelection,
        column_set: Option<&str>,
    ) -> Result<Arc<[PropertyDescriptor]>> {
        let key = (record.id, selection, column_set.map(str::to_string));
        if let Some(properties) = self.properties.get(&key) {
            return Ok(properties.value().clone());
        }
        log::trace!(
            "Resolving properties of `{}` for {:?} (column set {:?})",
            record.name,
            selection,
            column_set
        );
        let properties = self.resolve_properties(record, selection, column_set)?;
        Ok(self.properties.entry(key).or_insert(properties).value().clone())
    }

    fn resolve_properties(
        &self,
        record: &RecordType,
        selection: ColumnSelection,
        column_set: Option<&str>,
    ) -> Result<Arc<[PropertyDescriptor]>> {
        let writer = self.writer()?;
        let dialect = writer.dialect();
        let state = self.model.read();
        let entity = state.entities.get(&record.id);
        let members = match column_set {
            Some(set) => Some(
                entity
                    .and_then(|e| e.column_set(set, dialect))
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "Column set `{}` is not defined for `{}`",
                            set, record.name
                        ))
                    })?,
            ),
            None => None,
        };
        Ok(record
            .fields
            .iter()
            .filter(|f| writer.accept_type(&f.ty))
            .map(|f| {
                entity
                    .and_then(|e| e.find(f.name, dialect))
                    .or_else(|| state.shared.find(f.name, dialect))
                    .cloned()
                    .unwrap_or_else(|| {
                        let mut property = structural_default(record.fields, f.name);
                        property.column_name = Some(f.name.to_string());
                        property
                    })
            })
            .filter(|p| writer.is_selected(p, selection))
            .filter(|p| members.is_none_or(|m| m.iter().any(|n| n == p.name())))
            .collect())
    }

    fn fragment(
        &self,
        record: &RecordType,
        selection: ColumnSelection,
        column_set: Option<&str>,
        f: impl FnOnce(&dyn SqlWriter, &mut String, &[PropertyDescriptor]),
    ) -> Result<String> {
        let writer = self.writer()?;
        let properties = self.properties_of(record, selection, column_set)?;
        let mut out = String::new();
        f(writer.as_ref(), &mut out, &properties);
        Ok(out)
    }

    /// Escaped table name of `T`.
    pub fn table<T: Record>(&self) -> Result<String> {
        let writer = self.writer()?;
        let mut out = String::new();
        writer.write_record_table(&mut out, self, &RecordType::of::<T>());
        Ok(out)
    }

    /// Raw table name of `T`.
    pub fn table_name<T: Record>(&self) -> Result<String> {
        self.table_name_of(&RecordType::of::<T>())
    }

    pub fn properties<T: Record>(
        &self,
        selection: ColumnSelection,
        column_set: Option<&str>,
    ) -> Result<Arc<[PropertyDescriptor]>> {
        self.properties_of(&RecordType::of::<T>(), selection, column_set)
    }

    pub fn columns<T: Record>(
        &self,
        selection: ColumnSelection,
        column_set: Option<&str>,
    ) -> Result<String> {
        self.columns_with::<T>(selection, column_set, ",")
    }

    pub fn columns_with<T: Record>(
        &self,
        selection: ColumnSelection,
        column_set: Option<&str>,
        separator: &str,
    ) -> Result<String> {
        self.fragment(
            &RecordType::of::<T>(),
            selection,
            column_set,
            |writer, out, properties| {
                writer.write_columns(out, properties, selection, None, separator)
            },
        )
    }

    pub fn params<T: Record>(
        &self,
        selection: ColumnSelection,
        column_set: Option<&str>,
    ) -> Result<String> {
        self.params_with::<T>(selection, column_set, ",")
    }

    pub fn params_with<T: Record>(
        &self,
        selection: ColumnSelection,
        column_set: Option<&str>,
        separator: &str,
    ) -> Result<String> {
        self.fragment(
            &RecordType::of::<T>(),
            selection,
            column_set,
            |writer, out, properties| writer.write_params(out, properties, selection, separator),
        )
    }

    pub fn column_equal_params<T: Record>(
        &self,
        selection: ColumnSelection,
        column_set: Option<&str>,
    ) -> Result<String> {
        self.column_equal_params_with::<T>(selection, column_set, ",")
    }

    pub fn column_equal_params_with<T: Record>(
        &self,
        selection: ColumnSelection,
        column_set: Option<&str>,
        separator: &str,
    ) -> Result<String> {
        self.fragment(
            &RecordType::of::<T>(),
            selection,
            column_set,
            |writer, out, properties| {
                writer.write_column_equal_params(out, properties, None, separator)
            },
        )
    }

    pub fn insert<T: Record>(
        &self,
        column_set: Option<&str>,
        insert_keys: bool,
    ) -> Result<Arc<str>> {
        self.statement(
            RecordType::of::<T>(),
            Statement::Insert {
                insert_keys,
                column_set: column_set.map(str::to_string),
            },
        )
    }

    pub fn insert_return<T: Record>(
        &self,
        column_set: Option<&str>,
        insert_keys: bool,
    ) -> Result<Arc<str>> {
        self.statement(
            RecordType::of::<T>(),
            Statement::InsertReturn {
                insert_keys,
                column_set: column_set.map(str::to_string),
            },
        )
    }

    pub fn update<T: Record>(&self, column_set: Option<&str>) -> Result<Arc<str>> {
        self.statement(
            RecordType::of::<T>(),
            Statement::Update {
                column_set: column_set.map(str::to_string),
            },
        )
    }

    pub fn delete<T: Record>(&self) -> Result<Arc<str>> {
        self.statement(RecordType::of::<T>(), Statement::Delete)
    }

    pub fn merge<T: Record>(
        &self,
        merge_set: &str,
        column_set: Option<&str>,
        insert_keys: bool,
    ) -> Result<Arc<str>> {
        self.statement(
            RecordType::of::<T>(),
            Statement::Merge {
                merge_set: merge_set.to_string(),
                insert_keys,
                column_set: column_set.map(str::to_string),
            },
        )
    }

    pub fn select<T: Record>(
        &self,
        column_set: Option<&str>,
        alias: Option<&str>,
    ) -> Result<Arc<str>> {
        self.select_statement::<T>(SelectFilter::All, column_set, alias)
    }

    /// Select filtered on the key columns.
    pub fn select_single<T: Record>(
        &self,
        column_set: Option<&str>,
        alias: Option<&str>,
    ) -> Result<Arc<str>> {
        self.select_statement::<T>(SelectFilter::Keys, column_set, alias)
    }

    /// Select filtered on the members of `where_set`.
    pub fn select_where<T: Record>(
        &self,
        where_set: &str,
        column_set: Option<&str>,
        alias: Option<&str>,
    ) -> Result<Arc<str>> {
        self.select_statement::<T>(SelectFilter::Set(where_set.to_string()), column_set, alias)
    }

    fn select_statement<T: Record>(
        &self,
        filter: SelectFilter,
        column_set: Option<&str>,
        alias: Option<&str>,
    ) -> Result<Arc<str>> {
        self.statement(
            RecordType::of::<T>(),
            Statement::Select {
                filter,
                column_set: column_set.map(str::to_string),
                alias: alias.map(str::to_string),
            },
        )
    }

    /// Generates `statement` for `record`, or returns the text generated earlier.
    pub fn statement(&self, record: RecordType, statement: Statement) -> Result<Arc<str>> {
        let key = (record.id, statement);
        if let Some(sql) = self.statements.get(&key) {
            return Ok(sql.value().clone());
        }
        let writer = self.writer()?;
        let mut out = String::with_capacity(256);
        match &key.1 {
            Statement::Insert {
                insert_keys,
                column_set,
            } => writer.write_insert(
                &mut out,
                self,
                &record,
                *insert_keys,
                column_set.as_deref(),
            )?,
            Statement::InsertReturn {
                insert_keys,
                column_set,
            } => writer.write_insert_return(
                &mut out,
                self,
                &record,
                *insert_keys,
                column_set.as_deref(),
            )?,
            Statement::Update { column_set } => {
                writer.write_update(&mut out, self, &record, column_set.as_deref())?
            }
            Statement::Delete => writer.write_delete(&mut out, self, &record)?,
            Statement::Merge {
                merge_set,
                insert_keys,
                column_set,
            } => writer.write_merge(
                &mut out,
                self,
                &record,
                merge_set,
                *insert_keys,
                column_set.as_deref(),
            )?,
            Statement::Select {
                filter,
                column_set,
                alias,
            } => writer.write_select(
                &mut out,
                self,
                &record,
                filter,
                column_set.as_deref(),
                alias.as_deref(),
            )?,
        }
        log::debug!(
            "Generated {:?} for `{}`: {}",
            key.1,
            record.name,
            truncate_long!(out)
        );
        let sql: Arc<str> = out.into();
        Ok(self.statements.entry(key).or_insert(sql).value().clone())
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("bound", &self.is_bound())
            .field("properties", &self.properties.len())
            .field("statements", &self.statements.len())
            .finish()
    }
}
