use crate::{FieldDef, PropertyDescriptor, Record};
use std::{collections::HashMap, marker::PhantomData};

/// Target SQL dialect, per dialect overrides are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Generic,
    Postgres,
    SqlServer,
    Sqlite,
    Custom(&'static str),
}

#[derive(Debug, Default, Clone)]
struct PropertySlot {
    shared: Option<PropertyDescriptor>,
    dialects: HashMap<Dialect, PropertyDescriptor>,
}

/// Declared mapping of one record type, or the global defaults every entity falls back to.
#[derive(Debug, Default, Clone)]
pub struct EntityDescriptor {
    pub table_name: Option<String>,
    properties: HashMap<String, PropertySlot>,
    column_sets: HashMap<(String, Option<Dialect>), Vec<String>>,
}

impl EntityDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor declared exactly for `dialect` (`None` is the dialect neutral one).
    pub fn get(&self, name: &str, dialect: Option<Dialect>) -> Option<&PropertyDescriptor> {
        let slot = self.properties.get(name)?;
        match dialect {
            Some(dialect) => slot.dialects.get(&dialect),
            None => slot.shared.as_ref(),
        }
    }

    /// Most specific descriptor declared for the active dialect.
    pub fn find(&self, name: &str, dialect: Dialect) -> Option<&PropertyDescriptor> {
        self.get(name, Some(dialect))
            .or_else(|| self.get(name, None))
    }

    /// Get or create a descriptor, `seed` provides the initial value of a new one.
    pub fn property_mut(
        &mut self,
        name: &str,
        dialect: Option<Dialect>,
        seed: impl FnOnce() -> PropertyDescriptor,
    ) -> &mut PropertyDescriptor {
        let slot = self.properties.entry(name.to_string()).or_default();
        match dialect {
            Some(dialect) => slot.dialects.entry(dialect).or_insert_with(seed),
            None => slot.shared.get_or_insert_with(seed),
        }
    }

    /// Members of a column set, the active dialect's declaration wins over the neutral one.
    pub fn column_set(&self, name: &str, dialect: Dialect) -> Option<&[String]> {
        self.column_sets
            .get(&(name.to_string(), Some(dialect)))
            .or_else(|| self.column_sets.get(&(name.to_string(), None)))
            .map(Vec::as_slice)
    }

    pub fn declares_column_set(&self, name: &str, dialect: Option<Dialect>) -> bool {
        self.column_sets.contains_key(&(name.to_string(), dialect))
    }

    pub fn set_column_set(&mut self, name: &str, dialect: Option<Dialect>, members: Vec<String>) {
        self.column_sets.insert((name.to_string(), dialect), members);
    }

    pub fn is_empty(&self) -> bool {
        self.table_name.is_none() && self.properties.is_empty() && self.column_sets.is_empty()
    }
}

/// Anything naming a property of a record: a plain string or a derived field tag.
pub trait PropertySelector {
    fn property_name(&self) -> &str;
}

impl PropertySelector for &str {
    fn property_name(&self) -> &str {
        self
    }
}

impl PropertySelector for String {
    fn property_name(&self) -> &str {
        self
    }
}

impl PropertySelector for FieldDef {
    fn property_name(&self) -> &str {
        self.name
    }
}

impl PropertySelector for &FieldDef {
    fn property_name(&self) -> &str {
        self.name
    }
}

/// Value a property starts from when nothing was declared for it yet.
pub(crate) fn structural_default(fields: &[FieldDef], name: &str) -> PropertyDescriptor {
    let mut property = PropertyDescriptor::new(name);
    property.numeric = fields
        .iter()
        .find(|f| f.name == name)
        .is_some_and(|f| f.ty.is_integer());
    property
}

/// Fluent configuration of one entity, handed out by `SchemaRegistry::entity`.
pub struct EntityBuilder<'a, T: Record> {
    entity: &'a mut EntityDescriptor,
    shared: &'a EntityDescriptor,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: Record> EntityBuilder<'a, T> {
    pub fn new(entity: &'a mut EntityDescriptor, shared: &'a EntityDescriptor) -> Self {
        Self {
            entity,
            shared,
            _record: PhantomData,
        }
    }

    pub fn to_table(&mut self, name: impl Into<String>) -> &mut Self {
        self.entity.table_name = Some(name.into());
        self
    }

    /// Entity level descriptor, seeded from the global defaults on first access.
    pub fn property(&mut self, selector: impl PropertySelector) -> &mut PropertyDescriptor {
        self.descriptor(selector.property_name(), None)
    }

    /// Descriptor applying only when generating for `dialect`.
    pub fn property_for(
        &mut self,
        selector: impl PropertySelector,
        dialect: Dialect,
    ) -> &mut PropertyDescriptor {
        self.descriptor(selector.property_name(), Some(dialect))
    }

    pub fn has_key<S: PropertySelector>(
        &mut self,
        selectors: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        for selector in selectors {
            self.property(selector).key = true;
        }
        self
    }

    pub fn ignore(&mut self, selector: impl PropertySelector) -> &mut Self {
        self.property(selector).ignore();
        self
    }

    pub fn has_column_set<S: PropertySelector>(
        &mut self,
        name: &str,
        selectors: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.column_set(name, None, selectors)
    }

    pub fn has_column_set_for<S: PropertySelector>(
        &mut self,
        name: &str,
        dialect: Dialect,
        selectors: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.column_set(name, Some(dialect), selectors)
    }

    fn column_set<S: PropertySelector>(
        &mut self,
        name: &str,
        dialect: Option<Dialect>,
        selectors: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        let members: Vec<String> = selectors
            .into_iter()
            .map(|s| {
                let member = s.property_name().to_string();
                self.descriptor(&member, dialect);
                member
            })
            .collect();
        self.entity.set_column_set(name, dialect, members);
        self
    }

    fn descriptor(&mut self, name: &str, dialect: Option<Dialect>) -> &mut PropertyDescriptor {
        let fields = T::fields();
        if !fields.iter().any(|f| f.name == name) {
            log::warn!(
                "Property `{}` is not a field of `{}`, its mapping will never be used",
                name,
                T::type_name()
            );
        }
        let entity_level = self.entity.get(name, None).cloned();
        let shared = self.shared;
        self.entity.property_mut(name, dialect, || match dialect {
            None => shared
                .get(name, None)
                .cloned()
                .unwrap_or_else(|| structural_default(fields, name)),
            Some(dialect) => entity_level
                .or_else(|| shared.find(name, dialect).cloned())
                .unwrap_or_else(|| structural_default(fields, name)),
        })
    }
}
