use crate::{AdapterRegistry, Connection, SchemaRegistry};
use dashmap::DashMap;
use std::sync::{Arc, LazyLock};

/// Registries keyed by connection string, the empty string holds the default one.
#[derive(Debug, Default)]
pub struct SqlGenerator {
    adapters: AdapterRegistry,
    registries: DashMap<String, Arc<SchemaRegistry>>,
}

static GLOBAL: LazyLock<SqlGenerator> = LazyLock::new(SqlGenerator::new);

impl SqlGenerator {
    pub fn new() -> Self {
        Self::with_adapters(AdapterRegistry::new())
    }

    pub fn with_adapters(adapters: AdapterRegistry) -> Self {
        Self {
            adapters,
            registries: DashMap::new(),
        }
    }

    /// Process wide instance.
    pub fn global() -> &'static SqlGenerator {
        &GLOBAL
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    /// Registry to configure for `connection_string`, `None` is the default registry whose
    /// model every registry created later starts from.
    pub fn configure(&self, connection_string: Option<&str>) -> Arc<SchemaRegistry> {
        self.registries
            .entry(connection_string.unwrap_or_default().to_string())
            .or_insert_with(|| Arc::new(SchemaRegistry::unbound()))
            .value()
            .clone()
    }

    /// Registry generating statements for `connection`, bound to the writer of its kind.
    pub fn registry_for(&self, connection: &impl Connection) -> Arc<SchemaRegistry> {
        let connection_string = connection.connection_string();
        let registry = match self.registries.get(connection_string) {
            Some(registry) => registry.value().clone(),
            None => {
                let default = self.registries.get("").map(|r| r.value().clone());
                self.registries
                    .entry(connection_string.to_string())
                    .or_insert_with(|| {
                        Arc::new(match default {
                            Some(default) => SchemaRegistry::seeded_from(&default),
                            None => SchemaRegistry::unbound(),
                        })
                    })
                    .value()
                    .clone()
            }
        };
        registry.bind_if_unbound(|| {
            log::debug!(
                "Binding a `{}` writer to a new registry",
                connection.kind()
            );
            self.adapters.get(connection)
        });
        registry
    }

    /// Drops the registry of `connection_string`, or every registry for `None`.
    pub fn reset(&self, connection_string: Option<&str>) {
        match connection_string {
            Some(connection_string) => {
                self.registries.remove(connection_string);
            }
            None => self.registries.clear(),
        }
    }
}
