use crate::{
    Connection, Driver, GenericSqlWriter, PostgresSqlWriter, SqlServerSqlWriter, SqlWriter,
    SqliteSqlWriter,
};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::{fmt, sync::Arc};

/// Custom resolution replacing the kind table entirely.
pub type AdapterLookup = Arc<dyn Fn(&dyn Connection) -> Arc<dyn SqlWriter> + Send + Sync>;

/// Picks the [`SqlWriter`] serving a connection from its kind.
pub struct AdapterRegistry {
    writers: DashMap<String, Arc<dyn SqlWriter>>,
    lookup: RwLock<Option<AdapterLookup>>,
    fallback: Arc<dyn SqlWriter>,
}

impl AdapterRegistry {
    /// Registry with the built in kinds.
    pub fn new() -> Self {
        let registry = Self::empty();
        let postgres: Arc<dyn SqlWriter> = Arc::new(PostgresSqlWriter::new());
        let sql_server: Arc<dyn SqlWriter> = Arc::new(SqlServerSqlWriter::new());
        registry.register("postgres", postgres.clone());
        registry.register("postgresql", postgres);
        registry.register("mssql", sql_server.clone());
        registry.register("sqlserver", sql_server);
        registry.register("sqlite", Arc::new(SqliteSqlWriter::new()));
        for kind in ["mysql", "mariadb", "firebird"] {
            registry.register(kind, registry.fallback.clone());
        }
        registry
    }

    /// Registry without any kind, every connection gets the generic writer.
    pub fn empty() -> Self {
        Self {
            writers: DashMap::new(),
            lookup: RwLock::new(None),
            fallback: Arc::new(GenericSqlWriter::new()),
        }
    }

    pub fn register(&self, kind: &str, writer: Arc<dyn SqlWriter>) {
        self.writers.insert(kind.to_lowercase(), writer);
    }

    /// Registers the writer of `driver` under its name.
    pub fn register_driver<D: Driver>(&self, driver: &D) {
        self.register(D::NAME, Arc::new(driver.sql_writer()));
    }

    pub fn set_lookup(
        &self,
        lookup: impl Fn(&dyn Connection) -> Arc<dyn SqlWriter> + Send + Sync + 'static,
    ) {
        *self.lookup.write() = Some(Arc::new(lookup));
    }

    pub fn clear_lookup(&self) {
        *self.lookup.write() = None;
    }

    pub fn get(&self, connection: &impl Connection) -> Arc<dyn SqlWriter> {
        let lookup = self.lookup.read().clone();
        if let Some(lookup) = lookup {
            return lookup(connection);
        }
        let kind = connection.kind().to_lowercase();
        match self.writers.get(&kind) {
            Some(writer) => writer.value().clone(),
            None => {
                log::warn!(
                    "No SqlWriter registered for connection kind `{}`, using the generic one",
                    kind
                );
                self.fallback.clone()
            }
        }
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.writers.iter().map(|e| e.key().clone()).collect();
        kinds.sort();
        f.debug_struct("AdapterRegistry")
            .field("kinds", &kinds)
            .field("lookup", &self.lookup.read().is_some())
            .finish()
    }
}
