use crate::{Connection, FieldDef, Record, Result, SchemaRegistry};
use parking_lot::Mutex;
use std::{
    collections::{BTreeMap, HashSet},
    future::Future,
    sync::Arc,
};
use time::OffsetDateTime;

/// Column set selecting the name of the applied migrations.
pub const MIGRATION_NAME_SET: &str = "migration_name";
/// Column set written when a migration is recorded.
pub const MIGRATION_NAME_DATE_SET: &str = "migration_name_date";

/// Row of the table tracking applied migrations.
#[derive(Record, Debug, Clone, PartialEq, Eq)]
#[record(rename_all = "PascalCase")]
pub struct Migration {
    pub name: String,
    pub date: OffsetDateTime,
}

impl Migration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: OffsetDateTime::now_utc(),
        }
    }
}

/// Query listing the names of the applied migrations.
pub fn applied_migrations_sql(registry: &SchemaRegistry) -> Result<Arc<str>> {
    declare_column_set(registry, MIGRATION_NAME_SET, [Migration::name]);
    registry.select::<Migration>(Some(MIGRATION_NAME_SET), None)
}

/// Insert recording one applied migration, bound with `@Name` and `@Date`.
pub fn record_migration_sql(registry: &SchemaRegistry) -> Result<Arc<str>> {
    declare_column_set(
        registry,
        MIGRATION_NAME_DATE_SET,
        [Migration::name, Migration::date],
    );
    registry.insert::<Migration>(Some(MIGRATION_NAME_DATE_SET), false)
}

/// Declares the set only when missing, a set configured by the application wins.
fn declare_column_set<const N: usize>(
    registry: &SchemaRegistry,
    name: &str,
    members: [FieldDef; N],
) {
    if !registry.declares_column_set::<Migration>(name) {
        registry.has_column_set::<Migration, _>(name, members);
    }
}

/// Probe counting the tables named like the migrations table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExistsQuery {
    pub sql: String,
    /// Value of the `@table` parameter.
    pub table: String,
}

pub fn table_exists_sql(registry: &SchemaRegistry) -> Result<TableExistsQuery> {
    let writer = registry.writer()?;
    Ok(TableExistsQuery {
        sql: writer.table_exists().to_string(),
        table: registry.table_name::<Migration>()?,
    })
}

/// Script as found by the runner: `2024-01-02.postgres` has name `2024-01-02` and extension
/// `postgres`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    pub name: String,
    pub extension: String,
    pub contents: String,
}

impl MigrationScript {
    pub fn new(
        name: impl Into<String>,
        extension: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_lowercase(),
            extension: extension.into().trim_start_matches('.').to_lowercase(),
            contents: contents.into(),
        }
    }

    /// Splits `file_name` on its last dot.
    pub fn from_file_name(file_name: &str, contents: impl Into<String>) -> Self {
        match file_name.rsplit_once('.') {
            Some((name, extension)) => Self::new(name, extension, contents),
            None => Self::new(file_name, "", contents),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Extension of the scripts every dialect runs.
    pub default_extension: String,
    /// Extension of the scripts reserved to the current dialect.
    pub dialect_extension: Option<String>,
}

impl MigrationOptions {
    /// Options picking the scripts named after the connection kind (`.postgres`, `.sqlite`...).
    pub fn for_connection(connection: &impl Connection) -> Self {
        Self {
            dialect_extension: Some(connection.kind().to_lowercase()),
            ..Default::default()
        }
    }

    fn accepts(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case(&self.default_extension)
            || self
                .dialect_extension
                .as_deref()
                .is_some_and(|e| extension.eq_ignore_ascii_case(e))
    }
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            default_extension: "sql".into(),
            dialect_extension: None,
        }
    }
}

/// Scripts sharing one migration name, applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMigration {
    pub name: String,
    pub scripts: Vec<MigrationScript>,
}

/// Scripts not applied yet, grouped by name in name order.
///
/// Inside a group the dialect specific scripts come before the default ones. Names are
/// compared ignoring case.
pub fn pending_migrations<S: AsRef<str>>(
    scripts: impl IntoIterator<Item = MigrationScript>,
    applied: impl IntoIterator<Item = S>,
    options: &MigrationOptions,
) -> Vec<PendingMigration> {
    let applied: HashSet<String> = applied
        .into_iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect();
    let mut groups: BTreeMap<String, Vec<MigrationScript>> = BTreeMap::new();
    for script in scripts {
        if applied.contains(&script.name.to_lowercase()) || !options.accepts(&script.extension) {
            continue;
        }
        groups.entry(script.name.clone()).or_default().push(script);
    }
    groups
        .into_iter()
        .map(|(name, mut scripts)| {
            scripts.sort_by_key(|s| s.extension.eq_ignore_ascii_case(&options.default_extension));
            PendingMigration { name, scripts }
        })
        .collect()
}

/// Runs database initialization at most once per (kind, connection string).
#[derive(Debug, Default)]
pub struct MigrationGuard {
    lock: tokio::sync::Mutex<()>,
    applied: Mutex<HashSet<(String, String)>>,
}

impl MigrationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_applied(&self, kind: &str, connection_string: &str) -> bool {
        self.applied
            .lock()
            .contains(&(kind.to_string(), connection_string.to_string()))
    }

    /// Awaits `f` unless it already succeeded for this connection, returns `None` when skipped.
    ///
    /// Concurrent callers wait for the one running; a failure leaves the connection not applied.
    pub async fn run_once<T, F, Fut>(
        &self,
        kind: &str,
        connection_string: &str,
        f: F,
    ) -> anyhow::Result<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        if self.is_applied(kind, connection_string) {
            return Ok(None);
        }
        let _guard = self.lock.lock().await;
        if self.is_applied(kind, connection_string) {
            return Ok(None);
        }
        let result = f().await?;
        self.applied
            .lock()
            .insert((kind.to_string(), connection_string.to_string()));
        log::info!("Migrations applied for `{}` connection", kind);
        Ok(Some(result))
    }
}
