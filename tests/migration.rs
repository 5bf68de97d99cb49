#[cfg(test)]
mod tests {
    use quill::{
        ConnectionInfo, MIGRATION_NAME_SET, Migration, MigrationGuard, MigrationOptions,
        MigrationScript, PostgresSqlWriter, SchemaRegistry, SqliteSqlWriter,
        applied_migrations_sql, pending_migrations, record_migration_sql, table_exists_sql,
    };
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    #[test]
    fn migration_statements() {
        let registry = SchemaRegistry::new(Arc::new(PostgresSqlWriter::new()));
        assert_eq!(
            &*applied_migrations_sql(&registry).unwrap(),
            "SELECT \"Name\" FROM \"Migrations\""
        );
        assert_eq!(
            &*record_migration_sql(&registry).unwrap(),
            "INSERT INTO \"Migrations\" (\"Name\",\"Date\") VALUES (@Name,@Date)"
        );
        let probe = table_exists_sql(&registry).unwrap();
        assert_eq!(
            probe.sql,
            "SELECT COUNT(1) FROM information_schema.tables WHERE table_name = @table"
        );
        assert_eq!(probe.table, "Migrations");

        let sqlite = SchemaRegistry::new(Arc::new(SqliteSqlWriter::new()));
        assert_eq!(
            table_exists_sql(&sqlite).unwrap().sql,
            "SELECT count(*) FROM sqlite_master WHERE type='table' AND name=@table"
        );
    }

    #[test]
    fn migration_column_sets_are_declared_once() {
        let registry = SchemaRegistry::new(Arc::new(PostgresSqlWriter::new()));
        assert!(!registry.declares_column_set::<Migration>(MIGRATION_NAME_SET));
        let first = applied_migrations_sql(&registry).unwrap();
        assert!(registry.declares_column_set::<Migration>(MIGRATION_NAME_SET));
        assert!(Arc::ptr_eq(&first, &applied_migrations_sql(&registry).unwrap()));

        let registry = SchemaRegistry::new(Arc::new(PostgresSqlWriter::new()));
        registry.has_column_set::<Migration, _>(MIGRATION_NAME_SET, ["Name", "Date"]);
        assert_eq!(
            &*applied_migrations_sql(&registry).unwrap(),
            "SELECT \"Name\",\"Date\" FROM \"Migrations\""
        );
    }

    #[test]
    fn migration_statements_without_writer() {
        let registry = SchemaRegistry::unbound();
        assert!(applied_migrations_sql(&registry).is_err());
        assert!(table_exists_sql(&registry).is_err());
    }

    #[test]
    fn script_names() {
        let script = MigrationScript::from_file_name("2024-03-01_Users.Postgres", "");
        assert_eq!(script.name, "2024-03-01_users");
        assert_eq!(script.extension, "postgres");
        let script = MigrationScript::from_file_name("README", "");
        assert_eq!(script.name, "readme");
        assert_eq!(script.extension, "");
    }

    #[test]
    fn pending_scripts() {
        let scripts = [
            ("2024-02-01.sql", "b"),
            ("2024-01-01.sql", "a"),
            ("2024-03-01.sql", "c generic"),
            ("2024-03-01.postgres", "c postgres"),
            ("2024-03-01.sqlite", "c sqlite"),
            ("notes.txt", "skip"),
        ]
        .map(|(file, contents)| MigrationScript::from_file_name(file, contents));
        let options =
            MigrationOptions::for_connection(&ConnectionInfo::parse("postgres://db/app").unwrap());
        let pending = pending_migrations(scripts, ["2024-01-01"], &options);
        let names: Vec<_> = pending.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["2024-02-01", "2024-03-01"]);
        let contents: Vec<_> = pending[1]
            .scripts
            .iter()
            .map(|s| s.contents.as_str())
            .collect();
        assert_eq!(contents, ["c postgres", "c generic"]);
    }

    #[test]
    fn pending_scripts_default_options() {
        let scripts = [
            MigrationScript::new("B", "SQL", "b"),
            MigrationScript::new("a", "sql", "a"),
            MigrationScript::new("a", "postgres", "a postgres"),
        ];
        let pending = pending_migrations(scripts, ["b"], &MigrationOptions::default());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "a");
        assert_eq!(pending[0].scripts.len(), 1);
    }

    #[tokio::test]
    async fn guard_runs_once() {
        let guard = Arc::new(MigrationGuard::new());
        let runs = Arc::new(AtomicUsize::new(0));
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let guard = guard.clone();
                let runs = runs.clone();
                tokio::spawn(async move {
                    guard
                        .run_once("postgres", "postgres://db/app", || async {
                            tokio::time::sleep(Duration::from_millis(10)).await;
                            runs.fetch_add(1, Ordering::SeqCst);
                            Ok(3)
                        })
                        .await
                })
            })
            .collect();
        let mut applied = 0;
        for task in tasks {
            if let Some(count) = task.await.unwrap().unwrap() {
                assert_eq!(count, 3);
                applied += 1;
            }
        }
        assert_eq!(applied, 1);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(guard.is_applied("postgres", "postgres://db/app"));
        assert!(!guard.is_applied("sqlite", "postgres://db/app"));
    }

    #[tokio::test]
    async fn guard_retries_after_failure() {
        let guard = MigrationGuard::new();
        let failed = guard
            .run_once("sqlite", "app.db", || async {
                Err::<(), _>(anyhow::anyhow!("script failed"))
            })
            .await;
        assert!(failed.is_err());
        assert!(!guard.is_applied("sqlite", "app.db"));
        let retried = guard
            .run_once("sqlite", "app.db", || async { Ok(()) })
            .await
            .unwrap();
        assert_eq!(retried, Some(()));
        assert!(guard.is_applied("sqlite", "app.db"));
    }
}
