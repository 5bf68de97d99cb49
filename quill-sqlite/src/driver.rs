use crate::SqliteSqlWriter;
use quill_core::Driver;

pub struct SqliteDriver {}

impl SqliteDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for SqliteDriver {
    type SqlWriter = SqliteSqlWriter;

    const NAME: &'static str = "sqlite";

    fn get_instance() -> Self {
        Self::new()
    }

    fn sql_writer(&self) -> SqliteSqlWriter {
        SqliteSqlWriter::new()
    }
}
