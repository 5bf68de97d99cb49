use crate::SqlServerSqlWriter;
use quill_core::Driver;

pub struct SqlServerDriver {}

impl SqlServerDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for SqlServerDriver {
    type SqlWriter = SqlServerSqlWriter;

    const NAME: &'static str = "mssql";

    fn get_instance() -> Self {
        Self::new()
    }

    fn sql_writer(&self) -> SqlServerSqlWriter {
        SqlServerSqlWriter::new()
    }
}
