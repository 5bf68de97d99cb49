use crate::PostgresSqlWriter;
use quill_core::Driver;

pub struct PostgresDriver {}

impl PostgresDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for PostgresDriver {
    type SqlWriter = PostgresSqlWriter;

    const NAME: &'static str = "postgres";

    fn get_instance() -> Self {
        Self::new()
    }

    fn sql_writer(&self) -> PostgresSqlWriter {
        PostgresSqlWriter::new()
    }
}
