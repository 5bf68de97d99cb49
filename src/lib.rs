extern crate self as quill;

mod adapters;
mod generator;
mod migration;

pub use adapters::*;
pub use generator::*;
pub use migration::*;
pub use quill_core::*;
pub use quill_macros::Record;
pub use quill_mssql::{SqlServerDriver, SqlServerSqlWriter};
pub use quill_postgres::{POSTGRES_NON_PRIMITIVE_TYPES, PostgresDriver, PostgresSqlWriter};
pub use quill_sqlite::{SqliteDriver, SqliteSqlWriter};
