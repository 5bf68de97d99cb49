use crate::{Connection, SqlWriter};

/// Ties a dialect crate to the connection kind it serves.
pub trait Driver {
    /// Connection kind, also the scheme of its connection urls.
    const NAME: &'static str;

    type SqlWriter: SqlWriter + 'static;

    fn get_instance() -> Self;

    fn sql_writer(&self) -> Self::SqlWriter;

    fn accepts(&self, connection: &impl Connection) -> bool {
        connection.kind().eq_ignore_ascii_case(Self::NAME)
    }
}
