use crate::{Error, Result};
use url::Url;

/// What the generator needs to know about a live connection.
pub trait Connection {
    /// Driver kind, selects the writer (`postgres`, `mssql`, `sqlite`...).
    fn kind(&self) -> &str;

    /// Identifies the registry holding the configuration for this connection.
    fn connection_string(&self) -> &str;
}

/// Connection described by a URL whose scheme is the driver kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    kind: String,
    connection_string: String,
}

impl ConnectionInfo {
    pub fn new(kind: impl Into<String>, connection_string: impl Into<String>) -> Self {
        Self {
            kind: kind.into().to_lowercase(),
            connection_string: connection_string.into(),
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| {
            Error::configuration(format!("While parsing connection url `{}`: {}", url, e))
        })?;
        if !url.contains("://") {
            return Err(Error::configuration(format!(
                "Connection url `{}` must start with `{}://`",
                url,
                parsed.scheme()
            )));
        }
        Ok(Self::new(parsed.scheme(), url))
    }
}

impl Connection for ConnectionInfo {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl<C: Connection + ?Sized> Connection for &C {
    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn connection_string(&self) -> &str {
        (**self).connection_string()
    }
}
