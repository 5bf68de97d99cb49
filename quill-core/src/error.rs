use thiserror::Error;

/// Failures raised while resolving a mapping or generating a statement.
///
/// Both kinds point at a static configuration problem: a host usually treats them as fatal
/// and surfaces them at startup or on first use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The mapping references something that was never declared, or the registry is not ready.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The dialect cannot express the requested statement for this mapping.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        let error = Error::Configuration(message.into());
        log::error!("{}", error);
        error
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        let error = Error::UnsupportedOperation(message.into());
        log::error!("{}", error);
        error
    }
}

pub type Result<T> = std::result::Result<T, Error>;
