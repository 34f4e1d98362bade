use thiserror::Error;

/// Top-level error type for Awab.
///
/// Subsystem crates define their own error types and convert into or out of
/// `AwabError` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AwabError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for AwabError {
    fn from(err: toml::de::Error) -> Self {
        AwabError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AwabError {
    fn from(err: toml::ser::Error) -> Self {
        AwabError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AwabError {
    fn from(err: serde_json::Error) -> Self {
        AwabError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Awab operations.
pub type Result<T> = std::result::Result<T, AwabError>;
