use thiserror::Error;

/// Result alias returned by catalog repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors raised while loading or reading the catalog.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    /// The catalog file is not valid JSON or misses required fields.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two records of the same collection share a key.
    #[error("duplicate {collection} key `{key}`")]
    Duplicate {
        collection: &'static str,
        key: String,
    },
}
