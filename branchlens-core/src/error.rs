//! Error types for branchlens-core

use thiserror::Error;

/// Failure of a fetch-facade call.
///
/// Transport failures are absorbed by the session (logged, slot emptied);
/// validation failures are reported back to whoever submitted the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The backend could not be reached or returned garbage.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request was rejected before it reached the backend.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl FetchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FetchError::Validation(_))
    }
}

/// Errors raised while loading or validating a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Error reading the dataset file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML document does not match the dataset layout
    #[error("dataset parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two file changes share an id
    #[error("change id `{0}` appears more than once")]
    DuplicateChangeId(String),

    /// Two branches share a name
    #[error("branch `{0}` appears more than once")]
    DuplicateBranch(String),
}
