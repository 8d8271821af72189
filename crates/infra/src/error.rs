use thiserror::Error;

use rigcheck_core::BuildId;

/// Catalog collaborator failure.
///
/// Returned to the caller as is; nothing in this crate retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("catalog payload could not be parsed: {0}")]
    Parse(String),
}

/// Persistence collaborator failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("build store backend failed: {0}")]
    Backend(String),

    #[error("build record could not be encoded: {0}")]
    Serialization(String),

    #[error("build {0} not found")]
    NotFound(BuildId),
}

/// Any failure surfaced by a multi-collaborator flow (e.g. loading a build).
#[derive(Debug, Error)]
pub enum InfraError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
