//! Catalog Error Types
//!
//! Errors raised by catalog collaborators. Only `BadRequest` and `NotFound`
//! are treated as a catalog miss; everything else must reach the caller.

use thiserror::Error;

/// Central error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed catalog query: {0}")]
    BadRequest(String),

    #[error("Not found in catalog: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Catalog connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Database(rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Discriminant of a [`CatalogError`], for matching without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    BadRequest,
    NotFound,
    InvalidArgument,
    Connection,
    Database,
    Io,
}

impl CatalogError {
    pub fn kind(&self) -> CatalogErrorKind {
        match self {
            CatalogError::BadRequest(_) => CatalogErrorKind::BadRequest,
            CatalogError::NotFound(_) => CatalogErrorKind::NotFound,
            CatalogError::InvalidArgument(_) => CatalogErrorKind::InvalidArgument,
            CatalogError::Connection(_) => CatalogErrorKind::Connection,
            CatalogError::Database(_) => CatalogErrorKind::Database,
            CatalogError::Io(_) => CatalogErrorKind::Io,
        }
    }

    /// True for the "no data" conditions a fallback strategy may swallow
    pub fn is_catalog_miss(&self) -> bool {
        matches!(
            self.kind(),
            CatalogErrorKind::BadRequest | CatalogErrorKind::NotFound
        )
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => CatalogError::NotFound(err.to_string()),
            other => CatalogError::Database(other),
        }
    }
}

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for CatalogError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        CatalogError::Connection(err.to_string())
    }
}
