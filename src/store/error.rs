//! Errors returned by store operations.

use rusqlite::ErrorCode;
use thiserror::Error;

use crate::domain::{ArticleId, ValidationError};

/// Errors that can occur while reading or writing the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A field or uniqueness rule rejected the write; nothing was written
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A foreign key points at a record that does not exist
    #[error("{entity} {id} does not exist")]
    Reference { entity: &'static str, id: i64 },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Backfilling an article byline failed while deleting a bio.
    /// The whole deletion was rolled back.
    #[error("Failed to update article {article_id} while deleting bio: {source}")]
    CascadeWrite {
        article_id: ArticleId,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Turn a UNIQUE constraint hit into the matching validation error
pub(crate) fn unique_violation(
    err: rusqlite::Error,
    field: &'static str,
    value: &str,
) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreError::Validation(ValidationError::Duplicate {
                field,
                value: value.to_string(),
            })
        }
        _ => StoreError::Database(err),
    }
}
