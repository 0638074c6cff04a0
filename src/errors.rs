//! Application error taxonomy.
//!
//! Every operation in this crate returns one of five typed outcomes so that
//! callers (routing or presentation collaborators) can map them to
//! user-facing responses uniformly:
//!
//! - [`Error::Validation`]: a required field is missing or empty
//! - [`Error::NotFound`]: the referenced recipe/ingredient/user does not exist
//! - [`Error::PermissionDenied`]: the actor does not own the target recipe
//! - [`Error::Conflict`]: a unique constraint was violated in the store
//! - [`Error::Database`]: any other failure inside a unit of work; the unit
//!   has been rolled back completely before the error surfaces

use crate::db::errors::DbError;
use crate::types::UserId;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Missing or empty required field (title, ingredient name, username)
    #[error("{message}")]
    Validation { message: String },

    /// Requested resource not found
    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Actor does not own the resource it is trying to mutate
    #[error("user {actor} does not own {resource} {id}")]
    PermissionDenied {
        resource: &'static str,
        id: i64,
        actor: UserId,
    },

    /// Unique-constraint conflict, e.g. a duplicate dictionary name race
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Database operation error; the enclosing unit of work was rolled back
    #[error(transparent)]
    Database(DbError),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }
}

/// Unique violations surface as [`Error::Conflict`] so callers never have to
/// inspect store internals to distinguish them.
impl From<DbError> for Error {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { message, .. } => Error::Conflict { message },
            other => Error::Database(other),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::from(DbError::from(err))
    }
}

/// Type alias for core operation results
pub type Result<T> = std::result::Result<T, Error>;
