//! Unified error types and result handling for `CheckinBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`], and the API layer
//! maps each variant onto an HTTP status code. Persistence failures get their
//! own [`Error::Storage`] variant because the check-in store deliberately keeps
//! serving from memory when the snapshot write fails, and callers need to tell
//! that situation apart from a hard database error.

use thiserror::Error;

/// Application-wide error type covering configuration, validation,
/// persistence, and authorization failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or parsed (environment, directory file).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what failed to load or parse
        message: String,
    },

    /// Caller supplied malformed input (empty employee id, out-of-range rating).
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the rejected input
        message: String,
    },

    /// The durable snapshot could not be read or written. In-memory state
    /// is unaffected when this occurs during a submission.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the failed snapshot operation
        message: String,
    },

    /// Database error from `SeaORM` operations.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The requested employee id does not exist in the directory.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that could not be resolved
        id: String,
    },

    /// Login failed. The same variant covers unknown emails and wrong
    /// passwords so responses do not reveal which accounts exist.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The request carried no session token, or the token is not active.
    #[error("A valid session token is required")]
    SessionRequired,

    /// The session is valid but the role does not permit this operation.
    #[error("Not authorized: {message}")]
    Forbidden {
        /// Description of the missing permission
        message: String,
    },

    /// I/O error (data directory creation, file access).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
