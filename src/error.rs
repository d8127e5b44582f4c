//! Errors surfaced by the storage layer. These are handed to the caller
//! unmodified; translating them into user-facing replies is the bot's job.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A declared-unique column (e.g. `users.tg_id`, `users.pin_code`)
    /// already holds this value.
    #[error("unique constraint violated: {0}")]
    ConstraintViolation(String),
    /// A child row references a parent that does not exist, or a referenced
    /// row was about to be deleted out from under its children.
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error("record not found")]
    NotFound,
    /// A required field was empty or an enumerated field held a value
    /// outside its declared set.
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[source] DieselError),
}

impl From<DieselError> for StorageError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => StorageError::NotFound,
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            ) => StorageError::ConstraintViolation(info.message().to_string()),
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => StorageError::ForeignKeyViolation(info.message().to_string()),
            other => StorageError::Database(other),
        }
    }
}
