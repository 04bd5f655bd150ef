/// Failures surfaced by the storage layer. Absence of a row is reported as
/// `Ok(None)` by the fetch/update/delete functions, not as an error.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
