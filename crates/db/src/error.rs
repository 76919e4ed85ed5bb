use coursehub_core::error::CoreError;

/// Error type for repository operations that can fail on either the
/// database or a domain rule (e.g. resolving a content association whose
/// stored tag is outside the legal set).
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience alias for repository return values.
pub type DbResult<T> = Result<T, DbError>;
