use crate::types::DbId;

/// Domain-level error taxonomy shared by the db and api crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A content type tag outside the closed set `{text, video, image, file}`.
    ///
    /// Raised at validation time before an association row is created, and
    /// again (loudly, never as a silent null) if a stored tag fails to
    /// resolve at read time.
    #[error("Unknown content kind: {tag}")]
    UnknownContentKind { tag: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
