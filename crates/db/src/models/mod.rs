//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod content;
pub mod course;
pub mod module;
pub mod subject;
pub mod user;

use validator::ValidationError;

/// validator adapter for the shared slug rule.
pub(crate) fn slug_format(slug: &str) -> Result<(), ValidationError> {
    if coursehub_core::slug::is_valid_slug(slug) {
        Ok(())
    } else {
        Err(ValidationError::new("slug_format"))
    }
}
