//! Subject entity model and DTOs.

use coursehub_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub title: String,
    pub slug: String,
}

/// A subject annotated with how many courses reference it. Used by the
/// public catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubjectWithCourseCount {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub total_courses: i64,
}

/// DTO for creating a new subject.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubject {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(custom(function = super::slug_format), length(max = 200))]
    pub slug: String,
}

/// DTO for updating a subject. The slug is immutable once referenced in
/// routes, so only the title may change.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSubject {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
}
