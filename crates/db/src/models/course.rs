//! Course entity model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub owner_id: DbId,
    pub subject_id: DbId,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub created_at: Timestamp,
}

/// A course annotated with its module count. Used by the public catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseWithModuleCount {
    pub id: DbId,
    pub owner_id: DbId,
    pub subject_id: DbId,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub created_at: Timestamp,
    pub total_modules: i64,
}

/// DTO for creating a new course. The owner is never taken from the body;
/// it is the authenticated actor, passed explicitly to the repository.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourse {
    pub subject_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(custom(function = super::slug_format), length(max = 200))]
    pub slug: String,
    #[serde(default)]
    pub overview: String,
}

/// DTO for updating a course. All fields optional; the slug is immutable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCourse {
    pub subject_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub overview: Option<String>,
}

/// An enrollment row from the `course_students` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub course_id: DbId,
    pub student_id: DbId,
    pub enrolled_at: Timestamp,
}
