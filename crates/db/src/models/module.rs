//! Module entity model and DTOs.
//!
//! Each course is divided into modules; `sort_order` is sequential per
//! course and assigned by the ordering engine when omitted on insert.

use coursehub_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
}

/// DTO for creating a new module.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateModule {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Explicit position. When `None` the ordering engine assigns the
    /// next value in the course's scope; when `Some` it is stored
    /// verbatim.
    pub sort_order: Option<i32>,
}

/// DTO for updating a module. Updates never recompute `sort_order`; a
/// `None` here means "leave unchanged".
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateModule {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}
