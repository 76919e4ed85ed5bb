//! Handlers for course modules, including the bulk reorder endpoint.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use coursehub_db::models::module::{CreateModule, Module, UpdateModule};
use coursehub_db::repositories::{CourseRepo, ModuleRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body for the bulk reorder endpoints.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    /// Rows actually updated. Unknown or foreign ids are skipped.
    pub updated: u64,
}

/// GET /api/v1/courses/{course_id}/modules (owner only)
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<Vec<Module>>> {
    CourseRepo::find_owned(&state.pool, course_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;
    let modules = ModuleRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(modules))
}

/// POST /api/v1/courses/{course_id}/modules (owner only)
///
/// A module created without `sort_order` is appended to the end of the
/// course; an explicit value is stored verbatim.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateModule>,
) -> AppResult<(StatusCode, Json<Module>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    CourseRepo::find_owned(&state.pool, course_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;
    let module =
        ModuleRepo::create(&state.pool, course_id, &input, state.ordering_mode()).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

/// PUT /api/v1/modules/{id} (owner only)
///
/// `sort_order` is only changed when the body carries it; an update that
/// omits it never recomputes the stored position.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateModule>,
) -> AppResult<Json<Module>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let module = ModuleRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id,
        }))?;
    Ok(Json(module))
}

/// DELETE /api/v1/modules/{id} (owner only)
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ModuleRepo::delete(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/modules/order
///
/// Body is a `{module_id: sort_order}` map. Each assignment is applied
/// independently and filtered to modules the caller owns; the response
/// reports how many rows changed.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Json(assignments): Json<HashMap<DbId, i32>>,
) -> AppResult<Json<ReorderResponse>> {
    let pairs: Vec<(DbId, i32)> = assignments.into_iter().collect();
    let updated = ModuleRepo::reorder(&state.pool, user.user_id, &pairs).await?;
    Ok(Json(ReorderResponse { updated }))
}
