//! Handlers for the `/subjects` resource.
//!
//! The public listing reads through the single-key subject cache; every
//! mutation invalidates it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use coursehub_db::models::subject::{
    CreateSubject, Subject, SubjectWithCourseCount, UpdateSubject,
};
use coursehub_db::repositories::SubjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/subjects
///
/// Public catalog of subjects with course counts, cached under a single
/// key for `SUBJECT_CACHE_TTL_SECS`.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<SubjectWithCourseCount>>> {
    if let Some(cached) = state.subject_cache.get().await {
        return Ok(Json(cached));
    }
    let subjects = SubjectRepo::list_with_course_counts(&state.pool).await?;
    state.subject_cache.put(subjects.clone()).await;
    Ok(Json(subjects))
}

/// GET /api/v1/subjects/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Subject>> {
    let subject = SubjectRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    Ok(Json(subject))
}

/// POST /api/v1/subjects (instructor only)
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<Subject>)> {
    user.require_instructor()?;
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let subject = SubjectRepo::create(&state.pool, &input).await?;
    state.subject_cache.invalidate().await;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// PUT /api/v1/subjects/{id} (instructor only)
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<Json<Subject>> {
    user.require_instructor()?;
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let subject = SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    state.subject_cache.invalidate().await;
    Ok(Json(subject))
}

/// DELETE /api/v1/subjects/{id} (instructor only)
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require_instructor()?;
    let deleted = SubjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }));
    }
    state.subject_cache.invalidate().await;
    Ok(StatusCode::NO_CONTENT)
}
