//! Handlers for module contents: the polymorphic payload association.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use coursehub_db::models::content::{
    Content, ContentItem, ContentWithItem, CreateContentItem, UpdateContentItem,
};
use coursehub_db::repositories::{ContentRepo, ModuleRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::modules::ReorderResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body for content creation: the association row plus the
/// payload it points at.
#[derive(Debug, Serialize)]
pub struct ContentCreated {
    #[serde(flatten)]
    pub content: Content,
    pub item: ContentItem,
}

/// GET /api/v1/modules/{module_id}/contents (owner only)
///
/// Contents in display order, each with its payload resolved and
/// rendered.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(module_id): Path<DbId>,
) -> AppResult<Json<Vec<ContentWithItem>>> {
    ModuleRepo::find_owned(&state.pool, module_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id: module_id,
        }))?;
    let contents = ContentRepo::list_with_items(&state.pool, module_id).await?;
    Ok(Json(contents))
}

/// POST /api/v1/modules/{module_id}/contents (owner only)
///
/// The body is a tagged payload (`{"kind": "text", ...}`); a tag outside
/// the closed set is rejected at deserialization.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(module_id): Path<DbId>,
    Json(input): Json<CreateContentItem>,
) -> AppResult<(StatusCode, Json<ContentCreated>)> {
    if input.title().trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    ModuleRepo::find_owned(&state.pool, module_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id: module_id,
        }))?;
    let (content, item) =
        ContentRepo::add(&state.pool, module_id, user.user_id, &input, state.ordering_mode())
            .await?;
    Ok((StatusCode::CREATED, Json(ContentCreated { content, item })))
}

/// PUT /api/v1/contents/{id} (owner only)
///
/// Edits the payload behind the association. Fields belonging to a
/// different kind are rejected with 422-style validation errors rather
/// than silently dropped.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContentItem>,
) -> AppResult<Json<ContentItem>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let content = ContentRepo::find_owned(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;
    let item = ContentRepo::update_item(&state.pool, &content, user.user_id, &input).await?;
    Ok(Json(item))
}

/// DELETE /api/v1/contents/{id} (owner only)
///
/// Removes the association and its payload together.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ContentRepo::delete(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/contents/order
///
/// Body is a `{content_id: sort_order}` map, applied independently and
/// filtered by course ownership.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Json(assignments): Json<HashMap<DbId, i32>>,
) -> AppResult<Json<ReorderResponse>> {
    let pairs: Vec<(DbId, i32)> = assignments.into_iter().collect();
    let updated = ContentRepo::reorder(&state.pool, user.user_id, &pairs).await?;
    Ok(Json(ReorderResponse { updated }))
}
