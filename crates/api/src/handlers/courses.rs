//! Handlers for the `/courses` resource: public catalog, instructor
//! management, enrollment, and the student course views.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use coursehub_db::models::content::ContentWithItem;
use coursehub_db::models::course::{Course, CourseWithModuleCount, CreateCourse, UpdateCourse};
use coursehub_db::models::module::Module;
use coursehub_db::repositories::{ContentRepo, CourseRepo, ModuleRepo, SubjectRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the public catalog.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Subject slug to filter by.
    pub subject: Option<String>,
}

/// A module together with its resolved, rendered contents.
#[derive(Debug, Serialize)]
pub struct ModuleWithContents {
    #[serde(flatten)]
    pub module: Module,
    pub contents: Vec<ContentWithItem>,
}

/// Full course view for enrolled students and owners.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<ModuleWithContents>,
}

/// Response body for `POST /courses/{id}/enroll`.
#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    /// `false` when the student was already enrolled.
    pub newly_enrolled: bool,
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/courses?subject={slug}
///
/// Public catalog with per-course module counts, newest first.
pub async fn catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<Vec<CourseWithModuleCount>>> {
    let subject_id = match query.subject.as_deref() {
        Some(slug) => {
            let subject = SubjectRepo::find_by_slug(&state.pool, slug)
                .await?
                .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
            Some(subject.id)
        }
        None => None,
    };
    let courses = CourseRepo::list_catalog(&state.pool, subject_id).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/{slug}
///
/// Public course overview (no contents).
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Course>> {
    let course = CourseRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    Ok(Json(course))
}

// ---------------------------------------------------------------------------
// Instructor management
// ---------------------------------------------------------------------------

/// GET /api/v1/manage/courses
///
/// The acting instructor's own courses, newest first.
pub async fn list_owned(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Course>>> {
    user.require_instructor()?;
    let courses = CourseRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(courses))
}

/// POST /api/v1/courses (instructor only)
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    user.require_instructor()?;
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let course = CourseRepo::create(&state.pool, user.user_id, &input).await?;
    state.subject_cache.invalidate().await;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /api/v1/courses/{id} (owner only)
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<Course>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let course = CourseRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    state.subject_cache.invalidate().await;
    Ok(Json(course))
}

/// DELETE /api/v1/courses/{id} (owner only)
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CourseRepo::delete(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }));
    }
    state.subject_cache.invalidate().await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Enrollment and student views
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/enroll
pub async fn enroll(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<EnrollResponse>> {
    // The course must exist; the FK would catch it anyway, but a clean
    // 404 beats a constraint violation.
    CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    let newly_enrolled = CourseRepo::enroll(&state.pool, id, user.user_id).await?;
    tracing::info!(course_id = id, student_id = user.user_id, "Student enrolled");
    Ok(Json(EnrollResponse { newly_enrolled }))
}

/// GET /api/v1/student/courses
///
/// Courses the acting user has joined, newest enrollment first.
pub async fn list_enrolled(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Course>>> {
    let courses = CourseRepo::list_enrolled(&state.pool, user.user_id).await?;
    Ok(Json(courses))
}

/// GET /api/v1/student/courses/{id}
///
/// Full course with modules and rendered contents. Requires enrollment
/// or ownership.
pub async fn student_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CourseDetail>> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    let enrolled = CourseRepo::is_enrolled(&state.pool, id, user.user_id).await?;
    if !enrolled && course.owner_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Enroll in this course to view its content".into(),
        )));
    }

    let modules = ModuleRepo::list_by_course(&state.pool, course.id).await?;
    let mut detailed = Vec::with_capacity(modules.len());
    for module in modules {
        let contents = ContentRepo::list_with_items(&state.pool, module.id).await?;
        detailed.push(ModuleWithContents { module, contents });
    }

    Ok(Json(CourseDetail {
        course,
        modules: detailed,
    }))
}
