//! HTTP-level integration tests for subjects, courses, modules,
//! ownership scoping, enrollment, and the student course view.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth, register_user,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a subject through the API and return its id.
async fn create_subject(app: Router, token: &str, title: &str, slug: &str) -> i64 {
    let body = serde_json::json!({ "title": title, "slug": slug });
    let response = post_json_auth(app, "/api/v1/subjects", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a course through the API and return its id.
async fn create_course(app: Router, token: &str, subject_id: i64, title: &str, slug: &str) -> i64 {
    let body = serde_json::json!({
        "subject_id": subject_id,
        "title": title,
        "slug": slug,
        "overview": "A test course",
    });
    let response = post_json_auth(app, "/api/v1/courses", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

/// The public subject list carries course counts and reflects mutations
/// despite the cache in front of it.
#[sqlx::test(migrations = "../db/migrations")]
async fn subject_list_is_public_and_cache_sees_mutations(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(app.clone(), "prof", "instructor").await;

    // Prime the cache with an empty catalog.
    let response = get(app.clone(), "/api/v1/subjects").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    // Creating a subject invalidates the cache.
    let subject_id = create_subject(app.clone(), &token, "Programming", "programming").await;
    create_course(app.clone(), &token, subject_id, "Rust 101", "rust-101").await;

    let response = get(app, "/api/v1/subjects").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["slug"], "programming");
    assert_eq!(json[0]["total_courses"], 1);
}

/// Students cannot create subjects.
#[sqlx::test(migrations = "../db/migrations")]
async fn subject_creation_requires_instructor(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(app.clone(), "learner", "student").await;

    let body = serde_json::json!({ "title": "Math", "slug": "math" });
    let response = post_json_auth(app, "/api/v1/subjects", &token, body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An ill-formed slug is rejected with a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn bad_slug_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(app.clone(), "prof", "instructor").await;

    let body = serde_json::json!({ "title": "Math", "slug": "Not A Slug!" });
    let response = post_json_auth(app, "/api/v1/subjects", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// The catalog is public, filterable by subject slug, and counts modules.
#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_filters_by_subject_slug(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(app.clone(), "prof", "instructor").await;

    let prog = create_subject(app.clone(), &token, "Programming", "programming").await;
    let math = create_subject(app.clone(), &token, "Math", "math").await;
    let rust_id = create_course(app.clone(), &token, prog, "Rust 101", "rust-101").await;
    create_course(app.clone(), &token, math, "Algebra", "algebra").await;

    let body = serde_json::json!({ "title": "Basics" });
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{rust_id}/modules"),
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.clone(), "/api/v1/courses").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = get(app, "/api/v1/courses?subject=programming").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["slug"], "rust-101");
    assert_eq!(json[0]["total_modules"], 1);
}

/// Filtering by a nonexistent subject slug is a 404, not an empty list.
#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_unknown_subject_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/courses?subject=nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Update and delete only touch courses the caller owns.
#[sqlx::test(migrations = "../db/migrations")]
async fn course_mutations_are_ownership_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_user(app.clone(), "owner", "instructor").await;
    let rival = register_user(app.clone(), "rival", "instructor").await;

    let subject = create_subject(app.clone(), &owner, "Programming", "programming").await;
    let course = create_course(app.clone(), &owner, subject, "Rust 101", "rust-101").await;

    // A different instructor gets 404, not 403: foreign courses are
    // invisible, same as the management listing.
    let body = serde_json::json!({ "title": "Hijacked" });
    let response =
        put_json_auth(app.clone(), &format!("/api/v1/courses/{course}"), &rival, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &format!("/api/v1/courses/{course}"), &rival).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner succeeds.
    let body = serde_json::json!({ "title": "Rust 102" });
    let response =
        put_json_auth(app.clone(), &format!("/api/v1/courses/{course}"), &owner, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Rust 102");

    let response = delete_auth(app, &format!("/api/v1/courses/{course}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// The management listing shows only the caller's courses.
#[sqlx::test(migrations = "../db/migrations")]
async fn manage_listing_shows_only_own_courses(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register_user(app.clone(), "alice", "instructor").await;
    let bob = register_user(app.clone(), "bob", "instructor").await;

    let subject = create_subject(app.clone(), &alice, "Programming", "programming").await;
    create_course(app.clone(), &alice, subject, "Rust 101", "rust-101").await;

    let response = get_auth(app.clone(), "/api/v1/manage/courses", &alice).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = get_auth(app, "/api/v1/manage/courses", &bob).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

/// A duplicate course slug returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_course_slug_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(app.clone(), "prof", "instructor").await;
    let subject = create_subject(app.clone(), &token, "Programming", "programming").await;
    create_course(app.clone(), &token, subject, "Rust 101", "rust-101").await;

    let body = serde_json::json!({
        "subject_id": subject,
        "title": "Another",
        "slug": "rust-101",
    });
    let response = post_json_auth(app, "/api/v1/courses", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Enrollment and the student view
// ---------------------------------------------------------------------------

/// Enrollment is idempotent and gates the student course view.
#[sqlx::test(migrations = "../db/migrations")]
async fn enrollment_gates_the_student_view(pool: PgPool) {
    let app = common::build_test_app(pool);
    let prof = register_user(app.clone(), "prof", "instructor").await;
    let student = register_user(app.clone(), "student", "student").await;

    let subject = create_subject(app.clone(), &prof, "Programming", "programming").await;
    let course = create_course(app.clone(), &prof, subject, "Rust 101", "rust-101").await;

    // Not enrolled yet: the full view is forbidden.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/student/courses/{course}"),
        &student,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // First enrollment creates the row, the second is a no-op.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{course}/enroll"),
        &student,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["newly_enrolled"], true);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{course}/enroll"),
        &student,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(body_json(response).await["newly_enrolled"], false);

    // Enrolled: the view opens up and lists modules.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/student/courses/{course}"),
        &student,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["slug"], "rust-101");
    assert!(json["modules"].is_array());

    // The enrollment listing shows the course.
    let response = get_auth(app, "/api/v1/student/courses", &student).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["slug"], "rust-101");
}

/// The owner can open the full view without enrolling.
#[sqlx::test(migrations = "../db/migrations")]
async fn owner_bypasses_the_enrollment_gate(pool: PgPool) {
    let app = common::build_test_app(pool);
    let prof = register_user(app.clone(), "prof", "instructor").await;

    let subject = create_subject(app.clone(), &prof, "Programming", "programming").await;
    let course = create_course(app.clone(), &prof, subject, "Rust 101", "rust-101").await;

    let response = get_auth(app, &format!("/api/v1/student/courses/{course}"), &prof).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Enrolling in a course that does not exist is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn enroll_in_missing_course_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let student = register_user(app.clone(), "student", "student").await;

    let response = post_json_auth(
        app,
        "/api/v1/courses/999999/enroll",
        &student,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
