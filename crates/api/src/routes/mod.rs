pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
///
/// /subjects                            list with course counts (public), create
/// /subjects/{key}                      get by slug (public); update, delete by id
///
/// /courses                             public catalog (?subject=slug), create
/// /courses/{key}                       public overview by slug; update, delete by id
/// /courses/{id}/enroll                 enroll acting user (POST)
/// /courses/{id}/modules                list, create (owner only)
///
/// /manage/courses                      acting instructor's courses
///
/// /modules/{id}                        update, delete (owner only)
/// /modules/{id}/contents               list, create (owner only)
/// /modules/order                       bulk reorder {id: order} (POST)
///
/// /contents/{id}                       update, delete (owner only)
/// /contents/order                      bulk reorder {id: order} (POST)
///
/// /student/courses                     enrolled courses
/// /student/courses/{id}                full course with rendered contents
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (register, login).
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        // Subject catalog; the list is served through the subject cache.
        // GET takes the slug, PUT/DELETE take the numeric id; the router
        // cannot distinguish them, so they share one path parameter.
        .route(
            "/subjects",
            get(handlers::subjects::list).post(handlers::subjects::create),
        )
        .route(
            "/subjects/{key}",
            get(handlers::subjects::get_by_slug)
                .put(handlers::subjects::update)
                .delete(handlers::subjects::delete),
        )
        // Public course catalog and instructor CRUD.
        .route(
            "/courses",
            get(handlers::courses::catalog).post(handlers::courses::create),
        )
        .route(
            "/courses/{key}",
            get(handlers::courses::get_by_slug)
                .put(handlers::courses::update)
                .delete(handlers::courses::delete),
        )
        .route("/courses/{key}/enroll", post(handlers::courses::enroll))
        .route(
            "/courses/{key}/modules",
            get(handlers::modules::list).post(handlers::modules::create),
        )
        // Instructor management listing.
        .route("/manage/courses", get(handlers::courses::list_owned))
        // Module CRUD and bulk reorder. The literal `/modules/order`
        // segment takes priority over the `{id}` capture.
        .route("/modules/order", post(handlers::modules::reorder))
        .route(
            "/modules/{id}",
            put(handlers::modules::update).delete(handlers::modules::delete),
        )
        .route(
            "/modules/{id}/contents",
            get(handlers::contents::list).post(handlers::contents::create),
        )
        // Content CRUD and bulk reorder.
        .route("/contents/order", post(handlers::contents::reorder))
        .route(
            "/contents/{id}",
            put(handlers::contents::update).delete(handlers::contents::delete),
        )
        // Student views.
        .route("/student/courses", get(handlers::courses::list_enrolled))
        .route(
            "/student/courses/{id}",
            get(handlers::courses::student_detail),
        )
}
