//! HTTP layer: axum handlers, router, middleware, configuration, auth,
//! and the subject-catalog cache.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
