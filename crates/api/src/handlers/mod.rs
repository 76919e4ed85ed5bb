//! HTTP handlers, one module per resource.

pub mod auth;
pub mod contents;
pub mod courses;
pub mod modules;
pub mod subjects;
