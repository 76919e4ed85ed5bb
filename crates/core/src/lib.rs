//! Pure domain types and logic shared across the coursehub backend.
//!
//! Nothing in this crate touches the database or the HTTP layer; the
//! `db` and `api` crates build on the types defined here.

pub mod content;
pub mod error;
pub mod slug;
pub mod types;
