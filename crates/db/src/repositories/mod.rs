//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Ownership-scoped
//! operations take the acting user's id explicitly; there is no ambient
//! identity.

pub mod content_repo;
pub mod course_repo;
pub mod module_repo;
pub mod subject_repo;
pub mod user_repo;

pub use content_repo::ContentRepo;
pub use course_repo::CourseRepo;
pub use module_repo::ModuleRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;
