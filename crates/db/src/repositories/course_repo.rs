//! Repository for the `courses` table and the enrollment join table.

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseWithModuleCount, CreateCourse, UpdateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, subject_id, title, slug, overview, created_at";

/// Provides CRUD and enrollment operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateCourse,
    ) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (owner_id, subject_id, title, slug, overview) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(owner_id)
            .bind(input.subject_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.overview)
            .fetch_one(pool)
            .await
    }

    /// Find a course by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a course by its URL slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE slug = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a course by ID only if `owner_id` owns it.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List the courses created by one instructor, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Course>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM courses WHERE owner_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Course>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List the public catalog with per-course module counts, newest
    /// first, optionally filtered to one subject.
    pub async fn list_catalog(
        pool: &PgPool,
        subject_id: Option<DbId>,
    ) -> Result<Vec<CourseWithModuleCount>, sqlx::Error> {
        let base = "SELECT c.id, c.owner_id, c.subject_id, c.title, c.slug, c.overview, \
                    c.created_at, COUNT(m.id) AS total_modules \
                    FROM courses c \
                    LEFT JOIN modules m ON m.course_id = c.id";
        let tail = "GROUP BY c.id ORDER BY c.created_at DESC";
        match subject_id {
            Some(subject_id) => {
                let query = format!("{base} WHERE c.subject_id = $1 {tail}");
                sqlx::query_as::<_, CourseWithModuleCount>(&query)
                    .bind(subject_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("{base} {tail}");
                sqlx::query_as::<_, CourseWithModuleCount>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Update a course. Only non-`None` fields are applied; the slug is
    /// immutable. Filtered by owner: returns `None` when the course does
    /// not exist or `owner_id` does not own it.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                subject_id = COALESCE($3, subject_id), \
                title = COALESCE($4, title), \
                overview = COALESCE($5, overview) \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(input.subject_id)
            .bind(&input.title)
            .bind(&input.overview)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course the actor owns. Cascades to modules and content
    /// associations; payload rows are left behind by design.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Enroll a student. Idempotent: re-enrolling is a no-op.
    ///
    /// Returns `true` if a new enrollment row was created.
    pub async fn enroll(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO course_students (course_id, student_id) \
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(course_id)
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether `student_id` is enrolled in `course_id`.
    pub async fn is_enrolled(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM course_students WHERE course_id = $1 AND student_id = $2",
        )
        .bind(course_id)
        .bind(student_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// List the courses a student has joined, newest enrollment first.
    pub async fn list_enrolled(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            "SELECT c.id, c.owner_id, c.subject_id, c.title, c.slug, c.overview, c.created_at \
             FROM courses c \
             JOIN course_students cs ON cs.course_id = c.id \
             WHERE cs.student_id = $1 \
             ORDER BY cs.enrolled_at DESC",
        )
            .bind(student_id)
            .fetch_all(pool)
            .await
    }
}
