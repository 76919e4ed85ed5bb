//! Repository for the `subjects` table.

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::subject::{CreateSubject, Subject, SubjectWithCourseCount, UpdateSubject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug";

/// Provides CRUD operations for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Insert a new subject, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSubject) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (title, slug) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    /// Find a subject by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a subject by its URL slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE slug = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all subjects ordered by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects ORDER BY title");
        sqlx::query_as::<_, Subject>(&query).fetch_all(pool).await
    }

    /// List all subjects with their course counts, ordered by title.
    ///
    /// Backs the public catalog; the api layer caches this result under a
    /// single key.
    pub async fn list_with_course_counts(
        pool: &PgPool,
    ) -> Result<Vec<SubjectWithCourseCount>, sqlx::Error> {
        sqlx::query_as::<_, SubjectWithCourseCount>(
            "SELECT s.id, s.title, s.slug, COUNT(c.id) AS total_courses \
             FROM subjects s \
             LEFT JOIN courses c ON c.subject_id = s.id \
             GROUP BY s.id, s.title, s.slug \
             ORDER BY s.title",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a subject's title. The slug is immutable.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubject,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET title = COALESCE($2, title) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subject. Cascades to its courses.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
