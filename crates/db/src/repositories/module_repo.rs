//! Repository for the `modules` table.
//!
//! Inserts run through the ordering engine: a module saved without an
//! explicit `sort_order` receives the next value in its course's scope.

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::module::{CreateModule, Module, UpdateModule};
use crate::ordering::{self, OrderingMode, MODULE_ORDER};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, title, description, sort_order";

/// Provides CRUD and reorder operations for modules.
pub struct ModuleRepo;

impl ModuleRepo {
    /// Insert a new module into `course_id`, returning the created row.
    ///
    /// An explicit `sort_order` in `input` is stored verbatim. When it is
    /// `None`, the next value in the course's scope is assigned according
    /// to `mode` (see [`ordering`] for the legacy/strict distinction).
    pub async fn create(
        pool: &PgPool,
        course_id: DbId,
        input: &CreateModule,
        mode: OrderingMode,
    ) -> Result<Module, sqlx::Error> {
        if let Some(explicit) = input.sort_order {
            return Self::insert(pool, course_id, input, explicit).await;
        }
        match mode {
            OrderingMode::Legacy => {
                // Read max, then insert. Two round trips, no guard.
                let next = ordering::next_order_value(pool, &MODULE_ORDER, course_id).await?;
                Self::insert(pool, course_id, input, next).await
            }
            OrderingMode::Strict => {
                let mut tx = pool.begin().await?;
                ordering::lock_scope(&mut tx, &MODULE_ORDER, course_id).await?;
                let next =
                    ordering::next_order_value(&mut *tx, &MODULE_ORDER, course_id).await?;
                let query = format!(
                    "INSERT INTO modules (course_id, title, description, sort_order) \
                     VALUES ($1, $2, $3, $4) \
                     RETURNING {COLUMNS}"
                );
                let module = sqlx::query_as::<_, Module>(&query)
                    .bind(course_id)
                    .bind(&input.title)
                    .bind(&input.description)
                    .bind(next)
                    .fetch_one(&mut *tx)
                    .await?;
                tx.commit().await?;
                Ok(module)
            }
        }
    }

    async fn insert(
        pool: &PgPool,
        course_id: DbId,
        input: &CreateModule,
        sort_order: i32,
    ) -> Result<Module, sqlx::Error> {
        let query = format!(
            "INSERT INTO modules (course_id, title, description, sort_order) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a module by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = $1");
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a module by ID only if `owner_id` owns its course.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Module>, sqlx::Error> {
        sqlx::query_as::<_, Module>(
            "SELECT m.id, m.course_id, m.title, m.description, m.sort_order \
             FROM modules m \
             JOIN courses c ON c.id = m.course_id \
             WHERE m.id = $1 AND c.owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
    }

    /// List a course's modules in display order.
    ///
    /// Secondary sort on `id` keeps the listing deterministic when two
    /// rows share a sort_order (possible under legacy-mode races).
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Module>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM modules WHERE course_id = $1 ORDER BY sort_order, id");
        sqlx::query_as::<_, Module>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Update a module the actor owns. Only non-`None` fields are
    /// applied; `sort_order` is never recomputed, only overwritten when
    /// explicitly supplied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateModule,
    ) -> Result<Option<Module>, sqlx::Error> {
        sqlx::query_as::<_, Module>(
            "UPDATE modules m SET \
                title = COALESCE($3, m.title), \
                description = COALESCE($4, m.description), \
                sort_order = COALESCE($5, m.sort_order) \
             FROM courses c \
             WHERE m.id = $1 AND c.id = m.course_id AND c.owner_id = $2 \
             RETURNING m.id, m.course_id, m.title, m.description, m.sort_order",
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.sort_order)
        .fetch_optional(pool)
        .await
    }

    /// Delete a module the actor owns. Cascades to content associations;
    /// payload rows are not touched here.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM modules m USING courses c \
             WHERE m.id = $1 AND c.id = m.course_id AND c.owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a bulk id-to-position mapping as independent best-effort
    /// updates, each filtered by course ownership. No transaction, no
    /// gap or duplicate validation. Returns how many rows were updated.
    pub async fn reorder(
        pool: &PgPool,
        owner_id: DbId,
        orders: &[(DbId, i32)],
    ) -> Result<u64, sqlx::Error> {
        let mut updated = 0;
        for &(id, sort_order) in orders {
            let result = sqlx::query(
                "UPDATE modules m SET sort_order = $3 \
                 FROM courses c \
                 WHERE m.id = $1 AND c.id = m.course_id AND c.owner_id = $2",
            )
            .bind(id)
            .bind(owner_id)
            .bind(sort_order)
            .execute(pool)
            .await?;
            updated += result.rows_affected();
        }
        Ok(updated)
    }
}
