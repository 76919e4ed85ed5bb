//! Ordering assignment for rows that keep a relative position within a
//! scope (modules within a course, contents within a module).
//!
//! When a row is inserted without an explicit order, the next value is
//! `max(existing orders in scope) + 1`, or 0 when the scope is empty.
//! An explicitly supplied order is stored verbatim and never recomputed,
//! and updates never reassign it.
//!
//! Two modes exist:
//!
//! - [`OrderingMode::Legacy`] computes the maximum and inserts in two
//!   separate round trips with no guard. Concurrent inserts into the same
//!   scope can read the same maximum and assign duplicate order values.
//!   This preserves the original system's behavior; no uniqueness
//!   constraint exists at the database level, and list queries order by
//!   `(sort_order, id)` so duplicates display deterministically.
//! - [`OrderingMode::Strict`] runs the compute and the insert inside one
//!   transaction holding a per-scope advisory lock, serializing writers
//!   on the same scope. Opt-in via `STRICT_ORDERING=true`.

use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

/// How order values are assigned on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingMode {
    /// Read max, then insert, with no transactional guard.
    Legacy,
    /// Advisory-locked transaction around compute + insert.
    Strict,
}

/// Identifies an ordered table and the column whose equality defines the
/// grouping within which order values are sequential.
#[derive(Debug, Clone, Copy)]
pub struct OrderScope {
    pub table: &'static str,
    pub order_column: &'static str,
    /// `None` degenerates to a single global sequence across the table.
    pub scope_column: Option<&'static str>,
}

/// Modules are ordered per course.
pub const MODULE_ORDER: OrderScope = OrderScope {
    table: "modules",
    order_column: "sort_order",
    scope_column: Some("course_id"),
};

/// Content associations are ordered per module.
pub const CONTENT_ORDER: OrderScope = OrderScope {
    table: "contents",
    order_column: "sort_order",
    scope_column: Some("module_id"),
};

/// Base assignment rule: one past the current maximum, or 0 for the
/// first row in a scope. The empty scope is the designed base case, not
/// an error.
pub fn next_after(max: Option<i32>) -> i32 {
    max.map_or(0, |m| m + 1)
}

/// Compute the next order value for `scope_id` within `scope`.
///
/// Generic over [`PgExecutor`] so legacy mode can run it directly on the
/// pool and strict mode inside an open transaction.
pub async fn next_order_value<'e, E>(
    executor: E,
    scope: &OrderScope,
    scope_id: DbId,
) -> Result<i32, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let max: Option<i32> = match scope.scope_column {
        Some(col) => {
            let query = format!(
                "SELECT MAX({order}) FROM {table} WHERE {col} = $1",
                order = scope.order_column,
                table = scope.table,
            );
            sqlx::query_scalar(&query)
                .bind(scope_id)
                .fetch_one(executor)
                .await?
        }
        None => {
            let query = format!(
                "SELECT MAX({order}) FROM {table}",
                order = scope.order_column,
                table = scope.table,
            );
            sqlx::query_scalar(&query).fetch_one(executor).await?
        }
    };
    Ok(next_after(max))
}

/// Take a transaction-scoped advisory lock serializing order assignment
/// for one scope. Released automatically at commit or rollback.
///
/// The two-key advisory lock takes int4 keys, so the scope id is
/// truncated; a collision only widens the lock, never narrows it.
pub async fn lock_scope(
    conn: &mut PgConnection,
    scope: &OrderScope,
    scope_id: DbId,
) -> Result<(), sqlx::Error> {
    let key = (scope_id & 0x7fff_ffff) as i32;
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1), $2)")
        .bind(scope.table)
        .bind(key)
        .execute(conn)
        .await?;
    Ok(())
}
