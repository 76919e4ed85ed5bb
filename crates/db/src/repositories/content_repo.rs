//! Repository for the `contents` association table and the payload tables.
//!
//! Creation persists the concrete payload first, then the association
//! row pointing at (kind tag, payload id), with ordering scoped to the
//! module. Deletion removes both together: the schema's cascades stop at
//! the association, so the payload must be deleted explicitly here.

use coursehub_core::content::ContentKind;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::error::{DbError, DbResult};
use crate::models::content::{
    Content, ContentItem, ContentWithItem, CreateContentItem, FileItem, ImageItem, TextItem,
    UpdateContentItem, VideoItem,
};
use crate::ordering::{self, OrderingMode, CONTENT_ORDER};

/// Column list shared across association queries.
const COLUMNS: &str = "id, module_id, item_kind, item_id, sort_order";

/// Provides create, resolve, reorder, and paired-delete operations for
/// module contents.
pub struct ContentRepo;

impl ContentRepo {
    /// Create a payload owned by `owner_id` and associate it with
    /// `module_id`. The association's position is assigned by the
    /// ordering engine, scoped to the module.
    pub async fn add(
        pool: &PgPool,
        module_id: DbId,
        owner_id: DbId,
        input: &CreateContentItem,
        mode: OrderingMode,
    ) -> Result<(Content, ContentItem), sqlx::Error> {
        match mode {
            OrderingMode::Legacy => {
                let item = Self::insert_item(pool, owner_id, input).await?;
                let next = ordering::next_order_value(pool, &CONTENT_ORDER, module_id).await?;
                let content =
                    Self::insert_association(pool, module_id, &item, next).await?;
                Ok((content, item))
            }
            OrderingMode::Strict => {
                let mut tx = pool.begin().await?;
                ordering::lock_scope(&mut tx, &CONTENT_ORDER, module_id).await?;
                let item = Self::insert_item(&mut *tx, owner_id, input).await?;
                let next =
                    ordering::next_order_value(&mut *tx, &CONTENT_ORDER, module_id).await?;
                let content =
                    Self::insert_association(&mut *tx, module_id, &item, next).await?;
                tx.commit().await?;
                Ok((content, item))
            }
        }
    }

    /// Insert the concrete payload row for `input`.
    async fn insert_item<'e, E>(
        executor: E,
        owner_id: DbId,
        input: &CreateContentItem,
    ) -> Result<ContentItem, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        match input {
            CreateContentItem::Text { title, body } => {
                let item = sqlx::query_as::<_, TextItem>(
                    "INSERT INTO text_items (owner_id, title, body) VALUES ($1, $2, $3) \
                     RETURNING id, owner_id, title, body, created_at, updated_at",
                )
                .bind(owner_id)
                .bind(title)
                .bind(body)
                .fetch_one(executor)
                .await?;
                Ok(ContentItem::Text(item))
            }
            CreateContentItem::Video { title, url } => {
                let item = sqlx::query_as::<_, VideoItem>(
                    "INSERT INTO video_items (owner_id, title, url) VALUES ($1, $2, $3) \
                     RETURNING id, owner_id, title, url, created_at, updated_at",
                )
                .bind(owner_id)
                .bind(title)
                .bind(url)
                .fetch_one(executor)
                .await?;
                Ok(ContentItem::Video(item))
            }
            CreateContentItem::Image { title, file_path } => {
                let item = sqlx::query_as::<_, ImageItem>(
                    "INSERT INTO image_items (owner_id, title, file_path) VALUES ($1, $2, $3) \
                     RETURNING id, owner_id, title, file_path, created_at, updated_at",
                )
                .bind(owner_id)
                .bind(title)
                .bind(file_path)
                .fetch_one(executor)
                .await?;
                Ok(ContentItem::Image(item))
            }
            CreateContentItem::File { title, file_path } => {
                let item = sqlx::query_as::<_, FileItem>(
                    "INSERT INTO file_items (owner_id, title, file_path) VALUES ($1, $2, $3) \
                     RETURNING id, owner_id, title, file_path, created_at, updated_at",
                )
                .bind(owner_id)
                .bind(title)
                .bind(file_path)
                .fetch_one(executor)
                .await?;
                Ok(ContentItem::File(item))
            }
        }
    }

    async fn insert_association<'e, E>(
        executor: E,
        module_id: DbId,
        item: &ContentItem,
        sort_order: i32,
    ) -> Result<Content, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO contents (module_id, item_kind, item_id, sort_order) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(module_id)
            .bind(item.kind().as_tag())
            .bind(item.id())
            .bind(sort_order)
            .fetch_one(executor)
            .await
    }

    /// Find an association by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents WHERE id = $1");
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an association by ID only if `owner_id` owns the course it
    /// belongs to.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Content>, sqlx::Error> {
        sqlx::query_as::<_, Content>(
            "SELECT ct.id, ct.module_id, ct.item_kind, ct.item_id, ct.sort_order \
             FROM contents ct \
             JOIN modules m ON m.id = ct.module_id \
             JOIN courses c ON c.id = m.course_id \
             WHERE ct.id = $1 AND c.owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
    }

    /// List a module's associations in display order.
    pub async fn list_by_module(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Vec<Content>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM contents WHERE module_id = $1 ORDER BY sort_order, id");
        sqlx::query_as::<_, Content>(&query)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve an association's payload row.
    ///
    /// A stored tag outside the closed set or a missing payload row is a
    /// hard failure, never a silent null: either means the association
    /// and payload were not kept in step.
    pub async fn resolve(pool: &PgPool, content: &Content) -> DbResult<ContentItem> {
        let kind = ContentKind::from_tag(&content.item_kind)?;
        let id = content.item_id;
        let item = match kind {
            ContentKind::Text => sqlx::query_as::<_, TextItem>(
                "SELECT id, owner_id, title, body, created_at, updated_at \
                 FROM text_items WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::Text),
            ContentKind::Video => sqlx::query_as::<_, VideoItem>(
                "SELECT id, owner_id, title, url, created_at, updated_at \
                 FROM video_items WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::Video),
            ContentKind::Image => sqlx::query_as::<_, ImageItem>(
                "SELECT id, owner_id, title, file_path, created_at, updated_at \
                 FROM image_items WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::Image),
            ContentKind::File => sqlx::query_as::<_, FileItem>(
                "SELECT id, owner_id, title, file_path, created_at, updated_at \
                 FROM file_items WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::File),
        };
        item.ok_or(DbError::Core(CoreError::NotFound {
            entity: "ContentItem",
            id,
        }))
    }

    /// List a module's contents with each payload resolved and rendered.
    pub async fn list_with_items(
        pool: &PgPool,
        module_id: DbId,
    ) -> DbResult<Vec<ContentWithItem>> {
        let contents = Self::list_by_module(pool, module_id).await?;
        let mut out = Vec::with_capacity(contents.len());
        for content in contents {
            let item = Self::resolve(pool, &content).await?;
            let rendered = item.render();
            out.push(ContentWithItem {
                id: content.id,
                module_id: content.module_id,
                sort_order: content.sort_order,
                item,
                rendered,
            });
        }
        Ok(out)
    }

    /// Edit the payload behind an association the actor owns.
    ///
    /// Fields that do not belong to the stored kind are rejected rather
    /// than ignored.
    pub async fn update_item(
        pool: &PgPool,
        content: &Content,
        owner_id: DbId,
        input: &UpdateContentItem,
    ) -> DbResult<ContentItem> {
        let kind = ContentKind::from_tag(&content.item_kind)?;
        reject_foreign_fields(kind, input)?;
        let id = content.item_id;
        let item = match kind {
            ContentKind::Text => sqlx::query_as::<_, TextItem>(
                "UPDATE text_items SET \
                    title = COALESCE($3, title), \
                    body = COALESCE($4, body), \
                    updated_at = now() \
                 WHERE id = $1 AND owner_id = $2 \
                 RETURNING id, owner_id, title, body, created_at, updated_at",
            )
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::Text),
            ContentKind::Video => sqlx::query_as::<_, VideoItem>(
                "UPDATE video_items SET \
                    title = COALESCE($3, title), \
                    url = COALESCE($4, url), \
                    updated_at = now() \
                 WHERE id = $1 AND owner_id = $2 \
                 RETURNING id, owner_id, title, url, created_at, updated_at",
            )
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.url)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::Video),
            ContentKind::Image => sqlx::query_as::<_, ImageItem>(
                "UPDATE image_items SET \
                    title = COALESCE($3, title), \
                    file_path = COALESCE($4, file_path), \
                    updated_at = now() \
                 WHERE id = $1 AND owner_id = $2 \
                 RETURNING id, owner_id, title, file_path, created_at, updated_at",
            )
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.file_path)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::Image),
            ContentKind::File => sqlx::query_as::<_, FileItem>(
                "UPDATE file_items SET \
                    title = COALESCE($3, title), \
                    file_path = COALESCE($4, file_path), \
                    updated_at = now() \
                 WHERE id = $1 AND owner_id = $2 \
                 RETURNING id, owner_id, title, file_path, created_at, updated_at",
            )
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.file_path)
            .fetch_optional(pool)
            .await?
            .map(ContentItem::File),
        };
        item.ok_or(DbError::Core(CoreError::NotFound {
            entity: "ContentItem",
            id,
        }))
    }

    /// Delete an association the actor owns together with its payload.
    ///
    /// The payload goes first; an association must never outlive its
    /// payload or vice versa.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> DbResult<bool> {
        let Some(content) = Self::find_owned(pool, id, owner_id).await? else {
            return Ok(false);
        };
        let kind = ContentKind::from_tag(&content.item_kind)?;
        let table = payload_table(kind);
        let query = format!("DELETE FROM {table} WHERE id = $1");
        sqlx::query(&query)
            .bind(content.item_id)
            .execute(pool)
            .await?;
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(content.id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a bulk id-to-position mapping as independent best-effort
    /// updates, each filtered by course ownership. Returns how many rows
    /// were updated.
    pub async fn reorder(
        pool: &PgPool,
        owner_id: DbId,
        orders: &[(DbId, i32)],
    ) -> Result<u64, sqlx::Error> {
        let mut updated = 0;
        for &(id, sort_order) in orders {
            let result = sqlx::query(
                "UPDATE contents ct SET sort_order = $3 \
                 FROM modules m \
                 JOIN courses c ON c.id = m.course_id \
                 WHERE ct.id = $1 AND m.id = ct.module_id AND c.owner_id = $2",
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

fn payload_table(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Text => "text_items",
        ContentKind::Video => "video_items",
        ContentKind::Image => "image_items",
        ContentKind::File => "file_items",
    }
}

/// Reject update fields that do not exist on the stored kind.
fn reject_foreign_fields(kind: ContentKind, input: &UpdateContentItem) -> Result<(), CoreError> {
    let bad = match kind {
        ContentKind::Text => input.url.is_some() || input.file_path.is_some(),
        ContentKind::Video => input.body.is_some() || input.file_path.is_some(),
        ContentKind::Image | ContentKind::File => input.body.is_some() || input.url.is_some(),
    };
    if bad {
        return Err(CoreError::Validation(format!(
            "field not applicable to {kind} content"
        )));
    }
    Ok(())
}
