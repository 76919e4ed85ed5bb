//! Content association and payload variant models.
//!
//! A `Content` row binds an ordered position within a module to exactly
//! one concrete payload via (kind tag, payload id). The payload tables
//! share a common shape (owner, title, timestamps) plus one
//! variant-specific field. Every variant implements [`Render`], so the
//! association can delegate display without knowing the concrete shape.

use coursehub_core::content::{escape_html, ContentKind, DisplayFragment, Render};
use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `contents` association table.
///
/// `item_kind` is stored as the lowercase tag; it is validated against
/// the closed set before insert and parsed again on resolution.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Content {
    pub id: DbId,
    pub module_id: DbId,
    pub item_kind: String,
    pub item_id: DbId,
    pub sort_order: i32,
}

// ---------------------------------------------------------------------------
// Payload variants
// ---------------------------------------------------------------------------

/// A row from the `text_items` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TextItem {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `video_items` table. The payload is an external URL.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct VideoItem {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `image_items` table. The payload is a stored file path.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ImageItem {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub file_path: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `file_items` table. The payload is a stored file path.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct FileItem {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub file_path: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Render for TextItem {
    fn render(&self) -> DisplayFragment {
        let body = escape_html(&self.body).replace('\n', "<br>\n");
        DisplayFragment {
            template: ContentKind::Text.template(),
            html: format!("<h3>{}</h3>\n<p>{}</p>", escape_html(&self.title), body),
        }
    }
}

impl Render for VideoItem {
    fn render(&self) -> DisplayFragment {
        DisplayFragment {
            template: ContentKind::Video.template(),
            html: format!(
                "<h3>{}</h3>\n<iframe src=\"{}\" allowfullscreen></iframe>",
                escape_html(&self.title),
                escape_html(&self.url)
            ),
        }
    }
}

impl Render for ImageItem {
    fn render(&self) -> DisplayFragment {
        DisplayFragment {
            template: ContentKind::Image.template(),
            html: format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&self.file_path),
                escape_html(&self.title)
            ),
        }
    }
}

impl Render for FileItem {
    fn render(&self) -> DisplayFragment {
        DisplayFragment {
            template: ContentKind::File.template(),
            html: format!(
                "<a href=\"{}\">Download {}</a>",
                escape_html(&self.file_path),
                escape_html(&self.title)
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved item
// ---------------------------------------------------------------------------

/// A resolved content payload: exactly one concrete variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentItem {
    Text(TextItem),
    Video(VideoItem),
    Image(ImageItem),
    File(FileItem),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::Text(_) => ContentKind::Text,
            ContentItem::Video(_) => ContentKind::Video,
            ContentItem::Image(_) => ContentKind::Image,
            ContentItem::File(_) => ContentKind::File,
        }
    }

    pub fn id(&self) -> DbId {
        match self {
            ContentItem::Text(item) => item.id,
            ContentItem::Video(item) => item.id,
            ContentItem::Image(item) => item.id,
            ContentItem::File(item) => item.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentItem::Text(item) => &item.title,
            ContentItem::Video(item) => &item.title,
            ContentItem::Image(item) => &item.title,
            ContentItem::File(item) => &item.title,
        }
    }

    /// Polymorphic dispatch over the render capability.
    pub fn render(&self) -> DisplayFragment {
        match self {
            ContentItem::Text(item) => item.render(),
            ContentItem::Video(item) => item.render(),
            ContentItem::Image(item) => item.render(),
            ContentItem::File(item) => item.render(),
        }
    }
}

/// An association together with its resolved, rendered payload. What the
/// presentation layer consumes.
#[derive(Debug, Clone, Serialize)]
pub struct ContentWithItem {
    pub id: DbId,
    pub module_id: DbId,
    pub sort_order: i32,
    pub item: ContentItem,
    pub rendered: DisplayFragment,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a content item. The tag is part of the JSON body
/// (`"kind": "text" | "video" | "image" | "file"`); anything outside the
/// closed set is rejected at deserialization, before any row exists.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CreateContentItem {
    Text { title: String, body: String },
    Video { title: String, url: String },
    Image { title: String, file_path: String },
    File { title: String, file_path: String },
}

impl CreateContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            CreateContentItem::Text { .. } => ContentKind::Text,
            CreateContentItem::Video { .. } => ContentKind::Video,
            CreateContentItem::Image { .. } => ContentKind::Image,
            CreateContentItem::File { .. } => ContentKind::File,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CreateContentItem::Text { title, .. }
            | CreateContentItem::Video { title, .. }
            | CreateContentItem::Image { title, .. }
            | CreateContentItem::File { title, .. } => title,
        }
    }
}

/// DTO for editing a payload's own fields. The kind of an existing
/// association never changes; fields not matching the stored kind are
/// rejected by the repository.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContentItem {
    #[validate(length(min = 1, max = 250))]
    pub title: Option<String>,
    pub body: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub file_path: Option<String>,
}
