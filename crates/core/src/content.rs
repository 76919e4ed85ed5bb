//! Closed set of content payload kinds and the render capability.
//!
//! A module holds a heterogeneous ordered list of content items. Each item
//! is one of a fixed set of concrete payload kinds; the association row in
//! the database stores only the lowercase tag and the payload's id. The
//! legal set is known at compile time, so the tag is modeled as a closed
//! enum rather than an open runtime type registry.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Discriminator for the concrete payload table a content association
/// references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Video,
    Image,
    File,
}

impl ContentKind {
    /// Every legal kind, in declaration order.
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Text,
        ContentKind::Video,
        ContentKind::Image,
        ContentKind::File,
    ];

    /// The lowercase tag stored in the association row.
    pub fn as_tag(self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Video => "video",
            ContentKind::Image => "image",
            ContentKind::File => "file",
        }
    }

    /// Parse a stored tag back into a kind.
    ///
    /// Fails with [`CoreError::UnknownContentKind`] for anything outside
    /// the closed set.
    pub fn from_tag(tag: &str) -> Result<Self, CoreError> {
        match tag {
            "text" => Ok(ContentKind::Text),
            "video" => Ok(ContentKind::Video),
            "image" => Ok(ContentKind::Image),
            "file" => Ok(ContentKind::File),
            other => Err(CoreError::UnknownContentKind {
                tag: other.to_string(),
            }),
        }
    }

    /// Template resource name for this kind.
    ///
    /// By convention the resource name equals the lowercased tag.
    pub fn template(self) -> String {
        format!("content/{}.html", self.as_tag())
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A rendered display representation of one content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFragment {
    /// Template resource name (`content/{tag}.html`).
    pub template: String,
    /// Escaped HTML fragment built from the payload's own fields.
    pub html: String,
}

/// Uniform rendering capability every concrete payload implements.
///
/// The association delegates here after resolving its payload; callers
/// never need to know the concrete shape.
pub trait Render {
    fn render(&self) -> DisplayFragment;
}

/// Escape a string for safe interpolation into an HTML fragment.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
