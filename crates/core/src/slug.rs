//! URL slug validation and generation.
//!
//! Slugs identify subjects and courses in routes and are immutable once
//! referenced externally, so both crates validate them with the same rule:
//! lowercase ASCII letters, digits, hyphens, and underscores.

/// Maximum slug length, matching the column width.
pub const MAX_SLUG_LEN: usize = 200;

/// Whether `slug` is a legal URL slug.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Derive a slug from a free-form title.
///
/// Lowercases, maps whitespace runs to single hyphens, and drops anything
/// outside the slug alphabet.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen
    for c in title.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            out.push(c);
            last_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !last_was_hyphen {
            out.push('-');
            last_was_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out.truncate(MAX_SLUG_LEN);
    out
}
