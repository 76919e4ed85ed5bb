//! Single-key TTL cache for the public subject catalog.
//!
//! The catalog is read far more often than subjects or courses change,
//! so the listing handler reads through this cache and every mutating
//! subject/course handler invalidates it.

use std::time::{Duration, Instant};

use coursehub_db::models::subject::SubjectWithCourseCount;
use tokio::sync::RwLock;

struct CacheEntry {
    cached_at: Instant,
    subjects: Vec<SubjectWithCourseCount>,
}

/// In-process cache holding one value: the subject list with course
/// counts.
pub struct SubjectCache {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl SubjectCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// The cached catalog, or `None` when empty or expired.
    pub async fn get(&self) -> Option<Vec<SubjectWithCourseCount>> {
        let guard = self.entry.read().await;
        let entry = guard.as_ref()?;
        if entry.cached_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.subjects.clone())
    }

    /// Store a fresh catalog.
    pub async fn put(&self, subjects: Vec<SubjectWithCourseCount>) {
        let mut guard = self.entry.write().await;
        *guard = Some(CacheEntry {
            cached_at: Instant::now(),
            subjects,
        });
    }

    /// Drop the cached value. Called after any subject or course mutation.
    pub async fn invalidate(&self) {
        let mut guard = self.entry.write().await;
        *guard = None;
    }
}
