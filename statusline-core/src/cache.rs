//! Read-through cache for status lookups and favorites lists.
//!
//! Only these two reads are cached. Invalidation happens on exactly two
//! write paths:
//! - status removal evicts that status
//! - favorites add/remove evicts that login's list
//!
//! A status load that raced with a removal must not repopulate the cache.
//! Each eviction bumps a generation; a loader takes the generation before
//! reading the store and drops its entry if it moved.

use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::StatuslineConfig;
use crate::id::StatusId;
use crate::status::Status;

#[derive(Clone)]
pub struct ReadCache {
    statuses: Cache<StatusId, Status>,
    favorites: Cache<String, Vec<StatusId>>,
    status_generation: Arc<AtomicU64>,
}

impl ReadCache {
    pub fn new(config: &StatuslineConfig) -> Self {
        Self {
            statuses: Cache::builder()
                .max_capacity(config.status_cache_capacity)
                .time_to_live(config.cache_ttl)
                .build(),
            favorites: Cache::builder()
                .max_capacity(config.favorites_cache_capacity)
                .time_to_live(config.cache_ttl)
                .build(),
            status_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn status(&self, id: &StatusId) -> Option<Status> {
        self.statuses.get(id)
    }

    /// Generation to pass to [`put_status`](Self::put_status), taken before
    /// the store read.
    pub fn status_generation(&self) -> u64 {
        self.status_generation.load(Ordering::SeqCst)
    }

    /// Cache `status` unless an eviction happened since `generation`.
    pub fn put_status(&self, status: Status, generation: u64) {
        let id = status.id;
        self.statuses.insert(id, status);
        if self.status_generation() != generation {
            self.statuses.invalidate(&id);
        }
    }

    pub fn evict_status(&self, id: &StatusId) {
        self.status_generation.fetch_add(1, Ordering::SeqCst);
        self.statuses.invalidate(id);
    }

    pub fn favorites(&self, login: &str) -> Option<Vec<StatusId>> {
        self.favorites.get(login)
    }

    pub fn put_favorites(&self, login: &str, ids: Vec<StatusId>) {
        self.favorites.insert(login.to_owned(), ids);
    }

    pub fn evict_favorites(&self, login: &str) {
        self.favorites.invalidate(login);
    }
}
