//! The `Statusline` facade: every exposed operation over one store.

use statusline_store::{RecordStore, RocksStore, StoreConfig, StoreError, WideRowStore};
use std::sync::Arc;

use crate::cache::ReadCache;
use crate::config::StatuslineConfig;
use crate::error::StatusError;
use crate::fanout::{FanoutReport, FanoutWriter};
use crate::favorites::FavoritesIndex;
use crate::id::{IdGenerator, StatusId};
use crate::line::{Line, STATUS_FAMILY};
use crate::reader::{LineReader, Page};
use crate::repository::StatusRepository;
use crate::status::Status;
use crate::validation::StatusValidator;

/// Open a RocksDB store with every index family and the status record family.
pub fn open_rocks_store(config: StoreConfig) -> Result<RocksStore, StoreError> {
    RocksStore::open(config, &Line::families(), &[STATUS_FAMILY])
}

/// Status persistence plus every index over it.
///
/// Ids read from any line are candidates: pass them through
/// [`resolve_statuses`](Self::resolve_statuses) (or [`find_status`](Self::find_status))
/// to drop removed statuses.
pub struct Statusline {
    repository: StatusRepository,
    fanout: FanoutWriter,
    reader: LineReader,
    favorites: FavoritesIndex,
    cache: ReadCache,
}

impl Statusline {
    pub fn new<S>(store: Arc<S>, config: StatuslineConfig) -> Self
    where
        S: WideRowStore + RecordStore + 'static,
    {
        Self::with_generator(store, config, IdGenerator::new())
    }

    /// Same as [`new`](Self::new) with a caller-provided id generator.
    pub fn with_generator<S>(store: Arc<S>, config: StatuslineConfig, ids: IdGenerator) -> Self
    where
        S: WideRowStore + RecordStore + 'static,
    {
        let rows: Arc<dyn WideRowStore> = store.clone();
        let records: Arc<dyn RecordStore> = store;
        let validator = Arc::new(StatusValidator::new(config.validation.clone()));

        Self {
            repository: StatusRepository::with_generator(records, validator, ids),
            fanout: FanoutWriter::new(rows.clone()),
            reader: LineReader::new(rows.clone()),
            favorites: FavoritesIndex::new(rows),
            cache: ReadCache::new(&config),
        }
    }

    /// Open (or create) a RocksDB-backed instance.
    pub fn open(store_config: StoreConfig, config: StatuslineConfig) -> Result<Self, StatusError> {
        let store = open_rocks_store(store_config)?;
        Ok(Self::new(Arc::new(store), config))
    }

    // ─── Statuses ─────────────────────────────────────────────────────

    pub fn create_status(&self, author_login: &str, content: &str) -> Result<Status, StatusError> {
        self.repository.create(author_login, content)
    }

    /// Live status by id; `None` when absent or removed.
    pub fn find_status(&self, id: &StatusId) -> Result<Option<Status>, StatusError> {
        if let Some(status) = self.cache.status(id) {
            return Ok(Some(status));
        }
        let generation = self.cache.status_generation();
        let found = self.repository.find_by_id(id)?;
        if let Some(status) = &found {
            self.cache.put_status(status.clone(), generation);
        }
        Ok(found)
    }

    /// Soft-remove the stored status; `None` when it was never created.
    pub fn remove_status(&self, status: &Status) -> Result<Option<Status>, StatusError> {
        let removed = self.repository.mark_removed(status)?;
        self.cache.evict_status(&status.id);
        Ok(removed)
    }

    /// Live statuses for a list of index candidates, in input order.
    ///
    /// Reads the record store directly, never the cache.
    pub fn resolve_statuses(&self, ids: &[StatusId]) -> Result<Vec<Status>, StatusError> {
        self.repository.resolve(ids)
    }

    // ─── Lines ────────────────────────────────────────────────────────

    pub fn add_to_userline(&self, status: &Status) -> Result<(), StatusError> {
        self.fanout.add_to_userline(status)
    }

    pub fn userline(&self, login: &str, page: &Page) -> Result<Vec<StatusId>, StatusError> {
        self.reader.read(Line::Userline, login, page)
    }

    pub fn add_to_timeline(&self, login: &str, status: &Status) -> Result<(), StatusError> {
        self.fanout.add_to_timeline(login, status)
    }

    pub fn timeline(&self, login: &str, page: &Page) -> Result<Vec<StatusId>, StatusError> {
        self.reader.read(Line::Timeline, login, page)
    }

    pub fn add_to_taglines(&self, status: &Status) -> Result<(), StatusError> {
        self.fanout.add_to_taglines(status)
    }

    pub fn tagline(&self, tag: &str, page: &Page) -> Result<Vec<StatusId>, StatusError> {
        self.reader.read(Line::Tagline, tag, page)
    }

    pub fn add_to_dayline(&self, status: &Status, day_key: &str) -> Result<(), StatusError> {
        self.fanout.add_to_dayline(status, day_key)
    }

    /// 100 most recent ids of a day bucket.
    pub fn dayline(&self, day_key: &str) -> Result<Vec<StatusId>, StatusError> {
        self.reader.dayline(day_key)
    }

    /// Author line, recipient timelines, tag lines and day line in one go.
    pub fn fan_out<'a, I>(&self, status: &Status, recipients: I) -> FanoutReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.fanout.fan_out(status, recipients)
    }

    // ─── Favorites ────────────────────────────────────────────────────

    pub fn add_favorite(&self, status: &Status, login: &str) -> Result<(), StatusError> {
        self.favorites.add(status, login)?;
        self.cache.evict_favorites(login);
        Ok(())
    }

    pub fn remove_favorite(&self, status: &Status, login: &str) -> Result<(), StatusError> {
        self.favorites.remove(status, login)?;
        self.cache.evict_favorites(login);
        Ok(())
    }

    /// Up to 50 favorites, newest first.
    pub fn favorites(&self, login: &str) -> Result<Vec<StatusId>, StatusError> {
        if let Some(ids) = self.cache.favorites(login) {
            return Ok(ids);
        }
        let ids = self.favorites.list(login)?;
        self.cache.put_favorites(login, ids.clone());
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusline_store::MemoryStore;

    fn statusline() -> (Arc<MemoryStore>, Statusline) {
        let store = Arc::new(MemoryStore::new());
        let sl = Statusline::new(store.clone(), StatuslineConfig::for_testing());
        (store, sl)
    }

    #[test]
    fn test_removal_evicts_cached_status() {
        let (_, sl) = statusline();
        let status = sl.create_status("alice", "hello").unwrap();

        // Warm the cache, then remove
        assert!(sl.find_status(&status.id).unwrap().is_some());
        sl.remove_status(&status).unwrap();
        assert!(sl.find_status(&status.id).unwrap().is_none());
    }

    #[test]
    fn test_remove_status_ignores_edited_copy() {
        let (_, sl) = statusline();
        let status = sl.create_status("alice", "original").unwrap();

        let mut edited = status.clone();
        edited.content = "rewritten".into();
        let removed = sl.remove_status(&edited).unwrap().unwrap();
        assert_eq!(removed.content, "original");

        let never_created = Status::new(IdGenerator::new().next_id(), "alice", "hello");
        assert!(sl.remove_status(&never_created).unwrap().is_none());
        assert!(sl.find_status(&never_created.id).unwrap().is_none());
    }

    #[test]
    fn test_favorite_mutations_evict_cached_list() {
        let (_, sl) = statusline();
        let status = sl.create_status("alice", "hello").unwrap();

        assert!(sl.favorites("bob").unwrap().is_empty());
        sl.add_favorite(&status, "bob").unwrap();
        assert_eq!(sl.favorites("bob").unwrap(), vec![status.id]);
        sl.remove_favorite(&status, "bob").unwrap();
        assert!(sl.favorites("bob").unwrap().is_empty());
    }

    #[test]
    fn test_favorites_served_from_cache_until_mutated() {
        let (store, sl) = statusline();
        let status = sl.create_status("alice", "hello").unwrap();
        sl.add_favorite(&status, "bob").unwrap();
        assert_eq!(sl.favorites("bob").unwrap(), vec![status.id]);

        // Behind the facade's back: the cached list is still served
        store
            .delete(Line::Favline.family(), "bob", status.id.as_bytes())
            .unwrap();
        assert_eq!(sl.favorites("bob").unwrap(), vec![status.id]);

        sl.remove_favorite(&status, "bob").unwrap();
        assert!(sl.favorites("bob").unwrap().is_empty());
    }

    #[test]
    fn test_removed_status_stays_in_lines_but_does_not_resolve() {
        let (_, sl) = statusline();
        let keep = sl.create_status("alice", "keep #x").unwrap();
        let gone = sl.create_status("alice", "gone #x").unwrap();
        sl.fan_out(&keep, ["bob"]);
        sl.fan_out(&gone, ["bob"]);
        sl.remove_status(&gone).unwrap();

        let ids = sl.tagline("X", &Page::latest(10)).unwrap();
        assert_eq!(ids, vec![gone.id, keep.id]);
        assert_eq!(sl.resolve_statuses(&ids).unwrap(), vec![keep]);
    }
}
