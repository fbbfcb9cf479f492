//! Per-user favorites.
//!
//! Unlike the timeline-style lines this index supports real deletion: a
//! favorite is a toggle, so `remove` drops the column outright.

use statusline_store::WideRowStore;
use std::sync::Arc;

use crate::error::StatusError;
use crate::id::StatusId;
use crate::line::Line;
use crate::reader::LineReader;
use crate::status::Status;

/// Maximum number of favorites returned by [`FavoritesIndex::list`].
pub const FAVORITES_PAGE_SIZE: usize = 50;

#[derive(Clone)]
pub struct FavoritesIndex {
    store: Arc<dyn WideRowStore>,
    reader: LineReader,
}

impl FavoritesIndex {
    pub fn new(store: Arc<dyn WideRowStore>) -> Self {
        let reader = LineReader::new(store.clone());
        Self { store, reader }
    }

    pub fn add(&self, status: &Status, login: &str) -> Result<(), StatusError> {
        log::debug!("{login} favorites {}", status.id);
        self.store
            .insert(Line::Favline.family(), login, status.id.as_bytes())?;
        Ok(())
    }

    /// Idempotent; removing a status that is not a favorite is a no-op.
    pub fn remove(&self, status: &Status, login: &str) -> Result<(), StatusError> {
        log::debug!("{login} unfavorites {}", status.id);
        self.store
            .delete(Line::Favline.family(), login, status.id.as_bytes())?;
        Ok(())
    }

    /// Up to 50 most recent favorites, newest first.
    pub fn list(&self, login: &str) -> Result<Vec<StatusId>, StatusError> {
        self.reader.latest(Line::Favline, login, FAVORITES_PAGE_SIZE)
    }
}
