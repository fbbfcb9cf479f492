//! Cursor-paginated reads over index rows.
//!
//! ```text
//!   row (newest → oldest):  [ 5 | 4 | 3 | 2 | 1 ]
//!
//!   latest(2)            →  [ 5 | 4 ]
//!   max_id = 4, size 2   →      scan ↓ from 4: 4 3 2  → drop 4 → [ 3 | 2 ]
//!   since_id = 2, size 2 →      scan ↑ from 2: 2 3 4  → drop 2 → [ 4 | 3 ]
//! ```
//!
//! Boundaries are anchored by value: the boundary id is dropped only when it
//! is actually present in the row. If it is absent (the status lives in
//! another row, or never reached this one) the page simply starts at its
//! nearest neighbour and nothing else is dropped.

use statusline_store::{ColumnRange, WideRowStore};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::StatusError;
use crate::id::StatusId;
use crate::line::Line;

/// Fixed page size of a day line read.
pub const DAYLINE_PAGE_SIZE: usize = 100;

/// Pagination request for one index row.
///
/// When both cursors are set `max_id` wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub size: usize,
    /// Return only ids strictly newer than this one
    pub since_id: Option<StatusId>,
    /// Return only ids strictly older than this one
    pub max_id: Option<StatusId>,
}

impl Page {
    /// The `size` most recent ids.
    pub fn latest(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// The next page back in time, after `max_id`.
    pub fn before(max_id: StatusId, size: usize) -> Self {
        Self {
            size,
            max_id: Some(max_id),
            since_id: None,
        }
    }

    /// Refresh: ids newer than `since_id`.
    pub fn after(since_id: StatusId, size: usize) -> Self {
        Self {
            size,
            since_id: Some(since_id),
            max_id: None,
        }
    }

    /// Build a page from string cursors as received from callers.
    pub fn parse(
        size: usize,
        since_id: Option<&str>,
        max_id: Option<&str>,
    ) -> Result<Self, StatusError> {
        Ok(Self {
            size,
            since_id: since_id.map(StatusId::from_str).transpose()?,
            max_id: max_id.map(StatusId::from_str).transpose()?,
        })
    }
}

/// Range-scan reader shared by every [`Line`].
#[derive(Clone)]
pub struct LineReader {
    store: Arc<dyn WideRowStore>,
}

impl LineReader {
    pub fn new(store: Arc<dyn WideRowStore>) -> Self {
        Self { store }
    }

    /// Read one page of a row, newest first.
    pub fn read(&self, line: Line, key: &str, page: &Page) -> Result<Vec<StatusId>, StatusError> {
        if page.size == 0 {
            return Ok(Vec::new());
        }
        let row = line.row_key(key);

        match (page.max_id, page.since_id) {
            (Some(max_id), _) => {
                let range = ColumnRange::descending_from(max_id.as_bytes().to_vec(), page.size + 1);
                let mut ids = self.scan(line, &row, &range)?;
                if ids.first() == Some(&max_id) {
                    ids.remove(0);
                }
                ids.truncate(page.size);
                Ok(ids)
            }
            (None, Some(since_id)) => {
                let range = ColumnRange::ascending_from(since_id.as_bytes().to_vec(), page.size + 1);
                let mut ids = self.scan(line, &row, &range)?;
                if ids.first() == Some(&since_id) {
                    ids.remove(0);
                }
                ids.truncate(page.size);
                ids.reverse();
                Ok(ids)
            }
            (None, None) => self.latest(line, &row, page.size),
        }
    }

    /// The `limit` most recent ids of a row, no cursor.
    pub fn latest(&self, line: Line, key: &str, limit: usize) -> Result<Vec<StatusId>, StatusError> {
        self.scan(line, &line.row_key(key), &ColumnRange::latest(limit))
    }

    /// Day line read: fixed size, newest first.
    pub fn dayline(&self, day_key: &str) -> Result<Vec<StatusId>, StatusError> {
        self.latest(Line::Dayline, day_key, DAYLINE_PAGE_SIZE)
    }

    fn scan(&self, line: Line, row: &str, range: &ColumnRange) -> Result<Vec<StatusId>, StatusError> {
        self.store
            .range_scan(line.family(), row, range)?
            .iter()
            .map(|column| StatusId::from_slice(column))
            .collect()
    }
}
