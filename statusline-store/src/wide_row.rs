//! Store contracts shared by every backend.

use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Backend internal error
    #[error("Database error: {0}")]
    Database(String),
    /// Family was not registered when the store was opened
    #[error("Unknown family: {0}")]
    UnknownFamily(String),
    /// A lock guarding in-memory state was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,
}

impl From<rocksdb::Error> for StoreError {
    fn from(e: rocksdb::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// A column slice over one row.
///
/// `start` and `finish` are inclusive and expressed in scan order: for a
/// reversed scan `start` is the upper bound and `finish` the lower one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRange {
    pub start: Option<Vec<u8>>,
    pub finish: Option<Vec<u8>>,
    pub reversed: bool,
    pub limit: usize,
}

impl ColumnRange {
    /// Newest-first slice over the whole row.
    pub fn latest(limit: usize) -> Self {
        Self {
            start: None,
            finish: None,
            reversed: true,
            limit,
        }
    }

    /// Descending slice starting at `start` (inclusive).
    pub fn descending_from(start: impl Into<Vec<u8>>, limit: usize) -> Self {
        Self {
            start: Some(start.into()),
            finish: None,
            reversed: true,
            limit,
        }
    }

    /// Ascending slice starting at `start` (inclusive).
    pub fn ascending_from(start: impl Into<Vec<u8>>, limit: usize) -> Self {
        Self {
            start: Some(start.into()),
            finish: None,
            reversed: false,
            limit,
        }
    }

    /// Whether `column` lies past the `finish` bound in scan order.
    pub(crate) fn past_finish(&self, column: &[u8]) -> bool {
        match &self.finish {
            Some(finish) if self.reversed => column < finish.as_slice(),
            Some(finish) => column > finish.as_slice(),
            None => false,
        }
    }
}

/// Sorted, sparse `family → row → ordered columns` structure.
///
/// Columns carry no value; presence is the whole payload. Single-column
/// writes are atomic, nothing spans rows.
pub trait WideRowStore: Send + Sync {
    /// Insert a column. Re-inserting an existing column is a no-op.
    fn insert(&self, family: &str, row_key: &str, column: &[u8]) -> Result<(), StoreError>;

    /// Delete a column. Deleting an absent column is a no-op.
    fn delete(&self, family: &str, row_key: &str, column: &[u8]) -> Result<(), StoreError>;

    /// Return up to `range.limit` columns of one row, in scan order.
    fn range_scan(
        &self,
        family: &str,
        row_key: &str,
        range: &ColumnRange,
    ) -> Result<Vec<Vec<u8>>, StoreError>;

    /// Number of columns currently stored in a row.
    fn row_len(&self, family: &str, row_key: &str) -> Result<usize, StoreError>;
}

/// Flat keyed record space for canonical records.
pub trait RecordStore: Send + Sync {
    /// Write (or overwrite) a record.
    fn put_record(&self, family: &str, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Read a record; `Ok(None)` when absent.
    fn get_record(&self, family: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_past_finish_descending() {
        let range = ColumnRange {
            start: None,
            finish: Some(vec![5]),
            reversed: true,
            limit: 10,
        };
        assert!(!range.past_finish(&[5]));
        assert!(!range.past_finish(&[9]));
        assert!(range.past_finish(&[4]));
    }

    #[test]
    fn test_past_finish_ascending() {
        let range = ColumnRange {
            start: None,
            finish: Some(vec![5]),
            reversed: false,
            limit: 10,
        };
        assert!(!range.past_finish(&[5]));
        assert!(range.past_finish(&[6]));
        assert!(!ColumnRange::latest(3).past_finish(&[0]));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::UnknownFamily("tagline".into());
        assert!(err.to_string().contains("tagline"));

        let err = StoreError::Database("test".into());
        assert!(err.to_string().contains("Database error"));
    }
}
