//! In-memory backend with the same ordering semantics as [`RocksStore`](crate::RocksStore).

use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;
use std::sync::RwLock;

use crate::wide_row::{ColumnRange, RecordStore, StoreError, WideRowStore};

type Row = BTreeSet<Vec<u8>>;

#[derive(Default)]
struct Tables {
    rows: HashMap<(String, String), Row>,
    records: HashMap<(String, Vec<u8>), Vec<u8>>,
}

/// `BTreeSet`-backed store. Families are created on first write.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn row_id(family: &str, row_key: &str) -> (String, String) {
    (family.to_owned(), row_key.to_owned())
}

impl WideRowStore for MemoryStore {
    fn insert(&self, family: &str, row_key: &str, column: &[u8]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        tables
            .rows
            .entry(row_id(family, row_key))
            .or_default()
            .insert(column.to_vec());
        Ok(())
    }

    fn delete(&self, family: &str, row_key: &str, column: &[u8]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let id = row_id(family, row_key);
        if let Some(row) = tables.rows.get_mut(&id) {
            row.remove(column);
            if row.is_empty() {
                tables.rows.remove(&id);
            }
        }
        Ok(())
    }

    fn range_scan(
        &self,
        family: &str,
        row_key: &str,
        range: &ColumnRange,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        let Some(row) = tables.rows.get(&row_id(family, row_key)) else {
            return Ok(Vec::new());
        };

        let start = range.start.as_deref();
        let columns: Vec<Vec<u8>> = if range.reversed {
            let upper = start.map_or(Bound::Unbounded, Bound::Included);
            row.range::<[u8], _>((Bound::Unbounded, upper))
                .rev()
                .take_while(|c| !range.past_finish(c))
                .take(range.limit)
                .cloned()
                .collect()
        } else {
            let lower = start.map_or(Bound::Unbounded, Bound::Included);
            row.range::<[u8], _>((lower, Bound::Unbounded))
                .take_while(|c| !range.past_finish(c))
                .take(range.limit)
                .cloned()
                .collect()
        };
        Ok(columns)
    }

    fn row_len(&self, family: &str, row_key: &str) -> Result<usize, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables
            .rows
            .get(&row_id(family, row_key))
            .map_or(0, BTreeSet::len))
    }
}

impl RecordStore for MemoryStore {
    fn put_record(&self, family: &str, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        tables
            .records
            .insert((family.to_owned(), key.to_vec()), value.to_vec());
        Ok(())
    }

    fn get_record(&self, family: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables
            .records
            .get(&(family.to_owned(), key.to_vec()))
            .cloned())
    }
}
