//! RocksDB-backed wide-row store.
//!
//! Every family is its own column family. Inside one, a row's columns are
//! stored as composite keys:
//!
//! ```text
//! ┌────────────────┬──────────────┬──────────────┐
//! │ row key length │ row key      │ column       │
//! │ 2 bytes BE     │ UTF-8        │ variable     │
//! └────────────────┴──────────────┴──────────────┘
//! ```
//!
//! so a row is one contiguous, byte-ordered key range and a column slice is a
//! single iterator seek. Record families hold plain `key → value` pairs.
//!
//! Reference: Kleppmann — DDIA, Chapter 3 (LSM Trees, SSTables)

use rocksdb::{
    BlockBasedOptions, Cache, ColumnFamilyDescriptor, DBCompressionType, DBWithThreadMode,
    Direction, IteratorMode, Options, SingleThreaded, WriteOptions,
};
use std::path::{Path, PathBuf};

use crate::wide_row::{ColumnRange, RecordStore, StoreError, WideRowStore};

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database directory path
    pub path: PathBuf,
    /// Block cache size in bytes (default: 256MB)
    pub block_cache_size: usize,
    /// Bloom filter bits per key (default: 10)
    pub bloom_filter_bits: i32,
    /// Enable fsync on every write (default: false)
    pub sync_writes: bool,
    /// Max open files for RocksDB (default: 512)
    pub max_open_files: i32,
    /// Write buffer size per column family (default: 64MB)
    pub write_buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("statusline_data"),
            block_cache_size: 256 * 1024 * 1024, // 256MB
            bloom_filter_bits: 10,
            sync_writes: false,
            max_open_files: 512,
            write_buffer_size: 64 * 1024 * 1024, // 64MB
        }
    }
}

impl StoreConfig {
    /// Create config for testing (small caches).
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024, // 8MB
            bloom_filter_bits: 10,
            sync_writes: false,
            max_open_files: 64,
            write_buffer_size: 4 * 1024 * 1024, // 4MB
        }
    }
}

/// Which way a family is accessed; drives its column family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FamilyKind {
    Rows,
    Records,
}

/// RocksDB wide-row store.
pub struct RocksStore {
    db: DBWithThreadMode<SingleThreaded>,
    config: StoreConfig,
}

impl RocksStore {
    /// Open the store, creating the database and any missing column family.
    ///
    /// `row_families` hold wide rows, `record_families` hold canonical
    /// records. Families not named here are rejected with
    /// [`StoreError::UnknownFamily`].
    pub fn open(
        config: StoreConfig,
        row_families: &[&str],
        record_families: &[&str],
    ) -> Result<Self, StoreError> {
        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_open_files(config.max_open_files);
        db_opts.set_keep_log_file_num(5);
        db_opts.set_max_total_wal_size(128 * 1024 * 1024);
        db_opts.increase_parallelism(num_cpus());

        // One cache shared by every column family
        let cache = Cache::new_lru_cache(config.block_cache_size);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = row_families
            .iter()
            .map(|name| (name, FamilyKind::Rows))
            .chain(record_families.iter().map(|name| (name, FamilyKind::Records)))
            .map(|(name, kind)| {
                ColumnFamilyDescriptor::new(*name, Self::cf_options(kind, &config, &cache))
            })
            .collect();

        let db = DBWithThreadMode::<SingleThreaded>::open_cf_descriptors(
            &db_opts,
            &config.path,
            cf_descriptors,
        )?;

        log::info!(
            "Opened wide-row store at {} ({} row families, {} record families)",
            config.path.display(),
            row_families.len(),
            record_families.len()
        );

        Ok(Self { db, config })
    }

    /// Build column-family-specific options.
    fn cf_options(kind: FamilyKind, config: &StoreConfig, cache: &Cache) -> Options {
        let mut opts = Options::default();

        let mut block_opts = BlockBasedOptions::default();
        block_opts.set_block_cache(cache);
        block_opts.set_bloom_filter(config.bloom_filter_bits as f64, false);
        block_opts.set_block_size(16 * 1024); // 16KB blocks
        opts.set_block_based_table_factory(&block_opts);

        opts.set_compression_type(DBCompressionType::Lz4);
        opts.set_write_buffer_size(config.write_buffer_size);

        match kind {
            FamilyKind::Rows => {
                // Many tiny appends, read back by range scans
                opts.set_max_write_buffer_number(4);
            }
            FamilyKind::Records => {
                // Point lookups by id
                opts.set_max_write_buffer_number(2);
                opts.optimize_for_point_lookup(config.block_cache_size as u64);
            }
        }

        opts
    }

    /// Force memtables to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    /// Get the database path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    // ─── Helpers ──────────────────────────────────────────────────────

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily, StoreError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::UnknownFamily(name.to_owned()))
    }

    fn write_opts(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

/// Build a row prefix: row key length (2 bytes BE) + row key bytes.
fn row_prefix(row_key: &str) -> Result<Vec<u8>, StoreError> {
    let len = u16::try_from(row_key.len())
        .map_err(|_| StoreError::Database(format!("Row key too long: {} bytes", row_key.len())))?;
    let mut prefix = Vec::with_capacity(2 + row_key.len());
    prefix.extend_from_slice(&len.to_be_bytes());
    prefix.extend_from_slice(row_key.as_bytes());
    Ok(prefix)
}

fn column_key(prefix: &[u8], column: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + column.len());
    key.extend_from_slice(prefix);
    key.extend_from_slice(column);
    key
}

/// Smallest key strictly greater than every key starting with `prefix`.
fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut succ = prefix.to_vec();
    while let Some(last) = succ.pop() {
        if last < u8::MAX {
            succ.push(last + 1);
            return Some(succ);
        }
    }
    None
}

impl WideRowStore for RocksStore {
    fn insert(&self, family: &str, row_key: &str, column: &[u8]) -> Result<(), StoreError> {
        let cf = self.cf(family)?;
        let key = column_key(&row_prefix(row_key)?, column);
        self.db.put_cf_opt(&cf, key, b"", &self.write_opts())?;
        Ok(())
    }

    fn delete(&self, family: &str, row_key: &str, column: &[u8]) -> Result<(), StoreError> {
        let cf = self.cf(family)?;
        let key = column_key(&row_prefix(row_key)?, column);
        self.db.delete_cf_opt(&cf, key, &self.write_opts())?;
        Ok(())
    }

    fn range_scan(
        &self,
        family: &str,
        row_key: &str,
        range: &ColumnRange,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        let cf = self.cf(family)?;
        let prefix = row_prefix(row_key)?;
        let mut columns = Vec::new();
        if range.limit == 0 {
            return Ok(columns);
        }

        let seek_key = match (&range.start, range.reversed) {
            (Some(start), _) => Some(column_key(&prefix, start)),
            (None, false) => Some(prefix.clone()),
            (None, true) => prefix_successor(&prefix),
        };
        let mode = match (&seek_key, range.reversed) {
            (Some(key), false) => IteratorMode::From(key, Direction::Forward),
            (Some(key), true) => IteratorMode::From(key, Direction::Reverse),
            (None, _) => IteratorMode::End,
        };

        for item in self.db.iterator_cf(&cf, mode) {
            let (key, _) = item?;

            if !key.starts_with(&prefix) {
                // A reverse seek may land on the first key of the next row
                if range.reversed && key.as_ref() > prefix.as_slice() {
                    continue;
                }
                break;
            }

            let column = &key[prefix.len()..];
            if range.past_finish(column) {
                break;
            }
            columns.push(column.to_vec());
            if columns.len() == range.limit {
                break;
            }
        }

        Ok(columns)
    }

    fn row_len(&self, family: &str, row_key: &str) -> Result<usize, StoreError> {
        let cf = self.cf(family)?;
        let prefix = row_prefix(row_key)?;

        let mut count = 0;
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward));
        for item in iter {
            let (key, _) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            count += 1;
        }
        Ok(count)
    }
}

impl RecordStore for RocksStore {
    fn put_record(&self, family: &str, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let cf = self.cf(family)?;
        self.db.put_cf_opt(&cf, key, value, &self.write_opts())?;
        Ok(())
    }

    fn get_record(&self, family: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let cf = self.cf(family)?;
        Ok(self.db.get_cf(&cf, key)?)
    }
}

/// Get number of CPU cores for RocksDB parallelism.
fn num_cpus() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as i32)
        .unwrap_or(4)
}
