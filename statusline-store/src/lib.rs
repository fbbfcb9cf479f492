//! # statusline-store — Wide-row storage adapter
//!
//! A sorted, sparse `family → row key → ordered columns` structure with
//! column-slice range scans, plus a flat keyed record space for canonical
//! records. Nothing in here knows what a status is.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ family "userline"                                        │
//! │   row "alice" → [ col_1 < col_2 < col_3 < ... ]          │
//! │   row "bob"   → [ col_4 < col_9 ]                        │
//! ├──────────────────────────────────────────────────────────┤
//! │ family "statuses" (records)                              │
//! │   key → value                                            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Backends
//!
//! - [`RocksStore`] — RocksDB, one column family per family name
//! - [`MemoryStore`] — `BTreeSet` rows behind an `RwLock`

pub mod memory;
pub mod rocks;
pub mod wide_row;

pub use memory::MemoryStore;
pub use rocks::{RocksStore, StoreConfig};
pub use wide_row::{ColumnRange, RecordStore, StoreError, WideRowStore};
