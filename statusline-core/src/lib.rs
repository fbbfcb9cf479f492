//! # statusline-core — Denormalized status timelines
//!
//! Short text posts ("statuses") are written once to a record family and
//! fanned out into time-ordered index rows. Every read is a bounded range
//! scan over one row.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  create / find / remove  ┌──────────────────┐
//! │  Statusline  │ ───────────────────────► │ StatusRepository │──┐
//! │  (facade)    │                          └──────────────────┘  │ records
//! │              │  fan-out                 ┌──────────────────┐  ▼
//! │   ReadCache  │ ───────────────────────► │ FanoutWriter     │──┐  ┌─────────────┐
//! │   (moka)     │                          └──────────────────┘  ├─►│ wide-row    │
//! │              │  paged reads             ┌──────────────────┐  │  │ store       │
//! │              │ ───────────────────────► │ LineReader       │──┤  │ (RocksDB /  │
//! │              │  favorites toggle        ┌──────────────────┐  │  │  memory)    │
//! │              │ ───────────────────────► │ FavoritesIndex   │──┘  └─────────────┘
//! └──────────────┘                          └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`id`] — time-ordered [`StatusId`] and its generator
//! - [`repository`] — status lifecycle (create, lookup, soft-remove)
//! - [`fanout`] — index row writes and hashtag extraction
//! - [`reader`] — cursor pagination (`since_id` / `max_id`)
//! - [`favorites`] — the one index with real deletion
//! - [`cache`] — read cache with write-path invalidation
//!
//! ## Consistency
//!
//! Fan-out has no cross-row atomicity and soft removal never touches index
//! rows, so ids returned by a line are candidates. Resolve them through
//! [`Statusline::resolve_statuses`] before display.

pub mod cache;
pub mod config;
pub mod error;
pub mod fanout;
pub mod favorites;
pub mod id;
pub mod line;
pub mod reader;
pub mod repository;
pub mod service;
pub mod status;
pub mod validation;

pub use cache::ReadCache;
pub use config::StatuslineConfig;
pub use error::StatusError;
pub use fanout::{extract_hashtags, FanoutReport, FanoutWriter};
pub use favorites::{FavoritesIndex, FAVORITES_PAGE_SIZE};
pub use id::{IdGenerator, StatusId};
pub use line::{Line, STATUS_FAMILY};
pub use reader::{LineReader, Page, DAYLINE_PAGE_SIZE};
pub use repository::StatusRepository;
pub use service::{open_rocks_store, Statusline};
pub use status::{day_key, Status};
pub use validation::{ConstraintViolation, StatusValidator, ValidationRules};

// Backends, so callers need only this crate
pub use statusline_store::{
    MemoryStore, RecordStore, RocksStore, StoreConfig, StoreError, WideRowStore,
};
