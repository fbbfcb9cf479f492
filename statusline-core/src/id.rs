//! Time-ordered status identifiers.
//!
//! Layout (UUID version 7):
//! ```text
//! ┌──────────────┬─────┬──────────┬─────┬─────────────┐
//! │ unix millis  │ ver │ counter  │ var │ random      │
//! │ 48 bits      │ 4   │ 12 bits  │ 2   │ 62 bits     │
//! └──────────────┴─────┴──────────┴─────┴─────────────┘
//! ```
//!
//! Byte order equals creation order, so the 16 raw bytes are used as column
//! keys without any re-encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::StatusError;

/// Highest value of the 12-bit per-millisecond counter.
const MAX_COUNTER: u16 = 0x0FFF;

/// Opaque, time-ordered status identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatusId(Uuid);

impl StatusId {
    /// Raw bytes, as stored in index columns.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Rebuild an id from index column bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, StatusError> {
        let uuid = Uuid::from_slice(bytes).map_err(|e| StatusError::InvalidId(e.to_string()))?;
        Self::checked(uuid)
    }

    /// Milliseconds since the unix epoch embedded in the id.
    pub fn timestamp_millis(&self) -> u64 {
        let bytes = self.0.as_bytes();
        let mut buf = [0u8; 8];
        buf[2..].copy_from_slice(&bytes[..6]);
        u64::from_be_bytes(buf)
    }

    /// Creation time embedded in the id.
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp_millis() as i64).unwrap_or_default()
    }

    fn checked(uuid: Uuid) -> Result<Self, StatusError> {
        match uuid.get_version_num() {
            7 => Ok(Self(uuid)),
            v => Err(StatusError::InvalidId(format!(
                "{uuid} is a version {v} UUID, expected a time-ordered version 7"
            ))),
        }
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for StatusId {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(|e| StatusError::InvalidId(format!("{s}: {e}")))?;
        Self::checked(uuid)
    }
}

/// Last issued `(millis, counter)` pair.
#[derive(Debug, Default)]
struct GeneratorState {
    millis: u64,
    counter: u16,
}

type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

/// Issues strictly increasing [`StatusId`]s.
///
/// Within one millisecond the counter is bumped; when the wall clock stalls
/// or steps backwards the last millisecond is reused, and a counter overflow
/// borrows the next millisecond.
pub struct IdGenerator {
    state: Mutex<GeneratorState>,
    clock: Clock,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Generator driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(|| Utc::now().timestamp_millis().max(0) as u64)
    }

    /// Generator driven by a custom millisecond clock.
    pub fn with_clock(clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        Self {
            state: Mutex::new(GeneratorState::default()),
            clock: Box::new(clock),
        }
    }

    /// Allocate the next identifier.
    pub fn next_id(&self) -> StatusId {
        let now = (self.clock)();
        let (millis, counter) = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if now > state.millis {
                state.millis = now;
                state.counter = 0;
            } else if state.counter < MAX_COUNTER {
                state.counter += 1;
            } else {
                state.millis += 1;
                state.counter = 0;
            }
            (state.millis, state.counter)
        };

        let noise = Uuid::new_v4().into_bytes();
        let mut tail = [0u8; 10];
        tail[..2].copy_from_slice(&counter.to_be_bytes());
        tail[2..8].copy_from_slice(&noise[..6]);
        tail[8..].copy_from_slice(&noise[10..12]);

        StatusId(uuid::Builder::from_unix_timestamp_millis(millis, &tail).into_uuid())
    }
}
