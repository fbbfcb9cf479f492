//! Canonical status record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StatusError;
use crate::id::StatusId;

/// A short text post.
///
/// `id`, `author_login`, `content` and `created_at` never change after
/// creation. `removed` only ever goes from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub author_login: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub removed: bool,
}

impl Status {
    /// Build a live status; `created_at` comes from the id's timestamp.
    pub fn new(id: StatusId, author_login: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            author_login: author_login.into(),
            content: content.into(),
            created_at: id.created_at(),
            removed: false,
        }
    }

    /// UTC calendar day bucket (`YYYY-MM-DD`) for the day line.
    pub fn day_key(&self) -> String {
        day_key(self.created_at)
    }

    /// bincode, then LZ4 with the uncompressed size prepended.
    pub(crate) fn encode(&self) -> Result<Vec<u8>, StatusError> {
        let bytes = bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| StatusError::Codec(e.to_string()))?;
        Ok(lz4_flex::compress_prepend_size(&bytes))
    }

    pub(crate) fn decode(bytes: &[u8]) -> Result<Self, StatusError> {
        let raw = lz4_flex::decompress_size_prepended(bytes)
            .map_err(|e| StatusError::Codec(e.to_string()))?;
        let (status, _) = bincode::serde::decode_from_slice(&raw, bincode::config::standard())
            .map_err(|e| StatusError::Codec(e.to_string()))?;
        Ok(status)
    }
}

/// Day bucket for an arbitrary instant.
pub fn day_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdGenerator;

    #[test]
    fn test_new_status_is_live_and_stamped_from_id() {
        let gen = IdGenerator::with_clock(|| 1_760_745_600_000); // 2025-10-18T00:00:00Z
        let status = Status::new(gen.next_id(), "alice", "hello");
        assert!(!status.removed);
        assert_eq!(status.created_at, status.id.created_at());
        assert_eq!(status.day_key(), "2025-10-18");
    }

    #[test]
    fn test_record_codec() {
        let mut status = Status::new(IdGenerator::new().next_id(), "alice", "hello #world");
        status.removed = true;
        let bytes = status.encode().unwrap();
        assert_eq!(Status::decode(&bytes).unwrap(), status);
    }

    #[test]
    fn test_decode_garbage_is_codec_error() {
        assert!(matches!(
            Status::decode(b"\x01\x02"),
            Err(StatusError::Codec(_))
        ));
    }
}
