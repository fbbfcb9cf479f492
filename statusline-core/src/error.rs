use statusline_store::StoreError;
use thiserror::Error;

use crate::validation::ConstraintViolation;

/// Errors surfaced by status operations.
///
/// A missing or removed status is not an error: lookups return `Ok(None)`.
#[derive(Error, Debug, Clone)]
pub enum StatusError {
    /// One or more field constraints failed; nothing was written
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<ConstraintViolation>),
    /// The wide-row or record store call failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
    /// Identifier is malformed or not time-ordered
    #[error("Invalid status id: {0}")]
    InvalidId(String),
    /// Record could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(String),
}

fn summarize(violations: &[ConstraintViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl StatusError {
    /// Violations carried by a validation failure; empty for other kinds.
    pub fn violations(&self) -> &[ConstraintViolation] {
        match self {
            StatusError::Validation(v) => v,
            _ => &[],
        }
    }
}
