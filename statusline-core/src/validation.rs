//! Field constraints for new statuses.
//!
//! The validator is built once from [`ValidationRules`] and shared read-only
//! (behind an `Arc`) by every repository that creates statuses.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StatusError;
use crate::status::Status;

/// Limits applied to new statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Maximum author login length in characters (default: 50)
    pub max_login_length: usize,
    /// Maximum content length in characters (default: 750)
    pub max_content_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_login_length: 50,
            max_content_length: 750,
        }
    }
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub field: &'static str,
    pub message: String,
}

impl ConstraintViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Stateless status validator.
#[derive(Debug, Clone, Default)]
pub struct StatusValidator {
    rules: ValidationRules,
}

impl StatusValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Collect every violated constraint (empty when valid).
    pub fn violations(&self, status: &Status) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();

        let login = status.author_login.as_str();
        if login.is_empty() {
            violations.push(ConstraintViolation::new("author_login", "must not be empty"));
        } else {
            let len = login.chars().count();
            if len > self.rules.max_login_length {
                violations.push(ConstraintViolation::new(
                    "author_login",
                    format!("length {len} exceeds {}", self.rules.max_login_length),
                ));
            }
            if login.chars().any(char::is_whitespace) {
                violations.push(ConstraintViolation::new(
                    "author_login",
                    "must not contain whitespace",
                ));
            }
        }

        let content = status.content.as_str();
        if content.trim().is_empty() {
            violations.push(ConstraintViolation::new("content", "must not be blank"));
        }
        let len = content.chars().count();
        if len > self.rules.max_content_length {
            violations.push(ConstraintViolation::new(
                "content",
                format!("length {len} exceeds {}", self.rules.max_content_length),
            ));
        }

        violations
    }

    /// `Ok(())` when valid, otherwise a [`StatusError::Validation`] listing
    /// all violations.
    pub fn validate(&self, status: &Status) -> Result<(), StatusError> {
        let violations = self.violations(status);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(StatusError::Validation(violations))
        }
    }
}
