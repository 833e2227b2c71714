//! Rule application errors.

use super::error_code::{self, RecastErrorCode};

/// Errors raised while constructing or applying a single rewrite rule.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("invalid rewrite pattern: {0}")]
    InvalidPattern(String),

    #[error("rule '{rule}' failed: {message}")]
    RuleFailed { rule: String, message: String },

    #[error("run cancelled before rule '{rule}'")]
    Cancelled { rule: String },
}

impl TransformError {
    /// The failing rule's display name, if the error is tied to one.
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::InvalidPattern(_) => None,
            Self::RuleFailed { rule, .. } | Self::Cancelled { rule } => Some(rule),
        }
    }
}

impl From<regex::Error> for TransformError {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e.to_string())
    }
}

impl RecastErrorCode for TransformError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled { .. } => error_code::CANCELLED,
            _ => error_code::TRANSFORM_ERROR,
        }
    }
}
