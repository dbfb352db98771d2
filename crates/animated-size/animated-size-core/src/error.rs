//! Decoding errors.
//!
//! The state machine itself never fails; these only surface while turning
//! caller-supplied JSON or property names into core types.

use thiserror::Error;

/// Errors produced while decoding a factor.
#[derive(Debug, Error)]
pub enum FactorError {
    #[error("factor json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("size multiplier must be finite, got {0}")]
    NonFiniteMultiplier(f64),
}

/// Errors produced while naming style properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("style property '{0}' is not managed by the animator")]
    UnknownProperty(String),
}
