//! Error types for style and configuration parsing.
//!
//! Runtime animation paths never fail; they skip the affected step. Only
//! building options from strings can be rejected.

use thiserror::Error;

/// Result type for style parsing.
pub type Result<T> = std::result::Result<T, StyleParseError>;

/// Errors produced while turning CSS-like strings into typed options.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    /// Timing function keyword or syntax not recognized.
    #[error("unknown timing function: {0}")]
    UnknownEasing(String),

    /// `cubic-bezier()` with the wrong arity or x values outside [0, 1].
    #[error("invalid cubic-bezier: {0}")]
    InvalidBezier(String),

    /// `steps()` with a zero count or unknown jump position.
    #[error("invalid steps(): {0}")]
    InvalidSteps(String),

    /// Transform origin that is not one to three CSS position components.
    #[error("invalid transform origin: {0}")]
    InvalidOrigin(String),

    /// Keyframe property value that is neither a number nor a string.
    #[error("unsupported value for keyframe property {property}")]
    InvalidKeyframeValue { property: String },

    /// Negative or non-finite duration.
    #[error("invalid duration: {0}")]
    InvalidDuration(f64),
}
