//! Engine errors
//!
//! Rejected gestures are not errors; they travel as
//! [`Verdict::Rejected`](crate::processing::classifier::Verdict). The
//! variants here are contract violations and serialization faults.

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that can occur while running a game round
#[derive(Error, Debug)]
pub enum GameError {
    #[error("stroke has no samples")]
    EmptyStroke,

    #[error("surface bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },

    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
