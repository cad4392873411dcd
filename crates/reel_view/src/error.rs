//! List configuration errors
//!
//! Scrolling and windowing never fail; only loading or validating a
//! configuration can.

use reel_core::Vec2;
use thiserror::Error;

/// Errors raised while loading or validating a [`ListConfig`](crate::ListConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read list config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for a list config
    #[error("failed to parse list config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Items per line must be at least one
    #[error("fixed count must be at least 1")]
    InvalidFixedCount,

    /// Item size components must be non-negative
    #[error("item size must be non-negative, got {0:?}")]
    InvalidItemSize(Vec2),

    /// Elastic smoothing time must be finite and non-negative
    #[error("elasticity must be finite and non-negative, got {0}")]
    InvalidElasticity(f32),

    /// Per-second velocity retention must be a fraction
    #[error("deceleration rate must be within [0, 1], got {0}")]
    InvalidDecelerationRate(f32),

    /// Snap duration must be non-negative
    #[error("snap duration must be non-negative, got {0}")]
    InvalidSnapDuration(f32),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
