//! Error types for lasso configuration.
//!
//! The gesture itself never fails at runtime; these errors only come out of
//! configuration changes that would break its invariants.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LassoError {
    /// Items and options can only change while no drag is in progress.
    #[error("cannot reconfigure the lasso while a drag is in progress")]
    DragInProgress,

    #[error("close path distance must be a positive finite number, got {0}")]
    InvalidCloseDistance(f64),

    #[error("zoom transform must be finite with a non-zero scale, got k={k}")]
    InvalidTransform { k: f64 },

    #[error("invalid lasso config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LassoError>;
