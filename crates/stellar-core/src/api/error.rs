use thiserror::Error;

use crate::api::types::MotionId;

/// Errors raised at the composer's boundaries.
/// Navigation itself is total; only parsing, validation and camera access can fail.
#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("invalid system record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("camera is owned by motion {0:?}")]
    CameraBusy(MotionId),
}

pub type Result<T> = std::result::Result<T, ComposerError>;
