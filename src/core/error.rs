//! Error types for loctree

use thiserror::Error;

use crate::core::types::Vec3;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Bounds are not fully contained by the node the insertion started at.
    #[error("object does not fit in octree: bounds {min} .. {max}")]
    OutOfBounds { min: Vec3, max: Vec3 },

    #[error("object not found at node {0}")]
    ObjectNotFound(u32),

    #[error("invalid octree config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("debug output error: {0}")]
    Debug(#[from] loctree_debug::DebugError),
}
