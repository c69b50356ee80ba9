//! Error types for the build and terrain engine
//!
//! Every failure is reported synchronously to the caller as a structured
//! value identifying the offending parameter. The engine never retries:
//! it performs no I/O, so there is nothing to retry.

use thiserror::Error;

/// Errors that can occur while computing placements or terrain reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Non-positive size, degenerate region, or oversized structure extent.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// A profile line endpoint lies outside the region footprint.
    #[error("point ({x}, {z}) is outside the region footprint")]
    OutOfBounds { x: i32, z: i32 },

    /// Unrecognized structure, model, or heightmap kind string.
    #[error("unknown kind: {kind}")]
    UnknownKind { kind: String },

    /// Terrain query over a region larger than the configured scan limit.
    #[error("region volume {volume} exceeds the configured limit {limit}")]
    RegionTooLarge { volume: u64, limit: u64 },
}

impl EngineError {
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        EngineError::InvalidGeometry { reason: reason.into() }
    }

    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        EngineError::UnknownKind { kind: kind.into() }
    }
}
