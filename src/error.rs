//! # Error Types
//!
//! Configuration errors are recoverable. Invariant violations indicate a logic
//! defect; they are surfaced as values for tests and diagnostics, and the
//! streamer asserts on them in debug builds.

use thiserror::Error;

use crate::voxels::chunk::ChunkCoordinate;

/// Errors raised while loading or validating a streamer configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for a config.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The streaming radius is negative or above `MAX_STREAMING_RADIUS`.
    #[error("streaming radius must be between 0 and {}, got {0}", crate::voxels::chunk::MAX_STREAMING_RADIUS)]
    InvalidRadius(i32),

    /// The noise frequency is not a positive finite number.
    #[error("noise frequency must be positive and finite, got {0}")]
    InvalidFrequency(f64),
}

/// An internal consistency check failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// The loaded set does not have `(2 * radius + 1)²` chunks.
    #[error("expected {expected} loaded chunks, found {actual}")]
    WindowSize {
        /// Size of the streaming window.
        expected: usize,
        /// Number of loaded chunks.
        actual: usize,
    },

    /// A loaded chunk lies outside the streaming window.
    #[error("chunk {0} is loaded but outside the streaming window")]
    OutsideWindow(ChunkCoordinate),

    /// A chunk inside the streaming window is not loaded.
    #[error("chunk {0} is inside the streaming window but not loaded")]
    MissingFromWindow(ChunkCoordinate),

    /// A loaded chunk has no mesh.
    #[error("chunk {0} is loaded without a mesh")]
    MissingMesh(ChunkCoordinate),

    /// Vertex and normal buffers differ in length.
    #[error("mesh has {vertices} vertices but {normals} normals")]
    MeshMismatch {
        /// Vertex count.
        vertices: usize,
        /// Normal count.
        normals: usize,
    },

    /// The vertex count is not a multiple of three.
    #[error("mesh has {0} vertices, which is not a whole number of triangles")]
    PartialTriangle(usize),

    /// A normal is not one of the six axis directions.
    #[error("normal {0} is not an axis-aligned unit vector")]
    InvalidNormal(usize),
}
