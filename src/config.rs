//! # Streamer Configuration
//!
//! Runtime settings for terrain streaming, loaded once at startup from JSON.
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```json
//! { "radius": 5, "generator": { "flat": { "height": 0.4 } } }
//! ```
//!
//! Chunk dimensions are compile-time constants and are not configurable.

use std::fs;
use std::path::Path;

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rendering::meshing::MeshCulling;
use crate::voxels::chunk::MAX_STREAMING_RADIUS;
use crate::voxels::terrain::{GeneratorKind, NoiseSettings, TerrainGenerator};

/// Default streaming radius in chunks.
pub const DEFAULT_RADIUS: i32 = 3;

/// Default noise seed.
pub const DEFAULT_SEED: u32 = 42;

/// Settings for a [`ChunkStreamer`](crate::voxels::streamer::ChunkStreamer).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamerConfig {
    /// Chebyshev radius of the streaming window, in chunks.
    pub radius: i32,
    /// Seed for the terrain noise.
    pub seed: u32,
    /// Which height field populates chunks.
    pub generator: GeneratorKind,
    /// Noise sampling parameters, used by the Perlin generator.
    pub noise: NoiseSettings,
    /// Mesh culling mode.
    pub culling: MeshCulling,
    /// Reference position the first window is built around.
    pub initial_position: [f32; 3],
}

impl Default for StreamerConfig {
    fn default() -> Self {
        StreamerConfig {
            radius: DEFAULT_RADIUS,
            seed: DEFAULT_SEED,
            generator: GeneratorKind::default(),
            noise: NoiseSettings::default(),
            culling: MeshCulling::default(),
            initial_position: [0.0, 0.0, 0.0],
        }
    }
}

impl StreamerConfig {
    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: StreamerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_STREAMING_RADIUS).contains(&self.radius) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        let frequency = self.noise.frequency;
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ConfigError::InvalidFrequency(frequency));
        }
        Ok(())
    }

    /// Builds the height field this config selects.
    pub fn build_generator(&self) -> TerrainGenerator {
        TerrainGenerator::new(self.generator, self.seed, self.noise)
    }

    /// The initial reference position as a point.
    pub fn initial_position(&self) -> Point3<f32> {
        Point3::from(self.initial_position)
    }

    /// Number of chunks in the streaming window.
    pub fn window_size(&self) -> usize {
        let side = (2 * self.radius.max(0) + 1) as usize;
        side * side
    }
}
