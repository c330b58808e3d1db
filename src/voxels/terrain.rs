//! # Terrain Module
//!
//! Height-field generators used to populate chunks.
//!
//! A height field maps a horizontal *world* coordinate to a terrain elevation
//! fraction in `[0, 1]`. Chunks scale that fraction by their own height, so
//! callers must always pass world coordinates: sampling in chunk-local space
//! would make every chunk identical and break seams between neighbours.
//!
//! ## Generators
//! - [`PerlinHeightField`]: seeded gradient noise, the default
//! - [`FlatHeightField`]: a constant height, for testing
//! - [`TerrainGenerator`]: runtime selection between the two

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Default scaling factor applied to world coordinates when sampling noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.05;

/// Default value of the third noise coordinate.
///
/// The height field is two dimensional, so the 3D noise is sampled on a fixed
/// slice. The slice must not sit on an integer lattice plane, where gradient
/// noise is identically zero.
pub const PERLIN_SLICE: f64 = 0.8;

/// A pure function from horizontal world position to terrain height.
///
/// Implementations must be deterministic and continuous, and always return a
/// finite value in `[0, 1]`.
pub trait HeightField {
    /// Returns the terrain height fraction at the given world coordinates.
    fn height(&self, world_x: f64, world_z: f64) -> f64;
}

/// Noise sampling parameters for [`PerlinHeightField`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Multiplier applied to world coordinates before sampling.
    pub frequency: f64,
    /// Fixed third coordinate of every sample.
    pub slice: f64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        NoiseSettings {
            frequency: PERLIN_SCALE_FACTOR,
            slice: PERLIN_SLICE,
        }
    }
}

/// Height field backed by seeded Perlin noise.
pub struct PerlinHeightField {
    perlin: Perlin,
    settings: NoiseSettings,
}

impl PerlinHeightField {
    /// Creates a generator. The seed is fixed for the lifetime of the generator.
    pub fn new(seed: u32, settings: NoiseSettings) -> Self {
        PerlinHeightField {
            perlin: Perlin::new(seed),
            settings,
        }
    }

    /// Converts a world position into a noise sample position.
    fn to_perlin_pos(&self, world_x: f64, world_z: f64) -> [f64; 3] {
        [
            world_x * self.settings.frequency,
            world_z * self.settings.frequency,
            self.settings.slice,
        ]
    }
}

impl HeightField for PerlinHeightField {
    fn height(&self, world_x: f64, world_z: f64) -> f64 {
        let sample = self.perlin.get(self.to_perlin_pos(world_x, world_z));
        // Perlin output is in [-1, 1]
        ((sample + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Height field that returns the same height everywhere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlatHeightField {
    height: f64,
}

impl FlatHeightField {
    /// Creates a flat field. Non-finite input is treated as zero.
    pub fn new(height: f64) -> Self {
        let height = if height.is_finite() {
            height.clamp(0.0, 1.0)
        } else {
            0.0
        };
        FlatHeightField { height }
    }
}

impl HeightField for FlatHeightField {
    fn height(&self, _world_x: f64, _world_z: f64) -> f64 {
        self.height
    }
}

/// The method used to generate new chunks.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Seeded Perlin noise.
    #[default]
    Perlin,
    /// Constant height fraction.
    Flat {
        /// Height fraction in `[0, 1]`.
        height: f64,
    },
}

/// A height field chosen at runtime.
pub enum TerrainGenerator {
    /// See [`PerlinHeightField`].
    Perlin(PerlinHeightField),
    /// See [`FlatHeightField`].
    Flat(FlatHeightField),
}

impl TerrainGenerator {
    /// Builds the generator described by `kind`.
    pub fn new(kind: GeneratorKind, seed: u32, settings: NoiseSettings) -> Self {
        match kind {
            GeneratorKind::Perlin => TerrainGenerator::Perlin(PerlinHeightField::new(seed, settings)),
            GeneratorKind::Flat { height } => TerrainGenerator::Flat(FlatHeightField::new(height)),
        }
    }
}

impl HeightField for TerrainGenerator {
    fn height(&self, world_x: f64, world_z: f64) -> f64 {
        match self {
            TerrainGenerator::Perlin(perlin) => perlin.height(world_x, world_z),
            TerrainGenerator::Flat(flat) => flat.height(world_x, world_z),
        }
    }
}

impl<H: HeightField + ?Sized> HeightField for &H {
    fn height(&self, world_x: f64, world_z: f64) -> f64 {
        (**self).height(world_x, world_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perlin_is_deterministic_per_seed() {
        let a = PerlinHeightField::new(42, NoiseSettings::default());
        let b = PerlinHeightField::new(42, NoiseSettings::default());
        for i in -20..20 {
            let x = i as f64 * 3.7;
            let z = i as f64 * -1.3;
            assert_eq!(a.height(x, z), b.height(x, z));
        }
    }

    #[test]
    fn perlin_stays_in_unit_range() {
        let field = PerlinHeightField::new(7, NoiseSettings::default());
        for x in -64..64 {
            for z in -64..64 {
                let h = field.height(x as f64, z as f64);
                assert!((0.0..=1.0).contains(&h), "height {h} at ({x}, {z})");
            }
        }
    }

    #[test]
    fn perlin_is_continuous() {
        let field = PerlinHeightField::new(42, NoiseSettings::default());
        for x in -32..32 {
            let x = x as f64;
            let delta = (field.height(x, 5.0) - field.height(x + 0.01, 5.0)).abs();
            assert!(delta < 0.05, "jump of {delta} at x = {x}");
        }
    }

    #[test]
    fn perlin_varies_across_the_world() {
        let field = PerlinHeightField::new(42, NoiseSettings::default());
        let first = field.height(0.0, 0.0);
        let varies = (1..200).any(|i| (field.height(i as f64 * 4.0, 0.0) - first).abs() > 1e-6);
        assert!(varies);
    }

    #[test]
    fn flat_clamps_and_ignores_position() {
        assert_eq!(FlatHeightField::new(2.0).height(10.0, -3.0), 1.0);
        assert_eq!(FlatHeightField::new(-1.0).height(0.0, 0.0), 0.0);
        assert_eq!(FlatHeightField::new(f64::NAN).height(0.0, 0.0), 0.0);
        assert_eq!(FlatHeightField::new(0.25).height(99.0, 1.0), 0.25);
    }

    #[test]
    fn generator_dispatches_on_kind() {
        let flat = TerrainGenerator::new(GeneratorKind::Flat { height: 0.5 }, 0, NoiseSettings::default());
        assert_eq!(flat.height(3.0, 4.0), 0.5);

        let perlin = TerrainGenerator::new(GeneratorKind::Perlin, 42, NoiseSettings::default());
        let direct = PerlinHeightField::new(42, NoiseSettings::default());
        assert_eq!(perlin.height(12.0, -8.0), direct.height(12.0, -8.0));
    }
}
