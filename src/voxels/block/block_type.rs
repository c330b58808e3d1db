//! # Material Tag Module
//!
//! This module defines the closed set of materials a voxel can carry.

use serde::{Deserialize, Serialize};

/// Enumerates all possible voxel materials.
///
/// The material of an inactive voxel is irrelevant: it is never meshed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialTag {
    /// The material of a freshly constructed voxel.
    #[default]
    Default,

    /// Surface terrain. Every voxel the height field activates gets this.
    Grass,

    /// Soil.
    Dirt,

    /// Water.
    Water,

    /// Stone.
    Stone,

    /// Wood.
    Wood,

    /// Sand.
    Sand,
}

impl MaterialTag {
    /// Number of distinct materials.
    pub const COUNT: usize = 7;

    /// Returns every material in declaration order.
    pub fn all() -> [MaterialTag; Self::COUNT] {
        [
            MaterialTag::Default,
            MaterialTag::Grass,
            MaterialTag::Dirt,
            MaterialTag::Water,
            MaterialTag::Stone,
            MaterialTag::Wood,
            MaterialTag::Sand,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_is_default() {
        assert_eq!(MaterialTag::default(), MaterialTag::Default);
    }

    #[test]
    fn all_lists_each_material_once() {
        let all = MaterialTag::all();
        for (i, a) in all.iter().enumerate() {
            assert_eq!(*a as usize, i);
        }
    }
}
