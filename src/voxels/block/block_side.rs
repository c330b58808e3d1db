//! # Block Side Module
//!
//! This module defines the six faces of a voxel and the axis direction each
//! one points along. Mesh extraction walks faces in the order returned by
//! [`BlockSide::all`], so that order is part of the mesh layout.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel.
///
/// The discriminants give the canonical per-cube emission order:
/// `[LEFT, RIGHT, BOTTOM, TOP, BACK, FRONT]`, i.e. −X, +X, −Y, +Y, −Z, +Z.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face pointing towards negative X
    Left = 0,

    /// The face pointing towards positive X
    Right = 1,

    /// The face pointing towards negative Y
    Bottom = 2,

    /// The face pointing towards positive Y
    Top = 3,

    /// The face pointing towards negative Z
    Back = 4,

    /// The face pointing towards positive Z
    Front = 5,
}

impl BlockSide {
    /// Returns an array containing all six faces in emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::Left,
            BlockSide::Right,
            BlockSide::Bottom,
            BlockSide::Top,
            BlockSide::Back,
            BlockSide::Front,
        ]
    }

    /// Integer step from a voxel to the neighbour this face touches.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::Left => Vector3::new(-1, 0, 0),
            BlockSide::Right => Vector3::new(1, 0, 0),
            BlockSide::Bottom => Vector3::new(0, -1, 0),
            BlockSide::Top => Vector3::new(0, 1, 0),
            BlockSide::Back => Vector3::new(0, 0, -1),
            BlockSide::Front => Vector3::new(0, 0, 1),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.offset().cast::<f32>().unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0))
    }

    /// Looks up the face whose normal matches `normal` exactly.
    pub fn from_normal(normal: [f32; 3]) -> Option<BlockSide> {
        BlockSide::all().into_iter().find(|side| {
            let n = side.normal();
            [n.x, n.y, n.z] == normal
        })
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;

    #[test]
    fn normals_are_unit_axis_vectors() {
        for side in BlockSide::all() {
            let n = side.normal();
            assert_eq!(n.magnitude2(), 1.0);
            assert_eq!(n.x.abs() + n.y.abs() + n.z.abs(), 1.0);
        }
    }

    #[test]
    fn from_normal_round_trips() {
        for side in BlockSide::all() {
            let n = side.normal();
            assert_eq!(BlockSide::from_normal([n.x, n.y, n.z]), Some(side));
        }
        assert_eq!(BlockSide::from_normal([1.0, 1.0, 0.0]), None);
    }
}
