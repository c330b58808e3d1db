use cgmath::{Point3, Vector3};

use crate::voxels::block::{block_side::BlockSide, BLOCK_RENDER_SIZE};

/// Represents a single quad face of a voxel in the mesh.
///
/// The four corners are stored counter-clockwise as seen from outside the
/// voxel (lower-left, lower-right, upper-right, upper-left), in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face
    pub ll: Point3<f32>,
    /// Lower-right corner of the face
    pub lr: Point3<f32>,
    /// Upper-right corner of the face
    pub ur: Point3<f32>,
    /// Upper-left corner of the face
    pub ul: Point3<f32>,
    /// Which side of the voxel this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face `block_side` of the voxel whose minimum corner is `origin`.
    pub fn new(origin: Point3<f32>, block_side: BlockSide) -> Self {
        let corner = |x: f32, y: f32, z: f32| origin + Vector3::new(x, y, z) * BLOCK_RENDER_SIZE;

        let (ll, lr, ur, ul) = match block_side {
            BlockSide::Left => (
                corner(0.0, 0.0, 0.0),
                corner(0.0, 0.0, 1.0),
                corner(0.0, 1.0, 1.0),
                corner(0.0, 1.0, 0.0),
            ),
            BlockSide::Right => (
                corner(1.0, 0.0, 1.0),
                corner(1.0, 0.0, 0.0),
                corner(1.0, 1.0, 0.0),
                corner(1.0, 1.0, 1.0),
            ),
            BlockSide::Bottom => (
                corner(0.0, 0.0, 0.0),
                corner(1.0, 0.0, 0.0),
                corner(1.0, 0.0, 1.0),
                corner(0.0, 0.0, 1.0),
            ),
            BlockSide::Top => (
                corner(0.0, 1.0, 1.0),
                corner(1.0, 1.0, 1.0),
                corner(1.0, 1.0, 0.0),
                corner(0.0, 1.0, 0.0),
            ),
            BlockSide::Back => (
                corner(1.0, 0.0, 0.0),
                corner(0.0, 0.0, 0.0),
                corner(0.0, 1.0, 0.0),
                corner(1.0, 1.0, 0.0),
            ),
            BlockSide::Front => (
                corner(0.0, 0.0, 1.0),
                corner(1.0, 0.0, 1.0),
                corner(1.0, 1.0, 1.0),
                corner(0.0, 1.0, 1.0),
            ),
        };

        Face {
            ll,
            lr,
            ur,
            ul,
            block_side,
        }
    }

    /// Unwinds the quad into two triangles, `(ll, lr, ur)` then `(ll, ur, ul)`.
    pub fn triangle_vertices(&self) -> [Point3<f32>; 6] {
        [self.ll, self.lr, self.ur, self.ll, self.ur, self.ul]
    }
}
