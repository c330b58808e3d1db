//! # Block Module
//!
//! This module provides the voxel cell type and the face directions used by
//! meshing.

use block_type::MaterialTag;

pub mod block_side;
pub mod block_type;

/// Edge length of one voxel in world units.
pub const BLOCK_RENDER_SIZE: f32 = 1.0;

/// Represents a single voxel in the world.
///
/// A voxel only stores whether it is filled and what it is made of. A
/// default voxel is inactive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Voxel {
    /// Whether this voxel is filled. Only active voxels produce geometry.
    pub active: bool,
    /// The material of this voxel.
    pub material: MaterialTag,
}

impl Voxel {
    /// Creates an active voxel of the given material.
    pub fn new(material: MaterialTag) -> Self {
        Voxel {
            active: true,
            material,
        }
    }

    /// Returns `true` if this voxel is filled.
    pub fn is_active(&self) -> bool {
        self.active
    }
}
