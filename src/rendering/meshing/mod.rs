//! Mesh extraction for voxel chunks.
//!
//! This module converts a chunk's voxel grid into a flat triangle list with one
//! quad (two triangles) per emitted face. No faces are merged.
//!
//! # Traversal
//! Voxels are visited x outermost, then y, then z innermost. Within a voxel,
//! faces are emitted in [`BlockSide::all`] order (−X, +X, −Y, +Y, −Z, +Z).
//! Output is a pure function of the grid's active states.
//!
//! # Culling
//! Neighbours are never looked up across chunk boundaries: a face on the chunk
//! boundary counts as exposed. This leaves back-to-back faces on chunk seams,
//! which keeps every chunk independently meshable.
//!
//! - [`MeshCulling::Faces`] emits exactly the faces whose neighbour is inactive
//!   or outside the chunk.
//! - [`MeshCulling::Cubes`] emits the whole cube for any voxel that is not
//!   fully enclosed by active neighbours inside the chunk.

use cgmath::{EuclideanSpace, Point3};
use serde::{Deserialize, Serialize};

use crate::voxels::{
    block::{block_side::BlockSide, BLOCK_RENDER_SIZE},
    chunk::{Chunk, Neighbour},
};

mod face;
mod mesh;

pub use face::Face;
pub use mesh::*;

/// How aggressively hidden geometry is dropped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshCulling {
    /// Emit only exposed faces.
    #[default]
    Faces,
    /// Emit all six faces of every voxel that is not fully enclosed.
    ///
    /// This is the classic whole-block output: every visible voxel contributes
    /// a complete 36-vertex cube. Renderers that expect whole blocks must
    /// select it explicitly.
    Cubes,
}

/// Builds the mesh for `chunk` in world space.
pub fn extract_mesh(chunk: &Chunk, culling: MeshCulling) -> Mesh {
    let origin = chunk.world_position();
    let mut mesh = Mesh::new();

    for (position, _) in chunk.active_voxels() {
        let visible = visible_sides(chunk, position, culling);
        if !visible.iter().any(|v| *v) {
            continue;
        }

        let voxel_origin = origin + voxel_offset(position) * BLOCK_RENDER_SIZE;
        for side in BlockSide::all() {
            if visible[side as usize] {
                mesh.push_face(&Face::new(voxel_origin, side));
            }
        }
    }

    mesh
}

/// Decides which faces of the voxel at `position` are emitted, indexed by
/// `BlockSide as usize`.
pub fn visible_sides(chunk: &Chunk, position: Point3<usize>, culling: MeshCulling) -> [bool; 6] {
    let mut exposed = [false; 6];
    for side in BlockSide::all() {
        exposed[side as usize] = chunk.neighbour(position, side) != Neighbour::Active;
    }

    match culling {
        MeshCulling::Faces => exposed,
        MeshCulling::Cubes => {
            let enclosed = exposed.iter().all(|e| !*e);
            [!enclosed; 6]
        }
    }
}

fn voxel_offset(position: Point3<usize>) -> cgmath::Vector3<f32> {
    Point3::new(position.x as f32, position.y as f32, position.z as f32).to_vec()
}
