//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16x16x16 grid of voxels at a
//! world-aligned column position, together with the mesh extracted from it.
//!
//! ## Storage
//!
//! Voxels live in one contiguous boxed slice of `CHUNK_SIZE` cells, flattened
//! as `index(x, y, z) = x * S * S + y * S + z`. The chunk exclusively owns the
//! grid and its mesh buffers; both are freed when the chunk is dropped.
//!
//! ## Lifecycle
//!
//! 1. [`Chunk::new`] creates an all-inactive grid with no mesh
//! 2. [`Chunk::build_terrain`] fills it from a height field
//! 3. [`Chunk::extract_mesh`] replaces the mesh buffers in full
//!
//! [`Chunk::generate`] runs all three.

use std::fmt;

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::rendering::meshing::{self, Mesh, MeshCulling};
use crate::voxels::terrain::HeightField;

use super::block::block_side::BlockSide;
use super::block::block_type::MaterialTag;
use super::block::Voxel;

pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in voxels.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of voxels in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of voxels in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Largest chunk index a world position maps to along either axis.
///
/// Reference positions further out are clamped to this chunk. Half of the
/// `i32` world range is left as headroom, so a window of up to
/// [`MAX_STREAMING_RADIUS`] chunks around any reachable reference still has
/// world origins that fit in an `i32`.
pub const MAX_CHUNK_COORDINATE: i32 = i32::MAX / CHUNK_DIMENSION / 2;

/// Largest supported streaming radius, in chunks.
pub const MAX_STREAMING_RADIUS: i32 = 1024;

/// Horizontal position of a chunk, in chunk units.
///
/// Chunks span the full world height, so only `x` and `z` are tracked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoordinate {
    /// Chunk index along world X.
    pub x: i32,
    /// Chunk index along world Z.
    pub z: i32,
}

impl ChunkCoordinate {
    /// Creates a coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoordinate { x, z }
    }

    /// Returns the coordinate of the chunk containing a world position.
    ///
    /// Uses floor division so that negative positions map to negative chunks
    /// (`x = -0.5` lives in chunk `-1`, not `0`). The result is clamped to
    /// `±MAX_CHUNK_COORDINATE`; a NaN component maps to chunk `0`.
    pub fn from_world_position(position: Point3<f32>) -> Self {
        ChunkCoordinate {
            x: Self::chunk_index(position.x),
            z: Self::chunk_index(position.z),
        }
    }

    fn chunk_index(world: f32) -> i32 {
        let index = (f64::from(world) / f64::from(CHUNK_DIMENSION)).floor();
        if index.is_nan() {
            return 0;
        }
        index.clamp(f64::from(-MAX_CHUNK_COORDINATE), f64::from(MAX_CHUNK_COORDINATE)) as i32
    }

    /// World position of the chunk's minimum corner, `(x * S, 0, z * S)`.
    ///
    /// Saturates at the `i32` limits for coordinates beyond the streamable range.
    pub fn world_origin(&self) -> Point3<i32> {
        Point3::new(
            self.x.saturating_mul(CHUNK_DIMENSION),
            0,
            self.z.saturating_mul(CHUNK_DIMENSION),
        )
    }

    /// Chebyshev distance between two chunk coordinates, saturating at `i32::MAX`.
    pub fn chebyshev_distance(&self, other: &ChunkCoordinate) -> i32 {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dz = (i64::from(self.z) - i64::from(other.z)).abs();
        dx.max(dz).min(i64::from(i32::MAX)) as i32
    }
}

impl fmt::Display for ChunkCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// What lies across one face of a voxel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Neighbour {
    /// The face is on the chunk boundary. Neighbouring chunks are never queried.
    Outside,
    /// An active voxel inside this chunk.
    Active,
    /// An inactive voxel inside this chunk.
    Inactive,
}

/// Represents a 16x16x16 collection of voxels in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates.
    coordinate: ChunkCoordinate,

    /// Flattened voxel grid, `CHUNK_SIZE` entries long.
    voxels: Box<[Voxel]>,

    /// The extracted mesh, `None` until [`Chunk::extract_mesh`] runs.
    mesh: Option<Mesh>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all voxels inactive, no mesh).
    pub fn new(coordinate: ChunkCoordinate) -> Self {
        Chunk {
            coordinate,
            voxels: vec![Voxel::default(); CHUNK_SIZE as usize].into_boxed_slice(),
            mesh: None,
        }
    }

    /// Creates a chunk, builds its terrain and extracts its mesh.
    pub fn generate<H: HeightField + ?Sized>(
        coordinate: ChunkCoordinate,
        height_field: &H,
        culling: MeshCulling,
    ) -> Self {
        let mut chunk = Chunk::new(coordinate);
        chunk.build_terrain(height_field);
        chunk.extract_mesh(culling);
        chunk
    }

    /// Flattens chunk-local coordinates into an index into the voxel grid.
    #[inline]
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        let dimension = CHUNK_DIMENSION as usize;
        x * dimension * dimension + y * dimension + z
    }

    /// The chunk coordinate this chunk was created at.
    pub fn coordinate(&self) -> ChunkCoordinate {
        self.coordinate
    }

    /// World position of the chunk's minimum corner.
    pub fn world_position(&self) -> Point3<f32> {
        self.coordinate.world_origin().cast::<f32>().unwrap_or_else(|| Point3::new(0.0, 0.0, 0.0))
    }

    /// The whole voxel grid in traversal order.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Gets a reference to the voxel at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn get_voxel(&self, x: usize, y: usize, z: usize) -> &Voxel {
        &self.voxels[Self::index(x, y, z)]
    }

    /// Overwrites the voxel at the specified chunk-relative coordinates.
    ///
    /// This does not touch the mesh; call [`Chunk::extract_mesh`] afterwards.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize, voxel: Voxel) {
        self.voxels[Self::index(x, y, z)] = voxel;
    }

    /// Checks if the voxel at the specified coordinates is active.
    ///
    /// Returns `false` for coordinates outside the chunk.
    pub fn is_voxel_active(&self, x: i32, y: i32, z: i32) -> bool {
        if !Self::in_bounds(x, y, z) {
            return false;
        }
        self.get_voxel(x as usize, y as usize, z as usize).is_active()
    }

    /// Classifies the cell across `side` from the voxel at `position`.
    pub fn neighbour(&self, position: Point3<usize>, side: BlockSide) -> Neighbour {
        let step = side.offset();
        let x = position.x as i32 + step.x;
        let y = position.y as i32 + step.y;
        let z = position.z as i32 + step.z;

        if !Self::in_bounds(x, y, z) {
            Neighbour::Outside
        } else if self.get_voxel(x as usize, y as usize, z as usize).is_active() {
            Neighbour::Active
        } else {
            Neighbour::Inactive
        }
    }

    /// Number of active voxels in the chunk.
    pub fn active_count(&self) -> usize {
        self.voxels.iter().filter(|voxel| voxel.is_active()).count()
    }

    /// Iterates active voxels in traversal order.
    pub fn active_voxels(&self) -> chunk_iteration::ChunkVoxelIterator<'_> {
        chunk_iteration::ChunkVoxelIterator::new(self)
    }

    /// Fills the grid from a height field.
    ///
    /// For every column `(x, z)` the height field is sampled at the column's
    /// world position, scaled by `CHUNK_DIMENSION - 1`, and every voxel with
    /// `y < floor(h)` becomes active grass. The grid is reset first, so
    /// rebuilding with the same field is idempotent.
    pub fn build_terrain<H: HeightField + ?Sized>(&mut self, height_field: &H) {
        self.voxels.fill(Voxel::default());

        let origin = self.coordinate.world_origin();
        let dimension = CHUNK_DIMENSION as usize;

        for x in 0..dimension {
            for z in 0..dimension {
                let world_x = f64::from(origin.x) + x as f64;
                let world_z = f64::from(origin.z) + z as f64;
                let height = height_field.height(world_x, world_z) * f64::from(CHUNK_DIMENSION - 1);
                let column_height = Self::column_height(height);

                for y in 0..column_height {
                    self.set_voxel(x, y, z, Voxel::new(MaterialTag::Grass));
                }
            }
        }
    }

    /// Replaces the mesh with one extracted from the current grid.
    pub fn extract_mesh(&mut self, culling: MeshCulling) {
        let mesh = meshing::extract_mesh(self, culling);
        debug_assert!(mesh.validate().is_ok(), "malformed mesh for chunk {}", self.coordinate);
        self.mesh = Some(mesh);
    }

    /// The most recently extracted mesh, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Returns `true` once a mesh has been extracted.
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        let range = 0..CHUNK_DIMENSION;
        range.contains(&x) && range.contains(&y) && range.contains(&z)
    }

    /// Number of active voxels in a column of scaled height `height`.
    fn column_height(height: f64) -> usize {
        if !height.is_finite() || height <= 0.0 {
            return 0;
        }
        (height.floor() as usize).min(CHUNK_DIMENSION as usize)
    }
}
