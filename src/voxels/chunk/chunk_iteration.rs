//! # Chunk Iteration Module
//!
//! This module provides an iterator over the active voxels of a chunk in
//! traversal order: x outermost, then y, then z innermost.
//!
//! Because the grid is flattened as `x * S * S + y * S + z`, traversal order
//! is simply ascending index order, so the iterator walks the backing slice
//! front to back and skips inactive cells.

use cgmath::Point3;

use crate::voxels::block::Voxel;

use super::{Chunk, CHUNK_DIMENSION};

/// An iterator over all active voxels in a chunk.
///
/// Yields the chunk-local position of each active voxel together with a
/// reference to it.
pub struct ChunkVoxelIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next flattened index to inspect
    current_offset: usize,
}

impl<'a> ChunkVoxelIterator<'a> {
    /// Creates a new `ChunkVoxelIterator` positioned before the first voxel.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkVoxelIterator {
            chunk_ref,
            current_offset: 0,
        }
    }
}

impl<'a> Iterator for ChunkVoxelIterator<'a> {
    type Item = (Point3<usize>, &'a Voxel);

    fn next(&mut self) -> Option<Self::Item> {
        let voxels = self.chunk_ref.voxels();
        while self.current_offset < voxels.len() {
            let offset = self.current_offset;
            self.current_offset += 1;

            let voxel = &voxels[offset];
            if voxel.is_active() {
                return Some((delinearize(offset), voxel));
            }
        }
        None
    }
}

/// Inverse of [`Chunk::index`].
pub fn delinearize(offset: usize) -> Point3<usize> {
    let dimension = CHUNK_DIMENSION as usize;
    Point3::new(
        offset / (dimension * dimension),
        (offset / dimension) % dimension,
        offset % dimension,
    )
}
