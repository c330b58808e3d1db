//! # Rendering Module
//!
//! The boundary between terrain streaming and the renderer.
//!
//! Drawing, GPU upload and shader setup live outside this crate. What lives
//! here is what the streamer hands over:
//!
//! * [`ChunkRenderer`] - the hooks a renderer implements: upload a new chunk's
//!   mesh, and release a chunk's GPU resources before the chunk is dropped
//! * [`meshing`] - mesh extraction from voxel grids
//! * [`Vertex`] - an interleaved position/normal vertex for upload
//! * [`BufferState`] - a renderer that only tracks per-chunk buffer memory,
//!   used by the demo binary and for leak checks

use crate::voxels::chunk::{Chunk, ChunkCoordinate};

mod buffer_state;
pub mod meshing;
mod vertex;

pub use buffer_state::BufferState;
pub use vertex::Vertex;

/// Hooks the chunk streamer calls on the external renderer.
///
/// Both calls happen synchronously on the streaming thread. For every chunk
/// passed to `upload_chunk`, `release_chunk_resources` is called exactly once
/// with its coordinate before the chunk is dropped.
pub trait ChunkRenderer {
    /// A chunk has been generated and meshed; its mesh will not change again.
    fn upload_chunk(&mut self, chunk: &Chunk);

    /// The chunk at `coordinate` is about to be destroyed.
    fn release_chunk_resources(&mut self, coordinate: ChunkCoordinate);
}

/// A renderer that ignores every call.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullRenderer;

impl ChunkRenderer for NullRenderer {
    fn upload_chunk(&mut self, _chunk: &Chunk) {}

    fn release_chunk_resources(&mut self, _coordinate: ChunkCoordinate) {}
}

impl<R: ChunkRenderer + ?Sized> ChunkRenderer for &mut R {
    fn upload_chunk(&mut self, chunk: &Chunk) {
        (**self).upload_chunk(chunk);
    }

    fn release_chunk_resources(&mut self, coordinate: ChunkCoordinate) {
        (**self).release_chunk_resources(coordinate);
    }
}
