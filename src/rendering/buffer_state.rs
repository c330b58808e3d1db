//! # Buffer State Module
//!
//! A bookkeeping renderer: it packs each uploaded chunk mesh into interleaved
//! vertex bytes and records how much memory every chunk holds, without any GPU
//! behind it. The demo binary drives it, and tests use it to prove that every
//! upload is matched by exactly one release.

use std::collections::HashMap;

use log::{error, trace, warn};

use crate::voxels::chunk::{Chunk, ChunkCoordinate};

use super::{ChunkRenderer, Vertex};

/// Analytics data for one chunk's vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferAnalytics {
    /// Bytes held by the chunk's interleaved vertex buffer
    pub allocated_memory: u64,
    /// Number of vertices in the buffer
    pub vertex_count: u64,
    /// Number of times the chunk has been drawn
    pub times_drawn: u64,
}

/// Tracks per-chunk vertex buffer memory.
#[derive(Debug, Default)]
pub struct BufferState {
    /// Live buffers by chunk coordinate
    buffers: HashMap<ChunkCoordinate, BufferAnalytics>,
    /// Number of `upload_chunk` calls seen
    uploads: u64,
    /// Number of `release_chunk_resources` calls seen
    releases: u64,
}

impl BufferState {
    /// Creates an empty buffer state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a draw of `chunk`.
    ///
    /// Returns `false` if the chunk has no live buffer, which means it was
    /// never uploaded or has already been released.
    pub fn draw(&mut self, chunk: &Chunk) -> bool {
        match self.buffers.get_mut(&chunk.coordinate()) {
            Some(analytics) => {
                analytics.times_drawn += 1;
                true
            }
            None => {
                warn!("Draw requested for chunk {} without a buffer", chunk.coordinate());
                false
            }
        }
    }

    /// Analytics for the chunk at `coordinate`, if it is resident.
    pub fn get_buffer(&self, coordinate: &ChunkCoordinate) -> Option<&BufferAnalytics> {
        self.buffers.get(coordinate)
    }

    /// Returns `true` if the chunk at `coordinate` holds a buffer.
    pub fn is_resident(&self, coordinate: &ChunkCoordinate) -> bool {
        self.buffers.contains_key(coordinate)
    }

    /// Number of live buffers.
    pub fn resident_count(&self) -> usize {
        self.buffers.len()
    }

    /// Total memory held by live buffers, in bytes.
    pub fn get_total_allocated_memory(&self) -> u64 {
        self.buffers.values().map(|b| b.allocated_memory).sum()
    }

    /// Number of uploads seen so far.
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    /// Number of releases seen so far.
    pub fn releases(&self) -> u64 {
        self.releases
    }
}

impl ChunkRenderer for BufferState {
    fn upload_chunk(&mut self, chunk: &Chunk) {
        self.uploads += 1;

        let vertices: Vec<Vertex> = chunk.mesh().map(|mesh| mesh.interleaved()).unwrap_or_default();
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        let analytics = BufferAnalytics {
            allocated_memory: bytes.len() as u64,
            vertex_count: vertices.len() as u64,
            times_drawn: 0,
        };

        trace!(
            "Uploading chunk {}: {} vertices, {} bytes",
            chunk.coordinate(),
            analytics.vertex_count,
            analytics.allocated_memory
        );

        if self.buffers.insert(chunk.coordinate(), analytics).is_some() {
            error!("Chunk {} uploaded twice without a release", chunk.coordinate());
        }
    }

    fn release_chunk_resources(&mut self, coordinate: ChunkCoordinate) {
        self.releases += 1;
        if self.buffers.remove(&coordinate).is_none() {
            warn!("Release requested for chunk {} without a buffer", coordinate);
        }
    }
}
