//! # Chunk Streamer Module
//!
//! This module provides the `ChunkStreamer`, which keeps a square window of
//! chunks loaded around a moving reference position.
//!
//! ## Streaming window
//!
//! The window is every chunk coordinate within Chebyshev distance `radius` of
//! the chunk containing the reference position, `(2 * radius + 1)²` chunks in
//! all. After construction and after every [`ChunkStreamer::step`], the loaded
//! set is exactly that window: no gaps, no extras.
//!
//! ## Step
//!
//! `step` is meant to be called once per frame. When the reference stays in
//! the same chunk it returns immediately. Otherwise it computes the new window
//! once and applies both halves of the update against it:
//!
//! 1. chunks outside the window are released on the renderer and dropped
//! 2. chunks inside the window that are not loaded are generated, meshed and
//!    uploaded
//!
//! Generation is synchronous; a step runs to completion before returning.
//! Chunk meshes are built once at creation and never rebuilt.

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, error, info, trace};

use crate::config::StreamerConfig;
use crate::error::InvariantViolation;
use crate::rendering::{meshing::MeshCulling, ChunkRenderer};

use super::chunk::{Chunk, ChunkCoordinate, MAX_STREAMING_RADIUS};
use super::terrain::{HeightField, TerrainGenerator};

/// The set of chunk coordinates within `radius` of `center`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkWindow {
    center: ChunkCoordinate,
    radius: i32,
}

/// Computes the streaming window around `reference`.
///
/// The radius is clamped to `[0, MAX_STREAMING_RADIUS]`.
pub fn compute_window(reference: ChunkCoordinate, radius: i32) -> ChunkWindow {
    ChunkWindow::new(reference, radius)
}

impl ChunkWindow {
    /// Creates the window centred on `center`.
    pub fn new(center: ChunkCoordinate, radius: i32) -> Self {
        ChunkWindow {
            center,
            radius: clamp_radius(radius),
        }
    }

    /// The centre chunk.
    pub fn center(&self) -> ChunkCoordinate {
        self.center
    }

    /// The Chebyshev radius.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Returns `true` if `coordinate` lies in the window.
    pub fn contains(&self, coordinate: &ChunkCoordinate) -> bool {
        self.center.chebyshev_distance(coordinate) <= self.radius
    }

    /// Number of coordinates in the window, `(2 * radius + 1)²`.
    pub fn len(&self) -> usize {
        let side = (2 * self.radius + 1) as usize;
        side * side
    }

    /// Always `false`: a window holds at least its centre.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the window, x outermost, z innermost.
    ///
    /// Coordinates past the `i32` limits are skipped; windows around a
    /// reference from [`ChunkCoordinate::from_world_position`] never reach them.
    pub fn coordinates(&self) -> impl Iterator<Item = ChunkCoordinate> {
        let ChunkWindow { center, radius } = *self;
        let x_range = center.x.saturating_sub(radius)..=center.x.saturating_add(radius);
        let z_range = center.z.saturating_sub(radius)..=center.z.saturating_add(radius);
        x_range.flat_map(move |x| z_range.clone().map(move |z| ChunkCoordinate::new(x, z)))
    }
}

fn clamp_radius(radius: i32) -> i32 {
    radius.clamp(0, MAX_STREAMING_RADIUS)
}

/// What a single [`ChunkStreamer::step`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Chunks generated this step, in window order.
    pub loaded: Vec<ChunkCoordinate>,
    /// Chunks evicted this step, sorted.
    pub evicted: Vec<ChunkCoordinate>,
}

impl StepReport {
    /// Returns `true` if the step neither loaded nor evicted anything.
    pub fn is_noop(&self) -> bool {
        self.loaded.is_empty() && self.evicted.is_empty()
    }
}

/// Running counters for a streamer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingStats {
    /// Calls to `step`.
    pub steps: u64,
    /// Steps where the reference chunk changed.
    pub moves: u64,
    /// Chunks generated, including the initial window.
    pub chunks_generated: u64,
    /// Chunks evicted, including those released on shutdown.
    pub chunks_evicted: u64,
}

/// Keeps the chunks around a reference position loaded.
///
/// The streamer owns every loaded chunk, the height field that generates
/// them, and the renderer whose hooks it calls.
pub struct ChunkStreamer<H: HeightField, R: ChunkRenderer> {
    /// Loaded chunks by coordinate.
    loaded_chunks: HashMap<ChunkCoordinate, Chunk>,
    /// Chunk containing the reference position at the last step.
    last_reference: ChunkCoordinate,
    /// Chebyshev radius of the window.
    radius: i32,
    /// Culling mode for new chunk meshes.
    culling: MeshCulling,
    /// Terrain source for new chunks.
    height_field: H,
    /// External renderer hooks.
    renderer: R,
    stats: StreamingStats,
}

impl<R: ChunkRenderer> ChunkStreamer<TerrainGenerator, R> {
    /// Creates a streamer from a validated config.
    pub fn from_config(config: &StreamerConfig, renderer: R) -> Self {
        ChunkStreamer::new(
            config.radius,
            config.culling,
            config.build_generator(),
            renderer,
            config.initial_position(),
        )
    }
}

impl<H: HeightField, R: ChunkRenderer> ChunkStreamer<H, R> {
    /// Creates a streamer and loads the full window around `initial_position`.
    ///
    /// The radius is clamped to `[0, MAX_STREAMING_RADIUS]`.
    pub fn new(
        radius: i32,
        culling: MeshCulling,
        height_field: H,
        renderer: R,
        initial_position: Point3<f32>,
    ) -> Self {
        let reference = ChunkCoordinate::from_world_position(initial_position);
        let mut streamer = ChunkStreamer {
            loaded_chunks: HashMap::new(),
            last_reference: reference,
            radius: clamp_radius(radius),
            culling,
            height_field,
            renderer,
            stats: StreamingStats::default(),
        };

        let start = web_time::Instant::now();
        let window = streamer.window();
        streamer.load_missing(&window);

        info!(
            "Chunk streamer initialized around {} with radius {} ({} chunks) in {:?}",
            reference,
            streamer.radius,
            streamer.loaded_chunks.len(),
            start.elapsed()
        );
        streamer.debug_check_invariants();
        streamer
    }

    /// Advances streaming to a new reference position.
    ///
    /// Does nothing if the position is in the same chunk as last time.
    pub fn step(&mut self, reference_position: Point3<f32>) -> StepReport {
        self.stats.steps += 1;

        let reference = ChunkCoordinate::from_world_position(reference_position);
        if reference == self.last_reference {
            return StepReport::default();
        }

        let start = web_time::Instant::now();
        let window = compute_window(reference, self.radius);
        let evicted = self.evict_outside(&window);
        let loaded = self.load_missing(&window);
        self.last_reference = reference;
        self.stats.moves += 1;

        debug!(
            "Reference moved to chunk {}: loaded {}, evicted {} in {:?}",
            reference,
            loaded.len(),
            evicted.len(),
            start.elapsed()
        );
        self.debug_check_invariants();

        StepReport { loaded, evicted }
    }

    /// Visits every loaded chunk. The order is unspecified.
    pub fn for_each_loaded_chunk<F: FnMut(&Chunk)>(&self, mut visitor: F) {
        for chunk in self.loaded_chunks.values() {
            visitor(chunk);
        }
    }

    /// Like [`Self::for_each_loaded_chunk`], also handing out the renderer.
    pub fn draw_loaded_chunks<F: FnMut(&mut R, &Chunk)>(&mut self, mut draw: F) {
        for chunk in self.loaded_chunks.values() {
            draw(&mut self.renderer, chunk);
        }
    }

    /// The current streaming window.
    pub fn window(&self) -> ChunkWindow {
        compute_window(self.last_reference, self.radius)
    }

    /// Chunk containing the reference position at the last step.
    pub fn reference_coordinate(&self) -> ChunkCoordinate {
        self.last_reference
    }

    /// The window radius.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// The culling mode used for new chunks.
    pub fn culling(&self) -> MeshCulling {
        self.culling
    }

    /// Number of loaded chunks.
    pub fn loaded_chunk_count(&self) -> usize {
        self.loaded_chunks.len()
    }

    /// Returns `true` if the chunk at `coordinate` is loaded.
    pub fn is_loaded(&self, coordinate: &ChunkCoordinate) -> bool {
        self.loaded_chunks.contains_key(coordinate)
    }

    /// The loaded chunk at `coordinate`, if any.
    pub fn get_chunk(&self, coordinate: &ChunkCoordinate) -> Option<&Chunk> {
        self.loaded_chunks.get(coordinate)
    }

    /// Coordinates of every loaded chunk, in unspecified order.
    pub fn loaded_coordinates(&self) -> impl Iterator<Item = ChunkCoordinate> + '_ {
        self.loaded_chunks.keys().copied()
    }

    /// Running counters.
    pub fn stats(&self) -> StreamingStats {
        self.stats
    }

    /// The height field used for generation.
    pub fn height_field(&self) -> &H {
        &self.height_field
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Verifies that the loaded set is exactly the current window and that
    /// every loaded chunk carries a well-formed mesh.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let window = self.window();

        if self.loaded_chunks.len() != window.len() {
            return Err(InvariantViolation::WindowSize {
                expected: window.len(),
                actual: self.loaded_chunks.len(),
            });
        }

        if let Some(outside) = self.loaded_chunks.keys().find(|c| !window.contains(c)) {
            return Err(InvariantViolation::OutsideWindow(*outside));
        }

        if let Some(missing) = window.coordinates().find(|c| !self.loaded_chunks.contains_key(c)) {
            return Err(InvariantViolation::MissingFromWindow(missing));
        }

        for chunk in self.loaded_chunks.values() {
            match chunk.mesh() {
                Some(mesh) => mesh.validate()?,
                None => return Err(InvariantViolation::MissingMesh(chunk.coordinate())),
            }
        }

        Ok(())
    }

    /// Releases and drops every loaded chunk.
    ///
    /// Called automatically on drop. Afterwards the streamer is empty until
    /// the reference chunk changes.
    pub fn release_all(&mut self) {
        let released = self.loaded_chunks.len();
        for (coordinate, _chunk) in self.loaded_chunks.drain() {
            self.renderer.release_chunk_resources(coordinate);
        }
        self.stats.chunks_evicted += released as u64;

        if released > 0 {
            info!("Released {} chunks", released);
        }
    }

    /// Evicts every loaded chunk outside `window`, releasing its renderer
    /// resources first.
    fn evict_outside(&mut self, window: &ChunkWindow) -> Vec<ChunkCoordinate> {
        let mut evicted: Vec<ChunkCoordinate> = self
            .loaded_chunks
            .keys()
            .filter(|coordinate| !window.contains(coordinate))
            .copied()
            .collect();
        evicted.sort();

        for coordinate in &evicted {
            self.renderer.release_chunk_resources(*coordinate);
            self.loaded_chunks.remove(coordinate);
            trace!("Evicted chunk {}", coordinate);
        }

        self.stats.chunks_evicted += evicted.len() as u64;
        evicted
    }

    /// Generates every chunk in `window` that is not yet loaded.
    fn load_missing(&mut self, window: &ChunkWindow) -> Vec<ChunkCoordinate> {
        let missing: Vec<ChunkCoordinate> = window
            .coordinates()
            .filter(|coordinate| !self.loaded_chunks.contains_key(coordinate))
            .collect();

        for coordinate in &missing {
            self.load_chunk(*coordinate);
        }

        missing
    }

    fn load_chunk(&mut self, coordinate: ChunkCoordinate) {
        let chunk = Chunk::generate(coordinate, &self.height_field, self.culling);
        trace!(
            "Generated chunk {}: {} active voxels, {} triangles",
            coordinate,
            chunk.active_count(),
            chunk.mesh().map_or(0, |mesh| mesh.triangle_count())
        );

        self.renderer.upload_chunk(&chunk);
        self.loaded_chunks.insert(coordinate, chunk);
        self.stats.chunks_generated += 1;
    }

    fn debug_check_invariants(&self) {
        if cfg!(debug_assertions) {
            if let Err(violation) = self.check_invariants() {
                error!("Chunk streaming invariant violated: {}", violation);
                panic!("chunk streaming invariant violated: {violation}");
            }
        }
    }
}

impl<H: HeightField, R: ChunkRenderer> Drop for ChunkStreamer<H, R> {
    fn drop(&mut self) {
        self.release_all();
    }
}
