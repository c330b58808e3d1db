//! # Chunk Streaming Integration Tests
//!
//! Drives the streamer through the public API and checks the window
//! invariant, the renderer hook contract and the no-op fast path.

use std::collections::{HashMap, HashSet};

use cgmath::Point3;
use voxel_terrain::config::StreamerConfig;
use voxel_terrain::rendering::meshing::MeshCulling;
use voxel_terrain::rendering::{BufferState, ChunkRenderer, NullRenderer};
use voxel_terrain::voxels::chunk::{Chunk, ChunkCoordinate, CHUNK_DIMENSION, MAX_CHUNK_COORDINATE};
use voxel_terrain::voxels::streamer::{compute_window, ChunkStreamer};
use voxel_terrain::voxels::terrain::{FlatHeightField, NoiseSettings, PerlinHeightField};

/// Renderer that records every hook call and checks the upload/release pairing.
#[derive(Default)]
struct RecordingRenderer {
    resident: HashSet<ChunkCoordinate>,
    uploads: Vec<ChunkCoordinate>,
    releases: Vec<ChunkCoordinate>,
}

impl ChunkRenderer for RecordingRenderer {
    fn upload_chunk(&mut self, chunk: &Chunk) {
        assert!(chunk.has_mesh(), "chunk {} uploaded before meshing", chunk.coordinate());
        assert!(
            self.resident.insert(chunk.coordinate()),
            "chunk {} uploaded twice",
            chunk.coordinate()
        );
        self.uploads.push(chunk.coordinate());
    }

    fn release_chunk_resources(&mut self, coordinate: ChunkCoordinate) {
        assert!(self.resident.remove(&coordinate), "chunk {coordinate} released without upload");
        self.releases.push(coordinate);
    }
}

fn chunk_point(x: i32, z: i32) -> Point3<f32> {
    Point3::new(
        (x * CHUNK_DIMENSION) as f32 + 3.5,
        64.0,
        (z * CHUNK_DIMENSION) as f32 + 11.25,
    )
}

fn square(x_range: std::ops::RangeInclusive<i32>, z_range: std::ops::RangeInclusive<i32>) -> HashSet<ChunkCoordinate> {
    x_range
        .flat_map(|x| z_range.clone().map(move |z| ChunkCoordinate::new(x, z)))
        .collect()
}

fn loaded_set<R: ChunkRenderer>(streamer: &ChunkStreamer<PerlinHeightField, R>) -> HashSet<ChunkCoordinate> {
    streamer.loaded_coordinates().collect()
}

fn perlin() -> PerlinHeightField {
    PerlinHeightField::new(42, NoiseSettings::default())
}

#[test]
fn test_radius_three_move_one_chunk_east() {
    let mut renderer = RecordingRenderer::default();
    let mut streamer = ChunkStreamer::new(3, MeshCulling::Faces, perlin(), &mut renderer, chunk_point(0, 0));

    assert_eq!(streamer.loaded_chunk_count(), 49);
    assert_eq!(loaded_set(&streamer), square(-3..=3, -3..=3));

    let report = streamer.step(chunk_point(1, 0));

    let loaded: HashSet<_> = report.loaded.iter().copied().collect();
    let evicted: HashSet<_> = report.evicted.iter().copied().collect();
    assert_eq!(report.loaded.len(), 7);
    assert_eq!(report.evicted.len(), 7);
    assert_eq!(loaded, square(4..=4, -3..=3));
    assert_eq!(evicted, square(-3..=-3, -3..=3));

    assert_eq!(streamer.loaded_chunk_count(), 49);
    assert_eq!(loaded_set(&streamer), square(-2..=4, -3..=3));
    assert!(streamer.check_invariants().is_ok());
    assert_eq!(streamer.renderer().releases.len(), 7);
}

#[test]
fn test_second_step_in_same_chunk_does_no_work() {
    let mut renderer = RecordingRenderer::default();
    let mut streamer = ChunkStreamer::new(2, MeshCulling::Faces, perlin(), &mut renderer, chunk_point(0, 0));

    let first = streamer.step(chunk_point(-1, 2));
    assert!(!first.is_noop());
    let uploads = streamer.renderer().uploads.len();
    let releases = streamer.renderer().releases.len();
    let generated = streamer.stats().chunks_generated;

    // Different position, same chunk
    let mut same_chunk = chunk_point(-1, 2);
    same_chunk.x += 4.0;
    same_chunk.z -= 6.0;
    let second = streamer.step(same_chunk);

    assert!(second.is_noop());
    assert_eq!(streamer.renderer().uploads.len(), uploads);
    assert_eq!(streamer.renderer().releases.len(), releases);
    assert_eq!(streamer.stats().chunks_generated, generated);
}

#[test]
fn test_window_invariant_holds_along_random_walk() {
    let mut rng = fastrand::Rng::with_seed(1234);
    let mut streamer = ChunkStreamer::new(
        2,
        MeshCulling::Faces,
        FlatHeightField::new(0.4),
        BufferState::new(),
        Point3::new(0.0, 0.0, 0.0),
    );
    let mut position = Point3::new(0.0f32, 0.0, 0.0);

    for _ in 0..400 {
        position.x += rng.f32() * 24.0 - 12.0;
        position.z += rng.f32() * 24.0 - 12.0;
        streamer.step(position);

        let reference = ChunkCoordinate::from_world_position(position);
        let expected: HashSet<_> = compute_window(reference, 2).coordinates().collect();
        let actual: HashSet<_> = streamer.loaded_coordinates().collect();
        assert_eq!(actual, expected);
        assert_eq!(streamer.renderer().resident_count(), 25);
    }

    let stats = streamer.stats();
    assert_eq!(stats.steps, 400);
    assert_eq!(stats.chunks_generated - stats.chunks_evicted, 25);
}

#[test]
fn test_negative_coordinates_use_floor() {
    let mut streamer = ChunkStreamer::new(
        1,
        MeshCulling::Faces,
        FlatHeightField::new(0.2),
        BufferState::new(),
        Point3::new(0.5, 0.0, 0.5),
    );

    streamer.step(Point3::new(-0.5, 0.0, 0.5));
    assert_eq!(streamer.reference_coordinate(), ChunkCoordinate::new(-1, 0));
    assert!(streamer.is_loaded(&ChunkCoordinate::new(-2, 1)));
    assert!(!streamer.is_loaded(&ChunkCoordinate::new(1, 0)));
}

#[test]
fn test_every_upload_is_released_by_drop() {
    let mut renderer = RecordingRenderer::default();
    {
        let mut streamer = ChunkStreamer::new(1, MeshCulling::Cubes, perlin(), &mut renderer, chunk_point(5, 5));
        for x in 5..12 {
            streamer.step(chunk_point(x, 5 - x));
        }
    }

    assert!(renderer.resident.is_empty());
    assert_eq!(renderer.uploads.len(), renderer.releases.len());

    // Each coordinate is released exactly as many times as it was uploaded
    let mut balance: HashMap<ChunkCoordinate, i32> = HashMap::new();
    for c in &renderer.uploads {
        *balance.entry(*c).or_default() += 1;
    }
    for c in &renderer.releases {
        *balance.entry(*c).or_default() -= 1;
    }
    assert!(balance.values().all(|b| *b == 0));
}

#[test]
fn test_loaded_chunks_sit_at_their_world_positions() {
    let streamer = ChunkStreamer::new(1, MeshCulling::Faces, perlin(), BufferState::new(), chunk_point(-4, 7));

    streamer.for_each_loaded_chunk(|chunk| {
        let c = chunk.coordinate();
        assert_eq!(
            chunk.world_position(),
            Point3::new((c.x * 16) as f32, 0.0, (c.z * 16) as f32)
        );
        let mesh = chunk.mesh().expect("loaded chunks are meshed");
        for vertex in mesh.vertices() {
            assert!(vertex[0] >= (c.x * 16) as f32 && vertex[0] <= (c.x * 16 + 16) as f32);
            assert!(vertex[2] >= (c.z * 16) as f32 && vertex[2] <= (c.z * 16 + 16) as f32);
            assert!(vertex[1] >= 0.0 && vertex[1] <= 16.0);
        }
    });
}

#[test]
fn test_streamer_from_json_config() {
    let config = StreamerConfig::from_json_str(
        r#"{ "radius": 1, "seed": 7, "initial_position": [40.0, 0.0, -20.0] }"#,
    )
    .expect("valid config");

    let streamer = ChunkStreamer::from_config(&config, BufferState::new());
    assert_eq!(streamer.radius(), 1);
    assert_eq!(streamer.reference_coordinate(), ChunkCoordinate::new(2, -2));
    assert_eq!(streamer.loaded_chunk_count(), config.window_size());
    assert!(streamer.check_invariants().is_ok());
}

#[test]
fn test_radius_zero_keeps_one_chunk() {
    let mut streamer = ChunkStreamer::new(
        0,
        MeshCulling::Faces,
        FlatHeightField::new(0.5),
        BufferState::new(),
        Point3::new(0.0, 0.0, 0.0),
    );
    let report = streamer.step(Point3::new(16.0, 0.0, 0.0));

    assert_eq!(report.loaded, vec![ChunkCoordinate::new(1, 0)]);
    assert_eq!(report.evicted, vec![ChunkCoordinate::new(0, 0)]);
    assert_eq!(streamer.loaded_chunk_count(), 1);
}

#[test]
fn test_far_reference_position_keeps_the_window() {
    let mut streamer = ChunkStreamer::new(
        1,
        MeshCulling::Faces,
        FlatHeightField::new(0.2),
        NullRenderer,
        Point3::new(0.0, 0.0, 0.0),
    );

    let report = streamer.step(Point3::new(3.0e9, 0.0, -3.0e9));
    assert_eq!(report.loaded.len(), 9);
    assert_eq!(
        streamer.reference_coordinate(),
        ChunkCoordinate::new(MAX_CHUNK_COORDINATE, -MAX_CHUNK_COORDINATE)
    );
    assert!(streamer.check_invariants().is_ok());

    // Further out along the same axes clamps to the same chunk
    assert!(streamer.step(Point3::new(f32::MAX, 0.0, f32::MIN)).is_noop());
}
