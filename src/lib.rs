#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

//! # Voxel Terrain
//!
//! Procedural voxel terrain, streamed around a moving viewpoint.
//!
//! The crate generates 16x16x16 voxel chunks from a seeded height field,
//! extracts a face-culled triangle mesh from each one, and keeps a square
//! window of chunks loaded around a reference position as it moves.
//!
//! ## Key Modules
//!
//! * `voxels` - Voxels, chunks, terrain generation and the chunk streamer
//! * `rendering` - Mesh extraction and the hooks an external renderer implements
//! * `config` - Streamer settings loaded from JSON
//! * `error` - Configuration errors and invariant violations
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Point3;
//! use voxel_terrain::{config::StreamerConfig, rendering::NullRenderer, voxels::streamer::ChunkStreamer};
//!
//! let mut streamer = ChunkStreamer::from_config(&StreamerConfig::default(), NullRenderer);
//! // Once per frame, with the camera position
//! streamer.step(Point3::new(40.0, 12.0, -3.0));
//! streamer.for_each_loaded_chunk(|chunk| {
//!     let _ = (chunk.world_position(), chunk.mesh());
//! });
//! ```
//!
//! ## Out of scope
//!
//! Window handling, input, cameras, shaders and GPU upload belong to the host
//! application. It supplies a reference position each frame and implements
//! [`rendering::ChunkRenderer`] to receive meshes.

use cgmath::Point3;
use log::{error, info};

use config::StreamerConfig;
use rendering::BufferState;
use voxels::chunk::CHUNK_DIMENSION;
use voxels::streamer::ChunkStreamer;

pub mod config;
pub mod error;
pub mod rendering;
pub mod voxels;

/// Number of frames the demo camera walks for.
pub const DEMO_FRAME_COUNT: u32 = 2_000;

/// Seed for the demo camera path.
const DEMO_PATH_SEED: u64 = 0x5eed;

/// Runs the streaming demo.
///
/// Loads a config from the path given as the first command-line argument, or
/// uses the defaults. A camera then wanders the terrain for
/// [`DEMO_FRAME_COUNT`] frames while the streamer keeps the window loaded.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match StreamerConfig::load(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path);
                config
            }
            Err(err) => {
                error!("Falling back to default configuration: {}", err);
                StreamerConfig::default()
            }
        },
        None => StreamerConfig::default(),
    };

    let mut streamer = ChunkStreamer::from_config(&config, BufferState::new());
    let mut camera = config.initial_position();
    let mut rng = fastrand::Rng::with_seed(DEMO_PATH_SEED);
    let start = web_time::Instant::now();

    for _ in 0..DEMO_FRAME_COUNT {
        camera = wander(&mut rng, camera);
        streamer.step(camera);
        streamer.draw_loaded_chunks(|buffers, chunk| {
            buffers.draw(chunk);
        });
    }

    let stats = streamer.stats();
    info!(
        "Walked {} frames in {:?}: {} moves, {} chunks generated, {} evicted",
        stats.steps,
        start.elapsed(),
        stats.moves,
        stats.chunks_generated,
        stats.chunks_evicted
    );
    info!(
        "Final chunk {} with {} chunks resident ({} bytes)",
        streamer.reference_coordinate(),
        streamer.renderer().resident_count(),
        streamer.renderer().get_total_allocated_memory()
    );
}

/// Moves the demo camera a short, mostly forward step.
fn wander(rng: &mut fastrand::Rng, camera: Point3<f32>) -> Point3<f32> {
    let step = CHUNK_DIMENSION as f32 / 8.0;
    Point3::new(
        camera.x + step * (0.5 + rng.f32()),
        camera.y,
        camera.z + step * (rng.f32() - 0.5) * 2.0,
    )
}
