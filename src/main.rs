//! # Voxel Terrain Demo
//!
//! Runs the streaming demo: a camera wanders procedural terrain while chunks
//! stream in and out around it.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() {
    voxel_terrain::run();
}
