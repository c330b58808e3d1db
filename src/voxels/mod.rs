//! # Voxel Terrain Core
//!
//! This module contains the voxel data model, terrain generation and chunk
//! streaming.
//!
//! ## Architecture
//!
//! * **Block**: the voxel cell, its material and its face directions
//! * **Chunk**: a fixed-size 3D grid of voxels plus its extracted mesh
//! * **Terrain**: height fields that decide which voxels are filled
//! * **Streamer**: keeps a window of chunks loaded around a reference position
//!
//! ## Data Flow
//!
//! 1. The streamer receives a reference position once per frame
//! 2. Chunks entering the window are created and filled from the height field
//! 3. Each new chunk extracts its mesh and is handed to the renderer
//! 4. Chunks leaving the window are released on the renderer and dropped
//!
//! Everything runs on the caller's thread.

pub mod block;
pub mod chunk;
pub mod streamer;
pub mod terrain;
