//! Procedural generation for the voxel world: blocks, biomes, terrain,
//! and solid rasterization of spherical volumes.

pub mod biome;
pub mod block;
pub mod sphere;
pub mod terrain;
pub mod voxel;

pub use biome::*;
pub use block::*;
pub use sphere::*;
pub use terrain::*;
pub use voxel::*;
