//! Terrain generation for the demo world.
//!
//! Column heights come from fractal Perlin noise; each column is then layered
//! bedrock -> stone -> dirt -> biome surface block, with the biome taken from
//! a separate noise field.

use glam::IVec3;
use noise::{NoiseFn, Perlin};

use crate::biome::BiomeField;
use crate::block::BlockId;
use crate::voxel::VoxelGrid;

/// Layer counts, in blocks.
const BEDROCK_LAYERS: i32 = 2;
const DIRT_LAYERS: i32 = 3;

/// Parameters for world generation.
#[derive(Debug, Clone)]
pub struct TerrainParams {
    /// Grid extent in blocks.
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    /// World block coordinate of the minimum corner.
    pub min: IVec3,
    pub seed: u32,
    /// Mean surface height in world Y.
    pub base_height: f64,
    /// Height variation above/below the base.
    pub amplitude: f64,
    /// Noise frequency (lower = smoother hills).
    pub frequency: f64,
    /// Number of octaves for fractal noise.
    pub octaves: u32,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Biome field frequency.
    pub biome_frequency: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            nx: 256,
            ny: 256,
            nz: 256,
            min: IVec3::new(-128, 0, -128),
            seed: 0,
            base_height: 64.0,
            amplitude: 24.0,
            frequency: 0.008,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            biome_frequency: 0.003,
        }
    }
}

/// Fractal noise in [-1, 1].
fn fractal(perlin: &Perlin, x: f64, z: f64, params: &TerrainParams) -> f64 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = params.frequency;
    let mut max_value = 0.0;
    for _ in 0..params.octaves {
        value += perlin.get([x * frequency, z * frequency]) * amplitude;
        max_value += amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }
    value / max_value
}

/// Generate the demo world grid.
pub fn generate(params: &TerrainParams) -> VoxelGrid {
    let mut grid = VoxelGrid::new(params.nx, params.ny, params.nz, params.min);
    let height_noise = Perlin::new(params.seed);
    let biomes = BiomeField::new(params.seed.wrapping_add(1), params.biome_frequency);

    for iz in 0..params.nz {
        for ix in 0..params.nx {
            let wx = params.min.x + ix as i32;
            let wz = params.min.z + iz as i32;
            let n = fractal(&height_noise, wx as f64, wz as f64, params);
            let surface_y = (params.base_height + n * params.amplitude).floor() as i32;
            let surface_y = surface_y.clamp(params.min.y + BEDROCK_LAYERS, grid.max_y() - 1);

            let biome = biomes.sample(wx as f64, wz as f64);
            grid.set_column_biome(wx, wz, biome);
            let surface_block = biome.surface_block();

            let stone_top = surface_y - DIRT_LAYERS;
            for wy in params.min.y..=surface_y {
                let block = if wy < params.min.y + BEDROCK_LAYERS {
                    BlockId::Bedrock
                } else if wy == surface_y {
                    surface_block
                } else if wy > stone_top {
                    BlockId::Dirt
                } else {
                    BlockId::Stone
                };
                grid.set(IVec3::new(wx, wy, wz), block);
            }
        }
    }

    log::info!(
        "generated {}x{}x{} world, seed {}, {} solid blocks",
        params.nx,
        params.ny,
        params.nz,
        params.seed,
        grid.count_blocks(|b| b.is_solid())
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params(seed: u32) -> TerrainParams {
        TerrainParams {
            nx: 24,
            ny: 64,
            nz: 24,
            min: IVec3::new(-12, 0, -12),
            seed,
            base_height: 20.0,
            amplitude: 6.0,
            ..TerrainParams::default()
        }
    }

    #[test]
    fn same_seed_generates_same_world() {
        let a = generate(&small_params(1234));
        let b = generate(&small_params(1234));
        for x in -12..12 {
            for z in -12..12 {
                assert_eq!(a.highest_solid_y(x, z), b.highest_solid_y(x, z));
                assert_eq!(a.column_biome(x, z), b.column_biome(x, z));
            }
        }
    }

    #[test]
    fn columns_are_layered_bedrock_up() {
        let grid = generate(&small_params(77));
        for x in [-12, -5, 0, 6, 11] {
            for z in [-12, -3, 0, 9, 11] {
                let top = grid.highest_solid_y(x, z).unwrap();
                assert!(top >= BEDROCK_LAYERS);
                assert_eq!(grid.get(IVec3::new(x, 0, z)), BlockId::Bedrock);
                assert_eq!(grid.get(IVec3::new(x, 1, z)), BlockId::Bedrock);
                // Everything above the surface is air.
                assert_eq!(grid.get(IVec3::new(x, top + 1, z)), BlockId::Air);
                // Surface block matches the column biome.
                let biome = grid.column_biome(x, z).unwrap();
                assert_eq!(grid.get(IVec3::new(x, top, z)), biome.surface_block());
            }
        }
    }

    #[test]
    fn surface_stays_inside_band() {
        let grid = generate(&small_params(8));
        for x in -12..12 {
            for z in -12..12 {
                let top = grid.highest_solid_y(x, z).unwrap();
                assert!(top < grid.max_y());
            }
        }
    }
}
