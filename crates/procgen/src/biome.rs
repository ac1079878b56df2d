//! Biome classification for surface columns.

use noise::{NoiseFn, Perlin};

use crate::block::BlockId;

/// Surface biome for one terrain column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiomeId {
    Plains,
    Forest,
    Jungle,
    Swamp,
    Desert,
    Mountain,
    /// Snowy conifer belt.
    Taiga,
    /// Frozen flatland; impact winterization converts columns to this.
    Tundra,
}

impl BiomeId {
    /// Biomes counted as snow-covered.
    pub fn is_snowy(self) -> bool {
        matches!(self, BiomeId::Taiga | BiomeId::Tundra)
    }

    pub fn is_desert(self) -> bool {
        matches!(self, BiomeId::Desert)
    }

    /// Surface block laid on top of the dirt layer.
    pub fn surface_block(self) -> BlockId {
        if self.is_snowy() {
            BlockId::Snow
        } else if self.is_desert() {
            BlockId::Sand
        } else {
            BlockId::Grass
        }
    }
}

/// Noise-driven biome assignment: one temperature channel, one moisture
/// channel, classified into bands.
pub struct BiomeField {
    temperature: Perlin,
    moisture: Perlin,
    frequency: f64,
}

impl BiomeField {
    pub fn new(seed: u32, frequency: f64) -> Self {
        Self {
            temperature: Perlin::new(seed),
            moisture: Perlin::new(seed.wrapping_add(7919)),
            frequency,
        }
    }

    pub fn sample(&self, wx: f64, wz: f64) -> BiomeId {
        let t = self.temperature.get([wx * self.frequency, wz * self.frequency]);
        let m = self.moisture.get([wx * self.frequency, wz * self.frequency]);
        if t < -0.45 {
            BiomeId::Tundra
        } else if t < -0.2 {
            BiomeId::Taiga
        } else if t > 0.45 && m < 0.0 {
            BiomeId::Desert
        } else if m > 0.45 {
            if t > 0.2 {
                BiomeId::Jungle
            } else {
                BiomeId::Swamp
            }
        } else if m < -0.45 {
            BiomeId::Mountain
        } else if m > 0.1 {
            BiomeId::Forest
        } else {
            BiomeId::Plains
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowy_group_matches_cold_biomes() {
        assert!(BiomeId::Taiga.is_snowy());
        assert!(BiomeId::Tundra.is_snowy());
        assert!(!BiomeId::Plains.is_snowy());
        assert!(!BiomeId::Desert.is_snowy());
    }

    #[test]
    fn surface_blocks_follow_biome() {
        assert_eq!(BiomeId::Tundra.surface_block(), BlockId::Snow);
        assert_eq!(BiomeId::Desert.surface_block(), BlockId::Sand);
        assert_eq!(BiomeId::Plains.surface_block(), BlockId::Grass);
    }

    #[test]
    fn field_is_deterministic_for_seed() {
        let a = BiomeField::new(42, 0.01);
        let b = BiomeField::new(42, 0.01);
        for i in 0..32 {
            let (x, z) = (i as f64 * 13.7, i as f64 * -7.3);
            assert_eq!(a.sample(x, z), b.sample(x, z));
        }
    }
}
