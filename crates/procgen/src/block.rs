//! Block types for the voxel world.

/// Block type for voxel terrain (Minecraft-style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockId {
    Air = 0,
    Stone = 1,
    Dirt = 2,
    Grass = 3,
    Sand = 4,
    Water = 5,
    Snow = 6,
    /// Bottom layer of the world (Minecraft-style bedrock).
    Bedrock = 7,
    /// Blast glass, shell material for fallen meteorites.
    Obsidian = 8,
    CoalOre = 9,
    IronOre = 10,
    RedstoneOre = 11,
    GoldOre = 12,
    EmeraldOre = 13,
    DiamondOre = 14,
    LapisOre = 15,
}

/// Ore palette scattered through a meteorite core.
pub const METEORITE_ORES: [BlockId; 7] = [
    BlockId::CoalOre,
    BlockId::IronOre,
    BlockId::RedstoneOre,
    BlockId::GoldOre,
    BlockId::EmeraldOre,
    BlockId::DiamondOre,
    BlockId::LapisOre,
];

impl BlockId {
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockId::Air | BlockId::Water)
    }

    pub fn is_ore(self) -> bool {
        METEORITE_ORES.contains(&self)
    }
}
