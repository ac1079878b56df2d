//! Dense voxel grid holding the simulated region.
//!
//! One grid covers the whole active region: a block-aligned box anchored at a
//! minimum corner in world block coordinates. Columns are considered "loaded"
//! over the full footprint; vertical space outside the grid is empty sky (or
//! void below bedrock) rather than unloaded terrain, which mirrors how chunk
//! loading works in the block worlds this models.

use glam::IVec3;

use crate::biome::BiomeId;
use crate::block::BlockId;

/// Block-aligned grid of the active region.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    /// World block coordinate of the minimum corner.
    pub min: IVec3,
    data: Vec<BlockId>,
    /// Per-column surface biome, nx * nz.
    biomes: Vec<BiomeId>,
    /// Protected boxes (inclusive min, inclusive max); writes inside are
    /// silently skipped.
    protected: Vec<(IVec3, IVec3)>,
}

impl VoxelGrid {
    /// Create an all-air grid with plains biomes.
    pub fn new(nx: usize, ny: usize, nz: usize, min: IVec3) -> Self {
        Self {
            nx,
            ny,
            nz,
            min,
            data: vec![BlockId::Air; nx * ny * nz],
            biomes: vec![BiomeId::Plains; nx * nz],
            protected: Vec::new(),
        }
    }

    fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + self.nx * (iy + self.ny * iz)
    }

    /// Local cell for a world block coordinate, if inside the grid.
    fn local(&self, p: IVec3) -> Option<(usize, usize, usize)> {
        let d = p - self.min;
        if d.x < 0 || d.y < 0 || d.z < 0 {
            return None;
        }
        let (ix, iy, iz) = (d.x as usize, d.y as usize, d.z as usize);
        if ix < self.nx && iy < self.ny && iz < self.nz {
            Some((ix, iy, iz))
        } else {
            None
        }
    }

    fn column(&self, x: i32, z: i32) -> Option<(usize, usize)> {
        let (dx, dz) = (x - self.min.x, z - self.min.z);
        if dx < 0 || dz < 0 {
            return None;
        }
        let (ix, iz) = (dx as usize, dz as usize);
        if ix < self.nx && iz < self.nz {
            Some((ix, iz))
        } else {
            None
        }
    }

    pub fn in_bounds(&self, p: IVec3) -> bool {
        self.local(p).is_some()
    }

    /// Whether the column under a world coordinate is part of the active
    /// region. Vertical position does not matter here.
    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        self.column(x, z).is_some()
    }

    /// Top of the vertical band (exclusive), in world block coordinates.
    pub fn max_y(&self) -> i32 {
        self.min.y + self.ny as i32
    }

    /// Block at a world coordinate; Air outside the grid.
    pub fn get(&self, p: IVec3) -> BlockId {
        match self.local(p) {
            Some((ix, iy, iz)) => self.data[self.index(ix, iy, iz)],
            None => BlockId::Air,
        }
    }

    /// Set a block. Out-of-grid or protected positions are skipped; returns
    /// whether the grid changed.
    pub fn set(&mut self, p: IVec3, block: BlockId) -> bool {
        if self.is_protected(p) {
            return false;
        }
        match self.local(p) {
            Some((ix, iy, iz)) => {
                let i = self.index(ix, iy, iz);
                let changed = self.data[i] != block;
                self.data[i] = block;
                changed
            }
            None => false,
        }
    }

    /// Mark an inclusive box as protected from writes.
    pub fn set_protected(&mut self, min: IVec3, max: IVec3) {
        self.protected.push((min.min(max), min.max(max)));
    }

    pub fn is_protected(&self, p: IVec3) -> bool {
        self.protected.iter().any(|(lo, hi)| {
            p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y && p.z >= lo.z && p.z <= hi.z
        })
    }

    /// Y of the highest solid block in a column, scanning down.
    pub fn highest_solid_y(&self, x: i32, z: i32) -> Option<i32> {
        let (ix, iz) = self.column(x, z)?;
        for iy in (0..self.ny).rev() {
            if self.data[self.index(ix, iy, iz)].is_solid() {
                return Some(self.min.y + iy as i32);
            }
        }
        None
    }

    pub fn column_biome(&self, x: i32, z: i32) -> Option<BiomeId> {
        let (ix, iz) = self.column(x, z)?;
        Some(self.biomes[ix + self.nx * iz])
    }

    /// Reclassify a column's biome; false when the column is outside the grid.
    pub fn set_column_biome(&mut self, x: i32, z: i32, biome: BiomeId) -> bool {
        match self.column(x, z) {
            Some((ix, iz)) => {
                self.biomes[ix + self.nx * iz] = biome;
                true
            }
            None => false,
        }
    }

    /// Count blocks matching a predicate, for diagnostics and tests.
    pub fn count_blocks(&self, pred: impl Fn(BlockId) -> bool) -> usize {
        self.data.iter().copied().filter(|&b| pred(b)).count()
    }
}
