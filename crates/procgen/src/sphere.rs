//! Solid rasterization of ellipsoid volumes into the voxel grid.
//!
//! The walk covers a single octant in unit-normalised steps and mirrors every
//! accepted offset into the other seven, so each radial shell is evaluated
//! once. The squared-norm test prunes early: overflowing on the innermost
//! axis ends that row, and overflowing at offset 0 ends the enclosing axis as
//! well, which clips the bounding box to the ellipsoid without scanning the
//! full cube.

use glam::IVec3;
use rand::Rng;

use crate::block::BlockId;
use crate::voxel::VoxelGrid;

/// Block assignment applied per rasterized coordinate.
#[derive(Debug, Clone, Copy)]
pub enum BlockBrush<'a> {
    /// Every placement gets the same block.
    Set(BlockId),
    /// Every placement samples the palette independently, so mirrored
    /// coordinates usually differ.
    Scatter(&'a [BlockId]),
    /// Placements are cleared to air.
    Clear,
}

impl BlockBrush<'_> {
    fn sample(&self, rng: &mut impl Rng) -> BlockId {
        match self {
            BlockBrush::Set(block) => *block,
            BlockBrush::Scatter(palette) => palette[rng.gen_range(0..palette.len())],
            BlockBrush::Clear => BlockId::Air,
        }
    }
}

/// Sign combinations for the eight mirrored placements.
const OCTANT_SIGNS: [(i32, i32, i32); 8] = [
    (1, 1, 1),
    (-1, 1, 1),
    (1, 1, -1),
    (-1, -1, 1),
    (1, -1, -1),
    (-1, 1, -1),
    (-1, -1, -1),
    (1, -1, 1),
];

#[inline]
fn length_sq(x: f64, y: f64, z: f64) -> f64 {
    x * x + y * y + z * z
}

/// Rasterize an ellipsoid of blocks around `center`.
///
/// `filled` fills the whole volume; otherwise only the outer boundary layer
/// is placed (a coordinate is on the shell when stepping one unit outward on
/// at least one axis leaves the ellipsoid). Out-of-grid or protected
/// placements are skipped per block. Returns the number of blocks changed.
///
/// Radii at or below zero rasterize nothing. A `Scatter` brush over an empty
/// palette is a caller bug; it is debug-asserted and otherwise a no-op.
pub fn fill_ellipsoid(
    grid: &mut VoxelGrid,
    center: IVec3,
    radius_x: f64,
    radius_y: f64,
    radius_z: f64,
    filled: bool,
    brush: BlockBrush,
    rng: &mut impl Rng,
) -> usize {
    if radius_x <= 0.0 || radius_y <= 0.0 || radius_z <= 0.0 {
        return 0;
    }
    if let BlockBrush::Scatter(palette) = brush {
        debug_assert!(!palette.is_empty(), "scatter brush needs a palette");
        if palette.is_empty() {
            return 0;
        }
    }

    let inv_rx = 1.0 / radius_x;
    let inv_ry = 1.0 / radius_y;
    let inv_rz = 1.0 / radius_z;

    let ceil_rx = radius_x.ceil() as i32;
    let ceil_ry = radius_y.ceil() as i32;
    let ceil_rz = radius_z.ceil() as i32;

    let mut changed = 0;
    let mut next_xn = 0.0;
    'outer_x: for x in 0..=ceil_rx {
        let xn = next_xn;
        next_xn = (x + 1) as f64 * inv_rx;
        let mut next_yn = 0.0;
        'outer_y: for y in 0..=ceil_ry {
            let yn = next_yn;
            next_yn = (y + 1) as f64 * inv_ry;
            let mut next_zn = 0.0;
            for z in 0..=ceil_rz {
                let zn = next_zn;
                next_zn = (z + 1) as f64 * inv_rz;

                if length_sq(xn, yn, zn) > 1.0 {
                    if z == 0 {
                        if y == 0 {
                            break 'outer_x;
                        }
                        break 'outer_y;
                    }
                    break;
                }

                if !filled
                    && length_sq(next_xn, yn, zn) <= 1.0
                    && length_sq(xn, next_yn, zn) <= 1.0
                    && length_sq(xn, yn, next_zn) <= 1.0
                {
                    continue;
                }

                for (sx, sy, sz) in OCTANT_SIGNS {
                    let target = center + IVec3::new(sx * x, sy * y, sz * z);
                    if grid.set(target, brush.sample(rng)) {
                        changed += 1;
                    }
                }
            }
        }
    }
    changed
}

/// Spherical convenience wrapper over [`fill_ellipsoid`].
pub fn fill_sphere(
    grid: &mut VoxelGrid,
    center: IVec3,
    radius: f64,
    filled: bool,
    brush: BlockBrush,
    rng: &mut impl Rng,
) -> usize {
    fill_ellipsoid(grid, center, radius, radius, radius, filled, brush, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::METEORITE_ORES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const N: usize = 32;

    fn test_grid() -> (VoxelGrid, IVec3) {
        let grid = VoxelGrid::new(N, N, N, IVec3::ZERO);
        let center = IVec3::splat(N as i32 / 2);
        (grid, center)
    }

    /// Offsets from center of every non-air block.
    fn solid_offsets(grid: &VoxelGrid, center: IVec3) -> HashSet<IVec3> {
        let mut out = HashSet::new();
        for x in 0..N as i32 {
            for y in 0..N as i32 {
                for z in 0..N as i32 {
                    let p = IVec3::new(x, y, z);
                    if grid.get(p) != BlockId::Air {
                        out.insert(p - center);
                    }
                }
            }
        }
        out
    }

    #[test]
    fn zero_radius_rasterizes_nothing() {
        let (mut grid, center) = test_grid();
        let mut rng = StdRng::seed_from_u64(1);
        let n = fill_sphere(&mut grid, center, 0.0, true, BlockBrush::Set(BlockId::Stone), &mut rng);
        assert_eq!(n, 0);
        assert_eq!(grid.count_blocks(|b| b != BlockId::Air), 0);
    }

    #[test]
    fn negative_radius_rasterizes_nothing() {
        let (mut grid, center) = test_grid();
        let mut rng = StdRng::seed_from_u64(1);
        let n = fill_sphere(&mut grid, center, -3.0, true, BlockBrush::Set(BlockId::Stone), &mut rng);
        assert_eq!(n, 0);
    }

    /// Radius 1 filled is the origin plus its six axis neighbours, nothing
    /// else.
    #[test]
    fn unit_sphere_is_seven_lattice_points() {
        let (mut grid, center) = test_grid();
        let mut rng = StdRng::seed_from_u64(1);
        fill_sphere(&mut grid, center, 1.0, true, BlockBrush::Set(BlockId::Stone), &mut rng);

        let offsets = solid_offsets(&grid, center);
        let expected: HashSet<IVec3> = [
            IVec3::ZERO,
            IVec3::X,
            -IVec3::X,
            IVec3::Y,
            -IVec3::Y,
            IVec3::Z,
            -IVec3::Z,
        ]
        .into_iter()
        .collect();
        assert_eq!(offsets, expected);
        for &o in &offsets {
            assert_eq!(grid.get(center + o), BlockId::Stone);
        }
    }

    #[test]
    fn filled_sphere_is_octant_symmetric() {
        let (mut grid, center) = test_grid();
        let mut rng = StdRng::seed_from_u64(7);
        fill_sphere(&mut grid, center, 5.0, true, BlockBrush::Set(BlockId::Stone), &mut rng);

        let offsets = solid_offsets(&grid, center);
        assert!(!offsets.is_empty());
        for &o in &offsets {
            assert!(offsets.contains(&IVec3::new(-o.x, o.y, o.z)));
            assert!(offsets.contains(&IVec3::new(o.x, -o.y, o.z)));
            assert!(offsets.contains(&IVec3::new(o.x, o.y, -o.z)));
        }
    }

    /// Shell placements all touch the boundary: stepping one unit outward on
    /// some axis leaves the ellipsoid, and no fully-interior coordinate is
    /// ever emitted.
    #[test]
    fn shell_emits_only_boundary_layer() {
        let (mut grid, center) = test_grid();
        let mut rng = StdRng::seed_from_u64(7);
        let r = 4.5;
        fill_sphere(&mut grid, center, r, false, BlockBrush::Set(BlockId::Obsidian), &mut rng);

        let outside = |v: IVec3| {
            let (x, y, z) = (v.x as f64 / r, v.y as f64 / r, v.z as f64 / r);
            x * x + y * y + z * z > 1.0
        };
        let offsets = solid_offsets(&grid, center);
        assert!(!offsets.is_empty());
        for &o in &offsets {
            let s = o.abs();
            let on_boundary = outside(s + IVec3::X) || outside(s + IVec3::Y) || outside(s + IVec3::Z);
            assert!(on_boundary, "interior offset emitted: {o:?}");
        }
        // The strict interior stayed untouched.
        assert_eq!(grid.get(center), BlockId::Air);
        assert_eq!(grid.get(center + IVec3::X), BlockId::Air);
    }

    #[test]
    fn shell_fits_inside_filled_set() {
        let (mut filled, center) = test_grid();
        let (mut shell, _) = test_grid();
        let mut rng = StdRng::seed_from_u64(3);
        fill_sphere(&mut filled, center, 4.5, true, BlockBrush::Set(BlockId::Stone), &mut rng);
        fill_sphere(&mut shell, center, 4.5, false, BlockBrush::Set(BlockId::Stone), &mut rng);

        let filled_set = solid_offsets(&filled, center);
        let shell_set = solid_offsets(&shell, center);
        assert!(shell_set.is_subset(&filled_set));
        assert!(shell_set.len() < filled_set.len());
    }

    /// Scatter re-samples per placement, so mirror images are independent.
    #[test]
    fn scatter_varies_across_mirrors() {
        let (mut grid, center) = test_grid();
        let mut rng = StdRng::seed_from_u64(99);
        fill_sphere(&mut grid, center, 3.5, true, BlockBrush::Scatter(&METEORITE_ORES), &mut rng);

        let distinct: HashSet<BlockId> = solid_offsets(&grid, center)
            .iter()
            .map(|&o| grid.get(center + o))
            .collect();
        assert!(distinct.len() > 1, "palette never varied");

        let mut mirrored_differs = 0;
        for &o in &solid_offsets(&grid, center) {
            if o.x > 0 && grid.get(center + o) != grid.get(center + IVec3::new(-o.x, o.y, o.z)) {
                mirrored_differs += 1;
            }
        }
        assert!(mirrored_differs > 0, "mirrors always matched");
    }

    #[test]
    fn clear_brush_carves_air() {
        let (mut grid, center) = test_grid();
        let mut rng = StdRng::seed_from_u64(5);
        fill_sphere(&mut grid, center, 6.0, true, BlockBrush::Set(BlockId::Stone), &mut rng);
        let carved = fill_sphere(&mut grid, center, 3.0, true, BlockBrush::Clear, &mut rng);
        assert!(carved > 0);
        assert_eq!(grid.get(center), BlockId::Air);
        assert_eq!(grid.get(center + IVec3::new(5, 0, 0)), BlockId::Stone);
    }

    #[test]
    fn ellipsoid_radii_apply_per_axis() {
        let (mut grid, center) = test_grid();
        let mut rng = StdRng::seed_from_u64(5);
        fill_ellipsoid(&mut grid, center, 6.0, 2.0, 2.0, true, BlockBrush::Set(BlockId::Stone), &mut rng);
        assert_eq!(grid.get(center + IVec3::new(6, 0, 0)), BlockId::Stone);
        assert_eq!(grid.get(center + IVec3::new(0, 6, 0)), BlockId::Air);
        assert_eq!(grid.get(center + IVec3::new(0, 2, 0)), BlockId::Stone);
    }

    #[test]
    fn rasterizing_off_grid_is_silent() {
        let mut grid = VoxelGrid::new(8, 8, 8, IVec3::ZERO);
        let mut rng = StdRng::seed_from_u64(5);
        // Center far outside; every placement misses the grid.
        let n = fill_sphere(
            &mut grid,
            IVec3::new(100, 100, 100),
            3.0,
            true,
            BlockBrush::Set(BlockId::Stone),
            &mut rng,
        );
        assert_eq!(n, 0);
    }

    #[test]
    fn empty_scatter_palette_is_noop_in_release() {
        // Contract violation; only checked without debug assertions.
        if cfg!(debug_assertions) {
            return;
        }
        let (mut grid, center) = test_grid();
        let mut rng = StdRng::seed_from_u64(5);
        let n = fill_sphere(&mut grid, center, 3.0, true, BlockBrush::Scatter(&[]), &mut rng);
        assert_eq!(n, 0);
    }
}
