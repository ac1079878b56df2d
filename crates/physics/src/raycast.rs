//! Grid-walk raycast against the voxel terrain.
//!
//! Amanatides-Woo traversal: the segment is walked voxel by voxel, always
//! crossing the nearest axis boundary next, so no cell along the path is
//! skipped regardless of direction or length.

use glam::{DVec3, IVec3};

use crate::CollisionVolume;

const EPSILON: f64 = 1e-12;

/// First solid block on a motion segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainHit {
    /// Coordinate of the solid block.
    pub block: IVec3,
    /// Where the segment enters the block.
    pub point: DVec3,
    /// Normal of the entered face, pointing back along the segment.
    /// Zero when the segment starts inside a solid block.
    pub normal: IVec3,
    /// Segment parameter in [0, 1] at entry.
    pub t: f64,
}

/// Block containing a world-space point.
pub fn block_of(p: DVec3) -> IVec3 {
    p.floor().as_ivec3()
}

/// Walk the segment from `start` to `end` and report the first solid block.
pub fn raycast_voxels(
    volume: &impl CollisionVolume,
    start: DVec3,
    end: DVec3,
) -> Option<TerrainHit> {
    let mut voxel = block_of(start);
    if volume.is_solid(voxel) {
        return Some(TerrainHit {
            block: voxel,
            point: start,
            normal: IVec3::ZERO,
            t: 0.0,
        });
    }

    let delta = end - start;
    if delta.length_squared() < EPSILON {
        return None;
    }

    let step = IVec3::new(
        if delta.x > 0.0 { 1 } else { -1 },
        if delta.y > 0.0 { 1 } else { -1 },
        if delta.z > 0.0 { 1 } else { -1 },
    );

    // Segment parameter to the first boundary crossing per axis, and the
    // parameter stride of one block per axis.
    let axis_init = |pos: f64, cell: i32, d: f64| -> (f64, f64) {
        if d.abs() < EPSILON {
            (f64::INFINITY, f64::INFINITY)
        } else if d > 0.0 {
            (((cell + 1) as f64 - pos) / d, 1.0 / d)
        } else {
            ((cell as f64 - pos) / d, -1.0 / d)
        }
    };
    let (mut tx, dtx) = axis_init(start.x, voxel.x, delta.x);
    let (mut ty, dty) = axis_init(start.y, voxel.y, delta.y);
    let (mut tz, dtz) = axis_init(start.z, voxel.z, delta.z);

    // Worst case the walk crosses every boundary once per axis.
    let max_steps = (delta.x.abs() + delta.y.abs() + delta.z.abs()).ceil() as usize + 3;

    for _ in 0..max_steps {
        let (t, axis) = if tx <= ty && tx <= tz {
            (tx, 0)
        } else if ty <= tz {
            (ty, 1)
        } else {
            (tz, 2)
        };
        if t > 1.0 {
            return None;
        }
        match axis {
            0 => {
                voxel.x += step.x;
                tx += dtx;
            }
            1 => {
                voxel.y += step.y;
                ty += dty;
            }
            _ => {
                voxel.z += step.z;
                tz += dtz;
            }
        }
        if volume.is_solid(voxel) {
            let mut normal = IVec3::ZERO;
            match axis {
                0 => normal.x = -step.x,
                1 => normal.y = -step.y,
                _ => normal.z = -step.z,
            }
            return Some(TerrainHit {
                block: voxel,
                point: start + delta * t,
                normal,
                t,
            });
        }
    }
    None
}
