//! Axis-aligned boxes and segment-entry tests.

use glam::DVec3;

const EPSILON: f64 = 1e-9;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Tightest box containing both segment endpoints.
    pub fn from_segment(start: DVec3, end: DVec3) -> Self {
        Self::new(start, end)
    }

    /// Inflate by a fixed amount on every side.
    pub fn grow(self, amount: f64) -> Self {
        Self {
            min: self.min - DVec3::splat(amount),
            max: self.max + DVec3::splat(amount),
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Slab test: parameter t in [0, 1] where the segment enters this box,
    /// or None if the segment misses it. A start inside the box returns 0.
    pub fn segment_entry(&self, start: DVec3, end: DVec3) -> Option<f64> {
        let delta = end - start;
        let mut t_min = 0.0_f64;
        let mut t_max = 1.0_f64;

        for axis in 0..3 {
            let (s, d, lo, hi) = match axis {
                0 => (start.x, delta.x, self.min.x, self.max.x),
                1 => (start.y, delta.y, self.min.y, self.max.y),
                _ => (start.z, delta.z, self.min.z, self.max.z),
            };
            if d.abs() < EPSILON {
                if s < lo || s > hi {
                    return None;
                }
            } else {
                let inv = 1.0 / d;
                let mut t0 = (lo - s) * inv;
                let mut t1 = (hi - s) * inv;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return None;
                }
            }
        }
        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_through_box_enters_at_face() {
        let aabb = Aabb::new(DVec3::new(2.0, -1.0, -1.0), DVec3::new(4.0, 1.0, 1.0));
        let t = aabb
            .segment_entry(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0))
            .unwrap();
        assert!((t - 0.2).abs() < 1e-9);
    }

    #[test]
    fn segment_missing_box_returns_none() {
        let aabb = Aabb::new(DVec3::new(2.0, 5.0, -1.0), DVec3::new(4.0, 7.0, 1.0));
        assert!(aabb
            .segment_entry(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn segment_starting_inside_enters_at_zero() {
        let aabb = Aabb::new(DVec3::splat(-1.0), DVec3::splat(1.0));
        let t = aabb
            .segment_entry(DVec3::ZERO, DVec3::new(5.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(t, 0.0);
    }

    #[test]
    fn segment_stopping_short_misses() {
        let aabb = Aabb::new(DVec3::new(5.0, -1.0, -1.0), DVec3::new(6.0, 1.0, 1.0));
        assert!(aabb
            .segment_entry(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn axis_parallel_segment_outside_slab_misses() {
        let aabb = Aabb::new(DVec3::new(0.0, 2.0, 0.0), DVec3::new(4.0, 3.0, 4.0));
        // Runs parallel to the box below it.
        assert!(aabb
            .segment_entry(DVec3::new(-2.0, 0.0, 1.0), DVec3::new(8.0, 0.0, 1.0))
            .is_none());
    }

    #[test]
    fn grow_expands_every_side() {
        let aabb = Aabb::new(DVec3::ZERO, DVec3::splat(1.0)).grow(1.0);
        assert_eq!(aabb.min, DVec3::splat(-1.0));
        assert_eq!(aabb.max, DVec3::splat(2.0));
    }

    #[test]
    fn from_segment_orders_corners() {
        let aabb = Aabb::from_segment(DVec3::new(3.0, -2.0, 5.0), DVec3::new(-1.0, 4.0, 0.0));
        assert_eq!(aabb.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(3.0, 4.0, 5.0));
    }
}
