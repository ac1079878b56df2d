//! Swept collision against entities near a motion segment.

use hecs::Entity;
use sim_core::{Collider, DVec3, Health, Position};

use crate::aabb::Aabb;

/// Entity struck by a motion segment.
#[derive(Debug, Clone, Copy)]
pub struct EntityHit {
    pub entity: Entity,
    /// Segment parameter in [0, 1] at entry into the entity's box.
    pub t: f64,
    pub point: DVec3,
}

/// Nearest living entity whose collision box the segment enters.
///
/// Candidates are gathered from the segment's bounding box grown by one
/// block unit on every side, then ranked by entry parameter along the
/// segment. Dead entities never collide.
pub fn sweep_entities(world: &hecs::World, start: DVec3, end: DVec3) -> Option<EntityHit> {
    let search = Aabb::from_segment(start, end).grow(1.0);
    let mut nearest: Option<EntityHit> = None;

    for (entity, (position, collider, health)) in world
        .query::<(&Position, &Collider, Option<&Health>)>()
        .iter()
    {
        if health.is_some_and(|h| h.is_dead()) {
            continue;
        }
        let shape = Aabb::from_center_half_extents(position.point, collider.half_extents);
        if !search.intersects(&shape) {
            continue;
        }
        if let Some(t) = shape.segment_entry(start, end) {
            if nearest.as_ref().map_or(true, |best| t < best.t) {
                nearest = Some(EntityHit {
                    entity,
                    t,
                    point: start + (end - start) * t,
                });
            }
        }
    }
    nearest
}
