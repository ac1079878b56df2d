//! Collision queries and projectile motion for the voxel world.

pub mod aabb;
pub mod projectile;
pub mod raycast;
pub mod sweep;

pub use aabb::*;
pub use projectile::*;
pub use raycast::*;
pub use sweep::*;

use glam::IVec3;

/// Terrain occupancy the collision queries run against.
///
/// Implemented by the world that owns the voxel grid and injected by
/// reference into each query, so this crate never holds world state.
pub trait CollisionVolume {
    /// Whether the block at a world coordinate is solid.
    fn is_solid(&self, p: IVec3) -> bool;

    /// Whether the coordinate's column lies in the simulated region.
    /// Vertical position is not considered; sky above the grid is loaded,
    /// just empty.
    fn is_loaded(&self, p: IVec3) -> bool;
}
