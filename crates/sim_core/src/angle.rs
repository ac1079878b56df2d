//! Degree-space angle helpers.
//!
//! Orientation is tracked in degrees with yaw/pitch conventions: yaw measured
//! from +Z toward +X, pitch positive upward. Smoothing runs in degree space,
//! so the previous angle must be re-based onto the target's winding before
//! blending or a 170 to -170 turn would swing the long way round.

use glam::DVec3;

/// Shift `previous` by whole turns until `target - previous` lies in
/// [-180, 180).
pub fn rebase_degrees(mut previous: f32, target: f32) -> f32 {
    while target - previous >= 180.0 {
        previous += 360.0;
    }
    while target - previous < -180.0 {
        previous -= 360.0;
    }
    previous
}

/// One exponential smoothing step toward `target`, taking the short way
/// around the circle. `blend` is the fraction applied per step.
pub fn smooth_degrees(previous: f32, target: f32, blend: f32) -> f32 {
    let based = rebase_degrees(previous, target);
    based + (target - based) * blend
}

/// Yaw and pitch, in degrees, of a velocity vector.
///
/// A zero vector yields (0, 0) by the atan2 convention.
pub fn direction_angles(velocity: DVec3) -> (f32, f32) {
    let horizontal = (velocity.x * velocity.x + velocity.z * velocity.z).sqrt();
    let yaw = velocity.x.atan2(velocity.z).to_degrees() as f32;
    let pitch = velocity.y.atan2(horizontal).to_degrees() as f32;
    (yaw, pitch)
}
