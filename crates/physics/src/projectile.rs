//! Ballistic body for meteors and similar thrown objects.

use sim_core::{direction_angles, smooth_degrees, DVec3, IVec3};

use crate::raycast::block_of;

/// Velocity retained after each tick's drag.
pub const DRAG: f64 = 0.95;

/// Fraction of the remaining turn applied to yaw/pitch per tick.
pub const TURN_SMOOTHING: f32 = 0.2;

/// Position, velocity, and smoothed facing of a ballistic projectile.
///
/// Each tick runs [`integrate`](Self::integrate), then
/// [`turn_toward_velocity`](Self::turn_toward_velocity), then
/// [`accelerate`](Self::accelerate); collision queries use the
/// [`motion_segment`](Self::motion_segment) before integration.
#[derive(Debug, Clone)]
pub struct ProjectileBody {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Constant directional acceleration, applied before drag.
    pub bias: DVec3,
    /// Smoothed facing, degrees.
    pub yaw: f32,
    pub pitch: f32,
}

impl ProjectileBody {
    pub fn new(position: DVec3, velocity: DVec3, bias: DVec3) -> Self {
        let (yaw, pitch) = direction_angles(velocity);
        Self {
            position,
            velocity,
            bias,
            yaw,
            pitch,
        }
    }

    /// Segment the body sweeps this tick.
    pub fn motion_segment(&self) -> (DVec3, DVec3) {
        (self.position, self.position + self.velocity)
    }

    /// Block currently containing the body.
    pub fn block_pos(&self) -> IVec3 {
        block_of(self.position)
    }

    /// Translate by the full velocity. Never clamps to an obstacle; impact
    /// handling runs off the pre-integration segment.
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// Smooth yaw and pitch toward the current velocity direction, taking
    /// the short way around the 180-degree seam.
    pub fn turn_toward_velocity(&mut self) {
        let (target_yaw, target_pitch) = direction_angles(self.velocity);
        self.yaw = smooth_degrees(self.yaw, target_yaw, TURN_SMOOTHING);
        self.pitch = smooth_degrees(self.pitch, target_pitch, TURN_SMOOTHING);
    }

    /// Apply the directional bias, then drag.
    pub fn accelerate(&mut self) {
        self.velocity += self.bias;
        self.velocity *= DRAG;
    }

    /// One full motion step: integrate, turn, accelerate.
    pub fn advance(&mut self) {
        self.integrate();
        self.turn_toward_velocity();
        self.accelerate();
    }
}
