//! Common components for entities living in the simulation world.

use glam::DVec3;

/// World-space position for simulation entities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub point: DVec3,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            point: DVec3::new(x, y, z),
        }
    }
}

impl From<DVec3> for Position {
    fn from(point: DVec3) -> Self {
        Self { point }
    }
}

/// Health component for damageable entities.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Axis-aligned collision extents, centered on the entity position.
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub half_extents: DVec3,
}

impl Collider {
    /// Upright box from a footprint width and a height, the usual shape
    /// for creatures standing on the terrain.
    pub fn upright(width: f64, height: f64) -> Self {
        Self {
            half_extents: DVec3::new(width * 0.5, height * 0.5, width * 0.5),
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::upright(0.6, 1.8)
    }
}

/// Messages delivered directly to one entity (damage reports and the like).
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    pub messages: Vec<String>,
}

impl Inbox {
    pub fn push(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
    }
}

/// Tag component for ambient creatures populating the world.
#[derive(Debug, Clone, Copy, Default)]
pub struct Creature;
