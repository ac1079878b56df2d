//! Owns the world and the active meteors, stepping everything in tick order.

use glam::DVec3;
use hecs::Entity;

use crate::meteor::{Meteor, MeteorId, MeteorParams};
use crate::world::World;

/// Seconds of simulated time per tick.
pub const TICK_SECONDS: f32 = (1.0 / sim_core::DEFAULT_TICK_RATE) as f32;

pub struct Simulation {
    pub world: World,
    meteors: Vec<Meteor>,
    next_meteor_id: u64,
    tick_count: u64,
}

impl Simulation {
    pub fn new(world: World) -> Self {
        Self {
            world,
            meteors: Vec::new(),
            next_meteor_id: 0,
            tick_count: 0,
        }
    }

    /// Launch a meteor. `bias` is the per-tick acceleration that keeps
    /// nudging it along its course.
    pub fn spawn_meteor(
        &mut self,
        position: DVec3,
        velocity: DVec3,
        bias: DVec3,
        params: MeteorParams,
        shooter: Option<Entity>,
    ) -> MeteorId {
        let id = MeteorId(self.next_meteor_id);
        self.next_meteor_id += 1;
        log::info!(
            "meteor {} inbound at {:.1}, {:.1}, {:.1}",
            id.0,
            position.x,
            position.y,
            position.z
        );
        self.meteors
            .push(Meteor::new(id, position, velocity, bias, params, shooter));
        id
    }

    pub fn meteor(&self, id: MeteorId) -> Option<&Meteor> {
        self.meteors.iter().find(|m| m.id == id)
    }

    pub fn meteor_count(&self) -> usize {
        self.meteors.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Step every meteor, sweep out the dead, and age the effects.
    pub fn tick(&mut self) {
        for meteor in &mut self.meteors {
            meteor.tick(&mut self.world);
        }
        for meteor in &self.meteors {
            if !meteor.alive {
                let fate = if meteor.has_detonated() { "detonated" } else { "lost" };
                log::debug!("meteor {} {fate}", meteor.id.0);
            }
        }
        self.meteors.retain(|m| m.alive);
        self.world.effects.update(TICK_SECONDS);
        self.tick_count += 1;
    }

    /// Step a single meteor out of band, leaving the rest untouched.
    /// Returns whether it is still alive afterwards.
    pub fn tick_meteor(&mut self, id: MeteorId) -> bool {
        let Some(meteor) = self.meteors.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        meteor.tick(&mut self.world);
        let alive = meteor.alive;
        self.meteors.retain(|m| m.alive);
        alive
    }
}
