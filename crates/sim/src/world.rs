//! Host world: voxel terrain, bystander entities, messages, and the event
//! log that records everything the simulation does to the world.

use glam::{DVec3, IVec3};
use hecs::Entity;
use physics::{block_of, CollisionVolume};
use procgen::{fill_sphere, BlockBrush, VoxelGrid};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sim_core::{Collider, Creature, Health, Inbox, Position};

use crate::effects::EffectSystem;

/// Substitute `%x`/`%y`/`%z` in a message template with truncated block
/// coordinates.
pub fn substitute_coords(template: &str, position: DVec3) -> String {
    template
        .replace("%x", &(position.x as i32).to_string())
        .replace("%y", &(position.y as i32).to_string())
        .replace("%z", &(position.z as i32).to_string())
}

/// World-visible chat/event line.
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
}

/// Log of broadcast messages, oldest first.
#[derive(Debug, Default)]
pub struct MessageLog {
    pub messages: Vec<Message>,
}

impl MessageLog {
    pub fn push(&mut self, text: impl Into<String>) {
        self.messages.push(Message { text: text.into() });
    }
}

/// Everything that mutated the world, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    Explosion {
        center: DVec3,
        power: f64,
        incendiary: bool,
        carved: usize,
    },
    /// A strike on terrain or an entity that finished the meteor off.
    MeteorImpact { position: DVec3 },
    MeteoriteLanded { center: IVec3, radius: i32 },
    Winterized {
        center: IVec3,
        radius: i32,
        columns: usize,
    },
}

/// The simulated world and everything living in it.
pub struct World {
    pub grid: VoxelGrid,
    pub entities: hecs::World,
    pub messages: MessageLog,
    pub events: Vec<WorldEvent>,
    pub effects: EffectSystem,
    pub(crate) rng: StdRng,
}

impl World {
    pub fn new(grid: VoxelGrid) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Deterministic world for tests and replays.
    pub fn seeded(grid: VoxelGrid, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: VoxelGrid, rng: StdRng) -> Self {
        Self {
            grid,
            entities: hecs::World::new(),
            messages: MessageLog::default(),
            events: Vec::new(),
            effects: EffectSystem::new(),
            rng,
        }
    }

    /// Spawn an ambient creature standing at a position.
    pub fn spawn_creature(&mut self, at: DVec3, health: f32) -> Entity {
        self.entities.spawn((
            Position::from(at),
            Health::new(health),
            Collider::default(),
            Inbox::default(),
            Creature,
        ))
    }

    pub fn living_creatures(&self) -> usize {
        self.entities
            .query::<(&Health, &Creature)>()
            .iter()
            .filter(|(_, (health, _))| !health.is_dead())
            .count()
    }

    /// Detonate at a point: carve a spherical crater and flash. Mid-air
    /// explosions touch nothing solid and stay purely visual.
    pub fn create_explosion(&mut self, center: DVec3, power: f64, incendiary: bool) {
        let carved = fill_sphere(
            &mut self.grid,
            block_of(center),
            power + 0.5,
            true,
            BlockBrush::Clear,
            &mut self.rng,
        );
        self.effects.spawn_explosion_flash(center, power as f32, incendiary);
        if carved > 0 {
            log::debug!("explosion power {power:.1} carved {carved} blocks");
        }
        self.events.push(WorldEvent::Explosion {
            center,
            power,
            incendiary,
            carved,
        });
    }

    /// Flat damage to every living entity within `radius`, with a message
    /// delivered to each victim. No falloff.
    pub fn damage_entities_near(&mut self, center: DVec3, radius: f64, amount: f32, message: &str) {
        let radius_sq = radius * radius;
        let mut struck = Vec::new();
        for (entity, (position, health)) in self.entities.query::<(&Position, &Health)>().iter() {
            if health.is_dead() {
                continue;
            }
            if position.point.distance_squared(center) <= radius_sq {
                struck.push(entity);
            }
        }
        for entity in struck {
            if let Ok(mut health) = self.entities.get::<&mut Health>(entity) {
                health.take_damage(amount);
            }
            if let Ok(mut inbox) = self.entities.get::<&mut Inbox>(entity) {
                inbox.push(message);
            }
        }
    }

    /// Deliver a message to the world log and every inbox.
    pub fn broadcast(&mut self, text: &str) {
        log::info!("{text}");
        self.messages.push(text);
        for (_, inbox) in self.entities.query::<&mut Inbox>().iter() {
            inbox.push(text);
        }
    }

    pub fn highest_solid_y(&self, x: i32, z: i32) -> Option<i32> {
        self.grid.highest_solid_y(x, z)
    }
}

impl CollisionVolume for World {
    fn is_solid(&self, p: IVec3) -> bool {
        self.grid.get(p).is_solid()
    }

    fn is_loaded(&self, p: IVec3) -> bool {
        self.grid.contains_column(p.x, p.z)
    }
}
