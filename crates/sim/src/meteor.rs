//! Meteor lifecycle: flight with staged coast phases, burrowing on impact or
//! at low altitude, and the final detonation that cracks the crater open,
//! buries an ore meteorite and freezes the surroundings.

use glam::DVec3;
use hecs::Entity;
use physics::{block_of, raycast_voxels, sweep_entities, CollisionVolume, ProjectileBody};
use procgen::{fill_sphere, BiomeId, BlockBrush, BlockId, METEORITE_ORES};
use serde::{Deserialize, Serialize};

use crate::world::{substitute_coords, World, WorldEvent};

/// Velocity retained on each coast tick, on top of the projectile drag.
pub const COAST_DAMPING: f64 = 0.909;

/// Stable handle for a spawned meteor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeteorId(pub u64);

/// Tuning for one meteor. Every field has a config default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteorParams {
    /// Tunnelling blasts available before the final detonation.
    #[serde(default = "default_burrow_charges")]
    pub burrow_charges: u32,
    #[serde(default = "default_burrow_power")]
    pub burrow_power: f64,
    /// Power of the flight-trail explosions left behind at altitude checks.
    #[serde(default = "default_trail_power")]
    pub trail_power: f64,
    #[serde(default = "default_explosion_radius")]
    pub explosion_radius: f64,
    #[serde(default = "default_shockwave_damage")]
    pub shockwave_damage: f32,
    #[serde(default = "default_shockwave_damage_radius")]
    pub shockwave_damage_radius: f64,
    /// Radius of the ore meteorite buried above the impact point.
    #[serde(default = "default_crater_radius")]
    pub crater_radius: i32,
    /// Radius of the tundra disc left around the crash site.
    #[serde(default = "default_snow_radius")]
    pub snow_radius: i32,
    /// Absolute height below which flight turns into burrowing.
    #[serde(default = "default_low_altitude")]
    pub low_altitude: i32,
    #[serde(default = "default_true")]
    pub spawn_meteorite: bool,
    #[serde(default = "default_true")]
    pub winterize: bool,
    /// Which of the three coast phases run between altitude checks.
    #[serde(default = "default_coast_phases")]
    pub coast_phases: [bool; 3],
    #[serde(default = "default_crash_message")]
    pub crash_message: String,
    #[serde(default = "default_damage_message")]
    pub damage_message: String,
}

fn default_burrow_charges() -> u32 {
    5
}

fn default_burrow_power() -> f64 {
    10.0
}

fn default_trail_power() -> f64 {
    20.0
}

fn default_explosion_radius() -> f64 {
    50.0
}

fn default_shockwave_damage() -> f32 {
    12.0
}

fn default_shockwave_damage_radius() -> f64 {
    60.0
}

fn default_crater_radius() -> i32 {
    4
}

fn default_snow_radius() -> i32 {
    15
}

fn default_low_altitude() -> i32 {
    32
}

fn default_true() -> bool {
    true
}

fn default_coast_phases() -> [bool; 3] {
    [true, true, true]
}

fn default_crash_message() -> String {
    "A meteor has crashed at %x, %y, %z!".to_string()
}

fn default_damage_message() -> String {
    "You are scorched by the meteor's shockwave!".to_string()
}

impl Default for MeteorParams {
    fn default() -> Self {
        Self {
            burrow_charges: default_burrow_charges(),
            burrow_power: default_burrow_power(),
            trail_power: default_trail_power(),
            explosion_radius: default_explosion_radius(),
            shockwave_damage: default_shockwave_damage(),
            shockwave_damage_radius: default_shockwave_damage_radius(),
            crater_radius: default_crater_radius(),
            snow_radius: default_snow_radius(),
            low_altitude: default_low_altitude(),
            spawn_meteorite: default_true(),
            winterize: default_true(),
            coast_phases: default_coast_phases(),
            crash_message: default_crash_message(),
            damage_message: default_damage_message(),
        }
    }
}

/// Coast sub-phases between altitude checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlightPhase {
    Entry,
    Descent,
    Approach,
}

impl FlightPhase {
    const ALL: [FlightPhase; 3] = [
        FlightPhase::Entry,
        FlightPhase::Descent,
        FlightPhase::Approach,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleStep {
    Coast(FlightPhase),
    AltitudeCheck,
}

/// Round-robin over the enabled coast phases; the altitude check runs when
/// the cycle wraps. With every phase disabled the check runs every tick.
#[derive(Debug, Clone)]
struct PhaseCycle {
    enabled: [bool; 3],
    cursor: usize,
}

impl PhaseCycle {
    fn new(enabled: [bool; 3]) -> Self {
        Self { enabled, cursor: 0 }
    }

    fn advance(&mut self) -> CycleStep {
        while self.cursor < self.enabled.len() {
            let index = self.cursor;
            self.cursor += 1;
            if self.enabled[index] {
                return CycleStep::Coast(FlightPhase::ALL[index]);
            }
        }
        self.cursor = 0;
        CycleStep::AltitudeCheck
    }
}

enum Collision {
    Terrain(physics::TerrainHit),
    Entity(physics::EntityHit),
}

/// First obstacle on the motion segment. Terrain is checked first and takes
/// precedence over any entity in the path, however close.
fn find_collision(world: &World, start: DVec3, end: DVec3) -> Option<Collision> {
    match raycast_voxels(world, start, end) {
        Some(hit) => Some(Collision::Terrain(hit)),
        None => sweep_entities(&world.entities, start, end).map(Collision::Entity),
    }
}

pub struct Meteor {
    pub id: MeteorId,
    pub body: ProjectileBody,
    pub params: MeteorParams,
    /// Entity that launched the meteor, if any. Its death retires the meteor.
    pub shooter: Option<Entity>,
    pub alive: bool,
    pub ablaze: bool,
    charges_left: u32,
    cycle: PhaseCycle,
    detonated: bool,
}

impl Meteor {
    pub fn new(
        id: MeteorId,
        position: DVec3,
        velocity: DVec3,
        bias: DVec3,
        params: MeteorParams,
        shooter: Option<Entity>,
    ) -> Self {
        let cycle = PhaseCycle::new(params.coast_phases);
        let charges_left = params.burrow_charges;
        Self {
            id,
            body: ProjectileBody::new(position, velocity, bias),
            params,
            shooter,
            alive: true,
            ablaze: false,
            charges_left,
            cycle,
            detonated: false,
        }
    }

    pub fn charges_left(&self) -> u32 {
        self.charges_left
    }

    pub fn has_detonated(&self) -> bool {
        self.detonated
    }

    /// Advance the meteor one tick. Collisions are resolved against the
    /// pre-integration segment, then the body integrates, then either one
    /// coast phase or the altitude check runs. A collision consumes the
    /// tick's phase advance.
    pub fn tick(&mut self, world: &mut World) {
        if !self.alive {
            return;
        }
        if self.owner_gone(world) || !world.is_loaded(self.body.block_pos()) {
            // No explosion, no message. The meteor just stops existing.
            self.alive = false;
            return;
        }
        self.ablaze = true;

        let (start, end) = self.body.motion_segment();
        let collision = find_collision(world, start, end);
        let collided = collision.is_some();
        if let Some(hit) = collision {
            self.on_collision(world, &hit);
            // Only a fatal strike counts as the impact proper; a burrowing
            // meteor keeps flying and reports nothing.
            if !self.alive {
                world.events.push(WorldEvent::MeteorImpact {
                    position: self.body.position,
                });
            }
        }

        self.body.advance();
        world
            .effects
            .spawn_trail(self.body.position + DVec3::new(0.0, 0.5, 0.0), self.body.velocity);

        if collided || !self.alive {
            return;
        }
        match self.cycle.advance() {
            CycleStep::Coast(phase) => {
                log::trace!("meteor {} coasting through {:?}", self.id.0, phase);
                self.body.velocity *= COAST_DAMPING;
            }
            CycleStep::AltitudeCheck => self.altitude_check(world),
        }
    }

    fn owner_gone(&self, world: &World) -> bool {
        match self.shooter {
            Some(owner) => world
                .entities
                .get::<&sim_core::Health>(owner)
                .map(|health| health.is_dead())
                .unwrap_or(true),
            None => false,
        }
    }

    fn on_collision(&mut self, world: &mut World, hit: &Collision) {
        match hit {
            Collision::Terrain(hit) => {
                log::debug!("meteor {} struck block {}", self.id.0, hit.block)
            }
            Collision::Entity(hit) => {
                log::debug!("meteor {} struck entity {:?}", self.id.0, hit.entity)
            }
        }
        self.burrow(world);
    }

    /// The altitude check that ends each coast cycle: vanish outside the
    /// world's vertical band, burrow once below the low-altitude line,
    /// otherwise leave a trail explosion and keep flying.
    fn altitude_check(&mut self, world: &mut World) {
        let y = self.body.position.y as i32;
        if y < world.grid.min.y || y >= world.grid.max_y() {
            self.alive = false;
            return;
        }
        if y < self.params.low_altitude {
            self.burrow(world);
            return;
        }
        world.create_explosion(self.body.position, self.params.trail_power, true);
    }

    /// One burrowing step: spend a charge on a tunnelling blast, or detonate
    /// when none remain.
    fn burrow(&mut self, world: &mut World) {
        if self.charges_left > 0 {
            world.create_explosion(self.body.position, self.params.burrow_power, true);
            self.charges_left -= 1;
            return;
        }
        self.detonate(world);
    }

    fn detonate(&mut self, world: &mut World) {
        if self.detonated {
            return;
        }
        self.detonated = true;
        let position = self.body.position;
        log::info!(
            "meteor {} detonating at {:.1}, {:.1}, {:.1}",
            self.id.0,
            position.x,
            position.y,
            position.z
        );
        world.create_explosion(position, self.params.explosion_radius, true);
        world.damage_entities_near(
            position,
            self.params.shockwave_damage_radius,
            self.params.shockwave_damage,
            &self.params.damage_message,
        );
        world.broadcast(&substitute_coords(&self.params.crash_message, position));
        if self.params.spawn_meteorite {
            self.place_meteorite(world, position);
        }
        if self.params.winterize {
            self.winterize(world, position);
        }
        self.alive = false;
    }

    /// Bury an ore-cored meteorite above the impact point: scan up out of the
    /// crater debris to open air, pad by the crater radius, then rasterize an
    /// ore fill capped with an obsidian shell.
    fn place_meteorite(&self, world: &mut World, impact: DVec3) {
        let radius = self.params.crater_radius;
        let mut anchor = block_of(impact);
        while world.grid.in_bounds(anchor) && world.grid.get(anchor).is_solid() {
            anchor.y += 1;
        }
        anchor.y += radius + 1;

        let r = f64::from(radius) + 0.5;
        fill_sphere(
            &mut world.grid,
            anchor,
            r,
            true,
            BlockBrush::Scatter(&METEORITE_ORES),
            &mut world.rng,
        );
        fill_sphere(
            &mut world.grid,
            anchor,
            r,
            false,
            BlockBrush::Set(BlockId::Obsidian),
            &mut world.rng,
        );
        world.events.push(WorldEvent::MeteoriteLanded {
            center: anchor,
            radius,
        });
    }

    /// Convert ground biomes to tundra in a disc around the crash site.
    fn winterize(&self, world: &mut World, impact: DVec3) {
        let radius = self.params.snow_radius;
        let center = block_of(impact);
        let radius_sq = radius * radius;
        let mut columns = 0;
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                if dx * dx + dz * dz > radius_sq {
                    continue;
                }
                if world
                    .grid
                    .set_column_biome(center.x + dx, center.z + dz, BiomeId::Tundra)
                {
                    columns += 1;
                }
            }
        }
        world.events.push(WorldEvent::Winterized {
            center,
            radius,
            columns,
        });
    }
}
