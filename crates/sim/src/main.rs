//! Headless meteor-strike run: generate terrain, scatter some creatures,
//! drop a meteor on them and report what is left.

mod config;
mod effects;
mod meteor;
mod simulation;
mod world;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use glam::DVec3;
use rand::Rng;
use sim_core::TickClock;

use crate::config::SimConfig;
use crate::simulation::Simulation;
use crate::world::{World, WorldEvent};

/// Wall-clock speedup for the run; tick semantics are unchanged.
const FAST_FORWARD: f64 = 10.0;
const MAX_TICKS: u64 = 4000;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load_from(Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => SimConfig::load(),
    };

    let grid = procgen::generate(&config.world.terrain_params());
    let mut sim = Simulation::new(World::new(grid));
    seed_creatures(&mut sim.world, config.world.creatures);

    let target_y = sim.world.highest_solid_y(0, 0).unwrap_or(0) as f64;
    let start = DVec3::new(-60.5, 140.0, 45.5);
    let velocity = (DVec3::new(0.5, target_y, 0.5) - start).normalize() * 4.0;
    let bias = velocity * 0.04;
    let id = sim.spawn_meteor(start, velocity, bias, config.meteor.clone(), None);

    let mut clock = TickClock::new();
    clock.set_rate(sim_core::DEFAULT_TICK_RATE * FAST_FORWARD);
    while sim.meteor_count() > 0 && sim.tick_count() < MAX_TICKS {
        clock.update();
        while clock.should_tick() && sim.meteor_count() > 0 {
            sim.tick();
            if sim.tick_count() % 40 == 0 {
                if let Some(m) = sim.meteor(id) {
                    log::debug!(
                        "tick {}: meteor at y {:.1}, {} burrow charges left",
                        sim.tick_count(),
                        m.body.position.y,
                        m.charges_left()
                    );
                }
            }
        }
        std::thread::sleep(Duration::from_millis(1));
    }

    report(&sim);
    Ok(())
}

/// Drop creatures on the surface at random columns.
fn seed_creatures(world: &mut World, count: u32) {
    let mut rng = rand::thread_rng();
    let min = world.grid.min;
    let nx = world.grid.nx as i32;
    let nz = world.grid.nz as i32;
    for _ in 0..count {
        let x = rng.gen_range(min.x..min.x + nx);
        let z = rng.gen_range(min.z..min.z + nz);
        let Some(surface) = world.highest_solid_y(x, z) else {
            continue;
        };
        world.spawn_creature(
            DVec3::new(x as f64 + 0.5, surface as f64 + 1.0, z as f64 + 0.5),
            20.0,
        );
    }
    log::info!("{} creatures wandering the surface", world.living_creatures());
}

fn report(sim: &Simulation) {
    let mut explosions = 0;
    for event in &sim.world.events {
        match event {
            WorldEvent::Explosion { .. } => explosions += 1,
            WorldEvent::MeteoriteLanded { center, radius } => {
                log::info!("meteorite of radius {radius} buried at {center}");
            }
            WorldEvent::Winterized { columns, .. } => {
                log::info!("winter settled over {columns} columns");
            }
            WorldEvent::MeteorImpact { .. } => {}
        }
    }
    for message in &sim.world.messages.messages {
        log::info!("broadcast: {}", message.text);
    }
    for flash in &sim.world.effects.flashes {
        let tint = if flash.incendiary { " (burning)" } else { "" };
        log::debug!("afterglow {:.1} at {}{tint}", flash.intensity(), flash.position);
    }
    if let Some(p) = sim.world.effects.trail.last() {
        log::debug!(
            "{} smoke puffs aloft, freshest at alpha {:.2}",
            sim.world.effects.trail.len(),
            p.alpha()
        );
    }
    log::info!(
        "{} ticks, {} explosions, {} creatures left standing",
        sim.tick_count(),
        explosions,
        sim.world.living_creatures()
    );
}
