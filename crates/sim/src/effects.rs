//! Cosmetic effects: smoke trails behind falling projectiles and short
//! explosion flashes. Nothing here feeds back into the simulation.

use glam::{DVec3, Vec3};
use rand::Rng;

pub struct TrailParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub phase: f32,
}

impl TrailParticle {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        let mut rng = rand::thread_rng();
        let life = rng.gen_range(1.2..2.4);
        Self {
            position,
            velocity: velocity * 0.1
                + Vec3::new(
                    rng.gen_range(-0.4..0.4),
                    rng.gen_range(0.2..0.7),
                    rng.gen_range(-0.4..0.4),
                ),
            life,
            max_life: life,
            size: rng.gen_range(0.5..1.1),
            phase: rng.gen_range(0.0..std::f32::consts::TAU),
        }
    }

    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

pub struct ExplosionFlash {
    pub position: Vec3,
    pub power: f32,
    pub incendiary: bool,
    pub age: f32,
    pub duration: f32,
}

impl ExplosionFlash {
    pub fn intensity(&self) -> f32 {
        (1.0 - self.age / self.duration).max(0.0) * self.power
    }
}

#[derive(Default)]
pub struct EffectSystem {
    pub trail: Vec<TrailParticle>,
    pub flashes: Vec<ExplosionFlash>,
}

impl EffectSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_trail(&mut self, position: DVec3, velocity: DVec3) {
        self.trail
            .push(TrailParticle::new(position.as_vec3(), velocity.as_vec3()));
    }

    pub fn spawn_explosion_flash(&mut self, center: DVec3, power: f32, incendiary: bool) {
        self.flashes.push(ExplosionFlash {
            position: center.as_vec3(),
            power,
            incendiary,
            age: 0.0,
            duration: if incendiary { 0.9 } else { 0.6 },
        });
    }

    pub fn update(&mut self, dt: f32) {
        for p in &mut self.trail {
            p.life -= dt;
            // Smoke slows hard and drifts upward, wobbling on its own phase.
            p.velocity *= 1.0 - 1.8 * dt;
            p.velocity.y += 0.5 * dt;
            p.phase += 2.0 * dt;
            p.position += p.velocity * dt;
            p.position.x += p.phase.sin() * 0.15 * p.size * dt;
        }
        self.trail.retain(|p| p.life > 0.0);

        for f in &mut self.flashes {
            f.age += dt;
        }
        self.flashes.retain(|f| f.age < f.duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_particles_fade_and_expire() {
        let mut effects = EffectSystem::new();
        effects.spawn_trail(DVec3::new(0.0, 50.0, 0.0), DVec3::new(0.0, -2.0, 0.0));
        assert_eq!(effects.trail.len(), 1);
        assert_eq!(effects.trail[0].alpha(), 1.0);

        effects.update(0.05);
        assert!(effects.trail[0].alpha() < 1.0);
        for _ in 0..60 {
            effects.update(0.05);
        }
        assert!(effects.trail.is_empty());
    }

    #[test]
    fn spawned_particles_sit_within_tuning_ranges() {
        let mut effects = EffectSystem::new();
        for _ in 0..32 {
            effects.spawn_trail(DVec3::new(1.0, 2.0, 3.0), DVec3::ZERO);
        }
        for p in &effects.trail {
            assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
            assert!(p.size >= 0.5 && p.size < 1.1);
            assert!((0.0..std::f32::consts::TAU).contains(&p.phase));
            assert_eq!(p.life, p.max_life);
        }
    }

    #[test]
    fn smoke_rises_as_it_slows() {
        let mut effects = EffectSystem::new();
        effects.spawn_trail(DVec3::ZERO, DVec3::ZERO);
        let start_y = effects.trail[0].velocity.y;
        effects.update(0.1);
        assert!(effects.trail[0].velocity.y > start_y * (1.0 - 1.8 * 0.1));
    }

    #[test]
    fn flashes_fade_out_and_vanish() {
        let mut effects = EffectSystem::new();
        effects.spawn_explosion_flash(DVec3::ZERO, 10.0, true);
        let full = effects.flashes[0].intensity();
        effects.update(0.3);
        assert!(effects.flashes[0].intensity() < full);
        effects.update(1.0);
        assert!(effects.flashes.is_empty());
    }
}
