//! Particle effects
//!
//! Purely visual: bursts spawn where bricks break and fall under a little
//! gravity. Nothing in the simulation reads particle state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{BrickColor, GameEvent};

/// Particles spawned per destroyed brick
pub const BURST_SIZE: usize = 10;
/// Lifetime in ticks
pub const PARTICLE_LIFE: u32 = 50;
/// Ticks over which a particle fades out
pub const FADE_TICKS: u32 = 20;
/// Downward acceleration per tick
pub const PARTICLE_GRAVITY: f32 = 0.05;

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BrickColor,
    pub size: f32,
    /// Ticks remaining
    pub life: u32,
}

impl Particle {
    /// Opacity in 0..=1, fading during the last [`FADE_TICKS`]
    pub fn alpha(&self) -> f32 {
        if self.life >= FADE_TICKS {
            1.0
        } else {
            self.life as f32 / FADE_TICKS as f32
        }
    }

    fn update(&mut self) {
        self.vel.y += PARTICLE_GRAVITY;
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }
}

/// Owns every live particle and the RNG that scatters them
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    max_particles: usize,
}

impl ParticleSystem {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            max_particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        self.particles.truncate(max);
    }

    /// Spawn a burst for every brick destroyed in `events`
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::BrickDestroyed { center, color, .. } = event {
                self.burst(*center, *color);
            }
        }
    }

    /// Scatter [`BURST_SIZE`] particles from `pos`
    pub fn burst(&mut self, pos: Vec2, color: BrickColor) {
        for _ in 0..BURST_SIZE {
            if self.particles.len() >= self.max_particles {
                return;
            }
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 3.0,
                (self.rng.random::<f32>() - 0.5) * 3.0,
            );
            self.particles.push(Particle {
                pos,
                vel,
                color,
                size: self.rng.random::<f32>() * 2.0 + 1.0,
                life: PARTICLE_LIFE,
            });
        }
    }

    /// Advance every particle one tick and drop the expired ones
    pub fn update(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.update();
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_spawns_at_brick_center() {
        let mut fx = ParticleSystem::new(7, 256);
        fx.handle_events(&[
            GameEvent::WallHit,
            GameEvent::BrickDestroyed {
                column: 1,
                row: 0,
                center: Vec2::new(107.5, 40.0),
                color: BrickColor::Purple,
            },
        ]);

        assert_eq!(fx.len(), BURST_SIZE);
        for p in fx.particles() {
            assert_eq!(p.pos, Vec2::new(107.5, 40.0));
            assert_eq!(p.color, BrickColor::Purple);
            assert!(p.vel.x >= -1.5 && p.vel.x < 1.5);
            assert!(p.size >= 1.0 && p.size < 3.0);
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut fx = ParticleSystem::new(1, 256);
        fx.burst(Vec2::ZERO, BrickColor::Grey);
        for _ in 0..PARTICLE_LIFE - 1 {
            fx.update();
        }
        assert_eq!(fx.len(), BURST_SIZE);
        fx.update();
        assert!(fx.is_empty());
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut fx = ParticleSystem::new(3, 256);
        fx.burst(Vec2::ZERO, BrickColor::Orange);
        let before: Vec<f32> = fx.particles().iter().map(|p| p.vel.y).collect();
        fx.update();
        for (p, vy) in fx.particles().iter().zip(before) {
            assert!((p.vel.y - (vy + PARTICLE_GRAVITY)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_alpha_fades_at_end_of_life() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: BrickColor::Grey,
            size: 1.0,
            life: PARTICLE_LIFE,
        };
        assert_eq!(p.alpha(), 1.0);
        p.life = 10;
        assert_eq!(p.alpha(), 0.5);
    }

    #[test]
    fn test_cap_respected() {
        let mut fx = ParticleSystem::new(5, 15);
        fx.burst(Vec2::ZERO, BrickColor::Grey);
        fx.burst(Vec2::ZERO, BrickColor::Grey);
        assert_eq!(fx.len(), 15);

        fx.set_max_particles(4);
        assert_eq!(fx.len(), 4);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let mut a = ParticleSystem::new(42, 64);
        let mut b = ParticleSystem::new(42, 64);
        a.burst(Vec2::ONE, BrickColor::LightBlue);
        b.burst(Vec2::ONE, BrickColor::LightBlue);
        let va: Vec<Vec2> = a.particles().iter().map(|p| p.vel).collect();
        let vb: Vec<Vec2> = b.particles().iter().map(|p| p.vel).collect();
        assert_eq!(va, vb);
    }
}
