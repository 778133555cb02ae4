//! A single firework: rocket ascent, detonation at the apex, debris fade-out

use glam::Vec2;
use rand::Rng;

use super::particle::Particle;
use crate::consts::{DEBRIS_COUNT_MAX, DEBRIS_COUNT_MIN, HUE_RANGE};
use crate::renderer::Renderer;

#[derive(Debug, Clone)]
pub struct Firework {
    hue: f32,
    rocket: Particle,
    /// Set once at the apex, never cleared
    exploded: bool,
    /// Empty until detonation, then only shrinks
    debris: Vec<Particle>,
}

impl Firework {
    /// Firework with a random hue, rocket starting at `origin`
    pub fn new<R: Rng + ?Sized>(origin: Vec2, rng: &mut R) -> Self {
        let hue = rng.random_range(0.0..HUE_RANGE);
        let rocket = Particle::rocket(origin, hue, rng);
        Self {
            hue,
            rocket,
            exploded: false,
            debris: Vec::new(),
        }
    }

    /// Launch from a random horizontal position on the bottom edge
    pub fn launch<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        let x = if width > 0.0 {
            rng.random_range(0.0..width)
        } else {
            0.0
        };
        Self::new(Vec2::new(x, height), rng)
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn rocket(&self) -> &Particle {
        &self.rocket
    }

    pub fn debris(&self) -> &[Particle] {
        &self.debris
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Advance one tick. Returns true on the tick the rocket detonates.
    pub fn update<R: Rng + ?Sized>(&mut self, gravity: Vec2, rng: &mut R) -> bool {
        let mut detonated = false;
        if !self.exploded {
            self.rocket.apply_force(gravity);
            self.rocket.update();

            // Apex: vertical velocity has turned downward
            if self.rocket.vel.y >= 0.0 {
                let count = self.detonate(rng);
                log::debug!(
                    "Firework detonated at ({:.1}, {:.1}) with {} debris",
                    self.rocket.pos.x,
                    self.rocket.pos.y,
                    count
                );
                detonated = true;
            }
        }

        self.debris.retain_mut(|p| {
            p.apply_force(gravity);
            p.update();
            !p.is_finished()
        });

        detonated
    }

    /// Burst into [50, 150) debris particles at the rocket position
    fn detonate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.exploded = true;

        let count = rng.random_range(DEBRIS_COUNT_MIN..DEBRIS_COUNT_MAX);
        let origin = self.rocket.pos;
        self.debris.reserve(count);
        for _ in 0..count {
            self.debris.push(Particle::debris(origin, self.hue, rng));
        }
        count
    }

    pub fn draw<D: Renderer + ?Sized>(&self, renderer: &mut D) {
        if !self.exploded {
            self.rocket.draw(renderer);
        }
        for particle in &self.debris {
            particle.draw(renderer);
        }
    }

    /// Exploded and every piece of debris has burned out
    pub fn is_finished(&self) -> bool {
        self.exploded && self.debris.is_empty()
    }

    /// Particles still simulated (rocket until detonation, then debris)
    pub fn live_particles(&self) -> usize {
        self.debris.len() + usize::from(!self.exploded)
    }
}
