//! Point-mass particles
//!
//! A particle is either the rocket of a firework (climbs until its vertical
//! velocity turns around) or a piece of debris from a detonation (drags,
//! fades, and dies when its lifespan runs out).

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::consts::*;
use crate::renderer::{Hsb, Renderer};

/// Visual and behavioral role, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq)]
enum Role {
    /// Ascending shell; ends when the owning firework detonates
    Rocket,
    /// Explosion fragment; `lifespan` doubles as brightness
    Debris { lifespan: f32 },
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Per-tick force accumulator, zeroed by `update`
    pub acc: Vec2,
    pub hue: f32,
    role: Role,
}

impl Particle {
    /// Rocket launched upward with a little horizontal jitter
    pub fn rocket<R: Rng + ?Sized>(pos: Vec2, hue: f32, rng: &mut R) -> Self {
        let vel = Vec2::new(
            rng.random_range(ROCKET_VX_RANGE.0..ROCKET_VX_RANGE.1),
            rng.random_range(ROCKET_VY_RANGE.0..ROCKET_VY_RANGE.1),
        );
        Self {
            pos,
            vel,
            acc: Vec2::ZERO,
            hue,
            role: Role::Rocket,
        }
    }

    /// Debris flying off in a random direction
    pub fn debris<R: Rng + ?Sized>(pos: Vec2, hue: f32, rng: &mut R) -> Self {
        let direction = Vec2::from_angle(rng.random_range(0.0..TAU));
        let speed = rng.random_range(DEBRIS_SPEED_RANGE.0..DEBRIS_SPEED_RANGE.1);
        Self {
            pos,
            vel: direction * speed,
            acc: Vec2::ZERO,
            hue,
            role: Role::Debris {
                lifespan: MAX_LIFESPAN,
            },
        }
    }

    pub fn is_rocket(&self) -> bool {
        matches!(self.role, Role::Rocket)
    }

    /// Remaining lifespan (debris only)
    pub fn lifespan(&self) -> Option<f32> {
        match self.role {
            Role::Rocket => None,
            Role::Debris { lifespan } => Some(lifespan),
        }
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// Advance one tick: drag and decay (debris), integrate, reset forces
    pub fn update(&mut self) {
        if let Role::Debris { lifespan } = &mut self.role {
            self.vel *= DEBRIS_DRAG;
            *lifespan -= DEBRIS_DECAY;
        }

        self.vel += self.acc;
        self.pos += self.vel;
        self.acc = Vec2::ZERO;
    }

    pub fn draw<D: Renderer + ?Sized>(&self, renderer: &mut D) {
        match self.role {
            Role::Rocket => {
                renderer.draw_point(self.pos, Hsb::new(self.hue, 100.0, 100.0), ROCKET_STROKE);
            }
            Role::Debris { lifespan } => {
                let color = Hsb::new(self.hue, 100.0, lifespan).with_alpha(lifespan / MAX_LIFESPAN);
                renderer.draw_point(self.pos, color, DEBRIS_STROKE);
            }
        }
    }

    /// Debris that has burned out. Rockets never finish on their own.
    pub fn is_finished(&self) -> bool {
        matches!(self.role, Role::Debris { lifespan } if lifespan < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::PointCanvas;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn debris_with(vel: Vec2, lifespan: f32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel,
            acc: Vec2::ZERO,
            hue: 200.0,
            role: Role::Debris { lifespan },
        }
    }

    #[test]
    fn test_rocket_launch_velocity() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let rocket = Particle::rocket(Vec2::new(50.0, 400.0), 10.0, &mut rng);
            assert!(rocket.is_rocket());
            assert!((-1.0..1.0).contains(&rocket.vel.x));
            assert!((-12.0..-8.0).contains(&rocket.vel.y));
            assert_eq!(rocket.acc, Vec2::ZERO);
            assert_eq!(rocket.lifespan(), None);
        }
    }

    #[test]
    fn test_debris_burst_speed() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..100 {
            let debris = Particle::debris(Vec2::ZERO, 10.0, &mut rng);
            let speed = debris.vel.length();
            assert!(speed >= 2.0 - 1e-4 && speed < 8.0 + 1e-4, "speed {}", speed);
            assert_eq!(debris.lifespan(), Some(MAX_LIFESPAN));
        }
    }

    #[test]
    fn test_forces_accumulate_and_reset() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut rocket = Particle::rocket(Vec2::ZERO, 0.0, &mut rng);
        let vel = rocket.vel;

        rocket.apply_force(Vec2::new(0.0, 0.2));
        rocket.apply_force(Vec2::new(0.1, 0.2));
        assert_eq!(rocket.acc, Vec2::new(0.1, 0.4));

        rocket.update();
        assert_eq!(rocket.vel, vel + Vec2::new(0.1, 0.4));
        assert_eq!(rocket.pos, rocket.vel);
        assert_eq!(rocket.acc, Vec2::ZERO);
    }

    #[test]
    fn test_drag_applies_before_force() {
        let mut debris = debris_with(Vec2::new(10.0, 0.0), 50.0);
        debris.apply_force(Vec2::new(0.0, 1.0));
        debris.update();
        // Force is not damped in the tick it is applied
        assert!((debris.vel.x - 9.5).abs() < 1e-5);
        assert!((debris.vel.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_debris_burns_out() {
        let mut debris = debris_with(Vec2::ZERO, 2.4);
        assert!(!debris.is_finished());
        debris.update();
        let lifespan = debris.lifespan().unwrap();
        assert!((lifespan + 0.1).abs() < 1e-5);
        assert!(debris.is_finished());
    }

    #[test]
    fn test_rocket_never_finishes() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut rocket = Particle::rocket(Vec2::ZERO, 0.0, &mut rng);
        for _ in 0..1000 {
            rocket.apply_force(Vec2::new(0.0, 0.2));
            rocket.update();
            assert!(!rocket.is_finished());
        }
    }

    #[test]
    fn test_draw_styles() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut canvas = PointCanvas::new(100.0, 100.0);

        Particle::rocket(Vec2::new(1.0, 2.0), 0.0, &mut rng).draw(&mut canvas);
        debris_with(Vec2::ZERO, 50.0).draw(&mut canvas);

        let points = canvas.points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].size, ROCKET_STROKE);
        assert_eq!(points[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(points[1].size, DEBRIS_STROKE);
        // Half-faded debris: half brightness, half opacity
        assert!((points[1].color[3] - 0.5).abs() < 1e-5);
        let max_channel = points[1].color[..3].iter().cloned().fold(0.0, f32::max);
        assert!((max_channel - 0.5).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_debris_decay_and_drag(
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
            lifespan in 0.0f32..100.0,
        ) {
            let mut debris = debris_with(Vec2::new(vx, vy), lifespan);
            let speed = debris.vel.length();
            debris.update();

            prop_assert!((debris.lifespan().unwrap() - (lifespan - 2.5)).abs() < 1e-4);
            prop_assert!((debris.vel.length() - speed * 0.95).abs() < 1e-3);
            prop_assert!(!debris.is_rocket());
        }
    }
}
