//! Fireworks field: spawn policy and per-frame update/draw/cleanup

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::firework::Firework;
use crate::renderer::{Hsb, Renderer};
use crate::settings::{ConfigError, FieldConfig};

/// Background for the static (no fireworks) display
pub const STATIC_BACKGROUND: Hsb = Hsb::WHITE;
/// Background that the trail fade blends toward
pub const NIGHT_BACKGROUND: Hsb = Hsb::BLACK;

/// Loop cadence requested from the animation driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Keep calling `tick` every frame
    Continuous,
    /// Stop the loop; redraw only on demand
    Pause,
}

/// Inputs for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Whether the current score earns fireworks
    pub fireworks_mode: bool,
    /// Canvas size
    pub width: f32,
    pub height: f32,
    /// Monotonic frame counter (drives the spawn cadence)
    pub frame_index: u64,
}

/// All active fireworks plus the physics they share
#[derive(Debug, Clone)]
pub struct FireworksField<R = Pcg32> {
    /// Spawn order; later fireworks draw on top
    active: Vec<Firework>,
    gravity: Vec2,
    config: FieldConfig,
    rng: R,
}

impl FireworksField<Pcg32> {
    /// Create a field with a seeded RNG
    pub fn new(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> FireworksField<R> {
    /// Create a field drawing randomness from `rng`
    pub fn with_rng(config: FieldConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            active: Vec::new(),
            gravity: config.gravity(),
            config,
            rng,
        })
    }

    pub fn active(&self) -> &[Firework] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Rockets plus debris across every active firework
    pub fn particle_count(&self) -> usize {
        self.active.iter().map(Firework::live_particles).sum()
    }

    /// Advance and draw one frame
    pub fn tick<D: Renderer + ?Sized>(&mut self, input: &TickInput, renderer: &mut D) -> LoopControl {
        if !input.fireworks_mode {
            if !self.active.is_empty() {
                log::debug!("Fireworks off, dropping {} in flight", self.active.len());
            }
            self.active.clear();
            renderer.clear_solid(STATIC_BACKGROUND);
            return LoopControl::Pause;
        }

        renderer.clear_with_alpha(NIGHT_BACKGROUND, self.config.trail_alpha);

        if self.should_spawn(input.frame_index) {
            let firework = Firework::launch(input.width, input.height, &mut self.rng);
            log::debug!(
                "Launched firework at x={:.1} (hue {:.0}), {} active",
                firework.rocket().pos.x,
                firework.hue(),
                self.active.len() + 1
            );
            self.active.push(firework);
        }

        let gravity = self.gravity;
        let rng = &mut self.rng;
        self.active.retain_mut(|firework| {
            firework.update(gravity, rng);
            firework.draw(renderer);
            !firework.is_finished()
        });

        LoopControl::Continuous
    }

    /// One chance every `spawn_interval` frames
    fn should_spawn(&mut self, frame_index: u64) -> bool {
        frame_index % self.config.spawn_interval == 0
            && self.rng.random::<f32>() < self.config.spawn_probability
    }
}
