//! Score Fireworks - score feedback display with a fireworks celebration
//!
//! Core modules:
//! - `sim`: Particle/firework simulation (seeded RNG, frame-driven)
//! - `score`: Score message decoding and feedback categories
//! - `renderer`: Point canvas with trail effect and WebGPU pipeline
//! - `settings`: Field configuration and validation
//! - `driver`: Animation loop glue between score events and the field

pub mod driver;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;

pub use driver::{AnimationDriver, FrameOutcome};
pub use score::{Feedback, ScoreReport};
pub use settings::{ConfigError, FieldConfig, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Starting (and maximum) particle lifespan; doubles as debris brightness
    pub const MAX_LIFESPAN: f32 = 100.0;
    /// Lifespan lost by a debris particle per tick
    pub const DEBRIS_DECAY: f32 = 2.5;
    /// Per-tick velocity multiplier for debris (air drag)
    pub const DEBRIS_DRAG: f32 = 0.95;

    /// Rocket launch velocity ranges (canvas units per tick, +y is down)
    pub const ROCKET_VX_RANGE: (f32, f32) = (-1.0, 1.0);
    pub const ROCKET_VY_RANGE: (f32, f32) = (-12.0, -8.0);

    /// Debris burst speed range
    pub const DEBRIS_SPEED_RANGE: (f32, f32) = (2.0, 8.0);
    /// Debris count per detonation, inclusive-exclusive
    pub const DEBRIS_COUNT_MIN: usize = 50;
    pub const DEBRIS_COUNT_MAX: usize = 150;

    /// Point sizes
    pub const ROCKET_STROKE: f32 = 4.0;
    pub const DEBRIS_STROKE: f32 = 3.0;

    /// Full hue circle (HSB mode, degrees)
    pub const HUE_RANGE: f32 = 360.0;

    /// Default spawn policy: one chance every 20 frames at 80%
    pub const SPAWN_INTERVAL_FRAMES: u64 = 20;
    pub const SPAWN_PROBABILITY: f32 = 0.8;
    /// Default gravity (downward)
    pub const GRAVITY: [f32; 2] = [0.0, 0.2];
    /// Alpha of the trailing background clear
    pub const TRAIL_ALPHA: f32 = 0.1;

    /// Score percentage at or above which fireworks run
    pub const FIREWORKS_THRESHOLD: f64 = 90.0;
    /// Score percentage at or above which feedback is "good"
    pub const GOOD_THRESHOLD: f64 = 60.0;
}
