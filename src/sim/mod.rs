//! Fireworks simulation module
//!
//! Frame-driven and single-threaded:
//! - All randomness comes from an injected (seedable) RNG
//! - Gravity is validated once when the field is built
//! - No rendering dependencies beyond the `Renderer` trait

pub mod field;
pub mod firework;
pub mod particle;
pub mod session;

pub use field::{FireworksField, LoopControl, TickInput};
pub use firework::Firework;
pub use particle::Particle;
pub use session::Session;
