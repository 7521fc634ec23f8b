//! Neon Breaker - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, scoring, game phases)
//! - `game`: Fixed timestep driver that owns the session
//! - `fx`: Particle effects driven by simulation events
//! - `present`: Renderer/audio contract
//! - `audio`, `renderer`: Browser implementations of that contract
//! - `tuning`, `settings`: Game balance and presentation preferences

pub mod audio;
pub mod error;
pub mod fx;
pub mod game;
pub mod present;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, Result};
pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta accepted (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
