//! Presentation contract
//!
//! The simulation knows nothing about pixels or speakers. Each frame the
//! driver hands a [`FrameSnapshot`] to a [`Renderer`] and every emitted
//! [`GameEvent`] to an [`AudioSink`].

use crate::fx::Particle;
use crate::sim::{GameEvent, GameState};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    /// Ball, paddle, bricks, phase and score/level/lives
    pub state: &'a GameState,
    pub particles: &'a [Particle],
    /// Draw neon glow around ball and paddle
    pub glow: bool,
}

/// Draws frames
pub trait Renderer {
    fn draw_frame(&mut self, frame: &FrameSnapshot<'_>);
}

/// Plays sounds for simulation events (fire and forget)
pub trait AudioSink {
    fn play(&mut self, event: &GameEvent);
}

/// Audio sink that stays silent
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _event: &GameEvent) {}
}

/// Audio sink that logs events instead of playing them (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, event: &GameEvent) {
        log::debug!("sfx: {:?}", event);
    }
}
