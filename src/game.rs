//! Frame driver
//!
//! Owns the session and runs the simulation at a fixed rate, independent of
//! how often the host calls [`Game::update`]. Input is buffered and applied
//! by the next tick.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::fx::ParticleSystem;
use crate::present::{AudioSink, FrameSnapshot, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Layout, TickInput, tick};

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    pub particles: ParticleSystem,
    pub settings: Settings,
    input: TickInput,
    accumulator: f32,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(state: GameState, settings: Settings, seed: u64) -> Self {
        let particles = ParticleSystem::new(seed, settings.max_particles());
        Self {
            state,
            particles,
            settings,
            input: TickInput::default(),
            accumulator: 0.0,
            events: Vec::new(),
        }
    }

    /// Pointer moved to `x` (canvas coordinates)
    pub fn set_pointer_x(&mut self, x: f32) {
        self.input.pointer_x = Some(x);
    }

    /// Restart requested (honored only after a win or game over)
    pub fn request_restart(&mut self) {
        self.input.restart = true;
    }

    /// Swap in a new level layout, rebuilding the current level
    pub fn load_layout(&mut self, layout: Layout) {
        self.state.load_layout(layout);
        self.particles.clear();
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.particles.set_max_particles(settings.max_particles());
        self.settings = settings;
    }

    /// Run as many fixed ticks as `dt` seconds allow. Returns the tick count.
    pub fn update(&mut self, dt: f32, audio: &mut impl AudioSink) -> u32 {
        if !dt.is_finite() {
            log::warn!("Ignoring non-finite frame delta {}", dt);
            return 0;
        }
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(audio);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop backlog we refused to simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Run exactly one tick and dispatch its events
    pub fn step(&mut self, audio: &mut impl AudioSink) {
        let input = std::mem::take(&mut self.input);
        let was_playing = self.state.phase == GamePhase::Playing;

        self.events.clear();
        tick(&mut self.state, &input, &mut self.events);

        if !was_playing && self.state.phase == GamePhase::Playing {
            // Fresh level or run
            self.particles.clear();
        }

        for event in &self.events {
            audio.play(event);
        }
        self.particles.handle_events(&self.events);

        if self.state.phase == GamePhase::Playing {
            self.particles.update();
        }
    }

    /// Events emitted by the most recent tick
    pub fn last_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            state: &self.state,
            particles: self.particles.particles(),
            glow: self.settings.effective_glow(),
        }
    }

    /// Render the current frame
    pub fn render(&self, renderer: &mut impl Renderer) {
        renderer.draw_frame(&self.snapshot());
    }
}
