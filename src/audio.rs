//! Sound effects
//!
//! Procedurally generated tones - no external files needed! Each effect is
//! described as a list of [`Tone`]s; the browser build plays them through
//! the Web Audio API.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Brick destroyed
    BrickBreak,
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits wall
    WallHit,
    /// Ball fell past the paddle
    LifeLost,
    /// Last brick destroyed
    LevelClear,
    /// Last life lost
    GameOver,
}

impl SoundEffect {
    /// The effect that accompanies a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::BrickDestroyed { .. } => SoundEffect::BrickBreak,
            GameEvent::WallHit => SoundEffect::WallHit,
            GameEvent::PaddleHit => SoundEffect::PaddleHit,
            GameEvent::LifeLost => SoundEffect::LifeLost,
            GameEvent::LevelWon => SoundEffect::LevelClear,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }

    /// Tones making up this effect. `jitter` in [0, 1) detunes the brick
    /// break so repeated hits don't sound identical.
    pub fn tones(&self, jitter: f32) -> Vec<Tone> {
        match self {
            SoundEffect::BrickBreak => {
                vec![Tone::new(300.0 + jitter * 100.0, 0.05, Waveform::Square)]
            }
            SoundEffect::PaddleHit => vec![Tone::new(200.0, 0.1, Waveform::Sine)],
            SoundEffect::WallHit => vec![Tone::new(150.0, 0.05, Waveform::Sine)],
            SoundEffect::LifeLost => vec![Tone::new(100.0, 0.2, Waveform::Sawtooth)],
            // Rising fanfare
            SoundEffect::LevelClear => [400.0, 500.0, 600.0, 800.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone {
                    delay: i as f64 * 0.1,
                    gain: 0.3,
                    ..Tone::new(freq, 0.4, Waveform::Triangle)
                })
                .collect(),
            // Sad descending
            SoundEffect::GameOver => [400.0, 350.0, 300.0, 200.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone {
                    delay: i as f64 * 0.2,
                    gain: 0.3,
                    ..Tone::new(freq, 0.3, Waveform::Sine)
                })
                .collect(),
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator blip with an exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds until the gain has decayed
    pub duration: f64,
    /// Seconds after the effect starts
    pub delay: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
    pub waveform: Waveform,
}

impl Tone {
    pub fn new(freq: f32, duration: f64, waveform: Waveform) -> Self {
        Self {
            freq,
            duration,
            delay: 0.0,
            gain: 0.5,
            waveform,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};
    use crate::present::AudioSink;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        rng: Pcg32,
    }

    impl AudioManager {
        pub fn new(volume: f32, seed: u64) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
                rng: Pcg32::seed_from_u64(seed),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Set effective volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Play a sound effect
        pub fn play_effect(&mut self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let jitter = self.rng.random::<f32>();
            for tone in effect.tones(jitter) {
                play_tone(ctx, &tone, self.volume);
            }
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, event: &GameEvent) {
            self.play_effect(SoundEffect::for_event(event));
        }
    }

    fn oscillator_type(waveform: Waveform) -> OscillatorType {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, tone.freq, oscillator_type(tone.waveform)) else {
            return;
        };
        let t = ctx.current_time() + tone.delay;

        gain.gain().set_value_at_time(vol * tone.gain, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.001, t + tone.duration).ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + tone.duration).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BrickColor;
    use glam::Vec2;

    #[test]
    fn test_every_event_has_a_sound() {
        let brick = GameEvent::BrickDestroyed {
            column: 0,
            row: 0,
            center: Vec2::ZERO,
            color: BrickColor::Orange,
        };
        assert_eq!(SoundEffect::for_event(&brick), SoundEffect::BrickBreak);
        assert_eq!(SoundEffect::for_event(&GameEvent::WallHit), SoundEffect::WallHit);
        assert_eq!(SoundEffect::for_event(&GameEvent::PaddleHit), SoundEffect::PaddleHit);
        assert_eq!(SoundEffect::for_event(&GameEvent::LifeLost), SoundEffect::LifeLost);
        assert_eq!(SoundEffect::for_event(&GameEvent::LevelWon), SoundEffect::LevelClear);
        assert_eq!(SoundEffect::for_event(&GameEvent::GameOver), SoundEffect::GameOver);
    }

    #[test]
    fn test_brick_break_pitch_jitter() {
        let low = SoundEffect::BrickBreak.tones(0.0);
        let high = SoundEffect::BrickBreak.tones(0.99);
        assert_eq!(low[0].freq, 300.0);
        assert!(high[0].freq > 390.0 && high[0].freq < 400.0);
        assert_eq!(low[0].waveform, Waveform::Square);
    }

    #[test]
    fn test_life_lost_is_low_thud() {
        let tones = SoundEffect::LifeLost.tones(0.5);
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].freq, 100.0);
        assert_eq!(tones[0].duration, 0.2);
        assert_eq!(tones[0].waveform, Waveform::Sawtooth);
    }

    #[test]
    fn test_jingles_are_staggered() {
        let tones = SoundEffect::GameOver.tones(0.0);
        assert_eq!(tones.len(), 4);
        assert!(tones.windows(2).all(|w| w[1].delay > w[0].delay));
        assert!(tones.windows(2).all(|w| w[1].freq < w[0].freq));
    }
}
