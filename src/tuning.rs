//! Data-driven game balance
//!
//! Every size, speed and reward the simulation uses. Defaults reproduce the
//! classic single-screen layout; a JSON file can override any subset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Game balance and field geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Velocity (pixels per tick) after every serve
    pub ball_start_vel: Vec2,
    /// Distance of the served ball above the bottom edge
    pub ball_start_offset: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Horizontal speed at the very edge of the paddle
    pub max_paddle_dx: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_left: f32,
    pub brick_offset_top: f32,
    pub brick_reward: u64,

    // === Run ===
    pub starting_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 640.0,
            canvas_height: 480.0,

            ball_radius: 8.0,
            ball_start_vel: Vec2::new(3.0, -3.0),
            ball_start_offset: 30.0,

            paddle_width: 100.0,
            paddle_height: 15.0,
            max_paddle_dx: 5.0,

            brick_width: 55.0,
            brick_height: 20.0,
            brick_padding: 5.0,
            brick_offset_left: 20.0,
            brick_offset_top: 30.0,
            brick_reward: 100,

            starting_lives: 3,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that cannot produce a playable field
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("ball_radius", self.ball_radius),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(self.brick_padding.is_finite() && self.brick_padding >= 0.0) {
            return Err(ConfigError::InvalidTuning(format!(
                "brick_padding must not be negative, got {}",
                self.brick_padding
            )));
        }
        if !self.brick_offset_left.is_finite() || !self.brick_offset_top.is_finite() {
            return Err(ConfigError::InvalidTuning(
                "brick offsets must be finite".to_string(),
            ));
        }
        if !self.ball_start_vel.is_finite() || !self.max_paddle_dx.is_finite() {
            return Err(ConfigError::InvalidTuning(
                "ball velocities must be finite".to_string(),
            ));
        }
        // A ball without vertical speed never reaches a brick or the paddle
        if self.ball_start_vel.y == 0.0 {
            return Err(ConfigError::InvalidTuning(
                "ball_start_vel must have a vertical component".to_string(),
            ));
        }
        if self.paddle_width > self.canvas_width {
            return Err(ConfigError::InvalidTuning(format!(
                "paddle ({}) is wider than the canvas ({})",
                self.paddle_width, self.canvas_width
            )));
        }
        if 2.0 * self.ball_radius >= self.canvas_width.min(self.canvas_height) {
            return Err(ConfigError::InvalidTuning(format!(
                "ball radius {} does not fit the canvas",
                self.ball_radius
            )));
        }
        // Serve point must lie between the top wall and the bottom edge
        let max_offset = self.canvas_height - self.ball_radius;
        if !(self.ball_start_offset > 0.0 && self.ball_start_offset < max_offset) {
            return Err(ConfigError::InvalidTuning(format!(
                "ball_start_offset must be in (0, {max_offset}), got {}",
                self.ball_start_offset
            )));
        }
        Ok(())
    }

    /// Where a served ball starts
    pub fn ball_start_pos(&self) -> Vec2 {
        Vec2::new(
            self.canvas_width / 2.0,
            self.canvas_height - self.ball_start_offset,
        )
    }

    /// Paddle x that centers it on the canvas
    pub fn paddle_start_x(&self) -> f32 {
        (self.canvas_width - self.paddle_width) / 2.0
    }

    /// Rightmost legal paddle x
    pub fn paddle_max_x(&self) -> f32 {
        self.canvas_width - self.paddle_width
    }
}
