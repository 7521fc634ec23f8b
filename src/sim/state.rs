//! Game state and core simulation types
//!
//! Everything a frame step reads or writes lives in [`GameState`], which is
//! owned by the frame driver and passed by reference into [`super::tick`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::{BrickColor, Layout};
use crate::error::Result;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every brick destroyed, waiting for restart
    LevelWon,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Something that happened during a tick, for audio and effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A brick was hit and destroyed
    BrickDestroyed {
        column: usize,
        row: usize,
        /// Center of the destroyed brick
        center: Vec2,
        color: BrickColor,
    },
    /// Ball bounced off the left, right or top wall
    WallHit,
    /// Ball bounced off the paddle
    PaddleHit,
    /// Ball fell past the paddle
    LifeLost,
    /// Last brick destroyed
    LevelWon,
    /// Last life lost
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A freshly served ball
    pub fn served(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.ball_start_pos(),
            vel: tuning.ball_start_vel,
            radius: tuning.ball_radius,
        }
    }

    /// Where the ball would be after one more tick
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }
}

/// The player's paddle, resting on the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle centered on the bottom edge
    pub fn centered(tuning: &Tuning) -> Self {
        Self {
            x: tuning.paddle_start_x(),
            y: tuning.canvas_height - tuning.paddle_height,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Brick lifecycle: active bricks can be destroyed once, never revived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A brick entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    pub color: BrickColor,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    status: BrickStatus,
}

impl Brick {
    pub fn status(&self) -> BrickStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// All bricks of the current level, in column-major order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    bricks: Vec<Brick>,
    active: usize,
}

impl BrickGrid {
    /// Lay out one brick per non-empty layout token
    pub fn from_layout(layout: &Layout, tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.brick_width, tuning.brick_height);
        let mut bricks = Vec::with_capacity(layout.brick_count());

        for column in 0..layout.columns() {
            for row in 0..layout.rows() {
                let Some(color) = layout.cell(column, row) else {
                    continue;
                };
                let pos = Vec2::new(
                    column as f32 * (tuning.brick_width + tuning.brick_padding)
                        + tuning.brick_offset_left,
                    row as f32 * (tuning.brick_height + tuning.brick_padding)
                        + tuning.brick_offset_top,
                );
                bricks.push(Brick {
                    column,
                    row,
                    color,
                    pos,
                    size,
                    status: BrickStatus::Active,
                });
            }
        }

        let active = bricks.len();
        Self {
            columns: layout.columns(),
            rows: layout.rows(),
            bricks,
            active,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Bricks still standing
    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Brick> {
        self.bricks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    /// Active bricks only (what the renderer draws)
    pub fn active(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_active())
    }

    /// Destroy the brick at `index`. Returns the brick if this call
    /// destroyed it; already destroyed bricks stay destroyed.
    pub fn destroy(&mut self, index: usize) -> Option<Brick> {
        let brick = self.bricks.get_mut(index)?;
        if brick.status != BrickStatus::Active {
            return None;
        }
        brick.status = BrickStatus::Destroyed;
        self.active -= 1;
        Some(*brick)
    }
}

/// Complete game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub layout: Layout,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter (ticks spent Playing)
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
}

impl GameState {
    /// Start a new run with the given tuning and layout
    pub fn new(tuning: Tuning, layout: Layout) -> Result<Self> {
        tuning.validate()?;
        Ok(Self::from_parts(tuning, layout))
    }

    /// Default tuning and the built-in layout
    pub fn with_defaults() -> Self {
        Self::from_parts(Tuning::default(), Layout::default())
    }

    fn from_parts(tuning: Tuning, layout: Layout) -> Self {
        let mut state = Self {
            level: 1,
            lives: tuning.starting_lives,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            ball: Ball::served(&tuning),
            paddle: Paddle::centered(&tuning),
            bricks: BrickGrid::default(),
            tuning,
            layout,
        };
        state.build_level();

        log::info!(
            "New run: {} bricks, {} lives",
            state.bricks.active_count(),
            state.lives
        );
        state
    }

    /// Put the ball back on the serve point and center the paddle
    pub fn reset_ball_and_paddle(&mut self) {
        self.ball = Ball::served(&self.tuning);
        self.paddle = Paddle::centered(&self.tuning);
    }

    /// Regenerate the grid from the current layout and serve a new ball.
    ///
    /// Degenerate sessions settle immediately: an empty grid is already won
    /// and a session without lives is already over.
    pub fn build_level(&mut self) {
        self.bricks = BrickGrid::from_layout(&self.layout, &self.tuning);
        self.reset_ball_and_paddle();

        self.phase = if self.lives == 0 {
            log::info!("No lives left, game over");
            GamePhase::GameOver
        } else if self.bricks.active_count() == 0 {
            log::info!("Layout has no bricks, level {} won", self.level);
            GamePhase::LevelWon
        } else {
            GamePhase::Playing
        };
    }

    /// Replace the level layout and rebuild the current level from it
    pub fn load_layout(&mut self, layout: Layout) {
        log::info!(
            "Loaded layout {}x{} ({} bricks)",
            layout.columns(),
            layout.rows(),
            layout.brick_count()
        );
        self.layout = layout;
        self.build_level();
    }

    /// Move the paddle under a pointer at `pointer_x` (canvas coordinates).
    ///
    /// Pointers outside the canvas are ignored and the paddle keeps its last
    /// position. Returns whether the pointer was accepted.
    pub fn set_paddle_target(&mut self, pointer_x: f32) -> bool {
        if !(pointer_x > 0.0 && pointer_x < self.tuning.canvas_width) {
            return false;
        }
        self.paddle.x =
            (pointer_x - self.paddle.width / 2.0).clamp(0.0, self.tuning.paddle_max_x());
        true
    }

    /// Start the next level (after a win) or a fresh run (after game over).
    /// Ignored while playing. Returns whether a restart happened.
    pub fn restart(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                log::debug!("Restart ignored while playing");
                return false;
            }
            GamePhase::LevelWon => {
                self.level += 1;
                log::info!("Starting level {}", self.level);
            }
            GamePhase::GameOver => {
                self.score = 0;
                self.level = 1;
                self.lives = self.tuning.starting_lives;
                log::info!("New run started");
            }
        }
        self.build_level();
        true
    }
}
