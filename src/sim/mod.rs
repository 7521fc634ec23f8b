//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per tick, velocities are pixels per tick
//! - Stable iteration order (bricks column-major)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::{
    VerticalWall, WallContact, ball_hits_brick, ball_hits_paddle, paddle_bounce_dx, wall_contact,
};
pub use layout::{BrickColor, DEFAULT_LAYOUT, Layout};
pub use state::{Ball, Brick, BrickGrid, BrickStatus, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, tick};
