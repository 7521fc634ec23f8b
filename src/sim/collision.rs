//! Collision detection for the ball
//!
//! Pure functions only: they inspect the ball and one obstacle and report
//! what would happen, the tick decides how to respond.

use super::state::{Ball, Brick, Paddle};

/// Which vertical boundary the ball's next position crosses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalWall {
    Top,
    /// The paddle row: either a paddle bounce or a lost life, never a plain
    /// reflection
    Bottom,
}

/// Result of checking the ball's next position against the canvas edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallContact {
    /// Left or right wall
    pub horizontal: bool,
    pub vertical: Option<VerticalWall>,
}

impl WallContact {
    pub fn none() -> Self {
        Self::default()
    }
}

/// True iff the ball center lies strictly inside the brick rectangle
pub fn ball_hits_brick(ball: &Ball, brick: &Brick) -> bool {
    ball.pos.x > brick.pos.x
        && ball.pos.x < brick.pos.x + brick.size.x
        && ball.pos.y > brick.pos.y
        && ball.pos.y < brick.pos.y + brick.size.y
}

/// True iff the ball center lies strictly inside the paddle's horizontal
/// extent. Only meaningful once the ball has reached the paddle row.
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.x > paddle.x && ball.pos.x < paddle.right()
}

/// Check where the ball's next position lands relative to the canvas edges.
/// The top wall takes precedence over the bottom row.
pub fn wall_contact(ball: &Ball, width: f32, height: f32) -> WallContact {
    let next = ball.next_pos();
    let r = ball.radius;

    let horizontal = next.x > width - r || next.x < r;
    let vertical = if next.y < r {
        Some(VerticalWall::Top)
    } else if next.y > height - r {
        Some(VerticalWall::Bottom)
    } else {
        None
    };

    WallContact {
        horizontal,
        vertical,
    }
}

/// Horizontal velocity after a paddle bounce at `ball_x`.
///
/// The impact offset from the paddle center is normalized to [-1, 1]
/// (-1 = left edge, +1 = right edge) and scaled by `max_dx`.
pub fn paddle_bounce_dx(ball_x: f32, paddle: &Paddle, max_dx: f32) -> f32 {
    let half_width = paddle.width / 2.0;
    let hit_offset = ((ball_x - paddle.center_x()) / half_width).clamp(-1.0, 1.0);
    hit_offset * max_dx
}
