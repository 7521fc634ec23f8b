//! Display list generation
//!
//! Turns a frame snapshot into a flat list of 2D draw commands. Kept free of
//! any browser types so frame composition can be tested natively.

use glam::Vec2;

use crate::present::FrameSnapshot;
use crate::sim::GamePhase;

pub const BALL_COLOR: &str = "#00ffff";
pub const PADDLE_COLOR: &str = "#0077ff";
pub const OVERLAY_COLOR: &str = "#000000";
pub const TEXT_COLOR: &str = "#00ffff";

const BALL_GLOW: f32 = 15.0;
const PADDLE_GLOW: f32 = 10.0;
const OVERLAY_ALPHA: f32 = 0.7;

/// One 2D drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole canvas
    Clear { size: Vec2 },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: &'static str,
        alpha: f32,
        /// Shadow blur radius for neon glow
        glow: Option<f32>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: &'static str,
        glow: Option<f32>,
    },
    /// Centered text
    Text {
        text: &'static str,
        pos: Vec2,
        size: f32,
        color: &'static str,
    },
}

/// Compose the display list for one frame, back to front
pub fn build_frame(frame: &FrameSnapshot<'_>) -> Vec<DrawCmd> {
    let state = frame.state;
    let canvas = Vec2::new(state.tuning.canvas_width, state.tuning.canvas_height);
    let glow = |blur: f32| frame.glow.then_some(blur);

    let mut cmds = Vec::with_capacity(state.bricks.len() + frame.particles.len() + 8);
    cmds.push(DrawCmd::Clear { size: canvas });

    for brick in state.bricks.active() {
        cmds.push(DrawCmd::Rect {
            pos: brick.pos,
            size: brick.size,
            color: brick.color.css(),
            alpha: 1.0,
            glow: None,
        });
    }

    cmds.push(DrawCmd::Circle {
        center: state.ball.pos,
        radius: state.ball.radius,
        color: BALL_COLOR,
        glow: glow(BALL_GLOW),
    });

    let paddle = &state.paddle;
    cmds.push(DrawCmd::Rect {
        pos: Vec2::new(paddle.x, paddle.y),
        size: Vec2::new(paddle.width, paddle.height),
        color: PADDLE_COLOR,
        alpha: 1.0,
        glow: glow(PADDLE_GLOW),
    });

    for particle in frame.particles {
        cmds.push(DrawCmd::Rect {
            pos: particle.pos,
            size: Vec2::splat(particle.size),
            color: particle.color.css(),
            alpha: particle.alpha(),
            glow: None,
        });
    }

    if let Some(title) = overlay_title(state.phase) {
        let center = canvas / 2.0;
        cmds.push(DrawCmd::Rect {
            pos: Vec2::ZERO,
            size: canvas,
            color: OVERLAY_COLOR,
            alpha: OVERLAY_ALPHA,
            glow: None,
        });
        cmds.push(DrawCmd::Text {
            text: title,
            pos: center - Vec2::new(0.0, 20.0),
            size: 48.0,
            color: TEXT_COLOR,
        });
        cmds.push(DrawCmd::Text {
            text: "Click to play again",
            pos: center + Vec2::new(0.0, 20.0),
            size: 20.0,
            color: TEXT_COLOR,
        });
    }

    cmds
}

/// Overlay headline, if the phase needs one
pub fn overlay_title(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Playing => None,
        GamePhase::LevelWon => Some("LEVEL CLEARED!"),
        GamePhase::GameOver => Some("GAME OVER"),
    }
}

/// HUD lines: score, level, lives
pub fn hud_text(frame: &FrameSnapshot<'_>) -> [String; 3] {
    let state = frame.state;
    [
        format!("Score: {}", state.score),
        format!("Level: {}", state.level),
        format!("Lives: {}", state.lives),
    ]
}
