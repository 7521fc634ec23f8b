//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame: bricks first, then the win
//! check, then ball movement against walls and paddle.

use super::collision::{
    VerticalWall, ball_hits_brick, ball_hits_paddle, paddle_bounce_dx, wall_contact,
};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer x in canvas coordinates
    pub pointer_x: Option<f32>,
    /// Restart request (click/tap)
    pub restart: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Events produced by the tick are appended to `events` in the order they
/// happened.
pub fn tick(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if let Some(x) = input.pointer_x {
        state.set_paddle_target(x);
    }
    if input.restart {
        state.restart();
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    resolve_bricks(state, events);

    if state.bricks.active_count() == 0 {
        log::info!("Level {} cleared with score {}", state.level, state.score);
        state.phase = GamePhase::LevelWon;
        events.push(GameEvent::LevelWon);
        return;
    }

    move_ball(state, events);
}

/// Destroy every active brick the ball center is inside.
///
/// Each hit flips the vertical velocity again, so an even number of
/// simultaneous hits leaves it unchanged.
fn resolve_bricks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for index in 0..state.bricks.len() {
        let hit = state
            .bricks
            .get(index)
            .is_some_and(|brick| brick.is_active() && ball_hits_brick(&state.ball, brick));
        if !hit {
            continue;
        }

        let Some(brick) = state.bricks.destroy(index) else {
            continue;
        };
        state.ball.vel.y = -state.ball.vel.y;
        state.score = state.score.saturating_add(state.tuning.brick_reward);
        events.push(GameEvent::BrickDestroyed {
            column: brick.column,
            row: brick.row,
            center: brick.center(),
            color: brick.color,
        });
    }
}

/// Reflect off walls, bounce off the paddle or lose a life, then move.
fn move_ball(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let contact = wall_contact(
        &state.ball,
        state.tuning.canvas_width,
        state.tuning.canvas_height,
    );

    if contact.horizontal {
        state.ball.vel.x = -state.ball.vel.x;
        events.push(GameEvent::WallHit);
    }

    match contact.vertical {
        Some(VerticalWall::Top) => {
            state.ball.vel.y = -state.ball.vel.y;
            events.push(GameEvent::WallHit);
        }
        Some(VerticalWall::Bottom) => {
            if ball_hits_paddle(&state.ball, &state.paddle) {
                state.ball.vel.x =
                    paddle_bounce_dx(state.ball.pos.x, &state.paddle, state.tuning.max_paddle_dx);
                state.ball.vel.y = -state.ball.vel.y;
                events.push(GameEvent::PaddleHit);
            } else {
                lose_life(state, events);
            }
        }
        None => {}
    }

    // Position always advances, even on a bounce frame
    state.ball.pos += state.ball.vel;
}

fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost);

    if state.lives == 0 {
        log::info!(
            "Game over at level {} with score {}",
            state.level,
            state.score
        );
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
    } else {
        log::info!("Ball lost, {} lives left", state.lives);
        state.reset_ball_and_paddle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BrickGrid, BrickStatus, Layout};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state_with(rows: &[&str]) -> GameState {
        GameState::new(Tuning::default(), Layout::parse(rows).unwrap()).unwrap()
    }

    fn step(state: &mut GameState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        tick(state, &TickInput::default(), &mut events);
        events
    }

    #[test]
    fn test_free_flight_moves_ball() {
        let mut state = state_with(&["o"]);
        let events = step(&mut state);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(323.0, 447.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_brick_hit_scores_and_reflects() {
        let mut state = state_with(&["oo"]);
        // Inside brick (0,0): x 20..75, y 30..50
        state.ball.pos = Vec2::new(40.0, 40.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        let events = step(&mut state);

        assert_eq!(state.score, 100);
        assert_eq!(state.bricks.active_count(), 1);
        assert_eq!(state.bricks.get(0).unwrap().status(), BrickStatus::Destroyed);
        assert_eq!(state.ball.vel, Vec2::new(3.0, 3.0));
        assert_eq!(state.ball.pos, Vec2::new(43.0, 43.0));
        assert_eq!(
            events,
            vec![GameEvent::BrickDestroyed {
                column: 0,
                row: 0,
                center: Vec2::new(47.5, 40.0),
                color: crate::sim::BrickColor::Orange,
            }]
        );
    }

    #[test]
    fn test_last_brick_wins_without_moving() {
        let mut state = state_with(&["o"]);
        state.ball.pos = Vec2::new(40.0, 40.0);

        let events = step(&mut state);

        assert_eq!(state.phase, GamePhase::LevelWon);
        assert_eq!(state.ball.pos, Vec2::new(40.0, 40.0));
        assert!(matches!(events.last(), Some(GameEvent::LevelWon)));

        // Frozen until restart
        let before = state.ball;
        assert!(step(&mut state).is_empty());
        assert_eq!(state.ball, before);
    }

    #[test]
    fn test_huge_reward_saturates_score() {
        let tuning = Tuning::from_json(r#"{ "brick_reward": 18446744073709551615 }"#).unwrap();
        let mut state = GameState::new(tuning, Layout::parse(&["ooo"]).unwrap()).unwrap();

        for index in 0..2 {
            state.ball.pos = state.bricks.get(index).unwrap().center();
            step(&mut state);
        }

        assert_eq!(state.score, u64::MAX);
        assert_eq!(state.bricks.active_count(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_overlapping_bricks_each_flip_dy() {
        let mut state = state_with(&["oo", "oo"]);
        // Negative padding stacks brick (0,0) at y 30..50 over (0,1) at y 40..60
        let overlapping = Tuning {
            brick_padding: -10.0,
            ..Tuning::default()
        };
        state.bricks = BrickGrid::from_layout(&state.layout, &overlapping);
        state.ball.pos = Vec2::new(40.0, 45.0);
        state.ball.vel = Vec2::new(0.0, -3.0);

        let events = step(&mut state);

        assert_eq!(events.len(), 2);
        assert_eq!(state.score, 200);
        assert_eq!(state.bricks.active_count(), 2);
        // Two flips cancel out
        assert_eq!(state.ball.vel, Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_side_wall_reflects_dx() {
        let mut state = state_with(&["o"]);
        state.ball.pos = Vec2::new(630.0, 240.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        let events = step(&mut state);

        assert_eq!(events, vec![GameEvent::WallHit]);
        assert_eq!(state.ball.vel, Vec2::new(-3.0, -3.0));
        assert_eq!(state.ball.pos, Vec2::new(627.0, 237.0));
    }

    #[test]
    fn test_top_wall_reflects_dy() {
        let mut state = state_with(&["o"]);
        state.ball.pos = Vec2::new(320.0, 10.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        let events = step(&mut state);

        assert_eq!(events, vec![GameEvent::WallHit]);
        assert_eq!(state.ball.vel, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_corner_emits_two_wall_hits() {
        let mut state = state_with(&["o"]);
        state.ball.pos = Vec2::new(9.0, 9.0);
        state.ball.vel = Vec2::new(-3.0, -3.0);

        let events = step(&mut state);

        assert_eq!(events, vec![GameEvent::WallHit, GameEvent::WallHit]);
        assert_eq!(state.ball.vel, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_paddle_center_hit_goes_straight_up() {
        let mut state = state_with(&["o"]);
        // Paddle centered at x = 320
        state.ball.pos = Vec2::new(320.0, 470.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        let events = step(&mut state);

        assert_eq!(events, vec![GameEvent::PaddleHit]);
        assert_eq!(state.ball.vel, Vec2::new(0.0, -3.0));
        assert_eq!(state.ball.pos, Vec2::new(320.0, 467.0));
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_paddle_offset_hit_angles_ball() {
        let mut state = state_with(&["o"]);
        state.ball.pos = Vec2::new(345.0, 470.0);
        state.ball.vel = Vec2::new(-2.0, 3.0);

        step(&mut state);

        assert_eq!(state.ball.vel, Vec2::new(2.5, -3.0));
    }

    #[test]
    fn test_miss_loses_life_and_resets() {
        let mut state = state_with(&["o"]);
        state.set_paddle_target(60.0);
        state.ball.pos = Vec2::new(500.0, 470.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        let events = step(&mut state);

        assert_eq!(events, vec![GameEvent::LifeLost]);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.paddle.x, 270.0);
        assert_eq!(state.ball.vel, Vec2::new(3.0, -3.0));
        // Served, then advanced by the serve velocity in the same tick
        assert_eq!(state.ball.pos, Vec2::new(323.0, 447.0));
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = state_with(&["o"]);
        state.lives = 1;
        state.score = 700;
        state.set_paddle_target(60.0);
        state.ball.pos = Vec2::new(500.0, 470.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        let events = step(&mut state);

        assert_eq!(events, vec![GameEvent::LifeLost, GameEvent::GameOver]);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_input_after_game_over() {
        let mut state = state_with(&["oo"]);
        state.phase = GamePhase::GameOver;
        state.lives = 0;
        state.score = 900;
        state.level = 4;

        let mut events = Vec::new();
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, &mut events);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.bricks.active_count(), 2);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_restart_input_ignored_while_playing() {
        let mut state = state_with(&["o"]);
        state.score = 300;
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, &mut Vec::new());
        assert_eq!(state.score, 300);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_pointer_input_moves_paddle_in_any_phase() {
        let mut state = state_with(&["o"]);
        state.phase = GamePhase::GameOver;
        let input = TickInput {
            pointer_x: Some(100.0),
            ..Default::default()
        };
        tick(&mut state, &input, &mut Vec::new());
        assert_eq!(state.paddle.x, 50.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::with_defaults();
        let mut state2 = GameState::with_defaults();

        let inputs = [
            TickInput {
                pointer_x: Some(200.0),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                pointer_x: Some(410.0),
                ..Default::default()
            },
        ];

        for _ in 0..400 {
            for input in &inputs {
                tick(&mut state1, input, &mut Vec::new());
                tick(&mut state2, input, &mut Vec::new());
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.ball, state2.ball);
    }
}
