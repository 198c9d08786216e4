//! Stateless ball simulation shared by the authoritative server and client prediction.
//!
//! Every function operates on an explicit [`Ball`] plus a [`GameConfig`]; nothing here
//! owns state. The server calls [`step`] once per tick, which applies the kernel in a
//! fixed order so both ends of the wire agree on the outcome:
//!
//! 1. [`integrate`] the ball by one tick
//! 2. [`bounce_vertical`] off the top and bottom walls
//! 3. [`paddle_collision`] against the near paddle (seat 1)
//! 4. [`paddle_collision`] against the far paddle (seat 2), only without a near hit
//! 5. [`score_check`], only when no paddle returned the ball
//!
//! At most one effect is applied per axis per tick, which keeps a ball from being
//! deflected twice in the same step. When a wall bounce and a paddle hit land on
//! the same tick, the bounce keeps the vertical direction and the paddle strike
//! only sets the vertical speed.

use crate::config::GameConfig;
use crate::SeatNumber;
use serde::{Deserialize, Serialize};

/// One discrete simulation step, in ticks
pub const TICK_STEP: f32 = 1.0;

/// Ball position and per-tick velocity. The ball is treated as a point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl Ball {
    pub fn centered(config: &GameConfig) -> Self {
        Self {
            x: config.field_width / 2.0,
            y: config.field_height / 2.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
        }
    }
}

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left end, x near zero, held by seat 1
    Near,
    /// Right end, x near the field width, held by seat 2
    Far,
}

impl Side {
    pub fn of(seat: SeatNumber) -> Self {
        match seat {
            SeatNumber::One => Side::Near,
            SeatNumber::Two => Side::Far,
        }
    }

    /// Sign of horizontal velocity that moves the ball toward this side
    fn toward(self) -> f32 {
        match self {
            Side::Near => -1.0,
            Side::Far => 1.0,
        }
    }
}

/// What happened during a single [`step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    pub wall_bounce: bool,
    pub paddle_hit: Option<Side>,
    pub scored: Option<SeatNumber>,
}

pub fn integrate(ball: &mut Ball, dt: f32) {
    ball.x += ball.velocity_x * dt;
    ball.y += ball.velocity_y * dt;
}

/// Clamps the ball into `[min_y, max_y]` and points its vertical velocity back
/// into the field. Returns true if the ball was outside the bounds.
pub fn bounce_vertical(ball: &mut Ball, min_y: f32, max_y: f32) -> bool {
    if ball.y < min_y {
        ball.y = min_y;
        ball.velocity_y = ball.velocity_y.abs();
        true
    } else if ball.y > max_y {
        ball.y = max_y;
        ball.velocity_y = -ball.velocity_y.abs();
        true
    } else {
        false
    }
}

/// Tests the ball against the paddle defending `side` and returns it on a hit.
///
/// The hit window extends from the paddle face to the back edge of the paddle,
/// widened by one tick of horizontal travel so a fast ball cannot tunnel through.
/// On a hit the ball is placed on the face, its horizontal speed becomes
/// `ball_speed * ball_acceleration` away from the paddle, and its vertical
/// speed is proportional to how far from the paddle centre it struck.
pub fn paddle_collision(ball: &mut Ball, paddle_y: f32, side: Side, config: &GameConfig) -> bool {
    let approaching = ball.velocity_x * side.toward() > 0.0;
    if !approaching {
        return false;
    }

    let reach = ball.velocity_x.abs();
    let (face, within) = match side {
        Side::Near => {
            let face = config.near_face_x();
            (face, ball.x <= face && ball.x >= config.paddle_offset - reach)
        }
        Side::Far => {
            let face = config.far_face_x();
            let back = config.field_width - config.paddle_offset;
            (face, ball.x >= face && ball.x <= back + reach)
        }
    };

    let half = config.paddle_half_height();
    if !within || (ball.y - paddle_y).abs() > half {
        return false;
    }

    let strike = ((ball.y - paddle_y) / half).clamp(-1.0, 1.0);
    ball.x = face;
    ball.velocity_x = -side.toward() * config.ball_speed * config.ball_acceleration;
    ball.velocity_y = strike * config.ball_speed;
    true
}

/// Returns the seat that scores if the ball has crossed a goal line
pub fn score_check(ball: &Ball, field_width: f32) -> Option<SeatNumber> {
    if ball.x < 0.0 {
        Some(SeatNumber::Two)
    } else if ball.x > field_width {
        Some(SeatNumber::One)
    } else {
        None
    }
}

/// Re-centres the ball and launches it toward `toward` at the base speed.
pub fn serve(ball: &mut Ball, toward: Side, downward: bool, config: &GameConfig) {
    *ball = Ball::centered(config);
    ball.velocity_x = toward.toward() * config.ball_speed;
    ball.velocity_y = if downward {
        config.ball_speed
    } else {
        -config.ball_speed
    };
}

/// Advances the ball by one tick against the current paddle positions.
pub fn step(ball: &mut Ball, near_paddle_y: f32, far_paddle_y: f32, config: &GameConfig) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    integrate(ball, TICK_STEP);
    outcome.wall_bounce = bounce_vertical(ball, 0.0, config.field_height);

    let bounced_velocity_y = ball.velocity_y;

    if paddle_collision(ball, near_paddle_y, Side::Near, config) {
        outcome.paddle_hit = Some(Side::Near);
    } else if paddle_collision(ball, far_paddle_y, Side::Far, config) {
        outcome.paddle_hit = Some(Side::Far);
    }

    // A wall bounce owns the vertical direction; the paddle only sets the speed
    if outcome.wall_bounce && outcome.paddle_hit.is_some() {
        ball.velocity_y = ball.velocity_y.abs().copysign(bounced_velocity_y);
    }

    if outcome.paddle_hit.is_none() {
        outcome.scored = score_check(ball, config.field_width);
    }

    outcome
}
