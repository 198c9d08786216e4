//! Playfield dimensions and tuning shared by the server and any client.
//!
//! Clients that predict ball motion must run with exactly these values, which
//! is why the server ships its `GameConfig` in the `Connected` packet.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
pub const PADDLE_WIDTH: f32 = 10.0;
/// Distance from the goal line to the back edge of each paddle
pub const PADDLE_OFFSET: f32 = 20.0;
/// Client-side paddle movement per frame, never used by the simulation
pub const PADDLE_SPEED: f32 = 8.0;
/// Ball speed in field units per tick
pub const BALL_SPEED: f32 = 5.0;
pub const BALL_ACCELERATION: f32 = 1.05;
pub const WIN_SCORE: u32 = 5;
pub const TICK_RATE: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_height: f32,
    pub paddle_width: f32,
    pub paddle_offset: f32,
    pub paddle_speed: f32,
    pub ball_speed: f32,
    /// Multiplier (> 1) applied to `ball_speed` on every paddle return
    pub ball_acceleration: f32,
    pub win_score: u32,
    pub tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_height: PADDLE_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_offset: PADDLE_OFFSET,
            paddle_speed: PADDLE_SPEED,
            ball_speed: BALL_SPEED,
            ball_acceleration: BALL_ACCELERATION,
            win_score: WIN_SCORE,
            tick_rate: TICK_RATE,
        }
    }
}

impl GameConfig {
    pub fn paddle_half_height(&self) -> f32 {
        self.paddle_height / 2.0
    }

    /// Clamps a paddle centre so the whole paddle stays on the field
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let half = self.paddle_half_height();
        y.clamp(half, self.field_height - half)
    }

    pub fn center_y(&self) -> f32 {
        self.field_height / 2.0
    }

    /// X coordinate of the seat-1 paddle face, the edge the ball bounces off
    pub fn near_face_x(&self) -> f32 {
        self.paddle_offset + self.paddle_width
    }

    /// X coordinate of the seat-2 paddle face
    pub fn far_face_x(&self) -> f32 {
        self.field_width - self.paddle_offset - self.paddle_width
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }
}
