//! Wire protocol, identifiers and simulation kernel shared by server and clients.

pub mod config;
pub mod physics;

pub use config::GameConfig;
pub use physics::Ball;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Only clients speaking this version are accepted
pub const PROTOCOL_VERSION: u32 = 1;

/// Server-assigned identifier of a connected client
pub type ConnectionId = u32;

/// Opaque room identifier. Ordered so room searches are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeatNumber {
    One,
    Two,
}

impl SeatNumber {
    pub fn number(self) -> u8 {
        match self {
            SeatNumber::One => 1,
            SeatNumber::Two => 2,
        }
    }

    pub fn opponent(self) -> SeatNumber {
        match self {
            SeatNumber::One => SeatNumber::Two,
            SeatNumber::Two => SeatNumber::One,
        }
    }
}

impl fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub seat1: u32,
    pub seat2: u32,
}

impl Scores {
    pub fn get(&self, seat: SeatNumber) -> u32 {
        match seat {
            SeatNumber::One => self.seat1,
            SeatNumber::Two => self.seat2,
        }
    }

    /// Adds one point and returns the new total for that seat
    pub fn increment(&mut self, seat: SeatNumber) -> u32 {
        let score = match seat {
            SeatNumber::One => &mut self.seat1,
            SeatNumber::Two => &mut self.seat2,
        };
        *score += 1;
        *score
    }
}

/// Per-seat entry of a `GameState` snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub seat_number: SeatNumber,
    pub y: f32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Packet {
    // Client -> server
    Connect {
        client_version: u32,
    },
    Heartbeat,
    JoinQueue,
    PaddleMove {
        room_id: RoomId,
        y: f32,
    },
    RequestRematch {
        room_id: RoomId,
    },
    LeaveRoom {
        room_id: RoomId,
    },
    Disconnect,

    // Server -> client
    Connected {
        connection_id: ConnectionId,
        config: GameConfig,
    },
    Disconnected {
        reason: String,
    },
    Joined {
        room_id: RoomId,
        seat: SeatNumber,
    },
    PlayersUpdate {
        count: usize,
    },
    StartGame {
        scores: Scores,
    },
    GameState {
        ball: Ball,
        seats: HashMap<ConnectionId, SeatSnapshot>,
        scores: Scores,
    },
    GameOver {
        winner_seat: SeatNumber,
        scores: Scores,
    },
    Rematch,
    RoomClosed {
        room_id: RoomId,
    },
}
