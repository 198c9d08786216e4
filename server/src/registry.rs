//! Process-wide set of live rooms.
//!
//! The registry is owned by the session gateway, which in turn is owned by the
//! server event loop, so every access is serialised through `&mut self`. Rooms
//! are kept in id order: searches that could match several rooms always pick the
//! lowest id.

use crate::config::ServerConfig;
use crate::room::{Room, RoomStatus};
use crate::scheduler::TickScheduler;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{ConnectionId, GameConfig, RoomId, SeatNumber};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

pub struct RoomRegistry {
    rooms: BTreeMap<RoomId, Room>,
    next_room_id: u32,
    game: GameConfig,
    max_paddle_step: Option<f32>,
    /// Seeds each new room's serve RNG
    rng: StdRng,
}

impl RoomRegistry {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Registry whose rooms serve in a reproducible order
    pub fn with_seed(config: &ServerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &ServerConfig, rng: StdRng) -> Self {
        Self {
            rooms: BTreeMap::new(),
            next_room_id: 1,
            game: config.game,
            max_paddle_step: config.max_paddle_step,
            rng,
        }
    }

    pub fn create_room(&mut self) -> RoomId {
        let id = RoomId(self.next_room_id);
        self.next_room_id += 1;

        let rng = StdRng::seed_from_u64(self.rng.gen());
        self.rooms
            .insert(id, Room::new(id, self.game, self.max_paddle_step, rng));
        info!("Created {}", id);
        id
    }

    /// Removes the room and cancels its tick driver
    pub fn destroy(&mut self, room_id: RoomId, scheduler: &mut dyn TickScheduler) -> Option<Room> {
        let mut room = self.rooms.remove(&room_id)?;
        room.shutdown(scheduler);
        info!("Destroyed {}", room_id);
        Some(room)
    }

    pub fn get(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    pub fn get_mut(&mut self, room_id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&room_id)
    }

    pub fn contains(&self, room_id: RoomId) -> bool {
        self.rooms.contains_key(&room_id)
    }

    /// Lowest-id room that is waiting with exactly one occupant
    pub fn find_waiting_room(&self) -> Option<RoomId> {
        self.rooms
            .values()
            .find(|room| room.status() == RoomStatus::Waiting && room.occupancy() == 1)
            .map(Room::id)
    }

    /// First room (by id) in which the connection holds a seat
    pub fn seat_of(&self, connection_id: ConnectionId) -> Option<(RoomId, SeatNumber)> {
        self.rooms
            .values()
            .find_map(|room| room.seat_of(connection_id).map(|seat| (room.id(), seat)))
    }

    /// Every room in which the connection holds a seat
    pub fn rooms_with(&self, connection_id: ConnectionId) -> Vec<RoomId> {
        self.rooms
            .values()
            .filter(|room| room.seat_of(connection_id).is_some())
            .map(Room::id)
            .collect()
    }

    /// Waiting rooms whose last seat change is at least `timeout` before `now`
    pub fn idle_waiting_rooms(&self, now: Instant, timeout: Duration) -> Vec<RoomId> {
        self.rooms
            .values()
            .filter(|room| room.status() == RoomStatus::Waiting)
            .filter(|room| now.saturating_duration_since(room.last_activity()) >= timeout)
            .map(Room::id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
