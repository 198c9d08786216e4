//! A single two-seat match: seats, paddles, ball, scores and lifecycle.
//!
//! Status transitions:
//!
//! ```text
//! Waiting --second seat fills--> Playing --win score reached--> Finished
//! Finished --rematch--> Playing
//! Playing | Finished --one occupant leaves--> Waiting --last leaves--> destroyed
//! ```
//!
//! The room keeps `Playing` if and only if both seats are occupied and it holds a
//! tick handle. Every mutation that breaks one side of that equivalence fixes the
//! other before returning, including cancelling the tick driver in the same call.
//!
//! Mutations queue [`RoomEvent`]s for the room's broadcast group; the gateway
//! drains them with [`Room::take_events`] after each operation.

use crate::error::RoomError;
use crate::scheduler::{TickHandle, TickScheduler};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use shared::physics::{self, Ball, Side, StepOutcome};
use shared::{ConnectionId, GameConfig, Packet, RoomId, Scores, SeatNumber, SeatSnapshot};
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Waiting,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seat {
    pub number: SeatNumber,
    pub paddle_y: f32,
}

/// Broadcast-worthy changes produced by room operations
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
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
}

impl From<RoomEvent> for Packet {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::PlayersUpdate { count } => Packet::PlayersUpdate { count },
            RoomEvent::StartGame { scores } => Packet::StartGame { scores },
            RoomEvent::GameState {
                ball,
                seats,
                scores,
            } => Packet::GameState {
                ball,
                seats,
                scores,
            },
            RoomEvent::GameOver {
                winner_seat,
                scores,
            } => Packet::GameOver {
                winner_seat,
                scores,
            },
            RoomEvent::Rematch => Packet::Rematch,
        }
    }
}

/// Result of releasing a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatRelease {
    NotSeated,
    Remaining(usize),
    /// The last occupant left; the registry should destroy the room
    Empty,
}

pub struct Room {
    id: RoomId,
    status: RoomStatus,
    seats: HashMap<ConnectionId, Seat>,
    ball: Ball,
    scores: Scores,
    tick_handle: Option<TickHandle>,
    config: GameConfig,
    max_paddle_step: Option<f32>,
    rng: StdRng,
    last_activity: Instant,
    events: Vec<RoomEvent>,
}

impl Room {
    pub fn new(id: RoomId, config: GameConfig, max_paddle_step: Option<f32>, rng: StdRng) -> Self {
        Self {
            id,
            status: RoomStatus::Waiting,
            seats: HashMap::new(),
            ball: Ball::centered(&config),
            scores: Scores::default(),
            tick_handle: None,
            config,
            max_paddle_step,
            rng,
            last_activity: Instant::now(),
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn occupancy(&self) -> usize {
        self.seats.len()
    }

    pub fn seat_of(&self, connection_id: ConnectionId) -> Option<SeatNumber> {
        self.seats.get(&connection_id).map(|seat| seat.number)
    }

    pub fn paddle_y(&self, connection_id: ConnectionId) -> Option<f32> {
        self.seats.get(&connection_id).map(|seat| seat.paddle_y)
    }

    pub fn occupants(&self) -> Vec<ConnectionId> {
        self.seats.keys().copied().collect()
    }

    /// Occupied seat numbers in ascending order
    pub fn seat_numbers(&self) -> Vec<SeatNumber> {
        let mut numbers: Vec<SeatNumber> = self.seats.values().map(|seat| seat.number).collect();
        numbers.sort();
        numbers
    }

    pub fn ball(&self) -> Ball {
        self.ball
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.tick_handle
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn take_events(&mut self) -> Vec<RoomEvent> {
        std::mem::take(&mut self.events)
    }

    /// Seats a connection in the lowest free seat, starting play when both are filled.
    ///
    /// A connection that already holds a seat gets it back unchanged.
    pub fn assign_seat(
        &mut self,
        connection_id: ConnectionId,
        scheduler: &mut dyn TickScheduler,
    ) -> Result<SeatNumber, RoomError> {
        if let Some(seat) = self.seats.get(&connection_id) {
            return Ok(seat.number);
        }
        if self.seats.len() >= 2 {
            return Err(RoomError::RoomFull(self.id));
        }

        let number = if self.seats.values().any(|seat| seat.number == SeatNumber::One) {
            SeatNumber::Two
        } else {
            SeatNumber::One
        };

        self.seats.insert(
            connection_id,
            Seat {
                number,
                paddle_y: self.config.center_y(),
            },
        );
        self.last_activity = Instant::now();
        info!("Connection {} took {} in {}", connection_id, number, self.id);

        self.events.push(RoomEvent::PlayersUpdate {
            count: self.seats.len(),
        });

        if self.seats.len() == 2 {
            self.start_playing(scheduler);
            self.events.push(RoomEvent::StartGame {
                scores: self.scores,
            });
        }

        Ok(number)
    }

    pub fn release_seat(
        &mut self,
        connection_id: ConnectionId,
        scheduler: &mut dyn TickScheduler,
    ) -> SeatRelease {
        let Some(seat) = self.seats.remove(&connection_id) else {
            return SeatRelease::NotSeated;
        };

        info!("Connection {} left {} of {}", connection_id, seat.number, self.id);
        self.last_activity = Instant::now();
        self.stop_ticking(scheduler);
        self.status = RoomStatus::Waiting;

        if self.seats.is_empty() {
            return SeatRelease::Empty;
        }

        let count = self.seats.len();
        self.events.push(RoomEvent::PlayersUpdate { count });
        SeatRelease::Remaining(count)
    }

    /// Stores a client-reported paddle centre, clamped to the field.
    ///
    /// With `max_paddle_step` configured the change is also limited relative to
    /// the previously stored position. Returns the stored value.
    pub fn set_paddle(&mut self, connection_id: ConnectionId, y: f32) -> Result<f32, RoomError> {
        let config = self.config;
        let max_step = self.max_paddle_step;
        let room_id = self.id;

        let seat = self
            .seats
            .get_mut(&connection_id)
            .ok_or(RoomError::UnseatedConnection {
                connection_id,
                room_id,
            })?;

        let mut target = if y.is_finite() { y } else { seat.paddle_y };
        if let Some(step) = max_step {
            target = target.clamp(seat.paddle_y - step, seat.paddle_y + step);
        }

        seat.paddle_y = config.clamp_paddle_y(target);
        Ok(seat.paddle_y)
    }

    /// Advances the match by one tick. Does nothing unless the room is playing.
    pub fn tick(&mut self, scheduler: &mut dyn TickScheduler) -> Option<StepOutcome> {
        if self.status != RoomStatus::Playing {
            return None;
        }

        let near_y = self.paddle_for(SeatNumber::One);
        let far_y = self.paddle_for(SeatNumber::Two);
        let outcome = physics::step(&mut self.ball, near_y, far_y, &self.config);

        if let Some(scorer) = outcome.scored {
            let total = self.scores.increment(scorer);
            debug!(
                "{} scored in {} ({}-{})",
                scorer, self.id, self.scores.seat1, self.scores.seat2
            );

            if total >= self.config.win_score {
                self.finish(scorer, scheduler);
                return Some(outcome);
            }

            let downward = self.rng.gen_bool(0.5);
            physics::serve(
                &mut self.ball,
                Side::of(scorer.opponent()),
                downward,
                &self.config,
            );
        }

        let snapshot = self.snapshot();
        self.events.push(snapshot);
        Some(outcome)
    }

    /// Restarts the match from zero. Requires both seats to be occupied.
    pub fn request_rematch(&mut self, scheduler: &mut dyn TickScheduler) -> Result<(), RoomError> {
        if self.seats.len() < 2 {
            return Err(RoomError::NotEnoughPlayers(self.id));
        }

        info!("Rematch in {}", self.id);
        self.start_playing(scheduler);
        self.events.push(RoomEvent::Rematch);
        Ok(())
    }

    /// Cancels any tick driver ahead of the room being dropped
    pub fn shutdown(&mut self, scheduler: &mut dyn TickScheduler) {
        self.stop_ticking(scheduler);
        self.status = RoomStatus::Waiting;
    }

    /// Regular per-tick snapshot with the ball position rounded for the wire
    pub fn snapshot(&self) -> RoomEvent {
        let seats = self
            .seats
            .iter()
            .map(|(id, seat)| {
                (
                    *id,
                    SeatSnapshot {
                        seat_number: seat.number,
                        y: seat.paddle_y,
                    },
                )
            })
            .collect();

        RoomEvent::GameState {
            ball: Ball {
                x: self.ball.x.round(),
                y: self.ball.y.round(),
                ..self.ball
            },
            seats,
            scores: self.scores,
        }
    }

    fn paddle_for(&self, number: SeatNumber) -> f32 {
        self.seats
            .values()
            .find(|seat| seat.number == number)
            .map(|seat| seat.paddle_y)
            .unwrap_or_else(|| self.config.center_y())
    }

    fn start_playing(&mut self, scheduler: &mut dyn TickScheduler) {
        self.scores = Scores::default();

        let toward = if self.rng.gen_bool(0.5) {
            Side::Near
        } else {
            Side::Far
        };
        let downward = self.rng.gen_bool(0.5);
        physics::serve(&mut self.ball, toward, downward, &self.config);

        self.status = RoomStatus::Playing;
        if self.tick_handle.is_none() {
            self.tick_handle = Some(scheduler.start(self.id));
        }
        info!("{} is playing", self.id);
    }

    fn finish(&mut self, winner: SeatNumber, scheduler: &mut dyn TickScheduler) {
        self.status = RoomStatus::Finished;
        self.stop_ticking(scheduler);
        self.ball = Ball::centered(&self.config);

        info!(
            "{} won {} ({}-{})",
            winner, self.id, self.scores.seat1, self.scores.seat2
        );
        self.events.push(RoomEvent::GameOver {
            winner_seat: winner,
            scores: self.scores,
        });
    }

    fn stop_ticking(&mut self, scheduler: &mut dyn TickScheduler) {
        if let Some(handle) = self.tick_handle.take() {
            scheduler.stop(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;

    fn test_room() -> Room {
        Room::new(
            RoomId(1),
            GameConfig::default(),
            None,
            StdRng::seed_from_u64(7),
        )
    }

    fn playing_room(scheduler: &mut ManualScheduler) -> Room {
        let mut room = test_room();
        room.assign_seat(10, scheduler).unwrap();
        room.assign_seat(20, scheduler).unwrap();
        room.take_events();
        room
    }

    /// Playing <=> two seats <=> live tick handle
    fn assert_consistent(room: &Room, scheduler: &ManualScheduler) {
        let playing = room.status() == RoomStatus::Playing;
        assert_eq!(playing, room.occupancy() == 2 && room.tick_handle().is_some());
        assert_eq!(room.tick_handle().is_some(), playing);
        assert_eq!(scheduler.is_running(room.id()), playing);
    }

    #[test]
    fn test_first_seat_waits() {
        let mut scheduler = ManualScheduler::new();
        let mut room = test_room();

        assert_eq!(room.assign_seat(10, &mut scheduler), Ok(SeatNumber::One));
        assert_eq!(room.status(), RoomStatus::Waiting);
        assert_eq!(room.paddle_y(10), Some(300.0));
        assert_eq!(room.take_events(), vec![RoomEvent::PlayersUpdate { count: 1 }]);
        assert_consistent(&room, &scheduler);
    }

    #[test]
    fn test_second_seat_starts_play() {
        let mut scheduler = ManualScheduler::new();
        let mut room = test_room();
        room.assign_seat(10, &mut scheduler).unwrap();
        room.take_events();

        assert_eq!(room.assign_seat(20, &mut scheduler), Ok(SeatNumber::Two));
        assert_eq!(room.status(), RoomStatus::Playing);
        assert_consistent(&room, &scheduler);

        let ball = room.ball();
        assert_eq!(ball.x, 400.0);
        assert_eq!(ball.y, 300.0);
        assert_eq!(ball.velocity_x.abs(), 5.0);
        assert_eq!(ball.velocity_y.abs(), 5.0);

        assert_eq!(
            room.take_events(),
            vec![
                RoomEvent::PlayersUpdate { count: 2 },
                RoomEvent::StartGame {
                    scores: Scores::default()
                },
            ]
        );
    }

    #[test]
    fn test_third_seat_is_rejected() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);

        assert_eq!(
            room.assign_seat(30, &mut scheduler),
            Err(RoomError::RoomFull(RoomId(1)))
        );
        assert_eq!(room.occupancy(), 2);
    }

    #[test]
    fn test_reassign_returns_existing_seat() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);

        assert_eq!(room.assign_seat(20, &mut scheduler), Ok(SeatNumber::Two));
        assert!(room.take_events().is_empty());
        assert_eq!(scheduler.started(), 1);
    }

    #[test]
    fn test_freed_seat_one_is_reused() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);

        room.release_seat(10, &mut scheduler);
        assert_eq!(room.assign_seat(30, &mut scheduler), Ok(SeatNumber::One));
        assert_eq!(room.seat_numbers(), vec![SeatNumber::One, SeatNumber::Two]);
    }

    #[test]
    fn test_release_one_of_two_reverts_to_waiting() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);

        assert_eq!(room.release_seat(10, &mut scheduler), SeatRelease::Remaining(1));
        assert_eq!(room.status(), RoomStatus::Waiting);
        assert_consistent(&room, &scheduler);
        assert_eq!(room.take_events(), vec![RoomEvent::PlayersUpdate { count: 1 }]);
    }

    #[test]
    fn test_release_from_finished_reverts_to_waiting() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);
        room.scores = Scores {
            seat1: room.config.win_score - 1,
            seat2: 0,
        };
        room.ball = Ball {
            x: 798.0,
            y: 100.0,
            velocity_x: 5.0,
            velocity_y: 0.0,
        };
        room.tick(&mut scheduler);
        assert_eq!(room.status(), RoomStatus::Finished);

        room.release_seat(20, &mut scheduler);
        assert_eq!(room.status(), RoomStatus::Waiting);
        assert_consistent(&room, &scheduler);
    }

    #[test]
    fn test_release_last_seat_empties_room() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);

        room.release_seat(10, &mut scheduler);
        assert_eq!(room.release_seat(20, &mut scheduler), SeatRelease::Empty);
        assert_eq!(room.occupancy(), 0);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_release_unknown_connection() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);

        assert_eq!(room.release_seat(99, &mut scheduler), SeatRelease::NotSeated);
        assert_eq!(room.status(), RoomStatus::Playing);
    }

    #[test]
    fn test_set_paddle_clamps_to_field() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);

        assert_eq!(room.set_paddle(10, -100.0), Ok(50.0));
        assert_eq!(room.set_paddle(10, 9000.0), Ok(550.0));
        assert_eq!(room.set_paddle(20, 123.0), Ok(123.0));
        assert_eq!(room.set_paddle(20, f32::NAN), Ok(123.0));
    }

    #[test]
    fn test_set_paddle_unseated() {
        let mut room = test_room();
        assert_eq!(
            room.set_paddle(5, 200.0),
            Err(RoomError::UnseatedConnection {
                connection_id: 5,
                room_id: RoomId(1)
            })
        );
    }

    #[test]
    fn test_set_paddle_with_step_limit() {
        let mut scheduler = ManualScheduler::new();
        let mut room = Room::new(
            RoomId(1),
            GameConfig::default(),
            Some(20.0),
            StdRng::seed_from_u64(1),
        );
        room.assign_seat(10, &mut scheduler).unwrap();

        assert_eq!(room.set_paddle(10, 50.0), Ok(280.0));
        assert_eq!(room.set_paddle(10, 290.0), Ok(290.0));
    }

    #[test]
    fn test_tick_ignored_while_waiting() {
        let mut scheduler = ManualScheduler::new();
        let mut room = test_room();
        room.assign_seat(10, &mut scheduler).unwrap();
        let before = room.ball();

        assert!(room.tick(&mut scheduler).is_none());
        assert_eq!(room.ball(), before);
    }

    #[test]
    fn test_tick_emits_rounded_snapshot() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);
        room.ball = Ball {
            x: 400.4,
            y: 300.6,
            velocity_x: 1.0,
            velocity_y: 1.0,
        };

        room.tick(&mut scheduler);
        let events = room.take_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RoomEvent::GameState { ball, seats, scores } => {
                assert_eq!(ball.x, 401.0);
                assert_eq!(ball.y, 302.0);
                assert_eq!(ball.velocity_x, 1.0);
                assert_eq!(seats.len(), 2);
                assert_eq!(seats[&10].seat_number, SeatNumber::One);
                assert_eq!(seats[&20].seat_number, SeatNumber::Two);
                assert_eq!(*scores, Scores::default());
            }
            other => panic!("Unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_ball_stays_inside_vertical_bounds() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);
        let height = room.config.field_height;

        for _ in 0..5_000 {
            room.tick(&mut scheduler);
            if room.status() != RoomStatus::Playing {
                break;
            }
            let ball = room.ball();
            assert!(ball.y >= 0.0 && ball.y <= height);
        }
    }

    #[test]
    fn test_goal_at_near_end_scores_for_seat_two() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);
        room.set_paddle(10, 550.0).unwrap();
        room.ball = Ball {
            x: 2.0,
            y: 100.0,
            velocity_x: -5.0,
            velocity_y: 0.0,
        };

        room.tick(&mut scheduler);
        assert_eq!(room.scores(), Scores { seat1: 0, seat2: 1 });

        let ball = room.ball();
        assert_eq!(ball.x, 400.0);
        assert_eq!(ball.y, 300.0);
        assert!(ball.velocity_x < 0.0, "serve goes toward the conceding seat");
        assert_eq!(room.status(), RoomStatus::Playing);
    }

    #[test]
    fn test_goal_at_far_end_scores_for_seat_one() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);
        room.set_paddle(20, 550.0).unwrap();
        room.ball = Ball {
            x: 798.0,
            y: 100.0,
            velocity_x: 5.0,
            velocity_y: 0.0,
        };

        room.tick(&mut scheduler);
        assert_eq!(room.scores(), Scores { seat1: 1, seat2: 0 });
        assert!(room.ball().velocity_x > 0.0);
    }

    #[test]
    fn test_reaching_win_score_finishes() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);
        let win = room.config.win_score;
        room.scores = Scores {
            seat1: win - 1,
            seat2: 0,
        };
        room.set_paddle(20, 550.0).unwrap();
        room.ball = Ball {
            x: 798.0,
            y: 100.0,
            velocity_x: 5.0,
            velocity_y: 0.0,
        };

        room.tick(&mut scheduler);
        assert_eq!(room.status(), RoomStatus::Finished);
        assert!(room.tick_handle().is_none());
        assert_consistent(&room, &scheduler);
        assert_eq!(
            room.take_events(),
            vec![RoomEvent::GameOver {
                winner_seat: SeatNumber::One,
                scores: Scores {
                    seat1: win,
                    seat2: 0
                },
            }]
        );

        assert!(room.tick(&mut scheduler).is_none());
        assert!(room.take_events().is_empty());
    }

    #[test]
    fn test_center_paddle_hit_returns_straight_and_faster() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);
        room.set_paddle(10, 300.0).unwrap();
        room.ball = Ball {
            x: 34.0,
            y: 300.0,
            velocity_x: -5.0,
            velocity_y: 0.0,
        };

        let outcome = room.tick(&mut scheduler).unwrap();
        assert_eq!(outcome.paddle_hit, Some(Side::Near));

        let ball = room.ball();
        let config = room.config;
        assert_approx_eq!(ball.velocity_y, 0.0, 1e-6);
        assert_approx_eq!(
            ball.velocity_x,
            config.ball_speed * config.ball_acceleration,
            1e-6
        );
    }

    #[test]
    fn test_rematch_requires_two_players() {
        let mut scheduler = ManualScheduler::new();
        let mut room = test_room();
        room.assign_seat(10, &mut scheduler).unwrap();

        assert_eq!(
            room.request_rematch(&mut scheduler),
            Err(RoomError::NotEnoughPlayers(RoomId(1)))
        );
        assert_eq!(room.status(), RoomStatus::Waiting);
        assert_consistent(&room, &scheduler);
    }

    #[test]
    fn test_rematch_after_finish_resets() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);
        room.scores = Scores {
            seat1: 0,
            seat2: room.config.win_score - 1,
        };
        room.set_paddle(10, 550.0).unwrap();
        room.ball = Ball {
            x: 1.0,
            y: 100.0,
            velocity_x: -5.0,
            velocity_y: 0.0,
        };
        room.tick(&mut scheduler);
        assert_eq!(room.status(), RoomStatus::Finished);
        room.take_events();

        room.request_rematch(&mut scheduler).unwrap();
        assert_eq!(room.status(), RoomStatus::Playing);
        assert_eq!(room.scores(), Scores::default());
        assert_eq!(room.take_events(), vec![RoomEvent::Rematch]);
        assert_consistent(&room, &scheduler);
        assert_eq!(scheduler.started(), 2);
    }

    #[test]
    fn test_rematch_while_playing_keeps_driver() {
        let mut scheduler = ManualScheduler::new();
        let mut room = playing_room(&mut scheduler);
        let handle = room.tick_handle();

        room.request_rematch(&mut scheduler).unwrap();
        assert_eq!(room.tick_handle(), handle);
        assert_eq!(scheduler.started(), 1);
    }

    #[test]
    fn test_seeded_rooms_are_deterministic() {
        let mut scheduler_a = ManualScheduler::new();
        let mut scheduler_b = ManualScheduler::new();
        let mut a = playing_room(&mut scheduler_a);
        let mut b = playing_room(&mut scheduler_b);

        for _ in 0..500 {
            a.tick(&mut scheduler_a);
            b.tick(&mut scheduler_b);
            assert_eq!(a.ball(), b.ball());
        }
    }

    #[test]
    fn test_room_event_into_packet() {
        let packet: Packet = RoomEvent::PlayersUpdate { count: 2 }.into();
        assert_eq!(packet, Packet::PlayersUpdate { count: 2 });

        let packet: Packet = RoomEvent::Rematch.into();
        assert_eq!(packet, Packet::Rematch);
    }
}
