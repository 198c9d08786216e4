//! Translates client intents into room operations and room events into packets.
//!
//! The gateway owns the room registry, the tick scheduler and the transport. It
//! must be driven from a single execution context (the server event loop): each
//! method runs one intent to completion, including broadcasting what it caused
//! and cancelling tick drivers of rooms it finished or destroyed.

use crate::error::RoomError;
use crate::matchmaker::{self, Placement};
use crate::registry::RoomRegistry;
use crate::room::SeatRelease;
use crate::scheduler::{TickHandle, TickScheduler};
use crate::transport::Transport;
use log::{debug, info};
use shared::{ConnectionId, Packet, RoomId};
use std::time::{Duration, Instant};

pub struct SessionGateway<T: Transport, S: TickScheduler> {
    registry: RoomRegistry,
    scheduler: S,
    transport: T,
    waiting_timeout: Option<Duration>,
}

impl<T: Transport, S: TickScheduler> SessionGateway<T, S> {
    pub fn new(
        registry: RoomRegistry,
        scheduler: S,
        transport: T,
        waiting_timeout: Option<Duration>,
    ) -> Self {
        Self {
            registry,
            scheduler,
            transport,
            waiting_timeout,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn join_queue(&mut self, connection_id: ConnectionId) -> Result<Placement, RoomError> {
        let placement =
            matchmaker::join_queue(&mut self.registry, &mut self.scheduler, connection_id)?;

        self.transport.join_group(connection_id, placement.room_id);
        self.transport.send(
            connection_id,
            Packet::Joined {
                room_id: placement.room_id,
                seat: placement.seat,
            },
        );
        self.flush(placement.room_id);
        Ok(placement)
    }

    pub fn paddle_move(
        &mut self,
        connection_id: ConnectionId,
        room_id: RoomId,
        y: f32,
    ) -> Result<(), RoomError> {
        let room = self
            .registry
            .get_mut(room_id)
            .ok_or(RoomError::UnknownRoom(room_id))?;
        room.set_paddle(connection_id, y)?;
        Ok(())
    }

    pub fn request_rematch(
        &mut self,
        connection_id: ConnectionId,
        room_id: RoomId,
    ) -> Result<(), RoomError> {
        let room = self
            .registry
            .get_mut(room_id)
            .ok_or(RoomError::UnknownRoom(room_id))?;
        if room.seat_of(connection_id).is_none() {
            return Err(RoomError::UnseatedConnection {
                connection_id,
                room_id,
            });
        }

        room.request_rematch(&mut self.scheduler)?;
        self.flush(room_id);
        Ok(())
    }

    pub fn leave_room(
        &mut self,
        connection_id: ConnectionId,
        room_id: RoomId,
    ) -> Result<SeatRelease, RoomError> {
        let room = self
            .registry
            .get_mut(room_id)
            .ok_or(RoomError::UnknownRoom(room_id))?;

        let release = room.release_seat(connection_id, &mut self.scheduler);
        match release {
            SeatRelease::NotSeated => {
                return Err(RoomError::UnseatedConnection {
                    connection_id,
                    room_id,
                });
            }
            SeatRelease::Empty => {
                self.transport.leave_group(connection_id, room_id);
                self.registry.destroy(room_id, &mut self.scheduler);
            }
            SeatRelease::Remaining(_) => {
                self.transport.leave_group(connection_id, room_id);
                self.flush(room_id);
            }
        }
        Ok(release)
    }

    /// Releases the connection's seat in every room it occupies
    pub fn disconnect(&mut self, connection_id: ConnectionId) {
        for room_id in self.registry.rooms_with(connection_id) {
            if let Err(e) = self.leave_room(connection_id, room_id) {
                debug!("Disconnect of {} from {}: {}", connection_id, room_id, e);
            }
        }
    }

    /// Runs one tick for the handle's room. Returns false for stale handles.
    pub fn tick(&mut self, handle: TickHandle) -> bool {
        let Some(room) = self.registry.get_mut(handle.room_id) else {
            debug!("Dropping tick for missing {}", handle.room_id);
            return false;
        };
        if room.tick_handle() != Some(handle) {
            debug!(
                "Dropping stale tick {} for {}",
                handle.generation, handle.room_id
            );
            return false;
        }

        room.tick(&mut self.scheduler);
        self.flush(handle.room_id);
        true
    }

    /// Destroys waiting rooms idle for longer than the configured timeout.
    pub fn expire_idle_rooms(&mut self, now: Instant) -> Vec<RoomId> {
        let Some(timeout) = self.waiting_timeout else {
            return Vec::new();
        };

        let expired = self.registry.idle_waiting_rooms(now, timeout);
        for room_id in &expired {
            let occupants = self
                .registry
                .get(*room_id)
                .map(|room| room.occupants())
                .unwrap_or_default();

            for connection_id in occupants {
                self.transport
                    .send(connection_id, Packet::RoomClosed { room_id: *room_id });
                self.transport.leave_group(connection_id, *room_id);
            }

            info!("{} expired waiting for an opponent", room_id);
            self.registry.destroy(*room_id, &mut self.scheduler);
        }
        expired
    }

    fn flush(&mut self, room_id: RoomId) {
        let Some(room) = self.registry.get_mut(room_id) else {
            return;
        };
        for event in room.take_events() {
            self.transport.broadcast(room_id, event.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::room::RoomStatus;
    use crate::scheduler::ManualScheduler;
    use crate::transport::MemoryTransport;
    use shared::{Scores, SeatNumber};

    type TestGateway = SessionGateway<MemoryTransport, ManualScheduler>;

    fn gateway() -> TestGateway {
        let config = ServerConfig::default();
        SessionGateway::new(
            RoomRegistry::with_seed(&config, 3),
            ManualScheduler::new(),
            MemoryTransport::new(),
            config.waiting_timeout,
        )
    }

    #[test]
    fn test_join_emits_joined_and_players_update() {
        let mut gateway = gateway();
        let placement = gateway.join_queue(1).unwrap();

        assert_eq!(
            gateway.transport_mut().take(),
            vec![
                (
                    1,
                    Packet::Joined {
                        room_id: placement.room_id,
                        seat: SeatNumber::One
                    }
                ),
                (1, Packet::PlayersUpdate { count: 1 }),
            ]
        );
    }

    #[test]
    fn test_second_join_starts_game_for_both() {
        let mut gateway = gateway();
        gateway.join_queue(1).unwrap();
        gateway.transport_mut().take();
        gateway.join_queue(2).unwrap();

        for connection_id in [1, 2] {
            let received = gateway.transport().received_by(connection_id);
            assert!(received.contains(&Packet::PlayersUpdate { count: 2 }));
            assert!(received.contains(&Packet::StartGame {
                scores: Scores::default()
            }));
        }
    }

    #[test]
    fn test_paddle_move_errors() {
        let mut gateway = gateway();
        let placement = gateway.join_queue(1).unwrap();

        assert_eq!(
            gateway.paddle_move(1, RoomId(999), 100.0),
            Err(RoomError::UnknownRoom(RoomId(999)))
        );
        assert!(matches!(
            gateway.paddle_move(2, placement.room_id, 100.0),
            Err(RoomError::UnseatedConnection { .. })
        ));
        assert_eq!(gateway.paddle_move(1, placement.room_id, 100.0), Ok(()));
        assert_eq!(
            gateway
                .registry()
                .get(placement.room_id)
                .unwrap()
                .paddle_y(1),
            Some(100.0)
        );
    }

    #[test]
    fn test_tick_broadcasts_to_both_seats() {
        let mut gateway = gateway();
        let placement = gateway.join_queue(1).unwrap();
        gateway.join_queue(2).unwrap();
        gateway.transport_mut().take();

        let handle = gateway.scheduler().handle_for(placement.room_id).unwrap();
        assert!(gateway.tick(handle));

        let delivered = gateway.transport_mut().take();
        assert_eq!(delivered.len(), 2);
        assert!(delivered
            .iter()
            .all(|(_, packet)| matches!(packet, Packet::GameState { .. })));
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        let mut gateway = gateway();
        let placement = gateway.join_queue(1).unwrap();
        gateway.join_queue(2).unwrap();
        let handle = gateway.scheduler().handle_for(placement.room_id).unwrap();

        gateway.leave_room(2, placement.room_id).unwrap();
        gateway.transport_mut().take();

        assert!(!gateway.tick(handle));
        assert!(gateway.transport_mut().take().is_empty());
    }

    #[test]
    fn test_leave_last_seat_destroys_room() {
        let mut gateway = gateway();
        let placement = gateway.join_queue(1).unwrap();

        assert_eq!(
            gateway.leave_room(1, placement.room_id),
            Ok(SeatRelease::Empty)
        );
        assert!(gateway.registry().is_empty());
        assert!(gateway.transport().groups().is_empty());
        assert_eq!(
            gateway.leave_room(1, placement.room_id),
            Err(RoomError::UnknownRoom(placement.room_id))
        );
    }

    #[test]
    fn test_leave_notifies_remaining_player() {
        let mut gateway = gateway();
        let placement = gateway.join_queue(1).unwrap();
        gateway.join_queue(2).unwrap();
        gateway.transport_mut().take();

        gateway.leave_room(1, placement.room_id).unwrap();
        assert_eq!(
            gateway.transport_mut().take(),
            vec![(2, Packet::PlayersUpdate { count: 1 })]
        );
        assert_eq!(
            gateway.registry().get(placement.room_id).unwrap().status(),
            RoomStatus::Waiting
        );
    }

    #[test]
    fn test_rematch_from_unseated_connection_is_rejected() {
        let mut gateway = gateway();
        let placement = gateway.join_queue(1).unwrap();
        gateway.join_queue(2).unwrap();

        assert!(matches!(
            gateway.request_rematch(3, placement.room_id),
            Err(RoomError::UnseatedConnection { .. })
        ));
        gateway.transport_mut().take();

        gateway.request_rematch(1, placement.room_id).unwrap();
        assert_eq!(gateway.transport().received_by(2), vec![Packet::Rematch]);
    }

    #[test]
    fn test_disconnect_releases_seat() {
        let mut gateway = gateway();
        let placement = gateway.join_queue(1).unwrap();
        gateway.join_queue(2).unwrap();

        gateway.disconnect(2);
        let room = gateway.registry().get(placement.room_id).unwrap();
        assert_eq!(room.occupancy(), 1);
        assert!(gateway.scheduler().is_empty());

        gateway.disconnect(1);
        assert!(gateway.registry().is_empty());
    }

    #[test]
    fn test_idle_waiting_room_expires() {
        let mut gateway = gateway();
        let placement = gateway.join_queue(1).unwrap();
        gateway.transport_mut().take();

        assert!(gateway.expire_idle_rooms(Instant::now()).is_empty());

        let later = Instant::now() + Duration::from_secs(3600);
        assert_eq!(gateway.expire_idle_rooms(later), vec![placement.room_id]);
        assert!(gateway.registry().is_empty());
        assert_eq!(
            gateway.transport_mut().take(),
            vec![(
                1,
                Packet::RoomClosed {
                    room_id: placement.room_id
                }
            )]
        );
    }

    #[test]
    fn test_expiry_disabled_without_timeout() {
        let config = ServerConfig::default();
        let mut gateway = SessionGateway::new(
            RoomRegistry::with_seed(&config, 3),
            ManualScheduler::new(),
            MemoryTransport::new(),
            None,
        );
        gateway.join_queue(1).unwrap();

        let later = Instant::now() + Duration::from_secs(3600);
        assert!(gateway.expire_idle_rooms(later).is_empty());
        assert_eq!(gateway.registry().len(), 1);
    }
}
