//! Places connections into rooms.

use crate::error::RoomError;
use crate::registry::RoomRegistry;
use crate::scheduler::TickScheduler;
use log::warn;
use shared::{ConnectionId, RoomId, SeatNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub room_id: RoomId,
    pub seat: SeatNumber,
}

/// Returns the lowest-id room waiting for an opponent, creating one if none is.
pub fn find_or_create_room(registry: &mut RoomRegistry) -> RoomId {
    match registry.find_waiting_room() {
        Some(room_id) => room_id,
        None => registry.create_room(),
    }
}

/// Seats the connection, or returns its existing seat if it already has one.
pub fn join_queue(
    registry: &mut RoomRegistry,
    scheduler: &mut dyn TickScheduler,
    connection_id: ConnectionId,
) -> Result<Placement, RoomError> {
    if let Some((room_id, seat)) = registry.seat_of(connection_id) {
        return Ok(Placement { room_id, seat });
    }

    let room_id = find_or_create_room(registry);
    match assign(registry, scheduler, room_id, connection_id) {
        Err(RoomError::RoomFull(full)) => {
            warn!("{} filled up during matchmaking, retrying", full);
            let fresh = registry.create_room();
            assign(registry, scheduler, fresh, connection_id)
        }
        result => result,
    }
}

fn assign(
    registry: &mut RoomRegistry,
    scheduler: &mut dyn TickScheduler,
    room_id: RoomId,
    connection_id: ConnectionId,
) -> Result<Placement, RoomError> {
    let room = registry
        .get_mut(room_id)
        .ok_or(RoomError::UnknownRoom(room_id))?;
    let seat = room.assign_seat(connection_id, scheduler)?;
    Ok(Placement { room_id, seat })
}
