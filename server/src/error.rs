use shared::{ConnectionId, RoomId};

/// Rejected room intents.
///
/// None of these are fatal: the gateway reports them and the network loop
/// drops the intent, since a room can disappear between a client sending a
/// packet and the server reading it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("{0} is full")]
    RoomFull(RoomId),
    #[error("{0} does not exist")]
    UnknownRoom(RoomId),
    #[error("connection {connection_id} holds no seat in {room_id}")]
    UnseatedConnection {
        connection_id: ConnectionId,
        room_id: RoomId,
    },
    #[error("{0} needs two players for a rematch")]
    NotEnoughPlayers(RoomId),
}
