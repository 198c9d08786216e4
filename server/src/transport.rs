//! Delivery capability the session gateway writes to.
//!
//! A transport sends packets to single connections and to room broadcast groups.
//! Group membership is maintained by the gateway as seats are taken and released,
//! so a room broadcast reaches exactly the connections seated in that room.

use shared::{ConnectionId, Packet, RoomId};
use std::collections::{BTreeSet, HashMap};

pub trait Transport {
    fn send(&mut self, connection_id: ConnectionId, packet: Packet);
    fn broadcast(&mut self, room_id: RoomId, packet: Packet);
    fn join_group(&mut self, connection_id: ConnectionId, room_id: RoomId);
    fn leave_group(&mut self, connection_id: ConnectionId, room_id: RoomId);
}

/// Room broadcast group membership
#[derive(Debug, Default)]
pub struct RoomGroups {
    groups: HashMap<RoomId, BTreeSet<ConnectionId>>,
}

impl RoomGroups {
    pub fn join(&mut self, connection_id: ConnectionId, room_id: RoomId) {
        self.groups.entry(room_id).or_default().insert(connection_id);
    }

    pub fn leave(&mut self, connection_id: ConnectionId, room_id: RoomId) {
        if let Some(members) = self.groups.get_mut(&room_id) {
            members.remove(&connection_id);
            if members.is_empty() {
                self.groups.remove(&room_id);
            }
        }
    }

    pub fn members(&self, room_id: RoomId) -> Vec<ConnectionId> {
        self.groups
            .get(&room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// In-process transport that records every delivery per recipient
#[derive(Debug, Default)]
pub struct MemoryTransport {
    groups: RoomGroups,
    delivered: Vec<(ConnectionId, Packet)>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &RoomGroups {
        &self.groups
    }

    /// Drains everything delivered so far
    pub fn take(&mut self) -> Vec<(ConnectionId, Packet)> {
        std::mem::take(&mut self.delivered)
    }

    /// Packets delivered to one connection, oldest first
    pub fn received_by(&self, connection_id: ConnectionId) -> Vec<Packet> {
        self.delivered
            .iter()
            .filter(|(id, _)| *id == connection_id)
            .map(|(_, packet)| packet.clone())
            .collect()
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, connection_id: ConnectionId, packet: Packet) {
        self.delivered.push((connection_id, packet));
    }

    fn broadcast(&mut self, room_id: RoomId, packet: Packet) {
        for member in self.groups.members(room_id) {
            self.delivered.push((member, packet.clone()));
        }
    }

    fn join_group(&mut self, connection_id: ConnectionId, room_id: RoomId) {
        self.groups.join(connection_id, room_id);
    }

    fn leave_group(&mut self, connection_id: ConnectionId, room_id: RoomId) {
        self.groups.leave(connection_id, room_id);
    }
}
