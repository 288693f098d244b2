use crate::error::SignalingError;
use crate::registry::{JoinOutcome, Room};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rendezvous_core::{ConnectionId, RoomId};
use tracing::info;

/// Process-wide map of room identifier to members.
///
/// Every operation on one room runs under that room's shard lock, so join,
/// leave and lookups on the same room never observe each other half-done.
/// Nothing here sends anything: callers notify peers from the returned
/// snapshot after the lock is gone.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `conn` to `room_id`, creating the room if it does not exist yet.
    pub fn join(&self, room_id: &RoomId, conn: ConnectionId) -> Result<JoinOutcome, SignalingError> {
        match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(mut entry) => entry
                .get_mut()
                .admit(conn)
                .ok_or_else(|| SignalingError::RoomFull(room_id.clone())),
            Entry::Vacant(entry) => {
                info!("Creating new room: {}", room_id);
                let mut room = Room::default();
                let outcome = room
                    .admit(conn)
                    .ok_or_else(|| SignalingError::RoomFull(room_id.clone()))?;
                entry.insert(room);
                Ok(outcome)
            }
        }
    }

    /// Removes `conn` from `room_id` and returns whoever is left.
    /// The room is dropped as soon as it has no members.
    pub fn leave(
        &self,
        room_id: &RoomId,
        conn: &ConnectionId,
    ) -> Result<Option<ConnectionId>, SignalingError> {
        let Entry::Occupied(mut entry) = self.rooms.entry(room_id.clone()) else {
            return Err(SignalingError::UnknownRoom(room_id.clone()));
        };

        if !entry.get_mut().remove(conn) {
            return Err(SignalingError::UnknownRoom(room_id.clone()));
        }

        if entry.get().is_empty() {
            entry.remove();
            info!("Room {} is empty, removed", room_id);
            return Ok(None);
        }

        Ok(entry.get().members().first().copied())
    }

    pub fn peer_of(&self, room_id: &RoomId, conn: &ConnectionId) -> Option<ConnectionId> {
        self.rooms.get(room_id).and_then(|room| room.peer_of(conn))
    }

    /// Snapshot of the members of `room_id` in join order. Empty if the room does not exist.
    pub fn members(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|room| room.members())
            .unwrap_or_default()
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
