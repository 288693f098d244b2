use rendezvous_core::ConnectionId;

/// Maximum number of connections a room may hold.
pub const ROOM_CAPACITY: usize = 2;

/// Members of one room in join order.
#[derive(Debug, Default)]
pub struct Room {
    members: heapless::Vec<ConnectionId, ROOM_CAPACITY>,
}

/// Result of admitting a connection into a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The other member, if one is present.
    pub peer: Option<ConnectionId>,
    /// The connection was already a member; nothing changed.
    pub already_member: bool,
}

impl Room {
    pub(crate) fn admit(&mut self, conn: ConnectionId) -> Option<JoinOutcome> {
        if self.contains(&conn) {
            return Some(JoinOutcome {
                peer: self.peer_of(&conn),
                already_member: true,
            });
        }

        let peer = self.members.first().copied();
        self.members.push(conn).ok()?;

        Some(JoinOutcome {
            peer,
            already_member: false,
        })
    }

    /// Returns `false` if `conn` was not a member.
    pub(crate) fn remove(&mut self, conn: &ConnectionId) -> bool {
        let Some(index) = self.members.iter().position(|m| m == conn) else {
            return false;
        };
        self.members.remove(index);
        true
    }

    pub fn contains(&self, conn: &ConnectionId) -> bool {
        self.members.contains(conn)
    }

    /// The other member. `None` when `conn` is alone or not a member at all.
    pub fn peer_of(&self, conn: &ConnectionId) -> Option<ConnectionId> {
        if !self.contains(conn) {
            return None;
        }
        self.members.iter().find(|m| *m != conn).copied()
    }

    pub fn members(&self) -> Vec<ConnectionId> {
        self.members.to_vec()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
