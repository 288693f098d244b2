use crate::model::connection::ConnectionId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events sent by a client. `sdp` and `candidate` are opaque and relayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientSignal {
    JoinRoom(RoomId),
    LeaveRoom,
    Offer { room_id: RoomId, sdp: Value },
    Answer { room_id: RoomId, sdp: Value },
    IceCandidate { room_id: RoomId, candidate: Value },
}

/// Events sent by the server to exactly one connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerSignal {
    Welcome { id: ConnectionId },
    UserJoined { id: ConnectionId },
    UserLeft { id: ConnectionId },
    RoomFull { room_id: RoomId },
    Offer { sdp: Value },
    Answer { sdp: Value },
    IceCandidate { candidate: Value },
}

impl ServerSignal {
    /// Wire name of the event.
    pub fn event(&self) -> &'static str {
        match self {
            ServerSignal::Welcome { .. } => "welcome",
            ServerSignal::UserJoined { .. } => "user-joined",
            ServerSignal::UserLeft { .. } => "user-left",
            ServerSignal::RoomFull { .. } => "room-full",
            ServerSignal::Offer { .. } => "offer",
            ServerSignal::Answer { .. } => "answer",
            ServerSignal::IceCandidate { .. } => "ice-candidate",
        }
    }
}
