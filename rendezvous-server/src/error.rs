use rendezvous_core::{ConnectionId, RoomId};
use thiserror::Error;

/// Failures of a single signaling event. None of them outlive the event.
#[derive(Debug, Error)]
pub enum SignalingError {
    #[error("room '{0}' already has two members")]
    RoomFull(RoomId),

    #[error("no peer to forward to in room '{0}'")]
    PeerAbsent(RoomId),

    #[error("connection is not a member of room '{0}'")]
    UnknownRoom(RoomId),

    #[error("connection {0} is not connected")]
    UnknownConnection(ConnectionId),

    #[error("malformed signaling payload: {0}")]
    MalformedPayload(String),
}

impl From<serde_json::Error> for SignalingError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedPayload(e.to_string())
    }
}
