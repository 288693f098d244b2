use crate::error::SignalingError;
use crate::registry::RoomRegistry;
use crate::signaling::SignalingOutput;
use dashmap::DashMap;
use rendezvous_core::{ClientSignal, ConnectionId, RoomId, ServerSignal};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-connection state held by the router. `room` is `None` while unjoined.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRecord {
    pub room: Option<RoomId>,
}

/// Turns inbound signaling events into registry calls and outbound
/// notifications.
///
/// Offer, answer and ICE candidates are relayed 1:1 to the other member of the
/// room. Notifications always go out after the registry call has returned.
#[derive(Clone)]
pub struct SignalingRouter {
    registry: Arc<RoomRegistry>,
    connections: Arc<DashMap<ConnectionId, ConnectionRecord>>,
    output: Arc<dyn SignalingOutput>,
}

impl SignalingRouter {
    pub fn new(output: Arc<dyn SignalingOutput>) -> Self {
        Self {
            registry: Arc::new(RoomRegistry::new()),
            connections: Arc::new(DashMap::new()),
            output,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Current room of `conn`, if it has joined one.
    pub fn room_of(&self, conn: &ConnectionId) -> Option<RoomId> {
        self.connections
            .get(conn)
            .and_then(|record| record.room.clone())
    }

    pub fn connect(&self, conn: ConnectionId) {
        self.connections.insert(conn, ConnectionRecord::default());
    }

    /// Decodes one text frame and dispatches it. Malformed frames are logged and dropped.
    pub async fn handle_text(&self, conn: ConnectionId, text: &str) {
        match serde_json::from_str::<ClientSignal>(text) {
            Ok(signal) => self.handle(conn, signal).await,
            Err(e) => warn!("{} from {}", SignalingError::from(e), conn),
        }
    }

    /// Processes one event. Errors end here.
    pub async fn handle(&self, conn: ConnectionId, signal: ClientSignal) {
        let res = match signal {
            ClientSignal::JoinRoom(room_id) => self.join(conn, room_id).await,
            ClientSignal::LeaveRoom => self.leave(conn).await,
            ClientSignal::Offer { room_id, sdp } => {
                self.relay(conn, &room_id, ServerSignal::Offer { sdp }).await
            }
            ClientSignal::Answer { room_id, sdp } => {
                self.relay(conn, &room_id, ServerSignal::Answer { sdp }).await
            }
            ClientSignal::IceCandidate { room_id, candidate } => {
                self.relay(conn, &room_id, ServerSignal::IceCandidate { candidate })
                    .await
            }
        };

        match res {
            Ok(()) => {}
            Err(e @ SignalingError::RoomFull(_)) => warn!("Join rejected for {}: {}", conn, e),
            Err(e @ SignalingError::MalformedPayload(_)) => warn!("{} from {}", e, conn),
            Err(e) => debug!("Dropped event from {}: {}", conn, e),
        }
    }

    /// Joins `room_id`. A connection already in another room leaves it first.
    ///
    /// The pre-existing member, and only it, receives `user-joined`. A joiner
    /// turned away from a full room receives `room-full`. Connections that are
    /// not (or no longer) connected are never registered.
    pub async fn join(&self, conn: ConnectionId, room_id: RoomId) -> Result<(), SignalingError> {
        if room_id.is_blank() {
            return Err(SignalingError::MalformedPayload(
                "empty room identifier".to_owned(),
            ));
        }

        let Some(current) = self
            .connections
            .get(&conn)
            .map(|record| record.room.clone())
        else {
            return Err(SignalingError::UnknownConnection(conn));
        };

        match current {
            Some(current) if current == room_id => {
                debug!("{} is already in room {}", conn, room_id);
                return Ok(());
            }
            Some(_) => self.leave(conn).await?,
            None => {}
        }

        let outcome = match self.registry.join(&room_id, conn) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.output
                    .send(conn, ServerSignal::RoomFull { room_id })
                    .await;
                return Err(e);
            }
        };

        // A disconnect may have removed the record since the check above.
        let recorded = match self.connections.get_mut(&conn) {
            Some(mut record) => {
                record.room = Some(room_id.clone());
                true
            }
            None => false,
        };
        if !recorded {
            let _ = self.registry.leave(&room_id, &conn);
            return Err(SignalingError::UnknownConnection(conn));
        }
        info!("User {} joined room: {}", conn, room_id);

        if outcome.already_member {
            return Ok(());
        }

        if let Some(peer) = outcome.peer {
            self.output
                .send(peer, ServerSignal::UserJoined { id: conn })
                .await;
        }

        Ok(())
    }

    /// Forwards `signal` to the other member of `room_id`.
    pub async fn relay(
        &self,
        conn: ConnectionId,
        room_id: &RoomId,
        signal: ServerSignal,
    ) -> Result<(), SignalingError> {
        let peer = self
            .registry
            .peer_of(room_id, &conn)
            .ok_or_else(|| SignalingError::PeerAbsent(room_id.clone()))?;

        debug!("Relaying '{}' from {} to {}", signal.event(), conn, peer);
        self.output.send(peer, signal).await;

        Ok(())
    }

    /// Leaves the current room, if any, and tells the remaining member.
    pub async fn leave(&self, conn: ConnectionId) -> Result<(), SignalingError> {
        let Some(room_id) = self
            .connections
            .get_mut(&conn)
            .and_then(|mut record| record.room.take())
        else {
            return Ok(());
        };

        let remaining = self.registry.leave(&room_id, &conn)?;
        info!("User {} left room: {}", conn, room_id);

        if let Some(peer) = remaining {
            self.output
                .send(peer, ServerSignal::UserLeft { id: conn })
                .await;
        }

        Ok(())
    }

    /// Final event for a connection: leaves its room and forgets it.
    pub async fn disconnect(&self, conn: ConnectionId) {
        if let Err(e) = self.leave(conn).await {
            debug!("Disconnect of {}: {}", conn, e);
        }
        self.connections.remove(&conn);
        info!("User {} disconnected", conn);
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
