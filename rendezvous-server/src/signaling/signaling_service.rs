use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use rendezvous_core::{ConnectionId, ServerSignal};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Outbound queues of every open WebSocket, keyed by connection.
#[derive(Clone, Default)]
pub struct SignalingService {
    connections: Arc<DashMap<ConnectionId, mpsc::UnboundedSender<Message>>>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_connection(&self, conn: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.connections.insert(conn, tx);
    }

    pub fn remove_connection(&self, conn: &ConnectionId) {
        self.connections.remove(conn);
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn send_signal(&self, conn: ConnectionId, signal: &ServerSignal) {
        // The map guard must not outlive this lookup.
        let Some(tx) = self.connections.get(&conn).map(|tx| tx.clone()) else {
            warn!(
                "Attempted to send '{}' to disconnected connection {}",
                signal.event(),
                conn
            );
            return;
        };

        match serde_json::to_string(signal) {
            Ok(json) => {
                if let Err(e) = tx.send(Message::Text(json.into())) {
                    error!("Failed to queue WS message to {}: {:?}", conn, e);
                }
            }
            Err(e) => error!("Failed to serialize signal message: {}", e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send(&self, conn: ConnectionId, signal: ServerSignal) {
        self.send_signal(conn, &signal);
    }
}
