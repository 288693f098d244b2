use async_trait::async_trait;
use rendezvous_core::{ConnectionId, ServerSignal};

/// Outbound side of the connection layer: delivers one event to one connection.
///
/// Implementations must not block on the network; a send to a connection that
/// is already gone is dropped.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, conn: ConnectionId, signal: ServerSignal);
}
