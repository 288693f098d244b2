use crate::app::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{Sink, SinkExt, Stream, StreamExt};
use rendezvous_core::{ConnectionId, ServerSignal};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let conn = ConnectionId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, conn, state))
}

async fn handle_socket(socket: WebSocket, conn: ConnectionId, state: Arc<AppState>) {
    info!("New user connected: {}", conn);

    let (sender, receiver) = socket.split();
    drive_connection(conn, state, sender, receiver).await;
}

/// Runs one connection until either direction ends, then disconnects it once.
async fn drive_connection<Si, St>(
    conn: ConnectionId,
    state: Arc<AppState>,
    mut sender: Si,
    mut receiver: St,
) where
    Si: Sink<Message> + Unpin + Send + 'static,
    St: Stream<Item = Result<Message, axum::Error>> + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_connection(conn, tx);
    state.router.connect(conn);
    state
        .signaling
        .send_signal(conn, &ServerSignal::Welcome { id: conn });

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    // Events of one connection are handled strictly in arrival order.
    let mut recv_task = tokio::spawn({
        let router = state.router.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => router.handle_text(conn, &text).await,
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    // The reader must be fully stopped before the disconnect runs, or an
    // event it is still handling could land after it.
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
            let _ = recv_task.await;
        }
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.signaling.remove_connection(&conn);
    state.router.disconnect(conn).await;
}
