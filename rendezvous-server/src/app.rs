use crate::config::ServerConfig;
use crate::signaling::{SignalingRouter, SignalingService, ws_handler};
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

pub struct AppState {
    pub signaling: SignalingService,
    pub router: SignalingRouter,
}

impl AppState {
    pub fn new() -> Self {
        let signaling = SignalingService::new();
        let router = SignalingRouter::new(Arc::new(signaling.clone()));

        Self { signaling, router }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_app(state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors_layer(&config.allow_origin))
        .with_state(state)
}

fn cors_layer(allow_origin: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allow_origin
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || allow_origin.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}
