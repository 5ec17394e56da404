use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};

use super::health_handler::healthz;
use super::rate_limit::admission_middleware;
use super::state::GatewayState;
use super::webhook_handler::receive_alerts;

/// Paths and limits used to assemble the gateway router. Built from the
/// `server` config section at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    pub webhook_path: String,
    pub health_path: String,
    pub max_body_bytes: usize,
}

#[cfg(test)]
pub(crate) fn test_settings() -> RouterSettings {
    RouterSettings {
        webhook_path: "/alertmanager".to_string(),
        health_path: "/healthz".to_string(),
        max_body_bytes: 64 * 1024,
    }
}

/// Build the gateway router.
///
/// Routes are split into two groups:
/// 1. **Health** (unlimited): `GET <health_path>`
/// 2. **Webhook** (rate limited): `POST <webhook_path>`, guarded by the
///    admission middleware and a body size limit
///
/// Other methods on either path get 405 from axum's method routing.
pub fn build_router(state: Arc<GatewayState>, settings: &RouterSettings) -> Router {
    let health_routes = Router::new().route(&settings.health_path, get(healthz));

    let webhook_routes = Router::new()
        .route(&settings.webhook_path, post(receive_alerts))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            admission_middleware,
        ))
        .layer(DefaultBodyLimit::max(settings.max_body_bytes));

    health_routes.merge(webhook_routes).with_state(state)
}
