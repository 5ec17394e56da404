use std::future::Future;
use std::sync::Arc;

use super::router::{RouterSettings, build_router};
use super::state::GatewayState;

/// Run the gateway HTTP server on the given bind address and port.
///
/// The server shuts down gracefully when `shutdown` resolves: the listener
/// stops accepting and in-flight requests finish before returning.
pub async fn run_http_server(
    state: Arc<GatewayState>,
    settings: &RouterSettings,
    bind_address: &str,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let router = build_router(state, settings);
    let listener = tokio::net::TcpListener::bind(format!("{bind_address}:{port}")).await?;

    tracing::info!(
        %bind_address,
        port,
        webhook_path = %settings.webhook_path,
        health_path = %settings.health_path,
        "HTTP gateway listening"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
