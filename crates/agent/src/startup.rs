use std::path::Path;
use std::sync::Arc;

use adapters::http::rate_limit::AdmissionGate;
use adapters::http::router::RouterSettings;
use adapters::http::server::run_http_server;
use adapters::http::state::GatewayState;
use adapters::push::log_messenger::LogPushMessenger;
use adapters::push::webhook_messenger::WebhookPushMessenger;
use adapters::storage::memory_alert_store::MemoryAlertStore;
use adapters::storage::redb_alert_store::RedbAlertStore;
use application::alert_queue::alert_queue;
use application::dispatch_engine::DispatchEngine;
use infrastructure::config::{
    ConfigError, GatewayConfig, PushBackend, PushConfig, StorageBackend, StorageConfig,
};
use infrastructure::constants::GRACEFUL_SHUTDOWN_TIMEOUT;
use infrastructure::logging::{init_logging, service_span};
use ports::secondary::alert_store::AlertStore;
use ports::secondary::push_messenger::PushMessenger;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::Cli;

/// Load the config file and apply CLI overrides.
pub fn load_config(cli: &Cli) -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::load(Path::new(&cli.config))?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.server.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.server.log_format = format;
    }
    config.validate()?;
    Ok(config)
}

/// `check-config`: validate and print the effective config.
pub fn check_config(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    print!("{}", config.sanitized().to_yaml()?);
    Ok(())
}

pub fn build_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn AlertStore>> {
    let store: Arc<dyn AlertStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryAlertStore::new()),
        StorageBackend::Redb => {
            let store = RedbAlertStore::open(Path::new(&config.path))?;
            info!(path = %config.path, stored_alerts = store.len()?, "redb alert store opened");
            Arc::new(store)
        }
    };
    Ok(store)
}

pub fn build_messenger(config: &PushConfig) -> anyhow::Result<Arc<dyn PushMessenger>> {
    let messenger: Arc<dyn PushMessenger> = match (config.backend, config.url.as_deref()) {
        (PushBackend::Webhook, Some(url)) => {
            Arc::new(WebhookPushMessenger::new(url, config.timeout())?)
        }
        (PushBackend::Webhook, None) => {
            anyhow::bail!("push.url is required when push.backend is webhook")
        }
        (PushBackend::Log, _) => Arc::new(LogPushMessenger),
    };
    Ok(messenger)
}

pub fn router_settings(config: &GatewayConfig) -> RouterSettings {
    RouterSettings {
        webhook_path: config.server.webhook_path.clone(),
        health_path: config.server.health_path.clone(),
        max_body_bytes: config.server.max_body_bytes,
    }
}

/// Run the gateway startup sequence and block until shutdown.
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    // ── 1. Load config ──────────────────────────────────────────────
    let config = load_config(cli)?;

    // ── 2. Initialize logging ───────────────────────────────────────
    init_logging(config.server.log_level, config.server.log_format)?;

    // Service root span, fields appear in every subsequent log entry
    let _root_span = service_span(env!("CARGO_PKG_VERSION")).entered();

    info!(
        config_path = %cli.config,
        log_level = config.server.log_level.as_str(),
        log_format = config.server.log_format.as_str(),
        "alertgate starting"
    );

    // ── 3. Build backends ───────────────────────────────────────────
    let store = build_store(&config.storage)?;
    let messenger = build_messenger(&config.push)?;
    info!(
        storage = ?config.storage.backend,
        push = ?config.push.backend,
        "backends initialized"
    );

    // ── 4. Dispatch engine and backpressure channel ─────────────────
    let policy = config.dispatch.policy();
    info!(
        min_push_level = %policy.min_push_level,
        topic = %policy.topic,
        "dispatch policy loaded"
    );
    let engine = DispatchEngine::new(store, messenger, policy);
    let (queue, rx) = alert_queue();

    // ── 5. Admission gate ───────────────────────────────────────────
    let gate = AdmissionGate::new(
        config.ingest.rate,
        config.ingest.burst,
        config.ingest.enqueue_timeout(),
    )?;
    info!(
        rate = config.ingest.rate,
        burst = config.ingest.burst,
        enqueue_timeout_secs = config.ingest.enqueue_timeout_secs,
        "admission gate initialized"
    );
    let state = Arc::new(GatewayState::new(gate, queue));

    // ── 6. Spawn dispatch engine ────────────────────────────────────
    // Cancelled only after the HTTP server has stopped, so batches
    // accepted during the drain are still dispatched.
    let dispatch_cancel = CancellationToken::new();
    let engine_cancel = dispatch_cancel.clone();
    let dispatch_handle = tokio::spawn(async move {
        engine.run(rx, engine_cancel).await;
    });

    // ── 7. Spawn HTTP server ────────────────────────────────────────
    let cancel_token = crate::shutdown::create_shutdown_token();
    let settings = router_settings(&config);
    let bind_address = config.server.bind_address.clone();
    let port = config.server.port;
    let http_shutdown = cancel_token.clone();
    let http_handle = tokio::spawn(async move {
        let result = run_http_server(
            state,
            &settings,
            &bind_address,
            port,
            http_shutdown.clone().cancelled_owned(),
        )
        .await;
        if let Err(ref e) = result {
            tracing::error!(error = %e, "HTTP gateway failed");
            http_shutdown.cancel();
        }
        result
    });

    // ── 8. Ready, wait for cancellation ─────────────────────────────
    info!("alertgate ready, waiting for shutdown signal");
    cancel_token.cancelled().await;

    // ── 9. Ordered shutdown sequence ────────────────────────────────
    info!("shutdown phase 1: draining HTTP connections");
    let server_result = match tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, http_handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(anyhow::anyhow!("HTTP gateway task panicked: {e}")),
        Err(_) => {
            warn!("HTTP gateway did not stop within the grace period");
            Ok(())
        }
    };

    info!("shutdown phase 2: draining queued alerts");
    dispatch_cancel.cancel();
    if tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, dispatch_handle)
        .await
        .is_err()
    {
        warn!("dispatch engine did not stop within the grace period");
    }

    info!("alertgate stopped");
    server_result
}
