use std::time::Duration;

use domain::alert::entity::AlertLevel;

// ── Network defaults ───────────────────────────────────────────────

pub const DEFAULT_CONFIG_PATH: &str = "/etc/alertgate/config.yaml";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8035;
pub const DEFAULT_WEBHOOK_PATH: &str = "/alertmanager";
pub const DEFAULT_HEALTH_PATH: &str = "/healthz";

/// Maximum accepted webhook body (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

// ── Ingestion ──────────────────────────────────────────────────────

/// Sustained admission rate, tokens per second.
pub const DEFAULT_INGEST_RATE: f64 = 1.0;
pub const DEFAULT_INGEST_BURST: u32 = 5;
pub const DEFAULT_ENQUEUE_TIMEOUT_SECS: u64 = 10;

// ── Dispatch ───────────────────────────────────────────────────────

pub const DEFAULT_MIN_PUSH_LEVEL: AlertLevel = AlertLevel::Warning;

// ── Backends ───────────────────────────────────────────────────────

pub const DEFAULT_STORAGE_PATH: &str = "/var/lib/alertgate/alerts.redb";
pub const DEFAULT_PUSH_TIMEOUT_SECS: u64 = 10;

// ── Timeouts ───────────────────────────────────────────────────────

/// How long the dispatch task may keep draining after the HTTP server
/// has stopped.
pub const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
