//! HTTP listener and logging configuration.

use serde::{Deserialize, Serialize};

use super::common::{ConfigError, check_non_empty, check_route_path, validation};
use super::{LogFormat, LogLevel};
use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_HEALTH_PATH, DEFAULT_HTTP_PORT, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_WEBHOOK_PATH,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// IP address the gateway binds to. Defaults to `127.0.0.1`; set
    /// `0.0.0.0` for container deployments.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    #[serde(default = "default_health_path")]
    pub health_path: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}
fn default_port() -> u16 {
    DEFAULT_HTTP_PORT
}
fn default_webhook_path() -> String {
    DEFAULT_WEBHOOK_PATH.to_string()
}
fn default_health_path() -> String {
    DEFAULT_HEALTH_PATH.to_string()
}
fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}
fn default_log_level() -> LogLevel {
    LogLevel::Info
}
fn default_log_format() -> LogFormat {
    LogFormat::Json
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            webhook_path: default_webhook_path(),
            health_path: default_health_path(),
            max_body_bytes: default_max_body_bytes(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl ServerConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        check_non_empty("server.bind_address", &self.bind_address)?;
        if self.port == 0 {
            return Err(validation("server.port", "port must be > 0"));
        }
        check_route_path("server.webhook_path", &self.webhook_path)?;
        check_route_path("server.health_path", &self.health_path)?;
        if self.webhook_path == self.health_path {
            return Err(validation(
                "server.health_path",
                format!(
                    "must differ from server.webhook_path ('{}')",
                    self.webhook_path
                ),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(validation("server.max_body_bytes", "must be > 0"));
        }
        Ok(())
    }
}
