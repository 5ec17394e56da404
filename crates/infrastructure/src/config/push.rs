//! Push notification backend selection.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::common::{ConfigError, validation};
use crate::constants::DEFAULT_PUSH_TIMEOUT_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushBackend {
    /// Write notifications to the log.
    #[default]
    Log,
    /// POST notifications as JSON to `push.url`.
    Webhook,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PushConfig {
    #[serde(default)]
    pub backend: PushBackend,

    /// Endpoint URL, required when `backend` is `webhook`.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_PUSH_TIMEOUT_SECS
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            backend: PushBackend::default(),
            url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PushConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(validation("push.timeout_secs", "timeout must be > 0"));
        }
        if self.backend == PushBackend::Webhook {
            let Some(url) = self.url.as_deref() else {
                return Err(validation(
                    "push.url",
                    "required when push.backend is webhook",
                ));
            };
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(validation(
                    "push.url",
                    format!("'{url}' must start with http:// or https://"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_default() {
        let cfg = PushConfig::default();
        assert_eq!(cfg.backend, PushBackend::Log);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn webhook_requires_url() {
        let cfg = PushConfig {
            backend: PushBackend::Webhook,
            ..PushConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("push.url"));
    }

    #[test]
    fn webhook_url_scheme_checked() {
        let cfg = PushConfig {
            backend: PushBackend::Webhook,
            url: Some("ftp://push.example".to_string()),
            ..PushConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = PushConfig {
            backend: PushBackend::Webhook,
            url: Some("https://push.example/send".to_string()),
            ..PushConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let cfg = PushConfig {
            timeout_secs: 0,
            ..PushConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
