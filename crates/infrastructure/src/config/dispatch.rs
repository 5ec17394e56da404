//! Dispatch policy configuration.

use domain::alert::entity::AlertLevel;
use domain::dispatch::policy::{DEFAULT_PUSH_TOPIC, DispatchPolicy};
use serde::{Deserialize, Serialize};

use super::common::{ConfigError, check_non_empty};
use crate::constants::DEFAULT_MIN_PUSH_LEVEL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Lowest level that triggers a push notification: `DEBUG`, `INFO`,
    /// `WARNING` or `ERROR`.
    #[serde(default = "default_min_push_level")]
    pub min_push_level: AlertLevel,

    /// Push topic notifications are published to.
    #[serde(default = "default_topic")]
    pub topic: String,
}

fn default_min_push_level() -> AlertLevel {
    DEFAULT_MIN_PUSH_LEVEL
}
fn default_topic() -> String {
    DEFAULT_PUSH_TOPIC.to_string()
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            min_push_level: default_min_push_level(),
            topic: default_topic(),
        }
    }
}

impl DispatchConfig {
    pub fn policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            min_push_level: self.min_push_level,
            topic: self.topic.clone(),
        }
    }

    /// `UNKNOWN` is refused as a threshold so that alerts with an
    /// unrecognized severity are never pushed.
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.min_push_level == AlertLevel::Unknown {
            return Err(ConfigError::InvalidValue {
                field: "dispatch.min_push_level".to_string(),
                value: self.min_push_level.to_string(),
                expected: "DEBUG, INFO, WARNING, ERROR".to_string(),
            });
        }
        check_non_empty("dispatch.topic", &self.topic)
    }
}
