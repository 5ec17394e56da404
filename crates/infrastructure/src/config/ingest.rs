//! Admission control and backpressure configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::common::{ConfigError, validation};
use crate::constants::{DEFAULT_ENQUEUE_TIMEOUT_SECS, DEFAULT_INGEST_BURST, DEFAULT_INGEST_RATE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Sustained admissions per second. Fractional values are allowed
    /// (`0.5` = one request every two seconds).
    #[serde(default = "default_rate")]
    pub rate: f64,

    /// Token bucket capacity. The bucket starts full.
    #[serde(default = "default_burst")]
    pub burst: u32,

    /// How long an admitted request may wait for the dispatch channel
    /// before it is answered with 408.
    #[serde(default = "default_enqueue_timeout_secs")]
    pub enqueue_timeout_secs: u64,
}

fn default_rate() -> f64 {
    DEFAULT_INGEST_RATE
}
fn default_burst() -> u32 {
    DEFAULT_INGEST_BURST
}
fn default_enqueue_timeout_secs() -> u64 {
    DEFAULT_ENQUEUE_TIMEOUT_SECS
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            burst: default_burst(),
            enqueue_timeout_secs: default_enqueue_timeout_secs(),
        }
    }
}

impl IngestConfig {
    pub fn enqueue_timeout(&self) -> Duration {
        Duration::from_secs(self.enqueue_timeout_secs)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(validation(
                "ingest.rate",
                format!("rate {} must be a finite number > 0", self.rate),
            ));
        }
        if self.burst == 0 {
            return Err(validation("ingest.burst", "burst must be > 0"));
        }
        if self.enqueue_timeout_secs == 0 {
            return Err(validation(
                "ingest.enqueue_timeout_secs",
                "timeout must be > 0",
            ));
        }
        Ok(())
    }
}
