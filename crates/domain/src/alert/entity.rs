use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a canonical alert.
///
/// Variants are declared in increasing severity so the derived `Ord` is the
/// order used for the push threshold: `Unknown < Debug < Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Unknown,
    Debug,
    Info,
    Warning,
    Error,
}

impl AlertLevel {
    /// Exact, case-sensitive lookup of a `severity` label value.
    ///
    /// Anything outside `DEBUG`, `INFO`, `WARNING`, `ERROR` maps to `Unknown`
    /// (so `"error"` is `Unknown`, not `Error`).
    pub fn from_label(value: &str) -> Self {
        match value {
            "DEBUG" => Self::Debug,
            "INFO" => Self::Info,
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a canonical alert. Unordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Unknown,
    Resolved,
    Triggered,
}

impl AlertState {
    /// Map the batch-level webhook status. Only `firing` and `resolved` are
    /// recognized.
    pub fn from_status(status: &str) -> Self {
        match status {
            "firing" => Self::Triggered,
            "resolved" => Self::Resolved,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Resolved => "resolved",
            Self::Triggered => "triggered",
        }
    }
}

impl std::fmt::Display for AlertState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized alert record acted on by the dispatch engine.
///
/// Serializes to the stored document shape: `title`, `body`, `timestamp`
/// and `level`. The `id` is the document key and `state` only drives
/// dispatch, so neither is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalAlert {
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(rename = "timestamp")]
    pub time: DateTime<Utc>,
    pub level: AlertLevel,
    #[serde(skip, default = "unknown_state")]
    pub state: AlertState,
}

fn unknown_state() -> AlertState {
    AlertState::Unknown
}

/// One alert entry inside a webhook batch.
///
/// Kept for logging; timestamps stay opaque strings and are never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAlert {
    pub status: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(rename = "generatorURL")]
    pub generator_url: String,
    pub fingerprint: String,
}

/// Alertmanager webhook payload.
///
/// Every field defaults to empty and unknown fields are ignored, so any
/// JSON object decodes; required-label checks happen at extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAlertBatch {
    pub receiver: String,
    pub status: String,
    pub alerts: Vec<RawAlert>,
    pub group_labels: BTreeMap<String, String>,
    pub common_labels: BTreeMap<String, String>,
    pub common_annotations: BTreeMap<String, String>,
    #[serde(rename = "externalURL")]
    pub external_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_order_is_increasing_severity() {
        assert!(AlertLevel::Unknown < AlertLevel::Debug);
        assert!(AlertLevel::Debug < AlertLevel::Info);
        assert!(AlertLevel::Info < AlertLevel::Warning);
        assert!(AlertLevel::Warning < AlertLevel::Error);
    }

    #[test]
    fn level_lookup_is_case_sensitive() {
        assert_eq!(AlertLevel::from_label("ERROR"), AlertLevel::Error);
        assert_eq!(AlertLevel::from_label("error"), AlertLevel::Unknown);
        assert_eq!(AlertLevel::from_label("HIGH"), AlertLevel::Unknown);
        assert_eq!(AlertLevel::from_label(""), AlertLevel::Unknown);
    }

    #[test]
    fn level_serde_name_matches_as_str() {
        for level in [
            AlertLevel::Unknown,
            AlertLevel::Debug,
            AlertLevel::Info,
            AlertLevel::Warning,
            AlertLevel::Error,
        ] {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.as_str()));
            assert_eq!(serde_json::from_str::<AlertLevel>(&json).unwrap(), level);
        }
        assert!(serde_json::from_str::<AlertLevel>("\"warning\"").is_err());
    }

    #[test]
    fn state_from_status() {
        assert_eq!(AlertState::from_status("firing"), AlertState::Triggered);
        assert_eq!(AlertState::from_status("resolved"), AlertState::Resolved);
        assert_eq!(AlertState::from_status("Firing"), AlertState::Unknown);
        assert_eq!(AlertState::from_status(""), AlertState::Unknown);
    }

    #[test]
    fn canonical_alert_serializes_stored_shape() {
        let alert = CanonicalAlert {
            id: "DiskFull".to_string(),
            title: "DiskFull".to_string(),
            body: "WARNING: disk at 95%".to_string(),
            time: DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            level: AlertLevel::Warning,
            state: AlertState::Triggered,
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["title"], "DiskFull");
        assert_eq!(json["body"], "WARNING: disk at 95%");
        assert_eq!(json["level"], "WARNING");
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00Z");
        assert!(json.get("id").is_none());
        assert!(json.get("state").is_none());
    }

    #[test]
    fn batch_decodes_alertmanager_payload() {
        let payload = r#"{
            "receiver": "push",
            "status": "firing",
            "alerts": [{
                "status": "firing",
                "labels": {"alertname": "DiskFull", "instance": "db-1"},
                "annotations": {"summary": "disk at 95%"},
                "startsAt": "2024-05-01T12:00:00Z",
                "endsAt": "0001-01-01T00:00:00Z",
                "generatorURL": "http://prometheus/graph",
                "fingerprint": "a1b2c3"
            }],
            "groupLabels": {"alertname": "DiskFull"},
            "commonLabels": {"alertname": "DiskFull", "severity": "WARNING"},
            "commonAnnotations": {"summary": "disk at 95%"},
            "externalURL": "http://alertmanager:9093",
            "version": "4",
            "groupKey": "{}:{alertname=\"DiskFull\"}"
        }"#;
        let batch: RawAlertBatch = serde_json::from_str(payload).unwrap();
        assert_eq!(batch.receiver, "push");
        assert_eq!(batch.alerts.len(), 1);
        assert_eq!(batch.alerts[0].generator_url, "http://prometheus/graph");
        assert_eq!(batch.alerts[0].labels["instance"], "db-1");
        assert_eq!(batch.common_labels["severity"], "WARNING");
        assert_eq!(batch.external_url, "http://alertmanager:9093");
    }

    #[test]
    fn batch_decodes_empty_object() {
        let batch: RawAlertBatch = serde_json::from_str("{}").unwrap();
        assert_eq!(batch, RawAlertBatch::default());
    }
}
