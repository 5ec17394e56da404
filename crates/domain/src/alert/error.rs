use thiserror::Error;

/// Common label that must be present for extraction to succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredLabel {
    Severity,
    AlertName,
}

impl RequiredLabel {
    /// Label key looked up in the batch's common labels.
    pub fn key(self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::AlertName => "alertname",
        }
    }
}

impl std::fmt::Display for RequiredLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Severity => f.write_str("severity"),
            Self::AlertName => f.write_str("alert name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("missing {0}")]
    MissingField(RequiredLabel),
}

/// Failure reported by an alert store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("alert already stored: {0}")]
    DuplicateId(String),

    #[error("alert not found: {0}")]
    NotFound(String),

    #[error("alert store unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by a push notification backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    #[error("push service unavailable: {0}")]
    Unavailable(String),
}
