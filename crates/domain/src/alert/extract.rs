//! Normalization of a webhook batch into a single canonical alert.

use chrono::{DateTime, Utc};

use super::entity::{AlertLevel, AlertState, CanonicalAlert, RawAlertBatch};
use super::error::{ExtractError, RequiredLabel};

/// Common annotation used as the notification summary.
const SUMMARY_ANNOTATION: &str = "summary";

/// Extract a canonical alert stamped with the current wall-clock time.
pub fn extract_alert(batch: &RawAlertBatch) -> Result<CanonicalAlert, ExtractError> {
    extract_alert_at(batch, Utc::now())
}

/// Extract a canonical alert stamped with `now`.
///
/// Only the batch-level status, common labels and common annotations are
/// read; the individual entries and their timestamps are ignored. Either
/// both required labels are present and a full record is returned, or an
/// error naming the first missing label is returned.
pub fn extract_alert_at(
    batch: &RawAlertBatch,
    now: DateTime<Utc>,
) -> Result<CanonicalAlert, ExtractError> {
    let state = AlertState::from_status(&batch.status);

    let severity = required_label(batch, RequiredLabel::Severity)?;
    let level = AlertLevel::from_label(severity);

    // The alert name becomes the record id; a blank one counts as missing.
    let alert_name = required_label(batch, RequiredLabel::AlertName)?;
    if alert_name.is_empty() {
        return Err(ExtractError::MissingField(RequiredLabel::AlertName));
    }

    let summary = batch
        .common_annotations
        .get(SUMMARY_ANNOTATION)
        .map_or("", String::as_str);

    Ok(CanonicalAlert {
        id: alert_name.to_string(),
        title: alert_name.to_string(),
        body: format!("{severity}: {summary}"),
        time: now,
        level,
        state,
    })
}

fn required_label(batch: &RawAlertBatch, label: RequiredLabel) -> Result<&str, ExtractError> {
    batch
        .common_labels
        .get(label.key())
        .map(String::as_str)
        .ok_or(ExtractError::MissingField(label))
}
