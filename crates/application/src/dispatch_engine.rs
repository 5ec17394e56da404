use std::sync::Arc;

use domain::alert::entity::{CanonicalAlert, RawAlertBatch};
use domain::alert::extract::extract_alert;
use domain::dispatch::error::DispatchError;
use domain::dispatch::policy::{DispatchOutcome, DispatchPlan, DispatchPolicy};
use ports::secondary::alert_store::AlertStore;
use ports::secondary::push_messenger::PushMessenger;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Dispatch engine application service.
///
/// Drains the backpressure channel, extracts one canonical alert per batch
/// and drives the store/push state machine. Alerts are handled strictly one
/// at a time; failures are logged and never reach the HTTP caller.
pub struct DispatchEngine {
    store: Arc<dyn AlertStore>,
    messenger: Arc<dyn PushMessenger>,
    policy: DispatchPolicy,
}

impl DispatchEngine {
    pub fn new(
        store: Arc<dyn AlertStore>,
        messenger: Arc<dyn PushMessenger>,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            store,
            messenger,
            policy,
        }
    }

    /// Run the state machine for one alert.
    ///
    /// A failed store stops processing (no push). A failed push is reported
    /// but the stored record is left in place.
    pub async fn dispatch(&self, alert: &CanonicalAlert) -> Result<DispatchOutcome, DispatchError> {
        match self.policy.plan(alert) {
            DispatchPlan::StoreAndPush => {
                self.store_alert(alert).await?;
                self.messenger
                    .send(&self.policy.topic, &alert.title, &alert.body)
                    .await
                    .map_err(|source| DispatchError::Push {
                        id: alert.id.clone(),
                        source,
                    })?;
                Ok(DispatchOutcome::StoredAndPushed)
            }
            DispatchPlan::Store => {
                self.store_alert(alert).await?;
                Ok(DispatchOutcome::Stored)
            }
            DispatchPlan::Delete => {
                self.store
                    .delete(&alert.id)
                    .await
                    .map_err(|source| DispatchError::Store {
                        id: alert.id.clone(),
                        source,
                    })?;
                Ok(DispatchOutcome::Deleted)
            }
            DispatchPlan::Reject => Err(DispatchError::InvalidState {
                id: alert.id.clone(),
                state: alert.state,
            }),
        }
    }

    async fn store_alert(&self, alert: &CanonicalAlert) -> Result<(), DispatchError> {
        self.store
            .add(&alert.id, alert)
            .await
            .map_err(|source| DispatchError::Store {
                id: alert.id.clone(),
                source,
            })
    }

    /// Extract and dispatch one queued batch, logging every failure.
    pub async fn process_batch(&self, batch: &RawAlertBatch) {
        for entry in &batch.alerts {
            tracing::debug!(
                receiver = %batch.receiver,
                status = %entry.status,
                fingerprint = %entry.fingerprint,
                labels = ?entry.labels,
                "batch entry"
            );
        }

        let alert = match extract_alert(batch) {
            Ok(alert) => alert,
            Err(e) => {
                tracing::warn!(
                    receiver = %batch.receiver,
                    status = %batch.status,
                    error = %e,
                    "alert batch skipped: extraction failed"
                );
                return;
            }
        };

        match self.dispatch(&alert).await {
            Ok(outcome) => tracing::info!(
                alert_id = %alert.id,
                level = %alert.level,
                state = %alert.state,
                outcome = outcome.as_str(),
                "alert dispatched"
            ),
            Err(e) => tracing::warn!(
                alert_id = %alert.id,
                level = %alert.level,
                state = %alert.state,
                error = %e,
                "alert dispatch failed"
            ),
        }
    }

    /// Async run loop: consumes batches from the channel and processes each
    /// one to completion. On cancellation, batches already queued are drained
    /// before returning.
    pub async fn run(self, mut rx: mpsc::Receiver<RawAlertBatch>, cancel_token: CancellationToken) {
        let mut count: u64 = 0;

        loop {
            tokio::select! {
                () = cancel_token.cancelled() => {
                    while let Ok(batch) = rx.try_recv() {
                        count += 1;
                        self.process_batch(&batch).await;
                    }
                    break;
                }
                msg = rx.recv() => {
                    match msg {
                        Some(batch) => {
                            count += 1;
                            self.process_batch(&batch).await;
                        }
                        None => break,
                    }
                }
            }
        }

        tracing::info!(total_batches = count, "dispatch engine stopped");
    }
}
