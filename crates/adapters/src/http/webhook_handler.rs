use std::sync::Arc;

use application::alert_queue::EnqueueOutcome;
use axum::Extension;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use domain::alert::entity::RawAlertBatch;

use super::rate_limit::EnqueueDeadline;
use super::response::GatewayResponse;
use super::state::GatewayState;

/// Webhook receiver: decode the batch and hand it to the dispatch channel.
///
/// Runs behind the admission middleware, which supplies the deadline.
/// Responds as soon as the batch is queued; dispatch results never reach
/// the caller.
pub async fn receive_alerts(
    State(state): State<Arc<GatewayState>>,
    Extension(EnqueueDeadline(deadline)): Extension<EnqueueDeadline>,
    body: Result<Bytes, BytesRejection>,
) -> GatewayResponse {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let message = rejection.body_text();
            tracing::warn!(error = %message, "webhook body could not be read");
            return GatewayResponse::bad_request(message);
        }
    };

    let batch: RawAlertBatch = match serde_json::from_slice(&body) {
        Ok(batch) => batch,
        Err(e) => {
            tracing::warn!(error = %e, bytes = body.len(), "webhook payload rejected");
            return GatewayResponse::bad_request(e.to_string());
        }
    };

    let receiver = batch.receiver.clone();
    let entries = batch.alerts.len();

    match state.queue.enqueue(batch, deadline).await {
        EnqueueOutcome::Accepted => {
            tracing::debug!(%receiver, entries, "alert batch queued");
            GatewayResponse::success()
        }
        EnqueueOutcome::TimedOut => {
            tracing::warn!(%receiver, entries, "alert batch dropped: dispatch queue full");
            GatewayResponse::from_status(StatusCode::REQUEST_TIMEOUT)
        }
        EnqueueOutcome::Closed => {
            tracing::warn!(%receiver, entries, "alert batch dropped: dispatch engine stopped");
            GatewayResponse::from_status(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use application::alert_queue::alert_queue;
    use tokio::time::Instant;

    use crate::http::rate_limit::AdmissionGate;

    fn state_with_rx() -> (
        Arc<GatewayState>,
        tokio::sync::mpsc::Receiver<RawAlertBatch>,
    ) {
        let (queue, rx) = alert_queue();
        let gate = AdmissionGate::new(100.0, 100, Duration::from_secs(1)).unwrap();
        (Arc::new(GatewayState::new(gate, queue)), rx)
    }

    fn deadline_in(secs: u64) -> Extension<EnqueueDeadline> {
        Extension(EnqueueDeadline(Instant::now() + Duration::from_secs(secs)))
    }

    #[tokio::test]
    async fn valid_batch_is_queued() {
        let (state, mut rx) = state_with_rx();
        let body = Bytes::from_static(br#"{"receiver":"push","status":"firing"}"#);

        let resp = receive_alerts(State(state), deadline_in(1), Ok(body)).await;
        assert_eq!(resp, GatewayResponse::success());

        let queued = rx.recv().await.unwrap();
        assert_eq!(queued.receiver, "push");
        assert_eq!(queued.status, "firing");
    }

    #[tokio::test]
    async fn empty_body_is_bad_request_with_decode_text() {
        let (state, mut rx) = state_with_rx();
        let resp = receive_alerts(State(state), deadline_in(1), Ok(Bytes::new())).await;
        assert_eq!(resp.status, 400);
        assert_eq!(resp.message, "EOF while parsing a value at line 1 column 0");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn wrong_shape_is_bad_request() {
        let (state, _rx) = state_with_rx();
        let body = Bytes::from_static(br#"{"alerts": "not-a-list"}"#);
        let resp = receive_alerts(State(state), deadline_in(1), Ok(body)).await;
        assert_eq!(resp.status, 400);
        assert!(resp.message.contains("invalid type"), "got: {}", resp.message);
    }

    #[tokio::test(start_paused = true)]
    async fn full_queue_times_out() {
        let (state, mut rx) = state_with_rx();
        let first = Bytes::from_static(br#"{"receiver":"a"}"#);
        let second = Bytes::from_static(br#"{"receiver":"b"}"#);

        let resp = receive_alerts(State(Arc::clone(&state)), deadline_in(5), Ok(first)).await;
        assert_eq!(resp.status, 200);

        let resp = receive_alerts(State(Arc::clone(&state)), deadline_in(5), Ok(second)).await;
        assert_eq!(resp, GatewayResponse::from_status(StatusCode::REQUEST_TIMEOUT));

        assert_eq!(rx.recv().await.unwrap().receiver, "a");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn stopped_engine_is_service_unavailable() {
        let (state, rx) = state_with_rx();
        drop(rx);
        let body = Bytes::from_static(b"{}");
        let resp = receive_alerts(State(state), deadline_in(1), Ok(body)).await;
        assert_eq!(resp.status, 503);
        assert_eq!(resp.message, "Service Unavailable");
    }
}
