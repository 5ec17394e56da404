use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use thiserror::Error;
use tokio::time::Instant;

use super::response::GatewayResponse;
use super::state::GatewayState;

/// Process-wide token bucket: one shared bucket, no per-client keys.
type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateLimitError {
    #[error("invalid rate {0}: must be a finite number of tokens per second > 0")]
    InvalidRate(f64),

    #[error("invalid burst: must be > 0")]
    InvalidBurst,
}

/// Point in time by which an admitted request must have handed its batch
/// to the dispatch channel. Inserted into the request extensions by
/// [`admission_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnqueueDeadline(pub Instant);

/// Admission control for the webhook route.
///
/// Wraps a `governor` token bucket that starts full with `burst` tokens
/// and refills at `rate` tokens per second (fractional rates allowed).
/// Checking a token is a single atomic update, so concurrent requests
/// never over-admit.
pub struct AdmissionGate {
    limiter: DirectLimiter,
    enqueue_timeout: Duration,
}

impl AdmissionGate {
    pub fn new(rate: f64, burst: u32, enqueue_timeout: Duration) -> Result<Self, RateLimitError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RateLimitError::InvalidRate(rate));
        }
        let period =
            Duration::try_from_secs_f64(rate.recip()).map_err(|_| RateLimitError::InvalidRate(rate))?;
        let burst = NonZeroU32::new(burst).ok_or(RateLimitError::InvalidBurst)?;
        let quota = Quota::with_period(period)
            .ok_or(RateLimitError::InvalidRate(rate))?
            .allow_burst(burst);

        Ok(Self {
            limiter: RateLimiter::direct(quota),
            enqueue_timeout,
        })
    }

    /// Take one token. On success returns the enqueue deadline for the
    /// admitted request; `None` means the bucket is empty.
    pub fn try_admit(&self) -> Option<EnqueueDeadline> {
        if self.limiter.check().is_err() {
            return None;
        }
        Some(EnqueueDeadline(Instant::now() + self.enqueue_timeout))
    }
}

/// Axum middleware guarding the webhook route.
///
/// Rejects with 429 before the body is read when no token is available;
/// otherwise stamps the [`EnqueueDeadline`] and forwards the request.
pub async fn admission_middleware(
    State(state): State<Arc<GatewayState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(deadline) = state.gate.try_admit() else {
        tracing::debug!(path = %request.uri().path(), "webhook request rejected: rate limited");
        return GatewayResponse::from_status(StatusCode::TOO_MANY_REQUESTS).into_response();
    };

    request.extensions_mut().insert(deadline);
    next.run(request).await
}
