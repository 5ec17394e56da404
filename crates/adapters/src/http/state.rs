use application::alert_queue::AlertQueue;

use super::rate_limit::AdmissionGate;

/// Shared state for the gateway routes.
///
/// Passed to Axum handlers via `State(Arc<GatewayState>)`. The gate and the
/// queue are built once at startup and shared by every request.
pub struct GatewayState {
    pub gate: AdmissionGate,
    pub queue: AlertQueue,
}

impl GatewayState {
    pub fn new(gate: AdmissionGate, queue: AlertQueue) -> Self {
        Self { gate, queue }
    }
}
