use std::future::Future;

use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Token cancelled on the first SIGINT or SIGTERM. Cancelling it stops the
/// HTTP listener; `startup::run` then drains the dispatch engine.
pub fn create_shutdown_token() -> CancellationToken {
    cancel_on(shutdown_signal())
}

/// Spawn a watcher that cancels the returned token once `signal` resolves.
fn cancel_on(signal: impl Future<Output = ()> + Send + 'static) -> CancellationToken {
    let token = CancellationToken::new();
    let watcher = token.clone();
    tokio::spawn(async move {
        signal.await;
        watcher.cancel();
    });
    token
}

async fn shutdown_signal() {
    tokio::select! {
        () = ctrl_c() => tracing::info!(signal = "SIGINT", "shutdown signal received"),
        () = terminate() => tracing::info!(signal = "SIGTERM", "shutdown signal received"),
    }
}

// A handler that fails to install is logged and never resolves, leaving
// the other signal in charge.
async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install SIGINT handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::sync::oneshot;

    #[tokio::test]
    async fn token_is_live_until_signal() {
        let (tx, rx) = oneshot::channel::<()>();
        let token = cancel_on(async move {
            let _ = rx.await;
        });
        tokio::task::yield_now().await;
        assert!(!token.is_cancelled());

        tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn clones_observe_cancellation() {
        let token = cancel_on(std::future::ready(()));
        let clone = token.clone();
        tokio::time::timeout(Duration::from_secs(1), clone.cancelled())
            .await
            .unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn real_signal_token_starts_live() {
        let token = create_shutdown_token();
        assert!(!token.is_cancelled());
    }
}
