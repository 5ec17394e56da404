use ports::secondary::push_messenger::{PushFuture, PushMessenger};

/// Push messenger that logs notifications via tracing.
///
/// Used as the default backend when no push endpoint is configured.
pub struct LogPushMessenger;

impl PushMessenger for LogPushMessenger {
    fn send<'a>(&'a self, topic: &'a str, title: &'a str, body: &'a str) -> PushFuture<'a> {
        Box::pin(async move {
            tracing::info!(%topic, %title, %body, "push notification sent to log");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_messenger_succeeds() {
        let result = LogPushMessenger.send("alert", "DiskFull", "ERROR: disk").await;
        assert!(result.is_ok());
    }

    #[test]
    fn log_messenger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LogPushMessenger>();
    }
}
