use std::time::Duration;

use domain::alert::error::PushError;
use ports::secondary::push_messenger::{PushFuture, PushMessenger};
use serde::{Deserialize, Serialize};

/// Body POSTed to the push endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    pub topic: String,
    pub notification: Notification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Push messenger that POSTs a topic notification as JSON to an HTTP
/// endpoint. One attempt per notification; a transport error or a
/// non-2xx status is reported as `Unavailable`.
pub struct WebhookPushMessenger {
    client: reqwest::Client,
    url: String,
}

impl WebhookPushMessenger {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PushError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PushError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl PushMessenger for WebhookPushMessenger {
    fn send<'a>(&'a self, topic: &'a str, title: &'a str, body: &'a str) -> PushFuture<'a> {
        Box::pin(async move {
            let payload = PushPayload {
                topic: topic.to_string(),
                notification: Notification {
                    title: title.to_string(),
                    body: body.to_string(),
                },
            };

            let response = self
                .client
                .post(&self.url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| PushError::Unavailable(format!("push POST failed: {e}")))?;

            if response.status().is_success() {
                tracing::debug!(%topic, %title, status = %response.status(), "push notification delivered");
                Ok(())
            } else {
                Err(PushError::Unavailable(format!(
                    "push endpoint returned HTTP {}",
                    response.status()
                )))
            }
        })
    }
}
