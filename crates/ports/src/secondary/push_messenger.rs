use std::future::Future;
use std::pin::Pin;

use domain::alert::error::PushError;

/// Boxed future returned by push operations.
pub type PushFuture<'a> = Pin<Box<dyn Future<Output = Result<(), PushError>> + Send + 'a>>;

/// Secondary port for sending a push notification to every subscriber of
/// a topic.
pub trait PushMessenger: Send + Sync {
    fn send<'a>(&'a self, topic: &'a str, title: &'a str, body: &'a str) -> PushFuture<'a>;
}
