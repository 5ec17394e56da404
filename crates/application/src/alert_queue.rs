use domain::alert::entity::RawAlertBatch;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Number of batches that may wait between the gateway and the dispatch
/// engine. With one slot a second producer waits until the consumer has
/// taken the first batch.
pub const BACKPRESSURE_CAPACITY: usize = 1;

/// Result of a deadline-bounded enqueue attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// The batch is in the channel and will be dispatched.
    Accepted,
    /// The channel stayed full until the deadline; the batch was dropped.
    TimedOut,
    /// The dispatch engine has stopped; the batch was dropped.
    Closed,
}

/// Producer half of the backpressure channel.
///
/// Cheap to clone; every gateway request holds a clone.
#[derive(Debug, Clone)]
pub struct AlertQueue {
    tx: mpsc::Sender<RawAlertBatch>,
}

/// Create the single-slot backpressure channel.
pub fn alert_queue() -> (AlertQueue, mpsc::Receiver<RawAlertBatch>) {
    let (tx, rx) = mpsc::channel(BACKPRESSURE_CAPACITY);
    (AlertQueue { tx }, rx)
}

impl AlertQueue {
    /// Race "channel accepts the batch" against `deadline`.
    ///
    /// A timed-out attempt leaves the channel untouched: the pending send is
    /// dropped before it reserves a slot.
    pub async fn enqueue(&self, batch: RawAlertBatch, deadline: Instant) -> EnqueueOutcome {
        match tokio::time::timeout_at(deadline, self.tx.send(batch)).await {
            Ok(Ok(())) => EnqueueOutcome::Accepted,
            Ok(Err(_)) => EnqueueOutcome::Closed,
            Err(_) => EnqueueOutcome::TimedOut,
        }
    }
}
