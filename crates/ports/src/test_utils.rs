use std::sync::Mutex;

use domain::alert::entity::CanonicalAlert;
use domain::alert::error::{PushError, StoreError};

use crate::secondary::alert_store::{AlertStore, StoreFuture};
use crate::secondary::push_messenger::{PushFuture, PushMessenger};

/// A push call captured by [`RecordingMessenger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentPush {
    pub topic: String,
    pub title: String,
    pub body: String,
}

/// Store double that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    pub added: Mutex<Vec<(String, CanonicalAlert)>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_with: Mutex<Option<StoreError>>,
}

impl RecordingStore {
    pub fn failing(err: StoreError) -> Self {
        let store = Self::default();
        *store.fail_with.lock().unwrap() = Some(err);
        store
    }

    pub fn added(&self) -> Vec<(String, CanonicalAlert)> {
        self.added.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

impl AlertStore for RecordingStore {
    fn add<'a>(&'a self, id: &'a str, alert: &'a CanonicalAlert) -> StoreFuture<'a> {
        Box::pin(async move {
            if let Some(err) = self.fail_with.lock().unwrap().clone() {
                return Err(err);
            }
            self.added
                .lock()
                .unwrap()
                .push((id.to_string(), alert.clone()));
            Ok(())
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> StoreFuture<'a> {
        Box::pin(async move {
            if let Some(err) = self.fail_with.lock().unwrap().clone() {
                return Err(err);
            }
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(())
        })
    }
}

/// Messenger double that records every push and can be told to fail.
#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: Mutex<Vec<SentPush>>,
    pub fail_with: Mutex<Option<PushError>>,
}

impl RecordingMessenger {
    pub fn failing(err: PushError) -> Self {
        let messenger = Self::default();
        *messenger.fail_with.lock().unwrap() = Some(err);
        messenger
    }

    pub fn sent(&self) -> Vec<SentPush> {
        self.sent.lock().unwrap().clone()
    }
}

impl PushMessenger for RecordingMessenger {
    fn send<'a>(&'a self, topic: &'a str, title: &'a str, body: &'a str) -> PushFuture<'a> {
        Box::pin(async move {
            if let Some(err) = self.fail_with.lock().unwrap().clone() {
                return Err(err);
            }
            self.sent.lock().unwrap().push(SentPush {
                topic: topic.to_string(),
                title: title.to_string(),
                body: body.to_string(),
            });
            Ok(())
        })
    }
}
