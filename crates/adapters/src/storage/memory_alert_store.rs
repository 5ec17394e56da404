use std::collections::HashMap;
use std::sync::Mutex;

use domain::alert::entity::CanonicalAlert;
use domain::alert::error::StoreError;
use ports::secondary::alert_store::{AlertStore, StoreFuture};

/// Process-local alert store.
///
/// Records live until they are deleted or the process exits. Adding an id
/// that is already present fails with `DuplicateId`; deleting a missing id
/// fails with `NotFound`.
#[derive(Default)]
pub struct MemoryAlertStore {
    alerts: Mutex<HashMap<String, CanonicalAlert>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, id: &str) -> Result<Option<CanonicalAlert>, StoreError> {
        let alerts = self
            .alerts
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(alerts.get(id).cloned())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> Result<usize, StoreError> {
        let alerts = self
            .alerts
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(alerts.len())
    }

    fn insert(&self, id: &str, alert: &CanonicalAlert) -> Result<(), StoreError> {
        let mut alerts = self
            .alerts
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;
        if alerts.contains_key(id) {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        alerts.insert(id.to_string(), alert.clone());
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut alerts = self
            .alerts
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;
        alerts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

impl AlertStore for MemoryAlertStore {
    fn add<'a>(&'a self, id: &'a str, alert: &'a CanonicalAlert) -> StoreFuture<'a> {
        Box::pin(async move { self.insert(id, alert) })
    }

    fn delete<'a>(&'a self, id: &'a str) -> StoreFuture<'a> {
        Box::pin(async move { self.remove(id) })
    }
}
