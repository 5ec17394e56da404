use std::path::Path;
use std::sync::Mutex;

use domain::alert::entity::CanonicalAlert;
use domain::alert::error::StoreError;
use ports::secondary::alert_store::{AlertStore, StoreFuture};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};

/// redb table: key = alert id, value = JSON-serialized stored record
/// (`title`, `body`, `timestamp`, `level`).
const ALERT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("alerts");

/// Persistent alert store backed by redb.
///
/// Same create-only / delete-existing policy as the in-memory store. Any
/// redb or serialization failure is reported as `Unavailable`.
pub struct RedbAlertStore {
    db: Database,
    /// Serialize writes so the existence check and the insert/remove are
    /// one step.
    write_lock: Mutex<()>,
}

impl RedbAlertStore {
    /// Open (or create) a redb database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::create(path)
            .map_err(|e| StoreError::Unavailable(format!("redb open failed: {e}")))?;

        // Ensure the table exists.
        let txn = db
            .begin_write()
            .map_err(|e| StoreError::Unavailable(format!("redb txn begin: {e}")))?;
        {
            let _table = txn
                .open_table(ALERT_TABLE)
                .map_err(|e| StoreError::Unavailable(format!("redb table create: {e}")))?;
        }
        txn.commit()
            .map_err(|e| StoreError::Unavailable(format!("redb commit: {e}")))?;

        Ok(Self {
            db,
            write_lock: Mutex::new(()),
        })
    }

    #[cfg(test)]
    pub(crate) fn get(&self, id: &str) -> Result<Option<CanonicalAlert>, StoreError> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Unavailable(format!("redb read txn: {e}")))?;
        let table = txn
            .open_table(ALERT_TABLE)
            .map_err(|e| StoreError::Unavailable(format!("redb read table: {e}")))?;

        let result = table
            .get(id)
            .map_err(|e| StoreError::Unavailable(format!("redb get: {e}")))?;

        match result {
            Some(guard) => {
                let mut alert: CanonicalAlert = serde_json::from_slice(guard.value())
                    .map_err(|e| StoreError::Unavailable(format!("deserialize: {e}")))?;
                // The key is the id; it is not part of the stored document.
                alert.id = id.to_string();
                Ok(Some(alert))
            }
            None => Ok(None),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize, StoreError> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Unavailable(format!("redb count txn: {e}")))?;
        let table = txn
            .open_table(ALERT_TABLE)
            .map_err(|e| StoreError::Unavailable(format!("redb count table: {e}")))?;
        let count = table
            .len()
            .map_err(|e| StoreError::Unavailable(format!("redb count: {e}")))?;
        #[allow(clippy::cast_possible_truncation)]
        Ok(count as usize)
    }

    fn insert(&self, id: &str, alert: &CanonicalAlert) -> Result<(), StoreError> {
        let _lock = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;

        let value = serde_json::to_vec(alert)
            .map_err(|e| StoreError::Unavailable(format!("serialize: {e}")))?;

        let txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Unavailable(format!("redb write txn: {e}")))?;
        {
            let mut table = txn
                .open_table(ALERT_TABLE)
                .map_err(|e| StoreError::Unavailable(format!("redb write table: {e}")))?;
            let exists = table
                .get(id)
                .map_err(|e| StoreError::Unavailable(format!("redb get: {e}")))?
                .is_some();
            if exists {
                return Err(StoreError::DuplicateId(id.to_string()));
            }
            table
                .insert(id, value.as_slice())
                .map_err(|e| StoreError::Unavailable(format!("redb insert: {e}")))?;
        }
        txn.commit()
            .map_err(|e| StoreError::Unavailable(format!("redb write commit: {e}")))?;

        Ok(())
    }

    fn remove(&self, id: &str) -> Result<(), StoreError> {
        let _lock = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;

        let txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Unavailable(format!("redb write txn: {e}")))?;
        {
            let mut table = txn
                .open_table(ALERT_TABLE)
                .map_err(|e| StoreError::Unavailable(format!("redb write table: {e}")))?;
            let removed = table
                .remove(id)
                .map_err(|e| StoreError::Unavailable(format!("redb remove: {e}")))?
                .is_some();
            if !removed {
                return Err(StoreError::NotFound(id.to_string()));
            }
        }
        txn.commit()
            .map_err(|e| StoreError::Unavailable(format!("redb write commit: {e}")))?;

        Ok(())
    }
}

impl AlertStore for RedbAlertStore {
    fn add<'a>(&'a self, id: &'a str, alert: &'a CanonicalAlert) -> StoreFuture<'a> {
        Box::pin(async move { self.insert(id, alert) })
    }

    fn delete<'a>(&'a self, id: &'a str) -> StoreFuture<'a> {
        Box::pin(async move { self.remove(id) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use domain::alert::entity::{AlertLevel, AlertState};
    use tempfile::NamedTempFile;

    fn make_store() -> (RedbAlertStore, NamedTempFile) {
        let tmp = NamedTempFile::new().unwrap();
        let store = RedbAlertStore::open(tmp.path()).unwrap();
        (store, tmp)
    }

    fn sample_alert(id: &str, level: AlertLevel) -> CanonicalAlert {
        CanonicalAlert {
            id: id.to_string(),
            title: id.to_string(),
            body: format!("{level}: disk at 95%"),
            time: DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            level,
            state: AlertState::Triggered,
        }
    }

    #[tokio::test]
    async fn add_and_get() {
        let (store, _tmp) = make_store();
        let alert = sample_alert("DiskFull", AlertLevel::Warning);
        store.add("DiskFull", &alert).await.unwrap();

        let loaded = store.get("DiskFull").unwrap().unwrap();
        assert_eq!(loaded.id, "DiskFull");
        assert_eq!(loaded.title, alert.title);
        assert_eq!(loaded.body, alert.body);
        assert_eq!(loaded.time, alert.time);
        assert_eq!(loaded.level, AlertLevel::Warning);
        // State is not persisted.
        assert_eq!(loaded.state, AlertState::Unknown);
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let (store, _tmp) = make_store();
        assert!(store.get("nope").unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_add_is_rejected() {
        let (store, _tmp) = make_store();
        let alert = sample_alert("DiskFull", AlertLevel::Error);
        store.add("DiskFull", &alert).await.unwrap();
        let err = store.add("DiskFull", &alert).await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("DiskFull".to_string()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_existing_and_missing() {
        let (store, _tmp) = make_store();
        store
            .add("DiskFull", &sample_alert("DiskFull", AlertLevel::Info))
            .await
            .unwrap();
        store.delete("DiskFull").await.unwrap();
        assert_eq!(store.len().unwrap(), 0);

        let err = store.delete("DiskFull").await.unwrap_err();
        assert_eq!(err, StoreError::NotFound("DiskFull".to_string()));
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let tmp = NamedTempFile::new().unwrap();
        {
            let store = RedbAlertStore::open(tmp.path()).unwrap();
            store
                .add("DiskFull", &sample_alert("DiskFull", AlertLevel::Error))
                .await
                .unwrap();
        }
        let store = RedbAlertStore::open(tmp.path()).unwrap();
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(
            store.get("DiskFull").unwrap().unwrap().level,
            AlertLevel::Error
        );
    }

    #[test]
    fn open_in_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("alerts.redb");
        assert!(matches!(
            RedbAlertStore::open(&path),
            Err(StoreError::Unavailable(_))
        ));
    }
}
