pub mod memory_alert_store;
pub mod redb_alert_store;
