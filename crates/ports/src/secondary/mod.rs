pub mod alert_store;
pub mod push_messenger;
