pub mod log_messenger;
pub mod webhook_messenger;
