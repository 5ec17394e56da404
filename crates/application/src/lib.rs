#![forbid(unsafe_code)]

pub mod alert_queue;
pub mod dispatch_engine;
