#![forbid(unsafe_code)]

pub mod http;
pub mod push;
pub mod storage;
