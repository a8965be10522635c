#![forbid(unsafe_code)]

pub mod config;
pub mod form;
pub mod message;
pub mod report;
pub mod session;
