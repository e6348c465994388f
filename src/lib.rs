// Library exports for the log file endpoint

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod logs;
