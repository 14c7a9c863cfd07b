pub mod charts;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod models;

pub use logging::{init_tracing, LogTarget};
