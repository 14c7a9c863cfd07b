//! Command implementations for the CLI
//!
//! - dashboard: Interactive terminal dashboard
//! - cost: One-shot cost calculation
//! - metrics: One-shot instance metrics lookup
//! - ping: Backend reachability check
//! - config: Configuration display and validation

pub mod config;
pub mod cost;
pub mod dashboard;
pub mod metrics;
pub mod ping;

#[cfg(test)]
pub(crate) fn test_config(base_url: &str) -> cloud_economics::config::Config {
    use cloud_economics::config::{ApiConfig, Config, DashboardConfig, LoggingConfig};

    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            region: None,
            timeout_seconds: Some(5),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "text".to_string(),
            file: None,
        },
        dashboard: DashboardConfig { tick_rate_ms: 100 },
    }
}
