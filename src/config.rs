use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "cloud-economics.toml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const ENV_PREFIX: &str = "CLOUD_ECONOMICS";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Pricing region forwarded to the cost endpoint, backend default if unset
    #[serde(default)]
    pub region: Option<String>,
    /// Per-request timeout; the transport default applies if unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    pub tick_rate_ms: u64,
}

impl ApiConfig {
    /// Base URL without trailing slashes
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl DashboardConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// Load configuration from defaults, the optional file at `path`, the
/// environment and finally the CLI base URL override
///
/// Environment variables use the `CLOUD_ECONOMICS_` prefix and `__` as
/// the section separator, e.g. `CLOUD_ECONOMICS_API__BASE_URL`.
pub fn load_config(path: &Path, base_url_override: Option<String>) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("dashboard.tick_rate_ms", 100_i64)?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("api.base_url", base_url_override)?
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    let url = url::Url::parse(cfg.api.normalized_base_url())
        .map_err(|e| anyhow::anyhow!("Invalid api.base_url '{}': {}", cfg.api.base_url, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!(
            "Invalid api.base_url '{}': scheme must be http or https",
            cfg.api.base_url
        );
    }
    if url.query().is_some() {
        anyhow::bail!(
            "Invalid api.base_url '{}': must not carry a query string",
            cfg.api.base_url
        );
    }

    if let Some(region) = &cfg.api.region {
        if region.trim().is_empty() {
            anyhow::bail!("api.region cannot be empty when set");
        }
    }

    if cfg.api.timeout_seconds == Some(0) {
        anyhow::bail!("api.timeout_seconds must be greater than 0");
    }

    match cfg.logging.format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid logging.format '{}'. Must be one of: text, json", other),
    }

    if !(10..=1000).contains(&cfg.dashboard.tick_rate_ms) {
        anyhow::bail!(
            "Invalid dashboard.tick_rate_ms: {}. Must be between 10 and 1000",
            cfg.dashboard.tick_rate_ms
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_config() -> Config {
        Config {
            api: ApiConfig {
                base_url: "http://localhost:8000/".to_string(),
                region: None,
                timeout_seconds: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
                file: None,
            },
            dashboard: DashboardConfig { tick_rate_ms: 100 },
        }
    }

    #[test]
    fn test_valid_config() {
        let cfg = create_test_config();
        assert!(validate_config(&cfg).is_ok());
        assert_eq!(cfg.api.normalized_base_url(), "http://localhost:8000");
        assert!(cfg.api.timeout().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let mut cfg = create_test_config();
        cfg.api.base_url = "ftp://example.com".to_string();

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("scheme must be http or https"));
    }

    #[test]
    fn test_validate_rejects_unparseable_url() {
        let mut cfg = create_test_config();
        cfg.api.base_url = "not a url".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut cfg = create_test_config();
        cfg.logging.format = "xml".to_string();

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("Invalid logging.format"));
    }

    #[test]
    fn test_validate_rejects_tick_rate_out_of_range() {
        let mut cfg = create_test_config();
        cfg.dashboard.tick_rate_ms = 5;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut cfg = create_test_config();
        cfg.api.timeout_seconds = Some(0);
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_load_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml"), None).unwrap();

        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.dashboard.tick_rate_ms, 100);
    }

    #[test]
    fn test_load_from_file_and_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://costs.example.com/"
region = "EU (Ireland)"
timeout_seconds = 15

[dashboard]
tick_rate_ms = 250
"#
        )
        .unwrap();

        let cfg = load_config(file.path(), None).unwrap();
        assert_eq!(cfg.api.normalized_base_url(), "https://costs.example.com");
        assert_eq!(cfg.api.region.as_deref(), Some("EU (Ireland)"));
        assert_eq!(cfg.api.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(cfg.dashboard.tick_rate_ms, 250);

        let cfg = load_config(file.path(), Some("http://127.0.0.1:9000".to_string())).unwrap();
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:9000");
    }
}
