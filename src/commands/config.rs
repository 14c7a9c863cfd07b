use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::info;

use cloud_economics::config::Config;

/// Execute the config show command
///
/// Displays the effective configuration after defaults, file, environment
/// and CLI overrides have been merged
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying effective configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();
    println!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; this prints a summary.
pub fn validate(path: &Path, cfg: &Config) -> Result<()> {
    info!(path = %path.display(), "Configuration validation successful");

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  {}: {}",
        "Config File".cyan(),
        describe_file(path)
    );
    println!("  {}: {}", "Base URL".cyan(), cfg.api.normalized_base_url());
    println!(
        "  {}: {}",
        "Region".cyan(),
        cfg.api.region.as_deref().unwrap_or("(backend default)")
    );
    println!(
        "  {}: {}",
        "Timeout".cyan(),
        cfg.api
            .timeout_seconds
            .map(|s| format!("{}s", s))
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "  {}: {} ({})",
        "Logging".cyan(),
        cfg.logging.level,
        cfg.logging.format
    );
    println!("  {}: {}ms", "Tick Rate".cyan(), cfg.dashboard.tick_rate_ms);
    Ok(())
}

fn describe_file(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_missing_file() {
        let described = describe_file(Path::new("/definitely/not/here.toml"));
        assert!(described.ends_with("(not found, using defaults)"));
    }
}
