use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use cloud_economics::{client::ApiClient, config::Config};

/// Execute the ping command
///
/// Fetches the backend's welcome message from `/`
pub async fn execute(cfg: &Config) -> Result<()> {
    let client = ApiClient::new(&cfg.api)?;
    println!("{} {}", "Pinging".yellow(), client.base_url());

    let welcome = client
        .ping()
        .await
        .with_context(|| format!("Backend at {} is not reachable", client.base_url()))?;

    info!(message = %welcome.message, "Backend reachable");
    println!("{} {}", "✓".green(), welcome.message);
    Ok(())
}
