use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cloud_economics::{config, init_tracing, LogTarget};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let command = args.get_command();

    if matches!(command, cli::Commands::Version) {
        println!("Cloud Economics v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = config::load_config(&args.config, args.base_url.clone())?;

    // The dashboard owns the terminal, so it logs to a file
    let target = if matches!(command, cli::Commands::Dashboard) {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    let _log_guard = init_tracing(&cfg.logging, target)?;

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Dashboard => commands::dashboard::execute(&cfg).await?,
        cli::Commands::Cost {
            users,
            instance_capacity,
            format,
        } => commands::cost::execute(&cfg, users, instance_capacity, format).await?,
        cli::Commands::Metrics {
            instance_id,
            format,
        } => commands::metrics::execute(&cfg, instance_id, format).await?,
        cli::Commands::Ping => commands::ping::execute(&cfg).await?,
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config, &cfg)?,
        },
        // Printed before configuration is loaded
        cli::Commands::Version => {}
    }

    Ok(())
}
