use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cloud_economics::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "cloud-economics", version, about = "Cloud Economics Dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Backend base URL (overrides config and environment)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard,

    /// Calculate costs for an expected load
    Cost {
        /// Expected API calls
        #[arg(short, long)]
        users: String,

        /// Calls one instance can serve
        #[arg(short, long)]
        instance_capacity: String,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the compiled metrics of an instance
    Metrics {
        /// EC2 instance ID
        #[arg(short, long)]
        instance_id: String,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check that the backend is reachable
    Ping,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration
    Validate,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Get the command to execute, defaulting to Dashboard if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Dashboard)
    }
}
