//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Call command arguments.
#[derive(Debug, Args)]
pub struct CallCommand {
    /// Method name, e.g. getPlatformVersion
    pub method: String,

    /// JSON argument payload
    #[arg(short, long, value_name = "JSON")]
    pub args: Option<String>,

    /// Channel to send the call on (defaults to the configured channel)
    #[arg(long, value_name = "NAME")]
    pub channel: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Channel to answer on (defaults to the configured channel)
    #[arg(long, value_name = "NAME")]
    pub channel: Option<String>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
