//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// url-shortcuts - short codes that redirect to long URLs
#[derive(Parser, Debug)]
#[command(name = "url-shortcuts")]
#[command(version)]
#[command(about = "URL shortener with visit analytics", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Create an active admin, or promote an existing account
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "Admin")]
        name: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
