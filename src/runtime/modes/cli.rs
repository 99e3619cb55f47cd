//! One-shot administrative commands

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use tracing::info;

use crate::cli::ConfigCommands;
use crate::config::StaticConfig;
use crate::runtime::lifetime::startup::open_storage;
use crate::services::UserService;

const DEFAULT_SAMPLE_CONFIG_PATH: &str = "config.example.toml";

/// Connect, which applies pending migrations, then exit
pub async fn run_migrate() -> Result<()> {
    let storage = open_storage().await?;
    info!("Migrations applied on {}", storage.get_backend_name());
    println!("{} database is up to date", "✓".green().bold());
    Ok(())
}

pub async fn run_create_admin(email: &str, name: &str) -> Result<()> {
    let storage = open_storage().await?;
    let admin = UserService::new(storage)
        .ensure_admin(email, name)
        .await
        .map_err(|e| anyhow::anyhow!(e.format_colored()))?;
    println!(
        "{} admin {} ready (id {})",
        "✓".green().bold(),
        admin.email.cyan(),
        admin.id
    );
    Ok(())
}

pub fn run_config(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Generate { output_path, force } => {
            let path = output_path.unwrap_or_else(|| DEFAULT_SAMPLE_CONFIG_PATH.to_string());
            if Path::new(&path).exists() && !force {
                bail!("{} already exists, pass --force to overwrite", path);
            }
            StaticConfig::default()
                .save_to_file(&path)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("Failed to write {}", path))?;
            println!("{} sample configuration written to {}", "✓".green().bold(), path);
            Ok(())
        }
    }
}
