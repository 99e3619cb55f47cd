use clap::Parser;
use colored::Colorize;

use url_shortcuts::cli::{Cli, Commands};
use url_shortcuts::config::{DEFAULT_CONFIG_PATH, get_config, init_config_from};
use url_shortcuts::runtime::modes::{cli, run_server};
use url_shortcuts::system::logging::init_logging;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

    // 配置生成不需要加载现有配置
    let command = match args.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = cli::run_config(action) {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
            return;
        }
        other => other.unwrap_or(Commands::Serve),
    };

    init_config_from(config_path);
    let config = get_config();

    // 日志 guard 必须活到进程结束
    let _log_guard = match init_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {:#}", "Failed to initialize logging:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let result = match command {
        Commands::Serve => run_server(&config).await,
        Commands::Migrate => cli::run_migrate().await,
        Commands::CreateAdmin { email, name } => cli::run_create_admin(&email, &name).await,
        Commands::Config { .. } => Ok(()),
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
