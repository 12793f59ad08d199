use anyhow::Result;
use clap::Parser;

use espfront::cli::args::{Cli, Commands};
use espfront::cli::commands;
use espfront::config::AppConfig;
use espfront::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logging(cli.verbose, cli.quiet)?;

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        AppConfig::default()
    });

    match cli.command {
        Commands::Ports => commands::run_ports(),
        Commands::Flash {
            port,
            mode,
            size,
            freq,
            no_compress,
            images,
        } => {
            commands::run_flash(
                cli.tool.as_deref(),
                &config,
                port,
                mode,
                size,
                freq,
                no_compress,
                images,
            )
            .await
        }
        Commands::Info { firmware } => {
            commands::run_info(cli.tool.as_deref(), &config, firmware).await
        }
    }
}
