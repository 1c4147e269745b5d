mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use dossier_archive::Archive;
use dossier_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let config = Config::load()?;
    let archive = Archive::new();

    match cli.command {
        cli::Commands::Archive(cmd) => commands::archive::handle(cmd, &archive, &config),
        cli::Commands::View => commands::view::handle(archive, config).await,
        cli::Commands::Decrypt { id } => commands::oracle::decrypt(&archive, &config, &id).await,
        cli::Commands::Narrate { id } => commands::oracle::narrate(&archive, &config, &id).await,
        cli::Commands::Generate { topic, category } => {
            commands::oracle::generate(&config, &topic, category.as_deref()).await
        }
    }
}
