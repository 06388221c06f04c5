mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use clause_config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        cli::Commands::Redact { input, json } => commands::redact::handle(&input, json, &config)?,
        cli::Commands::Entities { input, json } => commands::entities::handle(&input, json, &config)?,
        cli::Commands::Analyze {
            input,
            models,
            json_out,
            text_out,
        } => {
            let outcome = commands::analyze::handle(&input, models, json_out, text_out, config).await?;
            return Ok(ExitCode::from(outcome.exit_code()));
        }
        cli::Commands::Config { path } => commands::config::handle(path, cli.config.as_deref(), &config)?,
    }

    Ok(ExitCode::SUCCESS)
}
