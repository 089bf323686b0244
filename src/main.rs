use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use etlmon::config::AppConfig;
use etlmon::core::Fixture;
use etlmon::{cli, context, logging, sources, web};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "etlmon")]
#[command(about = "ETL Pipeline Monitoring Dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard
    Tui(ClientArgs),
    /// Print the dashboard snapshot as JSON
    Snapshot(ClientArgs),
    /// Print execution history as JSON
    Executions(ExecutionsArgs),
    /// Request a manual pipeline run
    Trigger(ClientArgs),
    /// Serve the fixture API for local development
    Serve(ServeArgs),
}

#[derive(Args, Serialize)]
struct ClientArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    api_base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    mock: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    refresh_interval_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    verbose: Option<bool>,
}

#[derive(Args, Serialize)]
struct ExecutionsArgs {
    #[command(flatten)]
    #[serde(flatten)]
    client: ClientArgs,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    history_limit: Option<u32>,
}

#[derive(Args, Serialize)]
struct ServeArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    http_port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    verbose: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Tui(args) | Commands::Snapshot(args) | Commands::Trigger(args) => {
            AppConfig::new(Some(args))?
        }
        Commands::Executions(args) => AppConfig::new(Some(args))?,
        Commands::Serve(args) => AppConfig::new(Some(args))?,
    };

    // The TUI owns the terminal; log output would corrupt the alternate screen.
    if !matches!(&cli.command, Commands::Tui(_)) {
        logging::init(logging::LogConfig {
            verbose: config.verbose,
            ..Default::default()
        });
    }

    match &cli.command {
        Commands::Tui(_) => run_tui(config).await.context("Failed to run dashboard")?,
        Commands::Snapshot(_) => run_snapshot(config).await?,
        Commands::Executions(_) => run_executions(config).await?,
        Commands::Trigger(_) => run_trigger(config).await?,
        Commands::Serve(_) => run_serve(config)
            .await
            .context("Failed to serve fixture API")?,
    }

    Ok(())
}

async fn run_tui(config: AppConfig) -> Result<()> {
    let source = sources::from_config(&config)?;
    let ctx = context::AppContext::new(config, source);
    cli::tui::run(ctx).await
}

async fn run_snapshot(config: AppConfig) -> Result<()> {
    let source = sources::from_config(&config)?;
    let snapshot = source.dashboard().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

async fn run_executions(config: AppConfig) -> Result<()> {
    let source = sources::from_config(&config)?;
    let executions = source.executions(config.history_limit).await?;
    println!("{}", serde_json::to_string_pretty(&executions)?);
    Ok(())
}

async fn run_trigger(config: AppConfig) -> Result<()> {
    let source = sources::from_config(&config)?;
    let receipt = source.trigger().await?;
    println!("{} (execution {})", receipt.message, receipt.execution_id);
    Ok(())
}

async fn run_serve(config: AppConfig) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.http_port));
    let server = web::WebServer::new(Arc::new(Fixture::demo()), addr);
    server.start().await
}
