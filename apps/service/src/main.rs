use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use uppe_service::monitoring::ProbeExecutor;
use uppe_service::validation::validate_endpoint_url;
use uppe_service::{Config, Orchestrator};

/// Headless uptime monitor
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the config file (defaults to $XDG_CONFIG_HOME/uppe/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Monitor the configured endpoints until interrupted
    Run,
    /// Probe a single URL once and print the result as JSON
    Probe {
        url: String,
        /// Timeout in seconds, defaults to the configured probe timeout
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();
    let cli = Cli::parse();
    let config = Config::from_config(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Run => run(config).await,
        Command::Probe { url, timeout } => {
            validate_endpoint_url(&url).into_result()?;
            let timeout = timeout.map(Duration::from_secs).unwrap_or(config.monitoring.timeout());
            let result = ProbeExecutor::new(timeout)?.probe(&url).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Command::Config => {
            print!("{config}");
            Ok(())
        }
    }
}

async fn run(config: Config) -> Result<()> {
    let orchestrator = Orchestrator::new(config.monitoring.clone())?;
    let seeded = orchestrator.seed(&config.endpoints).await;
    if seeded.is_empty() {
        warn!("No endpoints configured, add [[endpoints]] entries to the config file");
    }

    let mut reports = orchestrator.subscribe();
    orchestrator.start_scheduler();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                orchestrator.stop_scheduler();
                return Ok(());
            }
            report = reports.recv() => match report {
                Ok(_) => log_stats(&orchestrator).await,
                Err(RecvError::Lagged(skipped)) => warn!("Missed {skipped} sweep reports"),
                Err(RecvError::Closed) => return Ok(()),
            },
        }
    }
}

async fn log_stats(orchestrator: &Orchestrator) {
    for endpoint in orchestrator.list_endpoints().await {
        let Some(stats) = orchestrator.get_stats(endpoint.id).await else {
            continue;
        };
        info!(
            id = %endpoint.id,
            status = %stats.status,
            "{}: {:.1}% uptime, {} ms avg over {} checks",
            endpoint.name,
            stats.uptime,
            stats.avg_response_time,
            stats.total_checks
        );
    }
}
