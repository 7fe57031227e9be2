use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cryptocharger_core::DashboardConfig;
use cryptocharger_engine::Dashboard;
use cryptocharger_exchanges::{build_adapters, ReqwestTransport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cryptocharger")]
#[command(about = "Compare spot prices for crypto pairs across exchanges")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Path to a TOML config file (defaults are built in)
    #[arg(short, long, env = "CRYPTOCHARGER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the price dashboard
    Serve {
        /// Bind address (overrides the config file)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Fetch all prices once and print the table
    Show,

    /// List configured exchanges
    Exchanges,

    /// List configured pairs
    Pairs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let dashboard = build_dashboard(&config)?;
            cryptocharger_api::start_server(dashboard, &bind).await?;
        }
        Commands::Show => {
            let dashboard = build_dashboard(&config)?;
            let snapshot = dashboard.refresh().await?;
            print!("{}", cryptocharger_engine::render_text(&snapshot));
        }
        Commands::Exchanges => {
            println!("Configured exchanges:");
            for adapter in build_adapters(&config.exchanges) {
                println!("  {:<10} {}", adapter.name(), adapter.base_url());
            }
        }
        Commands::Pairs => {
            println!("Configured pairs:");
            for pair in &config.pairs {
                println!("  {}", pair);
            }
        }
    }

    Ok(())
}

fn build_dashboard(config: &DashboardConfig) -> Result<Dashboard> {
    let transport = ReqwestTransport::new(&config.http)?;

    tracing::info!(
        exchanges = config.exchanges.len(),
        pairs = config.pairs.len(),
        timeout_secs = config.http.timeout_secs,
        retries = config.http.retries,
        "Building dashboard"
    );

    Ok(Dashboard::new(
        config.title.clone(),
        build_adapters(&config.exchanges),
        config.pairs.clone(),
        Arc::new(transport),
    ))
}
