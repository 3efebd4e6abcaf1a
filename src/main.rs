//! CopperFlow ML pipeline API entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use copperflow_ml::api::{serve, AppState};
use copperflow_ml::config::Config;
use copperflow_ml::metrics;
use copperflow_ml::pipeline;
use copperflow_ml::pricing::{source_from_config, PriceSource};

/// CopperFlow ML pipeline API.
#[derive(Parser, Debug)]
#[command(name = "copperflow-ml")]
#[command(about = "ML pipeline status, performance and prediction API for CopperFlow")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Query the configured copper price source once.
    CheckPrice,

    /// Print the pipeline summary as JSON.
    Summary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("copperflow_ml=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::CheckPrice) => cmd_check_price().await,
        Some(Command::Summary) => cmd_summary(),
        Some(Command::Serve { port }) => cmd_serve(port).await,
        None => cmd_serve(args.port).await,
    }
}

/// Load and validate configuration, logging failures.
fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("COPPERFLOW ML PIPELINE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Log Level: {}", config.rust_log);
    match (&config.copper_price_url, config.copper_price) {
        (Some(url), _) => println!("  Price Source: HTTP ({})", url),
        (None, Some(price)) => println!("  Price Source: static (${})", price),
        (None, None) => println!("  Price Source: none (fallback only)"),
    }
    println!("  Fallback Price: ${}", config.fallback_price);
    println!("  Retrain Delay: {}ms", config.retrain_delay_ms);
    println!("  Price Timeout: {}ms", config.http_timeout_ms);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Query the price source once and print the quote.
async fn cmd_check_price() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("COPPERFLOW ML PIPELINE - PRICE CHECK");
    println!("======================================================================");

    let config = load_config()?;
    let source = source_from_config(&config)?;
    println!("Source: {}", source.name());

    let start = Instant::now();
    match source.latest_price().await {
        Ok(quote) => {
            println!("OK ({:.1}ms)", start.elapsed().as_secs_f64() * 1000.0);
            match quote.price {
                Some(price) => println!("  Price: ${}", price),
                None => println!(
                    "  Price: missing, predictions will use ${}",
                    config.fallback_price
                ),
            }
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Price check failed"));
        }
    }

    println!("======================================================================");
    Ok(())
}

/// Print the pipeline summary.
fn cmd_summary() -> anyhow::Result<()> {
    let summary = pipeline::summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Run the HTTP API until shutdown.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config()?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    info!("Configuration loaded successfully");
    info!("Fallback price: ${}", config.fallback_price);
    info!("Retrain delay: {}ms", config.retrain_delay_ms);

    let price_source: Arc<dyn PriceSource> = source_from_config(&config)?;
    let mut app_state = AppState::from_config(&config, price_source);

    if config.metrics_enabled {
        match metrics::install_prometheus() {
            Ok(handle) => app_state = app_state.with_prometheus(handle),
            Err(e) => warn!("Prometheus recorder not installed: {}", e),
        }
    }

    pipeline::initialize();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    serve(listener, app_state).await?;
    Ok(())
}
