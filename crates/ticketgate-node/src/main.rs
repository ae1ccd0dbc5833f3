//! TicketGate Node — entry point.
//!
//! Starts the verifier with configuration from a TOML file or defaults.

use clap::Parser;
use std::path::PathBuf;

use ticketgate_node::{logging, TicketGateConfig, TicketGateNode};

/// TicketGate verifier node
#[derive(Parser, Debug)]
#[command(name = "ticketgate-node", version, about = "TicketGate verifier node")]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "ticketgate.toml")]
    config: PathBuf,

    /// Override the API port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the registration seed file.
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Handle --init flag
    if args.init {
        let config = TicketGateConfig::default();
        config.save(&args.config)?;
        println!("wrote default config to {}", args.config.display());
        return Ok(());
    }

    // Load configuration
    let mut config = TicketGateConfig::load(&args.config)?;

    // Apply CLI overrides
    if let Some(api_port) = args.api_port {
        config.api.port = api_port;
    }
    if let Some(seed) = args.seed {
        config.seed.path = Some(seed);
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    logging::init(&config.logging);
    tracing::info!("TicketGate node v{}", env!("CARGO_PKG_VERSION"));

    // Create and start the node
    let mut node = TicketGateNode::new(config)?;
    node.start().await?;

    // Set up graceful shutdown on SIGINT
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
        tracing::info!("received shutdown signal");
    };

    tokio::select! {
        result = node.run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "node event loop error");
            }
        }
        _ = shutdown => {
            tracing::info!("initiating graceful shutdown");
        }
    }

    node.shutdown().await?;
    tracing::info!("TicketGate node exited cleanly");
    Ok(())
}
