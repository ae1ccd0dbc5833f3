//! TicketGate CLI — Gate-side scanner and node inspection.
//!
//! Subcommands: scan, status, registrations, ticket.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// TicketGate — event ticket check-in.
#[derive(Parser, Debug)]
#[command(name = "ticketgate", version, about, long_about = None)]
struct Cli {
    /// Log level for diagnostics on stderr.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify decoded QR payloads against a node.
    Scan(commands::scan::ScanArgs),
    /// Query the status of a running node.
    Status(commands::status::StatusArgs),
    /// List every registration a node holds.
    Registrations(commands::registrations::RegistrationsArgs),
    /// Show the ticket card (and QR link) for a registration.
    Ticket(commands::ticket::TicketArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Scan(args) => commands::scan::run(args).await,
        Commands::Status(args) => commands::status::run(args).await,
        Commands::Registrations(args) => commands::registrations::run(args).await,
        Commands::Ticket(args) => commands::ticket::run(args).await,
    }
}
