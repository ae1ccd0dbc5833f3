//! `ticketgate status` — Query the status of a running node.

use clap::Args;

use ticketgate_scanner::VerifierClient;

use super::{report_error, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

pub async fn run(args: &StatusArgs) -> anyhow::Result<()> {
    let client = VerifierClient::new(&args.endpoint)?;

    match client.status().await {
        Ok(status) => {
            println!("Node Status:");
            println!("  Version:    {}", status.version);
            println!("  Uptime:     {}s", status.uptime_secs);
            println!("  Tickets:    {}", status.total);
            println!("  Verified:   {}", status.verified);
            println!("  Pending:    {}", status.pending);
            Ok(())
        }
        Err(e) => report_error(&args.endpoint, e),
    }
}
