//! `ticketgate ticket` — Show a ticket card and the text its QR code encodes.

use clap::Args;

use ticketgate_scanner::{ScannerError, VerifierClient};

use super::{report_error, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct TicketArgs {
    /// Reference id of the registration.
    pub reference_id: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Print only the QR payload.
    #[arg(long)]
    pub link_only: bool,
}

pub async fn run(args: &TicketArgs) -> anyhow::Result<()> {
    let client = VerifierClient::new(&args.endpoint)?;

    let card = match client.ticket(&args.reference_id).await {
        Ok(card) => card,
        Err(ScannerError::Http { status: 404, .. }) => {
            anyhow::bail!("no registration with reference id {}", args.reference_id)
        }
        Err(e) => return report_error(&args.endpoint, e),
    };

    if args.link_only {
        println!("{}", card.link);
        return Ok(());
    }

    println!("{} — {}", card.event_name, card.kind);
    println!("  {}", card.day);
    println!();
    println!("  {}", card.username);
    println!("  {}", card.name);
    println!("  Team:     {}", card.team_name);
    println!("  Time:     {}", card.event_time);
    println!("  Booking:  #{}", card.reference_id);
    println!("  QR:       {}", card.link);
    Ok(())
}
