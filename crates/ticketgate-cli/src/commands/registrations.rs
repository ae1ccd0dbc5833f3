//! `ticketgate registrations` — List the registrations a node holds.

use clap::Args;

use ticketgate_scanner::VerifierClient;

use super::{report_error, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct RegistrationsArgs {
    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Print the raw JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: &RegistrationsArgs) -> anyhow::Result<()> {
    let client = VerifierClient::new(&args.endpoint)?;

    let list = match client.registrations().await {
        Ok(list) => list,
        Err(e) => return report_error(&args.endpoint, e),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.registrations.is_empty() {
        println!("No registrations.");
        return Ok(());
    }

    println!("Registrations ({}):", list.count);
    for r in &list.registrations {
        let mark = if r.verified { "x" } else { " " };
        println!(
            "  [{}] #{:<12} {:<24} {:<10} {}",
            mark, r.reference_id, r.name, r.kind, r.day
        );
    }
    Ok(())
}
