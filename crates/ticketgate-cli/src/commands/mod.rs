pub mod registrations;
pub mod scan;
pub mod status;
pub mod ticket;

use ticketgate_scanner::ScannerError;

/// Default API endpoint of a local node.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:9101";

/// Turn a client error into the CLI's user-facing failure.
pub(crate) fn report_error(endpoint: &str, err: ScannerError) -> anyhow::Result<()> {
    match err {
        ScannerError::Transport(e) => {
            println!("Could not reach node at {}", endpoint);
            println!("  Error: {}", e);
            println!();
            println!("Is the node running? Start it with: ticketgate-node");
            Ok(())
        }
        other => Err(other.into()),
    }
}
