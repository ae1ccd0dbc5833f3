//! `ticketgate scan` — Verify decoded QR payloads.

use clap::Args;
use std::fmt::Write as _;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use ticketgate_scanner::{ScanReport, Scanner, VerifierClient};

use super::DEFAULT_ENDPOINT;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Decoded QR payloads (registration links or bare reference ids).
    /// Reads one payload per line from stdin when none are given. Every
    /// line is scanned, so a blank line is reported as INVALID_FORMAT.
    pub payloads: Vec<String>,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Exit with an error if any scan did not admit the ticket holder.
    #[arg(long)]
    pub strict: bool,
}

pub async fn run(args: &ScanArgs) -> anyhow::Result<()> {
    let scanner = Scanner::new(VerifierClient::new(&args.endpoint)?);

    if args.payloads.is_empty() {
        let stdin = BufReader::new(tokio::io::stdin());
        scan_lines(&scanner, stdin, args.strict).await?;
    } else {
        scan_payloads(&scanner, &args.payloads, args.strict).await?;
    }
    Ok(())
}

/// Scan each payload in order, printing reports as they arrive.
async fn scan_payloads<I, S>(
    scanner: &Scanner,
    payloads: I,
    strict: bool,
) -> anyhow::Result<Vec<ScanReport>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reports = Vec::new();
    for payload in payloads {
        reports.push(scan_and_print(scanner, payload.as_ref()).await);
    }
    check_admitted(reports, strict)
}

/// Scan one payload per line until `reader` is exhausted.
async fn scan_lines<R>(
    scanner: &Scanner,
    reader: R,
    strict: bool,
) -> anyhow::Result<Vec<ScanReport>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut reports = Vec::new();
    while let Some(line) = lines.next_line().await? {
        reports.push(scan_and_print(scanner, &line).await);
    }
    check_admitted(reports, strict)
}

async fn scan_and_print(scanner: &Scanner, payload: &str) -> ScanReport {
    let report = scanner.scan(payload).await;
    tracing::debug!(payload, code = report.outcome.code(), "scanned payload");
    println!("{}", format_report(&report));
    report
}

/// In strict mode any report that did not admit the holder fails the batch.
fn check_admitted(reports: Vec<ScanReport>, strict: bool) -> anyhow::Result<Vec<ScanReport>> {
    let rejected = reports.iter().filter(|r| !r.outcome.is_admissible()).count();
    if strict && rejected > 0 {
        anyhow::bail!("{} scan(s) did not admit the ticket holder", rejected);
    }
    Ok(reports)
}

fn format_report(report: &ScanReport) -> String {
    let mut out = format!("[{}] {}", report.outcome.code(), report.outcome);
    match &report.reference_id {
        Some(id) => {
            let _ = write!(out, "\n  Reference ID: #{}", id);
        }
        None => {
            let _ = write!(out, "\n  Payload:      {:?}", report.payload);
        }
    }
    if let Some(r) = report.outcome.record() {
        let _ = write!(out, "\n  Name:         {}", r.name);
        let _ = write!(out, "\n  Username:     {}", r.username);
        let _ = write!(out, "\n  Type:         {}", r.kind);
        let _ = write!(out, "\n  Event:        {}", r.event_name);
        let _ = write!(out, "\n  Time:         {}", r.event_time);
        let _ = write!(out, "\n  Team:         {}", r.team_name);
        let _ = write!(out, "\n  Day:          {}", r.day);
    }
    out
}
