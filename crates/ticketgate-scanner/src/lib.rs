//! TicketGate Scanner — Turns decoded QR payloads into verify calls.
//!
//! QR decoding itself happens elsewhere (camera, image tool, operator
//! typing); this crate starts from the decoded text.

pub mod client;
pub mod error;
pub mod extract;
pub mod scan;

pub use client::{VerifierClient, VerifyReply};
pub use error::{ExtractError, ScannerError};
pub use extract::extract_reference_id;
pub use scan::{ScanOutcome, ScanReport, Scanner};
