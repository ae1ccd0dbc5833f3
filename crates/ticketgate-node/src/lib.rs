//! TicketGate Node — the verifier service.
//!
//! Holds the seeded registrations in memory and checks tickets in over HTTP.

pub mod api;
pub mod commands;
pub mod config;
pub mod logging;
pub mod node;
pub mod state;

pub use config::TicketGateConfig;
pub use node::TicketGateNode;
