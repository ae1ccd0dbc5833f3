//! Shared node state for cross-task communication.

use std::time::Instant;
use tokio::sync::mpsc;

use crate::commands::NodeCommand;

/// Shared state for the running node, accessible from HTTP handlers.
///
/// Registrations are not in here: the event loop owns them and handlers
/// reach them only through `command_tx`.
pub struct NodeState {
    /// When the node started.
    pub start_time: Instant,
    /// Channel to send commands to the event loop.
    pub command_tx: mpsc::Sender<NodeCommand>,
}

impl NodeState {
    pub fn new(command_tx: mpsc::Sender<NodeCommand>) -> Self {
        Self {
            start_time: Instant::now(),
            command_tx,
        }
    }
}
