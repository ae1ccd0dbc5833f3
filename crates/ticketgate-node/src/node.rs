//! The TicketGate node orchestrator.
//!
//! Loads the registrations, runs the HTTP API in a background task and
//! processes API commands one at a time in the main event loop.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use ticketgate_core::RegistrationRegistry;

use crate::commands::NodeCommand;
use crate::config::TicketGateConfig;
use crate::state::NodeState;

/// Capacity of the API → event loop command channel.
const COMMAND_CHANNEL_CAPACITY: usize = 256;

/// The verifier node.
pub struct TicketGateNode {
    /// Node configuration.
    config: TicketGateConfig,
    /// Registrations; moved into the event loop by `run`.
    registry: Option<RegistrationRegistry>,
    /// Shared state accessible from HTTP handlers.
    node_state: Option<Arc<NodeState>>,
    /// Receives commands from the HTTP API.
    command_rx: Option<mpsc::Receiver<NodeCommand>>,
    /// Address the API actually bound to.
    api_addr: Option<SocketAddr>,
}

impl TicketGateNode {
    /// Create a node, loading registrations from the configured seed.
    pub fn new(config: TicketGateConfig) -> Result<Self> {
        let source = config.registration_source();
        let registry = RegistrationRegistry::from_source(source.as_ref()).map_err(|e| {
            anyhow::anyhow!("failed to load registrations from {}: {}", source.describe(), e)
        })?;

        tracing::info!(
            seed = %source.describe(),
            registrations = registry.len(),
            "TicketGate node created"
        );

        Ok(Self::with_registry(config, registry))
    }

    /// Create a node around an already built registry.
    pub fn with_registry(config: TicketGateConfig, registry: RegistrationRegistry) -> Self {
        Self {
            config,
            registry: Some(registry),
            node_state: None,
            command_rx: None,
            api_addr: None,
        }
    }

    /// Bind the HTTP API and spawn it. Returns the bound address.
    pub async fn start(&mut self) -> Result<SocketAddr> {
        tracing::info!("starting TicketGate node");

        let (command_tx, command_rx) = mpsc::channel::<NodeCommand>(COMMAND_CHANNEL_CAPACITY);
        let node_state = Arc::new(NodeState::new(command_tx));

        let listener = TcpListener::bind(self.config.api_addr()?).await?;
        let api_addr = listener.local_addr()?;

        let api_state = node_state.clone();
        tokio::spawn(async move {
            if let Err(e) = crate::api::serve_api(listener, api_state).await {
                tracing::error!(error = %e, "HTTP API server error");
            }
        });

        self.node_state = Some(node_state);
        self.command_rx = Some(command_rx);
        self.api_addr = Some(api_addr);

        Ok(api_addr)
    }

    /// Run the main event loop: handles API commands until the channel closes.
    pub async fn run(&mut self) -> Result<()> {
        let mut command_rx = self
            .command_rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("node not started"))?;
        let mut registry = self
            .registry
            .take()
            .ok_or_else(|| anyhow::anyhow!("node already ran"))?;
        let link_base = self.config.ticket.link_base.clone();

        tracing::info!("entering main event loop");

        while let Some(cmd) = command_rx.recv().await {
            Self::handle_api_command(cmd, &mut registry, &link_base);
        }

        tracing::info!("API command channel closed");
        Ok(())
    }

    /// Gracefully shut down the node.
    pub async fn shutdown(&mut self) -> Result<()> {
        tracing::info!("shutting down TicketGate node");
        self.node_state = None;
        self.command_rx = None;
        tracing::info!("TicketGate node shut down");
        Ok(())
    }

    /// Address the API is bound to, once started.
    pub fn api_addr(&self) -> Option<SocketAddr> {
        self.api_addr
    }

    /// The registry, until `run` takes ownership of it.
    pub fn registry(&self) -> Option<&RegistrationRegistry> {
        self.registry.as_ref()
    }

    /// Handle a command from the HTTP API.
    fn handle_api_command(cmd: NodeCommand, registry: &mut RegistrationRegistry, link_base: &str) {
        match cmd {
            NodeCommand::Verify {
                reference_id,
                reply,
            } => {
                let _ = reply.send(registry.verify(&reference_id));
            }
            NodeCommand::GetTicket {
                reference_id,
                reply,
            } => {
                let _ = reply.send(registry.ticket(&reference_id, link_base));
            }
            NodeCommand::ListRegistrations { reply } => {
                let _ = reply.send(registry.records().to_vec());
            }
            NodeCommand::Stats { reply } => {
                let _ = reply.send(registry.stats());
            }
        }
    }
}
