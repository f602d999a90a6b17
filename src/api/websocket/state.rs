//! Relay application state

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use super::events::ServerFrame;
use super::registry::{ConnectionRegistry, OutboundFrame};
use crate::config::RelayConfig;

/// Shared state handed to every connection handler
pub struct RelayState {
    /// Server configuration (origin allow-list, buffer sizes)
    pub config: RelayConfig,

    /// Currently connected parties
    pub registry: ConnectionRegistry,

    /// Unix timestamp the relay started at
    pub started_at: i64,
}

impl RelayState {
    /// Create a new RelayState from the given configuration
    pub fn new(config: RelayConfig) -> Self {
        let registry = ConnectionRegistry::new(config.client_buffer);
        Self {
            config,
            registry,
            started_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Rebroadcast a `message` payload to every connected party.
    /// Returns the number of connections the frame was queued for.
    pub fn relay_message(&self, payload: Value) -> usize {
        match ServerFrame::Message(payload).to_text() {
            Ok(text) => self.registry.broadcast(OutboundFrame::from(text)),
            Err(e) => {
                warn!(error = %e, "failed to serialize message frame");
                0
            }
        }
    }

    /// Number of active connections
    pub fn connection_count(&self) -> usize {
        self.registry.connection_count()
    }

    /// Seconds since the relay started
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now().timestamp() - self.started_at).max(0)
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new(RelayConfig::default())
    }
}

/// Convenience alias for the state as extracted by handlers
pub type SharedState = Arc<RelayState>;
