//! Active connection registry and broadcast fan-out
//!
//! Each connection owns a bounded outbound queue. Broadcasting walks the
//! current set and pushes the serialized frame onto every queue without
//! waiting: a full queue drops that frame for that connection only, a
//! closed queue means the socket task is gone and the entry is removed.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use uuid::Uuid;

/// Transient, server-assigned connection identifier
pub type ConnectionId = String;

/// Serialized frame shared between all recipients of one broadcast
pub type OutboundFrame = Arc<str>;

/// Registry of currently connected parties
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, mpsc::Sender<OutboundFrame>>>,
    buffer: usize,
}

impl ConnectionRegistry {
    /// Create an empty registry; `buffer` is the per-connection queue size
    pub fn new(buffer: usize) -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            buffer: buffer.max(1),
        }
    }

    /// Add a new connection and return its id plus the queue to drain
    pub fn register(&self) -> (ConnectionId, mpsc::Receiver<OutboundFrame>) {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = Uuid::new_v4().to_string();
        self.connections.write().insert(id.clone(), tx);
        (id, rx)
    }

    /// Remove a connection. Unknown ids are ignored.
    pub fn unregister(&self, id: &str) -> bool {
        self.connections.write().remove(id).is_some()
    }

    /// Push a frame to every active connection, sender included.
    /// Returns the number of connections that accepted it.
    pub fn broadcast(&self, frame: OutboundFrame) -> usize {
        let mut delivered = 0;
        let mut closed = Vec::new();
        {
            let connections = self.connections.read();
            for (id, tx) in connections.iter() {
                match tx.try_send(Arc::clone(&frame)) {
                    Ok(()) => delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        warn!(conn_id = %id, "outbound queue full, dropping frame");
                    }
                    Err(TrySendError::Closed(_)) => closed.push(id.clone()),
                }
            }
        }

        if !closed.is_empty() {
            let mut connections = self.connections.write();
            for id in &closed {
                connections.remove(id);
            }
        }

        debug!(recipients = delivered, dropped = closed.len(), "broadcast frame");
        delivered
    }

    /// Number of currently registered connections
    pub fn connection_count(&self) -> usize {
        self.connections.read().len()
    }

    /// Whether the id is currently registered
    pub fn contains(&self, id: &str) -> bool {
        self.connections.read().contains_key(id)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CLIENT_BUFFER)
    }
}
