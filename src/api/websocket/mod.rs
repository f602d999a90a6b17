//! WebSocket relay
//!
//! Provides the `/ws` endpoint. Any client may emit a `message` event; the
//! relay pushes the same event and payload to every connected client,
//! including the one that sent it.
//!
//! ## Guarantees
//! - Per-sender arrival order is preserved for every receiver
//! - No acknowledgement, buffering across reconnects, or persistence
//! - Slow clients lose frames instead of slowing the sender down

pub mod events;
pub mod handler;
pub mod registry;
pub mod state;

pub use events::{ClientEvent, ServerFrame};
pub use registry::{ConnectionId, ConnectionRegistry};
pub use state::{RelayState, SharedState};
