//! Relay wire frames
//!
//! Every text frame is a JSON object `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event name clients use to broadcast a payload to everyone
pub const MESSAGE_EVENT: &str = "message";

/// Event name for application-level heartbeats
pub const PING_EVENT: &str = "ping";

/// Raw inbound frame as it arrives on the socket
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Inbound events the relay understands
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    /// Rebroadcast `data` to every connected party
    Message(Value),
    /// Heartbeat, answered to the sender only
    Ping,
    /// Anything else; ignored
    Unknown(String),
}

impl From<ClientFrame> for ClientEvent {
    fn from(frame: ClientFrame) -> Self {
        match frame.event.as_str() {
            MESSAGE_EVENT => ClientEvent::Message(frame.data),
            PING_EVENT => ClientEvent::Ping,
            _ => ClientEvent::Unknown(frame.event),
        }
    }
}

impl ClientEvent {
    /// Parse a text frame. Returns `None` when the text is not a frame at all.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str::<ClientFrame>(text)
            .ok()
            .map(ClientEvent::from)
    }
}

/// Outbound frames pushed by the relay
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Sent once, right after the upgrade
    Connected { id: String },
    /// A rebroadcast payload
    Message(Value),
    /// Reply to a client `ping`
    Pong,
}

impl ServerFrame {
    /// Serialize to the text sent on the wire
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
