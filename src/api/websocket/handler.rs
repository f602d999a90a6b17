//! WebSocket connection handler

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use super::events::{ClientEvent, ServerFrame};
use super::registry::ConnectionId;
use super::state::SharedState;

/// WebSocket upgrade handler
///
/// Browser upgrades carry an `Origin` header which must be on the allow-list.
/// Clients that send no `Origin` are not browsers and are let through.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<SharedState>,
) -> Response {
    if let Some(origin) = headers.get(header::ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|o| state.config.is_origin_allowed(o))
            .unwrap_or(false);
        if !allowed {
            warn!(origin = ?origin, "rejected upgrade from origin not on allow-list");
            return (StatusCode::FORBIDDEN, "Origin not allowed").into_response();
        }
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(mut socket: WebSocket, state: SharedState) {
    let (conn_id, mut rx) = state.registry.register();
    info!(conn_id = %conn_id, active = state.connection_count(), "client connected");

    let welcome = ServerFrame::Connected {
        id: conn_id.clone(),
    };
    if !send_frame(&mut socket, &welcome).await {
        disconnect(&state, &conn_id);
        return;
    }

    loop {
        tokio::select! {
            // Frames queued by broadcasts
            outbound = rx.recv() => {
                match outbound {
                    Some(text) => {
                        if socket.send(Message::Text(text.to_string())).await.is_err() {
                            break; // Client disconnected
                        }
                    }
                    None => break, // Removed from the registry
                }
            }

            // Frames from the client
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(msg)) => {
                        if !handle_client_message(msg, &mut socket, &state, &conn_id).await {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(conn_id = %conn_id, error = %e, "transport error");
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    disconnect(&state, &conn_id);
}

/// Handle a message from the client
/// Returns false if the connection should be closed
async fn handle_client_message(
    msg: Message,
    socket: &mut WebSocket,
    state: &SharedState,
    conn_id: &ConnectionId,
) -> bool {
    match msg {
        Message::Text(text) => {
            match ClientEvent::parse(&text) {
                Some(ClientEvent::Message(payload)) => {
                    let recipients = state.relay_message(payload);
                    debug!(conn_id = %conn_id, recipients, "relayed message");
                }
                Some(ClientEvent::Ping) => {
                    return send_frame(socket, &ServerFrame::Pong).await;
                }
                Some(ClientEvent::Unknown(event)) => {
                    debug!(conn_id = %conn_id, event = %event, "ignoring unknown event");
                }
                None => {
                    debug!(conn_id = %conn_id, "ignoring malformed frame");
                }
            }
            true
        }
        Message::Binary(_) => true, // Ignore binary messages
        Message::Ping(data) => socket.send(Message::Pong(data)).await.is_ok(),
        Message::Pong(_) => true,
        Message::Close(_) => false,
    }
}

/// Serialize and send a frame directly to this socket
async fn send_frame(socket: &mut WebSocket, frame: &ServerFrame) -> bool {
    match frame.to_text() {
        Ok(text) => socket.send(Message::Text(text)).await.is_ok(),
        Err(e) => {
            warn!(error = %e, "failed to serialize frame");
            true
        }
    }
}

fn disconnect(state: &SharedState, conn_id: &str) {
    state.registry.unregister(conn_id);
    info!(conn_id = %conn_id, active = state.connection_count(), "client disconnected");
}
