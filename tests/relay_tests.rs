//! End-to-end relay tests using real WebSocket clients

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::connect_async;

use storefront_relay::api::serve_with_shutdown;
use storefront_relay::{RelayConfig, RelayState};

const TIMEOUT: Duration = Duration::from_secs(5);

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

struct TestRelay {
    url: String,
    state: Arc<RelayState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Boot a relay on an ephemeral port
async fn boot_relay() -> TestRelay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(RelayState::new(RelayConfig::default()));
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(serve_with_shutdown(listener, state.clone(), async {
        let _ = rx.await;
    }));

    TestRelay {
        url: format!("ws://{}/ws", addr),
        state,
        shutdown: Some(tx),
    }
}

/// Connect and consume the `connected` frame, returning the connection id
async fn connect(relay: &TestRelay) -> (WsStream, String) {
    let (mut ws, _) = connect_async(relay.url.as_str()).await.unwrap();
    let welcome = next_json(&mut ws).await;
    assert_eq!(welcome["event"], "connected");
    let id = welcome["data"]["id"].as_str().unwrap().to_string();
    (ws, id)
}

async fn next_json(ws: &mut WsStream) -> Value {
    loop {
        let msg = timeout(TIMEOUT, ws.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn emit(ws: &mut WsStream, frame: Value) {
    ws.send(Message::Text(frame.to_string().into())).await.unwrap();
}

async fn wait_for_connections(state: &RelayState, expected: usize) {
    timeout(TIMEOUT, async {
        while state.connection_count() != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("connection count never settled");
}

#[tokio::test]
async fn test_message_reaches_sender_and_peer() {
    let relay = boot_relay().await;
    let (mut a, id_a) = connect(&relay).await;
    let (mut b, id_b) = connect(&relay).await;
    assert_ne!(id_a, id_b);

    emit(&mut a, json!({"event": "message", "data": {"text": "hi"}})).await;

    let expected = json!({"event": "message", "data": {"text": "hi"}});
    assert_eq!(next_json(&mut a).await, expected);
    assert_eq!(next_json(&mut b).await, expected);
}

#[tokio::test]
async fn test_all_clients_receive_every_sender() {
    let relay = boot_relay().await;
    let mut clients = Vec::new();
    for _ in 0..4 {
        clients.push(connect(&relay).await.0);
    }

    emit(&mut clients[2], json!({"event": "message", "data": [1, 2, 3]})).await;

    for ws in clients.iter_mut() {
        assert_eq!(next_json(ws).await["data"], json!([1, 2, 3]));
    }
}

#[tokio::test]
async fn test_per_sender_order_is_preserved() {
    let relay = boot_relay().await;
    let (mut a, _) = connect(&relay).await;
    let (mut b, _) = connect(&relay).await;

    for n in 0..20 {
        emit(&mut a, json!({"event": "message", "data": n})).await;
    }

    for n in 0..20 {
        assert_eq!(next_json(&mut b).await["data"], json!(n));
    }
}

#[tokio::test]
async fn test_unknown_and_malformed_frames_are_ignored() {
    let relay = boot_relay().await;
    let (mut a, _) = connect(&relay).await;
    let (mut b, _) = connect(&relay).await;

    a.send(Message::Text("definitely not json".into())).await.unwrap();
    emit(&mut a, json!({"event": "typing", "data": true})).await;
    emit(&mut a, json!({"event": "message", "data": "after"})).await;

    // Only the real message comes through; the connection survived
    assert_eq!(next_json(&mut b).await["data"], "after");
    assert_eq!(next_json(&mut a).await["data"], "after");
}

#[tokio::test]
async fn test_ping_is_answered_to_sender_only() {
    let relay = boot_relay().await;
    let (mut a, _) = connect(&relay).await;
    let (mut b, _) = connect(&relay).await;

    emit(&mut a, json!({"event": "ping"})).await;
    assert_eq!(next_json(&mut a).await, json!({"event": "pong"}));

    emit(&mut a, json!({"event": "message", "data": "x"})).await;
    // b's next frame is the message, not a pong
    assert_eq!(next_json(&mut b).await["event"], "message");
}

#[tokio::test]
async fn test_disconnect_is_silent_for_others() {
    let relay = boot_relay().await;
    let (mut a, _) = connect(&relay).await;
    let (b, _) = connect(&relay).await;
    wait_for_connections(&relay.state, 2).await;

    drop(b);
    wait_for_connections(&relay.state, 1).await;

    emit(&mut a, json!({"event": "message", "data": "still here"})).await;
    assert_eq!(next_json(&mut a).await["data"], "still here");
}

#[tokio::test]
async fn test_disallowed_origin_is_rejected() {
    let relay = boot_relay().await;
    let mut request = relay.url.as_str().into_client_request().unwrap();
    request
        .headers_mut()
        .insert("Origin", HeaderValue::from_static("http://evil.example.com"));

    match connect_async(request).await {
        Err(WsError::Http(response)) => assert_eq!(response.status().as_u16(), 403),
        other => panic!("expected HTTP 403, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_allowed_origin_is_accepted() {
    let relay = boot_relay().await;
    let mut request = relay.url.as_str().into_client_request().unwrap();
    request
        .headers_mut()
        .insert("Origin", HeaderValue::from_static("http://localhost:3000"));

    let (mut ws, _) = connect_async(request).await.unwrap();
    assert_eq!(next_json(&mut ws).await["event"], "connected");
}
