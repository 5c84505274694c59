//! Mock notification backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tracing::debug;
use wok_schemas::Notification;

#[derive(Clone, Debug)]
enum ServerCommand {
    /// Send this raw text frame to every subscriber.
    Frame(String),
    /// Close every subscriber's connection (simulated drop).
    Kick,
}

#[derive(Clone)]
struct ServerState {
    script: broadcast::Sender<ServerCommand>,
    accepted: Arc<AtomicUsize>,
}

/// A real WebSocket server standing in for the notification backend.
///
/// Subscriptions must carry `usuario_correo` and `pedido_id` query
/// parameters, exactly like the production endpoint; requests without them
/// are refused with 400.
pub struct NotifyServer {
    addr: SocketAddr,
    script: broadcast::Sender<ServerCommand>,
    accepted: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl NotifyServer {
    /// Bind on an ephemeral loopback port and start serving.
    pub async fn start() -> anyhow::Result<Self> {
        let (script, _) = broadcast::channel(64);
        let accepted = Arc::new(AtomicUsize::new(0));

        let state = ServerState {
            script: script.clone(),
            accepted: Arc::clone(&accepted),
        };
        let app = Router::new()
            .route("/notificaciones", get(subscribe))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock notify server")?;
        let addr = listener.local_addr().context("local addr")?;

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            script,
            accepted,
            task,
        })
    }

    /// Base URL for channel configs (`ws://…/notificaciones`).
    pub fn ws_base(&self) -> String {
        format!("ws://{}/notificaciones", self.addr)
    }

    /// Broadcast a notification to every subscriber.
    pub fn push(&self, note: &Notification) {
        let frame = serde_json::to_string(note).expect("notification serializes");
        self.push_raw(frame);
    }

    /// Broadcast a raw text frame, deliberately malformed frames included.
    pub fn push_raw(&self, frame: impl Into<String>) {
        let _ = self.script.send(ServerCommand::Frame(frame.into()));
    }

    /// Drop every live connection, as a network failure would.
    pub fn kick(&self) {
        let _ = self.script.send(ServerCommand::Kick);
    }

    /// Total subscriptions accepted since start (reconnects count again).
    pub fn accepted_connections(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

impl Drop for NotifyServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn subscribe(
    ws: WebSocketUpgrade,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<ServerState>,
) -> Response {
    let has_identity = params
        .get("usuario_correo")
        .is_some_and(|v| !v.is_empty())
        && params.get("pedido_id").is_some_and(|v| !v.is_empty());
    if !has_identity {
        return (StatusCode::BAD_REQUEST, "usuario_correo y pedido_id requeridos").into_response();
    }

    debug!(
        user = params.get("usuario_correo").map(String::as_str).unwrap_or(""),
        order = params.get("pedido_id").map(String::as_str).unwrap_or(""),
        "mock notify: subscription accepted"
    );

    // Subscribe and count before the 101 goes out, so a push right after the
    // client sees the handshake cannot be missed.
    state.accepted.fetch_add(1, Ordering::SeqCst);
    let script = state.script.subscribe();
    ws.on_upgrade(move |socket| pump(socket, script))
}

async fn pump(mut socket: WebSocket, script: broadcast::Receiver<ServerCommand>) {
    let mut script = BroadcastStream::new(script);

    loop {
        tokio::select! {
            command = script.next() => match command {
                Some(Ok(ServerCommand::Frame(text))) => {
                    if socket.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(ServerCommand::Kick)) => {
                    let _ = socket.send(Message::Close(None)).await;
                    break;
                }
                // Lagged subscribers just skip ahead.
                Some(Err(_)) => continue,
                None => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(_)) => continue,
                _ => break,
            },
        }
    }
}
