//! Scripted transport for channel tests: no network, deterministic timing.

// Each test binary compiles its own copy; not every binary uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Url;
use tokio::sync::mpsc;
use tokio::time::Instant;
use wok_channel::{ChannelError, Dialer, Frame, NotifySocket};

/// Hands out pre-scripted sockets in order and records when each dial
/// happened (paused-clock instants, so assertions can be exact).
pub struct ScriptedDialer {
    sockets: Mutex<VecDeque<ScriptedSocket>>,
    dials: Mutex<Vec<Instant>>,
    urls: Mutex<Vec<String>>,
}

impl ScriptedDialer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sockets: Mutex::new(VecDeque::new()),
            dials: Mutex::new(Vec::new()),
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Queue one socket for the next dial; returns its script handle.
    pub fn push_socket(&self) -> SocketScript {
        let (tx, rx) = mpsc::unbounded_channel();
        self.sockets
            .lock()
            .unwrap()
            .push_back(ScriptedSocket { rx });
        SocketScript { tx }
    }

    pub fn dial_count(&self) -> usize {
        self.dials.lock().unwrap().len()
    }

    pub fn dial_times(&self) -> Vec<Instant> {
        self.dials.lock().unwrap().clone()
    }

    pub fn last_url(&self) -> Option<String> {
        self.urls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Dialer for ScriptedDialer {
    async fn dial(&self, url: &Url) -> Result<Box<dyn NotifySocket>, ChannelError> {
        self.dials.lock().unwrap().push(Instant::now());
        self.urls.lock().unwrap().push(url.to_string());
        match self.sockets.lock().unwrap().pop_front() {
            Some(socket) => Ok(Box::new(socket)),
            None => Err(ChannelError::Connect("no socket scripted".to_string())),
        }
    }
}

/// Test-side control of one scripted connection. Dropping it (or calling
/// `close`) ends the stream, which the channel sees as a peer close.
pub struct SocketScript {
    tx: mpsc::UnboundedSender<Result<Frame, ChannelError>>,
}

impl SocketScript {
    pub fn send_text(&self, text: impl Into<String>) {
        let _ = self.tx.send(Ok(Frame::Text(text.into())));
    }

    pub fn send_error(&self, msg: &str) {
        let _ = self.tx.send(Err(ChannelError::Transport(msg.to_string())));
    }

    pub fn close(self) {
        let _ = self.tx.send(Ok(Frame::Close));
    }
}

struct ScriptedSocket {
    rx: mpsc::UnboundedReceiver<Result<Frame, ChannelError>>,
}

#[async_trait]
impl NotifySocket for ScriptedSocket {
    async fn next_frame(&mut self) -> Option<Result<Frame, ChannelError>> {
        self.rx.recv().await
    }

    async fn shutdown(&mut self) {
        self.rx.close();
    }
}

/// Let the channel actor run until it has nothing left to do at the current
/// (paused) clock instant.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// A valid wire notification for delivery tests.
pub fn wire_notification(order_id: &str, status: &str) -> String {
    format!(
        r#"{{"tipo":"ESTADO_ACTUALIZADO","pedido_id":"{order_id}","timestamp":"2026-08-06T12:00:00Z","datos":{{"estado":"{status}","mensaje":"ok"}}}}"#
    )
}
