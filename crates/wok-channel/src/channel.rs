//! Channel handle and actor.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use wok_schemas::Notification;

use crate::config::ChannelConfig;
use crate::error::ChannelError;
use crate::transport::{Dialer, Frame, NotifySocket};

/// Observable connection state: the connected flag and the last error, both
/// always available for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelStatus {
    pub connected: bool,
    pub last_error: Option<ChannelError>,
}

enum Command {
    Connect,
    Disconnect,
    Reconnect,
}

/// Handle to one order's notification subscription.
///
/// Spawning connects immediately. Dropping the handle is equivalent to
/// `disconnect()`: the actor closes the socket, cancels any pending
/// reconnect and stops; nothing can re-dial afterwards.
pub struct NotificationChannel {
    cmd_tx: mpsc::UnboundedSender<Command>,
    status_rx: watch::Receiver<ChannelStatus>,
}

impl NotificationChannel {
    /// Start the channel actor and return the handle plus the stream of
    /// parsed notifications (single consumer).
    pub fn spawn(
        config: ChannelConfig,
        dialer: Arc<dyn Dialer>,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(ChannelStatus::default());
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let reconnect_enabled = config.auto_reconnect;
        let runner = Runner {
            cfg: config,
            dialer,
            cmd_rx,
            status_tx,
            events_tx,
            reconnect_enabled,
        };
        tokio::spawn(runner.run());

        (Self { cmd_tx, status_rx }, events_rx)
    }

    /// Watch the connection status.
    pub fn status(&self) -> watch::Receiver<ChannelStatus> {
        self.status_rx.clone()
    }

    /// Snapshot of the current status.
    pub fn current_status(&self) -> ChannelStatus {
        self.status_rx.borrow().clone()
    }

    /// Ask for a connection. No-op while one is already open.
    pub fn connect(&self) {
        let _ = self.cmd_tx.send(Command::Connect);
    }

    /// Tear down: close the socket, cancel any pending reconnect, suppress
    /// reconnect-on-close. Idempotent; only `reconnect()` revives the
    /// channel afterwards.
    pub fn disconnect(&self) {
        let _ = self.cmd_tx.send(Command::Disconnect);
    }

    /// Force teardown then re-dial after a short fixed delay, re-enabling
    /// auto-reconnect regardless of any prior `disconnect()`.
    pub fn reconnect(&self) {
        let _ = self.cmd_tx.send(Command::Reconnect);
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// What the actor does next. Each state handler runs to the next transition;
/// `run` loops until `Shutdown`.
enum Step {
    Attempt,
    Open(Box<dyn NotifySocket>),
    Sleep(Duration),
    Idle,
    Shutdown,
}

struct Runner {
    cfg: ChannelConfig,
    dialer: Arc<dyn Dialer>,
    cmd_rx: mpsc::UnboundedReceiver<Command>,
    status_tx: watch::Sender<ChannelStatus>,
    events_tx: mpsc::UnboundedSender<Notification>,
    /// Whether a close should schedule a re-dial. Starts as
    /// `cfg.auto_reconnect`; cleared by `disconnect()`, restored by
    /// `reconnect()`.
    reconnect_enabled: bool,
}

impl Runner {
    async fn run(mut self) {
        let mut step = Step::Attempt;
        loop {
            step = match step {
                Step::Attempt => self.attempt().await,
                Step::Open(socket) => self.pump(socket).await,
                Step::Sleep(delay) => self.wait_retry(delay).await,
                Step::Idle => self.idle().await,
                Step::Shutdown => break,
            };
        }
        debug!("notification channel stopped");
    }

    fn set_connected(&self) {
        self.status_tx.send_replace(ChannelStatus {
            connected: true,
            last_error: None,
        });
    }

    /// Mark disconnected; `error` of `None` keeps whatever error was last
    /// reported (a clean close is not itself an error).
    fn set_disconnected(&self, error: Option<ChannelError>) {
        self.status_tx.send_modify(|status| {
            status.connected = false;
            if let Some(err) = error {
                status.last_error = Some(err);
            }
        });
    }

    /// Report an error without touching the connected flag.
    fn set_error(&self, error: ChannelError) {
        self.status_tx
            .send_modify(|status| status.last_error = Some(error));
    }

    /// One close schedules one attempt at a constant interval. No backoff
    /// growth, no retry cap.
    fn after_close(&self) -> Step {
        if self.reconnect_enabled {
            debug!(
                interval_ms = self.cfg.reconnect_interval.as_millis() as u64,
                "scheduling reconnect"
            );
            Step::Sleep(self.cfg.reconnect_interval)
        } else {
            Step::Idle
        }
    }

    async fn attempt(&mut self) -> Step {
        if !self.cfg.has_identity() {
            warn!("notification channel: user email or order id missing; not connecting");
            self.set_disconnected(Some(ChannelError::MissingIdentity));
            return Step::Idle;
        }

        let url = match self.cfg.url() {
            Ok(url) => url,
            Err(err) => {
                warn!(error = %err, "notification channel: bad endpoint");
                self.set_disconnected(Some(err));
                return self.after_close();
            }
        };

        debug!(order_id = %self.cfg.order_id, "notification channel: dialing");
        match self.dialer.dial(&url).await {
            Ok(socket) => {
                info!(order_id = %self.cfg.order_id, "notification channel: connected");
                self.set_connected();
                Step::Open(socket)
            }
            Err(err) => {
                warn!(error = %err, "notification channel: dial failed");
                self.set_disconnected(Some(err));
                self.after_close()
            }
        }
    }

    async fn pump(&mut self, mut socket: Box<dyn NotifySocket>) -> Step {
        loop {
            tokio::select! {
                cmd = self.cmd_rx.recv() => match cmd {
                    None => {
                        // Handle dropped: full teardown, nothing may re-dial.
                        socket.shutdown().await;
                        self.set_disconnected(None);
                        return Step::Shutdown;
                    }
                    Some(Command::Disconnect) => {
                        self.reconnect_enabled = false;
                        socket.shutdown().await;
                        self.set_disconnected(None);
                        return Step::Idle;
                    }
                    Some(Command::Reconnect) => {
                        self.reconnect_enabled = true;
                        socket.shutdown().await;
                        self.set_disconnected(None);
                        return Step::Sleep(self.cfg.redial_delay);
                    }
                    // Already connected: connect is a no-op.
                    Some(Command::Connect) => {}
                },
                frame = socket.next_frame() => match frame {
                    Some(Ok(Frame::Text(text))) => self.deliver(text.as_bytes()),
                    Some(Ok(Frame::Binary(bytes))) => self.deliver(&bytes),
                    Some(Ok(Frame::Close)) | None => {
                        debug!("notification channel: connection closed by peer");
                        self.set_disconnected(None);
                        return self.after_close();
                    }
                    Some(Err(err)) => {
                        warn!(error = %err, "notification channel: transport fault");
                        self.set_disconnected(Some(err));
                        return self.after_close();
                    }
                },
            }
        }
    }

    /// Parse and forward one frame. A bad frame is dropped with the error
    /// observable set; the connection stays up.
    fn deliver(&self, raw: &[u8]) {
        match serde_json::from_slice::<Notification>(raw) {
            Ok(note) => {
                debug!(order_id = %note.order_id, kind = ?note.kind, "notification received");
                if self.events_tx.send(note).is_err() {
                    debug!("notification receiver dropped; event discarded");
                }
            }
            Err(err) => {
                warn!(error = %err, "malformed notification frame dropped");
                self.set_error(ChannelError::MalformedPayload(err.to_string()));
            }
        }
    }

    async fn wait_retry(&mut self, delay: Duration) -> Step {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                _ = &mut sleep => return Step::Attempt,
                cmd = self.cmd_rx.recv() => match cmd {
                    None => return Step::Shutdown,
                    Some(Command::Disconnect) => {
                        // Cancels the pending reconnect.
                        self.reconnect_enabled = false;
                        return Step::Idle;
                    }
                    Some(Command::Reconnect) => {
                        self.reconnect_enabled = true;
                        return Step::Sleep(self.cfg.redial_delay);
                    }
                    Some(Command::Connect) => return Step::Attempt,
                },
            }
        }
    }

    async fn idle(&mut self) -> Step {
        loop {
            match self.cmd_rx.recv().await {
                None => return Step::Shutdown,
                Some(Command::Connect) => return Step::Attempt,
                Some(Command::Reconnect) => {
                    self.reconnect_enabled = true;
                    return Step::Sleep(self.cfg.redial_delay);
                }
                // Disconnect while already down: idempotent no-op.
                Some(Command::Disconnect) => {}
            }
        }
    }
}
