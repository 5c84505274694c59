//! Live order tracker.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};
use wok_api::{ApiError, OrderGateway};
use wok_channel::{ChannelConfig, ChannelStatus, Dialer, NotificationChannel};
use wok_schemas::Notification;
use wok_timeline::{apply_notification, ConfirmationGate, OrderView, TrackerPhase};

/// Identity of one tracked order plus its channel settings.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub store_id: String,
    pub order_id: String,
    pub channel: ChannelConfig,
}

impl TrackerConfig {
    pub fn new(
        notify_base: impl Into<String>,
        user_email: impl Into<String>,
        store_id: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        let order_id = order_id.into();
        Self {
            store_id: store_id.into(),
            channel: ChannelConfig::new(notify_base, user_email, order_id.clone()),
            order_id,
        }
    }
}

/// Everything a consumer needs to render one tracked order.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerSnapshot {
    pub view: OrderView,
    pub phase: TrackerPhase,
    /// Show the confirm-receipt affordance?
    pub awaiting_confirmation: bool,
    pub channel: ChannelStatus,
}

/// Handle to one tracked order.
///
/// Dropping the tracker tears down the channel (socket closed, pending
/// reconnect cancelled) and stops the fold task.
pub struct OrderTracker {
    store_id: String,
    order_id: String,
    user_email: String,
    gateway: Arc<dyn OrderGateway>,
    channel: NotificationChannel,
    snapshot_rx: watch::Receiver<TrackerSnapshot>,
    notices_tx: broadcast::Sender<Notification>,
}

impl OrderTracker {
    /// Fetch the order, build the initial view, open the channel and start
    /// folding events.
    ///
    /// Fails only if the initial detail fetch fails; channel trouble after
    /// this point surfaces through the snapshot's [`ChannelStatus`], never
    /// as an error.
    pub async fn start(
        gateway: Arc<dyn OrderGateway>,
        dialer: Arc<dyn Dialer>,
        config: TrackerConfig,
    ) -> Result<Self, ApiError> {
        let detail = gateway
            .order_detail(&config.store_id, &config.order_id)
            .await?;
        let view = OrderView::from_detail(&detail);
        let gate = ConfirmationGate::new(detail.awaiting_confirmation);
        debug!(
            order_id = %config.order_id,
            status = %view.current_status,
            awaiting = detail.awaiting_confirmation,
            "tracker: initial view built"
        );

        let user_email = config.channel.user_email.clone();
        let (channel, events_rx) = NotificationChannel::spawn(config.channel, dialer);
        let status_rx = channel.status();

        let initial = snapshot_of(&view, &gate, &status_rx.borrow());
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (notices_tx, _) = broadcast::channel(64);

        spawn_fold_task(
            view,
            gate,
            events_rx,
            status_rx,
            snapshot_tx,
            notices_tx.clone(),
        );

        Ok(Self {
            store_id: config.store_id,
            order_id: config.order_id,
            user_email,
            gateway,
            channel,
            snapshot_rx,
            notices_tx,
        })
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> TrackerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch snapshot updates.
    pub fn watch(&self) -> watch::Receiver<TrackerSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to the raw notifications (for message feeds).
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notices_tx.subscribe()
    }

    /// Tell the backend the customer has the order.
    ///
    /// Success does NOT clear the confirmation gate: the authoritative
    /// completion arrives over the channel. Failure is returned to the
    /// caller with the gate untouched, so the user can retry.
    pub async fn confirm(&self) -> Result<(), ApiError> {
        let result = self
            .gateway
            .confirm_delivery(&self.order_id, &self.user_email, &self.store_id)
            .await;
        if let Err(err) = &result {
            warn!(order_id = %self.order_id, error = %err, "confirm delivery failed");
        }
        result
    }

    /// Tear the channel down without dropping the tracker.
    pub fn disconnect(&self) {
        self.channel.disconnect();
    }

    /// Force a channel teardown + re-dial.
    pub fn reconnect(&self) {
        self.channel.reconnect();
    }
}

fn snapshot_of(
    view: &OrderView,
    gate: &ConfirmationGate,
    channel: &ChannelStatus,
) -> TrackerSnapshot {
    TrackerSnapshot {
        view: view.clone(),
        phase: gate.phase(view),
        awaiting_confirmation: gate.awaiting(view),
        channel: channel.clone(),
    }
}

/// Fold events and channel-status changes into published snapshots. Runs
/// until the channel is gone (tracker dropped).
fn spawn_fold_task(
    mut view: OrderView,
    mut gate: ConfirmationGate,
    mut events_rx: tokio::sync::mpsc::UnboundedReceiver<Notification>,
    mut status_rx: watch::Receiver<ChannelStatus>,
    snapshot_tx: watch::Sender<TrackerSnapshot>,
    notices_tx: broadcast::Sender<Notification>,
) {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                event = events_rx.recv() => match event {
                    Some(note) => {
                        gate.observe(&note);
                        view = apply_notification(&view, &note);
                        debug!(
                            order_id = %view.order_id,
                            status = %view.current_status,
                            phase = ?gate.phase(&view),
                            "tracker: event folded"
                        );
                        // Raw event out first, then the derived snapshot.
                        let _ = notices_tx.send(note);
                        snapshot_tx.send_replace(snapshot_of(&view, &gate, &status_rx.borrow()));
                    }
                    None => break,
                },
                changed = status_rx.changed() => match changed {
                    Ok(()) => {
                        let channel = status_rx.borrow_and_update().clone();
                        snapshot_tx.send_replace(snapshot_of(&view, &gate, &channel));
                    }
                    Err(_) => break,
                },
            }
        }
        debug!("tracker: fold task stopped");
    });
}
