//! `wok track`: follow an order live.

use std::sync::Arc;

use anyhow::{Context, Result};
use wok_api::OrderGateway;
use wok_channel::TungsteniteDialer;
use wok_timeline::TrackerPhase;
use wok_tracker::{OrderTracker, TrackerConfig};

use super::render;

pub async fn run(
    store: String,
    order: String,
    email: Option<String>,
    auto_confirm: bool,
) -> Result<()> {
    let endpoints = super::load_endpoints()?;
    let email = super::resolve_email(email)?;

    let gateway: Arc<dyn OrderGateway> = Arc::new(super::orders_client(&endpoints));
    let config = TrackerConfig::new(endpoints.notify_base.as_str(), &email, &store, &order);

    let tracker = OrderTracker::start(gateway, Arc::new(TungsteniteDialer), config)
        .await
        .context("could not load the order")?;

    render::print_snapshot(&tracker.snapshot());

    let mut snapshots = tracker.watch();
    let mut notices = tracker.notifications();
    let mut confirm_sent = false;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nDejando de seguir el pedido.");
                break;
            }
            note = notices.recv() => {
                if let Ok(note) = note {
                    render::print_notification(&note);
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                render::print_snapshot(&snapshot);

                if snapshot.awaiting_confirmation && auto_confirm && !confirm_sent {
                    confirm_sent = true;
                    match tracker.confirm().await {
                        Ok(()) => println!("  ✔ Recepción confirmada; esperando al backend…"),
                        Err(err) => println!("  ! No se pudo confirmar: {err}"),
                    }
                }

                if snapshot.phase == TrackerPhase::Closed {
                    break;
                }
            }
        }
    }

    Ok(())
}
