//! Terminal rendering of tracker snapshots.

use wok_schemas::Notification;
use wok_timeline::TrackerPhase;
use wok_tracker::TrackerSnapshot;

pub(crate) fn print_snapshot(snapshot: &TrackerSnapshot) {
    let connection = if snapshot.channel.connected {
        "conectado"
    } else {
        "desconectado"
    };
    let status = &snapshot.view.current_status;
    println!();
    println!(
        "{} {}  [{connection}]  pedido {}",
        status.icon(),
        status.label(),
        short_id(&snapshot.view.order_id),
    );

    for entry in &snapshot.view.history {
        let marker = if entry.active { "▸" } else { " " };
        let ended = entry
            .ended_at
            .map(|t| format!("  → {}", t.format("%H:%M:%S")))
            .unwrap_or_default();
        let employee = entry
            .employee_dni
            .as_deref()
            .map(|dni| format!("  (empleado {dni})"))
            .unwrap_or_default();
        println!(
            "  {marker} {} {}  {}{ended}{employee}",
            entry.status.icon(),
            entry.status.label(),
            entry.started_at.format("%H:%M:%S"),
        );
    }

    if let Some(error) = &snapshot.channel.last_error {
        println!("  ! {error}");
    }

    match snapshot.phase {
        TrackerPhase::AwaitingConfirmation => {
            println!("  → El pedido espera tu confirmación: `wok confirm`");
        }
        TrackerPhase::Closed => println!("  ✔ Pedido completado."),
        TrackerPhase::AwaitingEvents => {}
    }
}

pub(crate) fn print_notification(note: &Notification) {
    let employee = note
        .data
        .employee
        .as_ref()
        .map(|e| format!(" - {}", e.name))
        .unwrap_or_default();
    println!(
        "  📢 {} {}{employee}",
        note.timestamp.format("%H:%M:%S"),
        note.data.message,
    );
}

pub(crate) fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}
