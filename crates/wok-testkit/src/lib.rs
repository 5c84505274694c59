//! wok-testkit
//!
//! In-process test support: a scriptable mock of the notification backend
//! (real WebSocket server, honoring the query-parameter contract) and
//! builders for wire notifications and REST fixture bodies.
//!
//! Everything runs on the local loopback; no external services, no real
//! backend. Tests drive the server by handle: push events (valid or
//! deliberately malformed), kick connections to exercise reconnect paths,
//! and count how many subscriptions were accepted.

mod fixtures;
mod notify_server;

pub use fixtures::{
    completed_event, delivered_event, fresh_order_id, order_detail_body, status_event,
};
pub use notify_server::NotifyServer;
