//! wok-channel
//!
//! The notification channel: a persistent WebSocket subscription to one
//! order's event stream, with observable connection status and automatic
//! reconnection at a fixed interval.
//!
//! An actor task owns the socket. The [`NotificationChannel`] handle exposes
//! `connect` / `disconnect` / `reconnect` commands and a
//! `watch`-observable [`ChannelStatus`]; parsed [`Notification`]s arrive on
//! the `mpsc` receiver returned at spawn. Dropping the handle tears the
//! whole thing down on every exit path: the socket is closed and any
//! pending reconnect cancelled.
//!
//! All channel failures (connect refusals, mid-stream drops, malformed
//! frames, missing identity) are absorbed into the status observable; none
//! of them crosses into the consumer as a panic or a closed event stream.
//!
//! [`Notification`]: wok_schemas::Notification

mod channel;
mod config;
mod error;
mod transport;

pub use channel::{ChannelStatus, NotificationChannel};
pub use config::{ChannelConfig, MANUAL_REDIAL_DELAY, RECONNECT_INTERVAL};
pub use error::ChannelError;
pub use transport::{Dialer, Frame, NotifySocket, TungsteniteDialer};
