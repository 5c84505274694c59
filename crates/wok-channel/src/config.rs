//! Channel configuration and endpoint URL construction.

use std::time::Duration;

use reqwest::Url;

use crate::error::ChannelError;

/// Delay between a connection loss and the automatic reconnect attempt.
///
/// Deliberately a fixed interval, not exponential backoff: a tracking page
/// has exactly one viewer per order, so there is no thundering herd to
/// spread out, and a constant short wait recovers fastest.
pub const RECONNECT_INTERVAL: Duration = Duration::from_millis(3000);

/// Delay between teardown and re-dial on an explicit `reconnect()`.
pub const MANUAL_REDIAL_DELAY: Duration = Duration::from_millis(100);

/// Everything needed to subscribe to one order's notification stream.
#[derive(Clone, Debug)]
pub struct ChannelConfig {
    /// Base WebSocket URL (`ws://…` or `wss://…`), without query parameters.
    pub notify_base: String,
    pub user_email: String,
    pub order_id: String,
    /// Reconnect automatically after a lost connection.
    pub auto_reconnect: bool,
    pub reconnect_interval: Duration,
    pub redial_delay: Duration,
}

impl ChannelConfig {
    pub fn new(
        notify_base: impl Into<String>,
        user_email: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            notify_base: notify_base.into(),
            user_email: user_email.into(),
            order_id: order_id.into(),
            auto_reconnect: true,
            reconnect_interval: RECONNECT_INTERVAL,
            redial_delay: MANUAL_REDIAL_DELAY,
        }
    }

    /// Both identity parts present? The channel refuses to dial otherwise.
    pub(crate) fn has_identity(&self) -> bool {
        !self.user_email.trim().is_empty() && !self.order_id.trim().is_empty()
    }

    /// Full subscription URL with URL-encoded identity query parameters.
    pub fn url(&self) -> Result<Url, ChannelError> {
        let mut url = Url::parse(&self.notify_base)
            .map_err(|e| ChannelError::Connect(format!("invalid notify base url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("usuario_correo", &self.user_email)
            .append_pair("pedido_id", &self.order_id);
        Ok(url)
    }
}
