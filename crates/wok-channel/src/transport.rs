//! Transport seam.
//!
//! The channel actor speaks to the wire through [`Dialer`] and
//! [`NotifySocket`] so its connection policy (reconnect, teardown, parse
//! errors) is testable with scripted sockets. [`TungsteniteDialer`] is the
//! production implementation.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use reqwest::Url;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::ChannelError;

/// A frame as seen by the channel actor. Control frames (ping/pong) are
/// handled below this seam and never surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
    /// The peer initiated a close handshake.
    Close,
}

/// One live subscription connection.
#[async_trait]
pub trait NotifySocket: Send {
    /// Next data frame, `Some(Err(_))` on a transport fault, `None` once the
    /// connection is gone.
    async fn next_frame(&mut self) -> Option<Result<Frame, ChannelError>>;

    /// Close the connection. Best effort; errors are irrelevant at teardown.
    async fn shutdown(&mut self);
}

/// Opens subscription connections.
#[async_trait]
pub trait Dialer: Send + Sync {
    async fn dial(&self, url: &Url) -> Result<Box<dyn NotifySocket>, ChannelError>;
}

/// Production dialer over tokio-tungstenite.
#[derive(Clone, Copy, Debug, Default)]
pub struct TungsteniteDialer;

#[async_trait]
impl Dialer for TungsteniteDialer {
    async fn dial(&self, url: &Url) -> Result<Box<dyn NotifySocket>, ChannelError> {
        let (socket, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| ChannelError::Connect(e.to_string()))?;
        Ok(Box::new(TungsteniteSocket { inner: socket }))
    }
}

struct TungsteniteSocket {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl NotifySocket for TungsteniteSocket {
    async fn next_frame(&mut self) -> Option<Result<Frame, ChannelError>> {
        loop {
            return match self.inner.next().await? {
                Ok(Message::Text(text)) => Some(Ok(Frame::Text(text))),
                Ok(Message::Binary(bytes)) => Some(Ok(Frame::Binary(bytes))),
                Ok(Message::Close(_)) => Some(Ok(Frame::Close)),
                // Pings are answered by tungstenite on the next flush; pongs
                // and raw frames carry nothing for us.
                Ok(Message::Ping(payload)) => {
                    let _ = self.inner.send(Message::Pong(payload)).await;
                    continue;
                }
                Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => continue,
                Err(e) => Some(Err(ChannelError::Transport(e.to_string()))),
            };
        }
    }

    async fn shutdown(&mut self) {
        let _ = self.inner.close(None).await;
    }
}
