//! Channel error taxonomy.

use std::fmt;

/// Everything that can go wrong on the notification channel.
///
/// All variants are recoverable and reported through the status observable;
/// only an explicit `disconnect()` ends the channel. `MissingIdentity` is
/// its own variant so a consumer can tell "not ready yet" apart from
/// "failed".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelError {
    /// No user email or order id at connect time; no dial was attempted.
    MissingIdentity,
    /// The dial itself failed (bad URL, refused, TLS, DNS).
    Connect(String),
    /// The established connection dropped or errored mid-stream.
    Transport(String),
    /// An inbound frame was not a valid notification; the frame was dropped
    /// and the connection kept.
    MalformedPayload(String),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::MissingIdentity => {
                write!(f, "missing user email or order id; connection not attempted")
            }
            ChannelError::Connect(msg) => write!(f, "connect error: {msg}"),
            ChannelError::Transport(msg) => write!(f, "transport error: {msg}"),
            ChannelError::MalformedPayload(msg) => {
                write!(f, "malformed notification dropped: {msg}")
            }
        }
    }
}

impl std::error::Error for ChannelError {}
