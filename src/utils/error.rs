//! Error types for the chat adapter and the pub/sub clients it drives.

use thiserror::Error;

/// Failures reported by a [`PubSubClient`](crate::client::PubSubClient) or one
/// of its channels.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("client-side authentication is not configured on this client")]
    ClientAuthUnavailable,

    #[error("presence channel '{0}' requires an identified user")]
    PresenceWithoutUser(String),

    #[error("event '{0}' cannot be triggered by a client")]
    NotClientEvent(&'static str),

    #[error("connection to the pub/sub service is closed")]
    Disconnected,

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Failures of [`ChatChannelAdapter`](crate::adapter::ChatChannelAdapter)
/// operations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Returned by `set_user` before anything is stored: unlike a
    /// store-then-fail setter, the adapter keeps no user after this error.
    #[error("the chat adapter only works with client authentication")]
    ClientAuthUnavailable,

    #[error("a user must be set before adding a room")]
    UserNotSet,

    #[error("room '{0}' has not been added")]
    UnknownRoom(String),

    #[error("failed to encode chat message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Client(ClientError),
}

impl From<ClientError> for AdapterError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ClientAuthUnavailable => AdapterError::ClientAuthUnavailable,
            other => AdapterError::Client(other),
        }
    }
}
