use std::sync::Arc;

use serde_json::Value;

use crate::chat::User;
use crate::client::event::ChannelEvent;
use crate::utils::error::ClientError;

/// Callback invoked with the JSON payload of an event.
pub type MessageHandler = Arc<dyn Fn(Value) + Send + Sync>;

/// Client-side authentication settings.
///
/// Present only on clients that authorize private and presence channels
/// locally. `user_id` is filled in by [`PubSubClient::identify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientAuth {
    pub user_id: Option<String>,
}

/// A subscribed channel on the pub/sub service.
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Registers `handler` for `event`. Handlers run in the client's dispatch
    /// context, in registration order.
    fn bind(&self, event: ChannelEvent, handler: MessageHandler);

    /// Publishes a client event. The service delivers it to every other
    /// subscriber but never back to this client.
    fn trigger(&self, event: ChannelEvent, data: Value) -> Result<(), ClientError>;
}

/// Handle on the hosted pub/sub service.
pub trait PubSubClient {
    type Channel: Channel + 'static;

    fn supports_client_auth(&self) -> bool;

    /// Passes the local user's identity to the client's authentication.
    ///
    /// Fails with [`ClientError::ClientAuthUnavailable`] on clients without
    /// client-side authentication.
    fn identify(&self, user: &User) -> Result<(), ClientError>;

    fn subscribe(&self, channel_name: &str) -> Result<Arc<Self::Channel>, ClientError>;
}
