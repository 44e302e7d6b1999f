use serde_json::Value;

use crate::broker::topic::SubscriberId;
use crate::client::ChannelEvent;

/// An event published on a channel.
///
/// `sender` is the client that triggered it; the broker skips that
/// subscriber when delivering.
#[derive(Debug, Clone)]
pub struct Message {
    pub topic: String,
    pub event: ChannelEvent,
    pub data: Value,
    pub sender: SubscriberId,
}
