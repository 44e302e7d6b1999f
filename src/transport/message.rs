use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames sent by the client to a popsub broker.
///
/// Field sets follow the broker's `ClientMessage`: `publish` must carry a
/// `timestamp` (Unix milliseconds).
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientFrame {
    #[serde(rename = "subscribe")]
    Subscribe { topic: String },

    #[serde(rename = "publish")]
    Publish {
        topic: String,
        payload: String,
        timestamp: u64,
    },
}

/// A published message as the broker forwards it to subscribers.
///
/// The broker serializes its message struct as-is, without a `type` tag.
#[derive(Debug, Deserialize, Serialize)]
pub struct ServerFrame {
    pub topic: String,
    pub payload: String,
    #[serde(default)]
    pub timestamp: i64,
}

/// Event carried as the `payload` of a published frame.
///
/// `socket_id` identifies the publishing connection so it can recognise and
/// drop its own events when the broker fans them back out.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope {
    pub event: String,
    pub socket_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub data: Value,
}
