use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedSender;

use crate::chat::message::ChatMessage;

/// A chat room as seen by the adapter: something with a name that can take
/// delivery of messages.
///
/// `receive` may be called from the pub/sub client's dispatch context, so
/// implementations must be `Send + Sync`.
pub trait ChatRoom: Send + Sync {
    fn name(&self) -> &str;

    fn receive(&self, message: ChatMessage);
}

/// Default [`ChatRoom`] keeping the received history in memory and
/// optionally forwarding every message to a listener channel.
#[derive(Debug)]
pub struct Room {
    name: String,
    history: Mutex<Vec<ChatMessage>>,
    listener: Option<UnboundedSender<ChatMessage>>,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            history: Mutex::new(Vec::new()),
            listener: None,
        }
    }

    /// Creates a room that also forwards each received message to `listener`.
    pub fn with_listener(name: impl Into<String>, listener: UnboundedSender<ChatMessage>) -> Self {
        Self {
            listener: Some(listener),
            ..Self::new(name)
        }
    }

    /// Snapshot of the messages received so far, in delivery order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl ChatRoom for Room {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&self, message: ChatMessage) {
        if let Some(listener) = &self.listener {
            // a dropped listener only stops forwarding, history is still kept
            let _ = listener.send(message.clone());
        }
        if let Ok(mut history) = self.history.lock() {
            history.push(message);
        }
    }
}
