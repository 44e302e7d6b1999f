use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use crate::client::event::ChannelEvent;
use crate::client::pubsub_client::MessageHandler;

/// Per-channel table of bound handlers, shared between a channel handle and
/// whatever dispatches events to it.
#[derive(Default)]
pub struct HandlerTable {
    handlers: Mutex<HashMap<ChannelEvent, Vec<MessageHandler>>>,
}

impl HandlerTable {
    pub fn bind(&self, event: ChannelEvent, handler: MessageHandler) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event)
            .or_default()
            .push(handler);
    }

    /// Runs every handler bound to `event` and returns how many ran.
    ///
    /// The table lock is released before any handler runs, so handlers may
    /// bind further handlers.
    pub fn dispatch(&self, event: ChannelEvent, data: &Value) -> usize {
        let bound = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&event)
            .cloned()
            .unwrap_or_default();

        for handler in &bound {
            handler(data.clone());
        }
        bound.len()
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events: Vec<ChannelEvent> = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        f.debug_struct("HandlerTable")
            .field("events", &events)
            .finish()
    }
}
