use std::collections::HashMap;
use std::sync::Arc;

use crate::client::HandlerTable;

pub type SubscriberId = String;

/// A channel known to the broker.
///
/// Each subscriber is stored with the handler table of its channel handle.
/// On presence channels `members` maps subscribers to the user id they
/// identified as.
#[derive(Debug, Default)]
pub struct Topic {
    pub name: String,
    pub subscribers: HashMap<SubscriberId, Arc<HandlerTable>>,
    pub members: HashMap<SubscriberId, String>,
}

impl Topic {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscribers: HashMap::new(),
            members: HashMap::new(),
        }
    }

    /// Adds a subscriber; a second subscribe keeps the first handler table.
    pub fn subscribe(&mut self, id: SubscriberId, handlers: Arc<HandlerTable>) {
        self.subscribers.entry(id).or_insert(handlers);
    }

    pub fn unsubscribe(&mut self, id: &SubscriberId) {
        self.subscribers.remove(id);
        self.members.remove(id);
    }
}
