use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::broker::message::Message;
use crate::broker::topic::{SubscriberId, Topic};
use crate::client::channel_name::is_presence_channel;
use crate::client::{ChannelEvent, HandlerTable};

/// Events collected under the broker lock, to be run after it is released.
///
/// Handlers end up in application code (`ChatRoom::receive`), which must be
/// free to call back into the broker.
#[derive(Debug)]
#[must_use = "a delivery does nothing until dispatched"]
pub struct Delivery {
    targets: Vec<Arc<HandlerTable>>,
    event: ChannelEvent,
    data: Value,
}

impl Delivery {
    fn empty(event: ChannelEvent) -> Self {
        Self {
            targets: Vec::new(),
            event,
            data: Value::Null,
        }
    }

    pub fn recipients(&self) -> usize {
        self.targets.len()
    }

    pub fn dispatch(self) {
        for handlers in &self.targets {
            handlers.dispatch(self.event, &self.data);
        }
    }
}

/// In-memory channel registry.
///
/// The API is synchronous and meant to sit behind an `Arc<Mutex<Broker>>`
/// shared by every [`LocalClient`](crate::broker::LocalClient).
#[derive(Debug, Default)]
pub struct Broker {
    pub topics: HashMap<String, Topic>,
}

impl Broker {
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
        }
    }

    /// Subscribes a client to a topic, creating the topic if needed.
    ///
    /// On presence channels `member` is recorded in the roster and the other
    /// subscribers are sent a `MemberAdded` event.
    pub fn subscribe(
        &mut self,
        topic: &str,
        subscriber: SubscriberId,
        handlers: Arc<HandlerTable>,
        member: Option<String>,
    ) -> Delivery {
        let presence = is_presence_channel(topic);
        let topic = self
            .topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic));
        topic.subscribe(subscriber.clone(), handlers);
        debug!("{} subscribed to {}", subscriber, topic.name);

        let Some(user_id) = member.filter(|_| presence) else {
            return Delivery::empty(ChannelEvent::MemberAdded);
        };
        if topic.members.insert(subscriber.clone(), user_id.clone()).is_some() {
            return Delivery::empty(ChannelEvent::MemberAdded);
        }

        Delivery {
            targets: others(topic, &subscriber),
            event: ChannelEvent::MemberAdded,
            data: json!({ "user_id": user_id }),
        }
    }

    /// Collects the subscribers of `msg.topic` other than its sender.
    /// Unknown topics produce an empty delivery.
    pub fn publish(&self, msg: Message) -> Delivery {
        let Some(topic) = self.topics.get(&msg.topic) else {
            trace!("Topic '{}' not found.", msg.topic);
            return Delivery::empty(msg.event);
        };

        Delivery {
            targets: others(topic, &msg.sender),
            event: msg.event,
            data: msg.data,
        }
    }

    /// User ids present on a presence channel, sorted.
    pub fn members(&self, topic: &str) -> Vec<String> {
        let mut members: Vec<String> = self
            .topics
            .get(topic)
            .map(|t| t.members.values().cloned().collect())
            .unwrap_or_default();
        members.sort();
        members.dedup();
        members
    }

    /// Removes a client from every topic it subscribed to.
    pub fn cleanup_client(&mut self, client_id: &SubscriberId) {
        for topic in self.topics.values_mut() {
            topic.unsubscribe(client_id);
        }
        debug!("Cleaned up client {}", client_id);
    }
}

fn others(topic: &Topic, sender: &SubscriberId) -> Vec<Arc<HandlerTable>> {
    topic
        .subscribers
        .iter()
        .filter(|(id, _)| *id != sender)
        .map(|(_, handlers)| handlers.clone())
        .collect()
}
