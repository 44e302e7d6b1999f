use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use uuid::Uuid;

use crate::broker::engine::Broker;
use crate::broker::message::Message;
use crate::broker::topic::SubscriberId;
use crate::chat::User;
use crate::client::channel_name::is_presence_channel;
use crate::client::{Channel, ChannelEvent, ClientAuth, HandlerTable, MessageHandler, PubSubClient};
use crate::utils::error::ClientError;

/// A connection to an in-process [`Broker`].
///
/// Dropping the client removes its subscriptions from the broker.
#[derive(Debug)]
pub struct LocalClient {
    id: SubscriberId,
    broker: Arc<Mutex<Broker>>,
    client_auth: Mutex<Option<ClientAuth>>,
    channels: Mutex<HashMap<String, Arc<LocalChannel>>>,
}

impl LocalClient {
    /// Connects to `broker`. Pass `Some(ClientAuth::default())` to enable
    /// client-side authentication.
    pub fn connect(broker: &Arc<Mutex<Broker>>, client_auth: Option<ClientAuth>) -> Self {
        Self {
            id: format!("client-{}", Uuid::new_v4()),
            broker: broker.clone(),
            client_auth: Mutex::new(client_auth),
            channels: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn user_id(&self) -> Option<String> {
        self.client_auth
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|auth| auth.user_id.clone())
    }
}

impl PubSubClient for LocalClient {
    type Channel = LocalChannel;

    fn supports_client_auth(&self) -> bool {
        self.client_auth
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn identify(&self, user: &User) -> Result<(), ClientError> {
        let mut client_auth = self
            .client_auth
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let auth = client_auth
            .as_mut()
            .ok_or(ClientError::ClientAuthUnavailable)?;
        auth.user_id = Some(user.id.clone());
        Ok(())
    }

    fn subscribe(&self, channel_name: &str) -> Result<Arc<LocalChannel>, ClientError> {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(channel) = channels.get(channel_name) {
            return Ok(channel.clone());
        }

        let member = self.user_id();
        if is_presence_channel(channel_name) && member.is_none() {
            return Err(ClientError::PresenceWithoutUser(channel_name.to_string()));
        }

        let channel = Arc::new(LocalChannel {
            name: channel_name.to_string(),
            client_id: self.id.clone(),
            broker: self.broker.clone(),
            handlers: Arc::new(HandlerTable::default()),
        });
        channels.insert(channel_name.to_string(), channel.clone());
        drop(channels);

        let delivery = self
            .broker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribe(channel_name, self.id.clone(), channel.handlers.clone(), member);
        delivery.dispatch();

        Ok(channel)
    }
}

impl Drop for LocalClient {
    fn drop(&mut self) {
        self.broker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cleanup_client(&self.id);
    }
}

/// Channel handle returned by [`LocalClient::subscribe`].
#[derive(Debug)]
pub struct LocalChannel {
    name: String,
    client_id: SubscriberId,
    broker: Arc<Mutex<Broker>>,
    handlers: Arc<HandlerTable>,
}

impl Channel for LocalChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self, event: ChannelEvent, handler: MessageHandler) {
        self.handlers.bind(event, handler);
    }

    fn trigger(&self, event: ChannelEvent, data: Value) -> Result<(), ClientError> {
        if !event.is_client_event() {
            return Err(ClientError::NotClientEvent(event.name()));
        }

        let delivery = self
            .broker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .publish(Message {
                topic: self.name.clone(),
                event,
                data,
                sender: self.client_id.clone(),
            });
        delivery.dispatch();
        Ok(())
    }
}
