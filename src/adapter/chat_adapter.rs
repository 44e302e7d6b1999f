use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::chat::{ChatMessage, ChatRoom, User};
use crate::client::{Channel, ChannelEvent, PubSubClient, channel_name_for_room};
use crate::utils::error::AdapterError;

/// Chat adapter over a hosted pub/sub service.
///
/// Each room is backed by a presence channel whose name is derived from the
/// room name. Messages are published as `client-new-message` events. The
/// service never echoes a client event back to its sender, so [`send`]
/// also hands the message to the local room directly.
///
/// Lifecycle calls are expected from a single thread of control:
///
/// 1. [`set_user`] once, before any room is added;
/// 2. [`add_room`] for every room to join;
/// 3. [`send`] to rooms that were added.
///
/// [`set_user`]: ChatChannelAdapter::set_user
/// [`add_room`]: ChatChannelAdapter::add_room
/// [`send`]: ChatChannelAdapter::send
pub struct ChatChannelAdapter<C: PubSubClient> {
    client: C,
    user: Option<User>,
    room_channels: HashMap<String, Arc<C::Channel>>,
}

impl<C: PubSubClient> ChatChannelAdapter<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            user: None,
            room_channels: HashMap::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Names of the rooms added so far.
    pub fn rooms(&self) -> impl Iterator<Item = &str> {
        self.room_channels.keys().map(String::as_str)
    }

    /// Sets the local user and passes its id to the client's authentication.
    ///
    /// Only clients configured for client-side authentication are supported;
    /// other clients fail with [`AdapterError::ClientAuthUnavailable`] and the
    /// user is left unset.
    pub fn set_user(&mut self, user: User) -> Result<(), AdapterError> {
        if !self.client.supports_client_auth() {
            return Err(AdapterError::ClientAuthUnavailable);
        }
        self.client.identify(&user)?;
        debug!(user_id = %user.id, "chat user set");
        self.user = Some(user);
        Ok(())
    }

    /// Subscribes to the room's channel and routes inbound messages to
    /// `room.receive`.
    ///
    /// Adding a room whose name is already mapped is a no-op.
    pub fn add_room<R>(&mut self, room: Arc<R>) -> Result<(), AdapterError>
    where
        R: ChatRoom + 'static,
    {
        if self.user.is_none() {
            return Err(AdapterError::UserNotSet);
        }
        if self.room_channels.contains_key(room.name()) {
            debug!(room = room.name(), "room already added");
            return Ok(());
        }

        let channel_name = channel_name_for_room(room.name());
        let channel = self.client.subscribe(&channel_name)?;
        self.room_channels
            .insert(room.name().to_string(), channel.clone());

        let target = room.clone();
        channel.bind(
            ChannelEvent::NewMessage,
            Arc::new(move |data| match serde_json::from_value::<ChatMessage>(data) {
                Ok(message) => deliver(&*target, message),
                Err(err) => warn!(room = target.name(), "dropping undecodable chat message: {err}"),
            }),
        );

        debug!(room = room.name(), channel = %channel_name, "room added");
        Ok(())
    }

    /// Publishes `message` to the room's channel and delivers it locally.
    pub fn send(&self, room: &dyn ChatRoom, message: ChatMessage) -> Result<(), AdapterError> {
        let channel = self
            .room_channels
            .get(room.name())
            .ok_or_else(|| AdapterError::UnknownRoom(room.name().to_string()))?;

        channel.trigger(ChannelEvent::NewMessage, serde_json::to_value(&message)?)?;
        debug!(room = room.name(), message_id = %message.id, "message sent");

        // the service does not send client events back to their originator
        deliver(room, message);
        Ok(())
    }
}

/// Shared delivery path for inbound events and locally sent messages.
fn deliver(room: &dyn ChatRoom, message: ChatMessage) {
    debug!(room = room.name(), message_id = %message.id, "delivering message");
    room.receive(message);
}
