//! The `client` module defines the seam between the chat adapter and the
//! hosted pub/sub service.
//!
//! It provides the [`PubSubClient`] and [`Channel`] traits the adapter is
//! written against, the typed [`ChannelEvent`] enumeration, and the rules for
//! turning room names into channel identifiers.

pub mod channel_name;
pub mod event;
pub mod handlers;
pub mod pubsub_client;

pub use channel_name::{PRESENCE_PREFIX, channel_name_for_room, room_name_from_channel};
pub use event::{ChannelEvent, NEW_MESSAGE_EVENT};
pub use handlers::HandlerTable;
pub use pubsub_client::{Channel, ClientAuth, MessageHandler, PubSubClient};

#[cfg(test)]
mod tests;
