//! The `transport` module provides a [`PubSubClient`](crate::client::PubSubClient)
//! that reaches a popsub broker over WebSockets.
//!
//! It defines the JSON frames exchanged with the broker and the event
//! envelope carried inside published payloads, and implements the client
//! itself with a writer task and a reader task per connection.

pub mod message;
pub mod websocket;

pub use websocket::{WsChannel, WsPubSubClient};
