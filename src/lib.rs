//! # PopChat
//!
//! `popchat` maps a chat-room abstraction onto a hosted publish/subscribe
//! service. Every room becomes a presence channel, messages travel as
//! client-triggered events, and a sender sees its own messages through a
//! local echo since the service never returns client events to their
//! originator.
//!
//! ## Core Modules
//!
//! - `adapter`: the `ChatChannelAdapter` tying rooms to channels.
//! - `broker`: an in-process pub/sub service and client, for tests and local use.
//! - `chat`: users, messages and the `ChatRoom` trait.
//! - `client`: the `PubSubClient`/`Channel` traits, event names and channel naming.
//! - `config`: loading the binary's configuration.
//! - `transport`: a WebSocket `PubSubClient` for popsub brokers.
//! - `utils`: error types and logging setup.

pub mod adapter;
pub mod broker;
pub mod chat;
pub mod client;
pub mod config;
pub mod transport;
pub mod utils;
