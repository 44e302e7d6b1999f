//! The `broker` module is an in-process stand-in for the hosted pub/sub
//! service.
//!
//! [`Broker`] keeps channels, their subscribers and presence rosters;
//! [`LocalClient`] is a [`PubSubClient`](crate::client::PubSubClient) bound to
//! a shared broker. Delivery follows the hosted service's rules: client
//! events never come back to the client that triggered them.

pub mod engine;
pub mod local_client;
pub mod message;
pub mod topic;

pub use engine::{Broker, Delivery};
pub use local_client::{LocalChannel, LocalClient};

#[cfg(test)]
mod tests;
