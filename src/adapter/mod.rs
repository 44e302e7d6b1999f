//! The `adapter` module maps chat rooms onto pub/sub channels.
//!
//! See [`ChatChannelAdapter`] for the lifecycle: set a user, add rooms, send.

pub mod chat_adapter;

pub use crate::client::NEW_MESSAGE_EVENT;
pub use chat_adapter::ChatChannelAdapter;
