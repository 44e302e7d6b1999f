//! The `chat` module holds the application-side chat values the adapter
//! moves around: users, messages and rooms.
//!
//! The adapter never looks inside a [`ChatMessage`]; rooms are reached only
//! through the [`ChatRoom`] trait so applications can plug in their own.

pub mod message;
pub mod room;
pub mod user;

pub use message::ChatMessage;
pub use room::{ChatRoom, Room};
pub use user::User;
