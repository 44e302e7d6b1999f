use std::fmt;

/// Name of the client event carrying chat messages.
pub const NEW_MESSAGE_EVENT: &str = "client-new-message";

/// Name of the service event announcing a new presence member.
pub const MEMBER_ADDED_EVENT: &str = "pusher:member_added";

/// Events a channel handler can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelEvent {
    /// A chat message published by another subscriber.
    NewMessage,
    /// Another user joined a presence channel. Emitted by the service only.
    MemberAdded,
}

impl ChannelEvent {
    pub fn name(self) -> &'static str {
        match self {
            ChannelEvent::NewMessage => NEW_MESSAGE_EVENT,
            ChannelEvent::MemberAdded => MEMBER_ADDED_EVENT,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            NEW_MESSAGE_EVENT => Some(ChannelEvent::NewMessage),
            MEMBER_ADDED_EVENT => Some(ChannelEvent::MemberAdded),
            _ => None,
        }
    }

    /// Client-triggered events must carry the `client-` prefix.
    pub fn is_client_event(self) -> bool {
        self.name().starts_with("client-")
    }
}

impl fmt::Display for ChannelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
