use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Prefix marking a channel as presence-capable.
pub const PRESENCE_PREFIX: &str = "presence-";

/// Encodes a room name into a channel identifier.
///
/// Base64 keeps any room name inside the channel-name alphabet, the prefix
/// makes the channel a presence channel.
pub fn channel_name_for_room(room_name: &str) -> String {
    format!("{PRESENCE_PREFIX}{}", STANDARD.encode(room_name))
}

/// Inverse of [`channel_name_for_room`]. Returns `None` for channels that
/// were not produced by it.
pub fn room_name_from_channel(channel_name: &str) -> Option<String> {
    let encoded = channel_name.strip_prefix(PRESENCE_PREFIX)?;
    let bytes = STANDARD.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}

pub fn is_presence_channel(channel_name: &str) -> bool {
    channel_name.starts_with(PRESENCE_PREFIX)
}
