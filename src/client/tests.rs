use super::channel_name::is_presence_channel;
use super::{ChannelEvent, PRESENCE_PREFIX, channel_name_for_room, room_name_from_channel};

#[test]
fn test_channel_name_has_presence_prefix() {
    let name = channel_name_for_room("general");
    assert_eq!(name, "presence-Z2VuZXJhbA==");
    assert!(is_presence_channel(&name));
}

#[test]
fn test_channel_name_decodes_back_to_room_name() {
    let rooms = [
        "",
        "general",
        "room with spaces",
        "a+b/c=d",
        "ünïcødé 聊天室",
        "presence-nested",
        "emoji 🎉",
    ];
    for room in rooms {
        let channel = channel_name_for_room(room);
        assert!(channel.starts_with(PRESENCE_PREFIX), "{channel}");
        assert_eq!(room_name_from_channel(&channel).as_deref(), Some(room));
    }
}

#[test]
fn test_channel_name_stays_in_channel_alphabet() {
    let channel = channel_name_for_room("weird #room: !@$%^&*()");
    assert!(
        channel
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=@,.;+/".contains(c))
    );
}

#[test]
fn test_room_name_from_foreign_channel() {
    assert_eq!(room_name_from_channel("private-abc"), None);
    assert_eq!(room_name_from_channel("presence-not*base64"), None);
}

#[test]
fn test_event_names() {
    assert_eq!(ChannelEvent::NewMessage.name(), "client-new-message");
    assert_eq!(
        ChannelEvent::from_name("client-new-message"),
        Some(ChannelEvent::NewMessage)
    );
    assert_eq!(ChannelEvent::from_name("client-other"), None);
    assert!(ChannelEvent::NewMessage.is_client_event());
    assert!(!ChannelEvent::MemberAdded.is_client_event());
    assert_eq!(ChannelEvent::MemberAdded.to_string(), "pusher:member_added");
}

#[test]
fn test_handler_table_dispatches_only_bound_event() {
    use super::HandlerTable;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    let table = HandlerTable::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    table.bind(
        ChannelEvent::NewMessage,
        Arc::new(move |data| sink.lock().unwrap().push(data)),
    );

    assert_eq!(table.dispatch(ChannelEvent::MemberAdded, &json!({})), 0);
    assert_eq!(table.dispatch(ChannelEvent::NewMessage, &json!({"n": 1})), 1);
    assert_eq!(*seen.lock().unwrap(), vec![json!({"n": 1})]);
}
