use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use super::message::Message;
use super::topic::Topic;
use super::{Broker, LocalClient};
use crate::chat::User;
use crate::client::{Channel, ChannelEvent, ClientAuth, HandlerTable, PubSubClient};
use crate::utils::error::ClientError;

fn recorder() -> (Arc<Mutex<Vec<Value>>>, crate::client::MessageHandler) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, Arc::new(move |data| sink.lock().unwrap().push(data)))
}

fn identified_client(broker: &Arc<Mutex<Broker>>, user: &str) -> LocalClient {
    let client = LocalClient::connect(broker, Some(ClientAuth::default()));
    client.identify(&User::new(user)).unwrap();
    client
}

#[test]
fn test_topic_subscribe_and_unsubscribe() {
    let mut topic = Topic::new("test_topic");
    topic.subscribe("client1".to_string(), Arc::new(HandlerTable::default()));
    topic.members.insert("client1".to_string(), "alice".to_string());
    assert!(topic.subscribers.contains_key("client1"));

    topic.unsubscribe(&"client1".to_string());
    assert!(topic.subscribers.is_empty());
    assert!(topic.members.is_empty());
}

#[test]
fn test_publish_skips_sender() {
    let mut broker = Broker::new();
    let a = Arc::new(HandlerTable::default());
    let b = Arc::new(HandlerTable::default());
    let _ = broker.subscribe("chat", "a".to_string(), a, None);
    let _ = broker.subscribe("chat", "b".to_string(), b, None);

    let delivery = broker.publish(Message {
        topic: "chat".to_string(),
        event: ChannelEvent::NewMessage,
        data: json!("hi"),
        sender: "a".to_string(),
    });
    assert_eq!(delivery.recipients(), 1);
}

#[test]
fn test_publish_to_nonexistent_topic() {
    let broker = Broker::new();
    let delivery = broker.publish(Message {
        topic: "nowhere".to_string(),
        event: ChannelEvent::NewMessage,
        data: json!("hi"),
        sender: "a".to_string(),
    });
    assert_eq!(delivery.recipients(), 0);
}

#[test]
fn test_client_events_reach_other_clients_only() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let alice = identified_client(&broker, "alice");
    let bob = identified_client(&broker, "bob");

    let alice_channel = alice.subscribe("presence-room").unwrap();
    let bob_channel = bob.subscribe("presence-room").unwrap();
    let (alice_seen, alice_handler) = recorder();
    let (bob_seen, bob_handler) = recorder();
    alice_channel.bind(ChannelEvent::NewMessage, alice_handler);
    bob_channel.bind(ChannelEvent::NewMessage, bob_handler);

    alice_channel
        .trigger(ChannelEvent::NewMessage, json!({"text": "hello"}))
        .unwrap();

    assert!(alice_seen.lock().unwrap().is_empty());
    assert_eq!(*bob_seen.lock().unwrap(), vec![json!({"text": "hello"})]);
}

#[test]
fn test_subscribe_twice_returns_same_channel() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let client = identified_client(&broker, "alice");
    let first = client.subscribe("presence-room").unwrap();
    let second = client.subscribe("presence-room").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(broker.lock().unwrap().members("presence-room"), vec!["alice"]);
}

#[test]
fn test_presence_requires_identity() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let client = LocalClient::connect(&broker, Some(ClientAuth::default()));

    let err = client.subscribe("presence-room").unwrap_err();
    assert!(matches!(err, ClientError::PresenceWithoutUser(name) if name == "presence-room"));
    // public channels need no identity
    assert!(client.subscribe("public-room").is_ok());
}

#[test]
fn test_identify_without_client_auth() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let client = LocalClient::connect(&broker, None);
    assert!(!client.supports_client_auth());
    assert!(matches!(
        client.identify(&User::new("alice")),
        Err(ClientError::ClientAuthUnavailable)
    ));
}

#[test]
fn test_member_added_notifies_existing_subscribers() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let alice = identified_client(&broker, "alice");
    let channel = alice.subscribe("presence-room").unwrap();
    let (seen, handler) = recorder();
    channel.bind(ChannelEvent::MemberAdded, handler);

    let bob = identified_client(&broker, "bob");
    let _bob_channel = bob.subscribe("presence-room").unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![json!({"user_id": "bob"})]);
    assert_eq!(
        broker.lock().unwrap().members("presence-room"),
        vec!["alice", "bob"]
    );
}

#[test]
fn test_service_events_cannot_be_triggered() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let client = identified_client(&broker, "alice");
    let channel = client.subscribe("presence-room").unwrap();
    assert!(matches!(
        channel.trigger(ChannelEvent::MemberAdded, json!({})),
        Err(ClientError::NotClientEvent("pusher:member_added"))
    ));
}

#[test]
fn test_dropping_client_cleans_up() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let client = identified_client(&broker, "alice");
    let _channel = client.subscribe("presence-room").unwrap();
    drop(client);

    let broker = broker.lock().unwrap();
    assert!(broker.topics["presence-room"].subscribers.is_empty());
    assert!(broker.members("presence-room").is_empty());
}

#[test]
fn test_subscriber_is_keyed_by_client_id() {
    let broker = Arc::new(Mutex::new(Broker::new()));
    let alice = identified_client(&broker, "alice");
    let bob = identified_client(&broker, "bob");
    assert_ne!(alice.id(), bob.id());

    let _channel = alice.subscribe("presence-room").unwrap();
    let broker = broker.lock().unwrap();
    let topic = &broker.topics["presence-room"];
    assert!(topic.subscribers.contains_key(alice.id()));
    assert_eq!(topic.members[alice.id()], "alice");
    assert!(!topic.subscribers.contains_key(bob.id()));
}
