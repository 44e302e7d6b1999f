use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tracing::{debug, trace, warn};
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::chat::User;
use crate::client::channel_name::is_presence_channel;
use crate::client::{Channel, ChannelEvent, ClientAuth, HandlerTable, MessageHandler, PubSubClient};
use crate::transport::message::{ClientFrame, Envelope, ServerFrame};
use crate::utils::error::ClientError;

pub(crate) type ChannelMap = Mutex<HashMap<String, Arc<WsChannel>>>;

/// WebSocket connection to a popsub broker.
///
/// Calls never block: outbound frames are queued for a writer task and
/// inbound frames are dispatched to channel handlers from a reader task.
/// Dropping the client stops the reader.
#[derive(Debug)]
pub struct WsPubSubClient {
    socket_id: String,
    outbound: mpsc::UnboundedSender<WsMessage>,
    client_auth: Mutex<Option<ClientAuth>>,
    channels: Arc<ChannelMap>,
    reader: JoinHandle<()>,
}

impl WsPubSubClient {
    /// Connects to `url` and starts the connection's reader and writer tasks.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn connect(url: &str, client_auth: Option<ClientAuth>) -> Result<Self, ClientError> {
        let (ws_stream, _response) = connect_async(url).await?;
        let (mut ws_sender, mut ws_receiver) = ws_stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
        let socket_id = Uuid::new_v4().to_string();
        let channels: Arc<ChannelMap> = Arc::new(Mutex::new(HashMap::new()));

        {
            let socket_id = socket_id.clone();
            tokio::spawn(async move {
                while let Some(msg) = rx.recv().await {
                    if let Err(e) = ws_sender.send(msg).await {
                        warn!("Failed to send frame for {}: {}", socket_id, e);
                        break;
                    }
                }
                debug!("Send loop closed for {}", socket_id);
            });
        }

        let reader = {
            let socket_id = socket_id.clone();
            let channels = channels.clone();
            tokio::spawn(async move {
                while let Some(Ok(msg)) = ws_receiver.next().await {
                    if let WsMessage::Text(text) = msg {
                        handle_frame(&channels, &socket_id, text.as_str());
                    }
                }
                debug!("{} disconnected", socket_id);
            })
        };

        debug!("connected to {} as {}", url, socket_id);
        Ok(Self {
            socket_id,
            outbound: tx,
            client_auth: Mutex::new(client_auth),
            channels,
            reader,
        })
    }

    pub fn socket_id(&self) -> &str {
        &self.socket_id
    }

    fn user_id(&self) -> Option<String> {
        self.client_auth
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|auth| auth.user_id.clone())
    }
}

impl PubSubClient for WsPubSubClient {
    type Channel = WsChannel;

    fn supports_client_auth(&self) -> bool {
        self.client_auth
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn identify(&self, user: &User) -> Result<(), ClientError> {
        let mut client_auth = self
            .client_auth
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let auth = client_auth
            .as_mut()
            .ok_or(ClientError::ClientAuthUnavailable)?;
        auth.user_id = Some(user.id.clone());
        Ok(())
    }

    fn subscribe(&self, channel_name: &str) -> Result<Arc<WsChannel>, ClientError> {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(channel) = channels.get(channel_name) {
            return Ok(channel.clone());
        }

        let user_id = self.user_id();
        if is_presence_channel(channel_name) && user_id.is_none() {
            return Err(ClientError::PresenceWithoutUser(channel_name.to_string()));
        }

        send_frame(
            &self.outbound,
            &ClientFrame::Subscribe {
                topic: channel_name.to_string(),
            },
        )?;

        let channel = Arc::new(WsChannel::new(
            channel_name,
            &self.socket_id,
            user_id,
            self.outbound.clone(),
        ));
        channels.insert(channel_name.to_string(), channel.clone());
        debug!("{} subscribed to {}", self.socket_id, channel_name);
        Ok(channel)
    }
}

impl Drop for WsPubSubClient {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

/// Channel handle returned by [`WsPubSubClient::subscribe`].
#[derive(Debug)]
pub struct WsChannel {
    name: String,
    socket_id: String,
    user_id: Option<String>,
    outbound: mpsc::UnboundedSender<WsMessage>,
    handlers: HandlerTable,
}

impl WsChannel {
    pub(crate) fn new(
        name: &str,
        socket_id: &str,
        user_id: Option<String>,
        outbound: mpsc::UnboundedSender<WsMessage>,
    ) -> Self {
        Self {
            name: name.to_string(),
            socket_id: socket_id.to_string(),
            user_id,
            outbound,
            handlers: HandlerTable::default(),
        }
    }

    pub(crate) fn dispatch(&self, event: ChannelEvent, data: &Value) -> usize {
        self.handlers.dispatch(event, data)
    }
}

impl Channel for WsChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self, event: ChannelEvent, handler: MessageHandler) {
        self.handlers.bind(event, handler);
    }

    fn trigger(&self, event: ChannelEvent, data: Value) -> Result<(), ClientError> {
        if !event.is_client_event() {
            return Err(ClientError::NotClientEvent(event.name()));
        }

        let envelope = Envelope {
            event: event.name().to_string(),
            socket_id: self.socket_id.clone(),
            user_id: self.user_id.clone(),
            data,
        };
        send_frame(
            &self.outbound,
            &ClientFrame::Publish {
                topic: self.name.clone(),
                payload: serde_json::to_string(&envelope)?,
                timestamp: u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default(),
            },
        )
    }
}

fn send_frame(
    outbound: &mpsc::UnboundedSender<WsMessage>,
    frame: &ClientFrame,
) -> Result<(), ClientError> {
    let text = serde_json::to_string(frame)?;
    outbound
        .send(WsMessage::text(text))
        .map_err(|_| ClientError::Disconnected)
}

/// Routes one inbound text frame to the handlers of its channel.
///
/// Events stamped with this connection's `socket_id` are dropped: the broker
/// fans publishes out to every subscriber, the publisher included.
pub(crate) fn handle_frame(channels: &ChannelMap, socket_id: &str, text: &str) {
    let ServerFrame { topic, payload, .. } = match serde_json::from_str::<ServerFrame>(text) {
        Ok(frame) => frame,
        Err(err) => {
            debug!("Ignoring unrecognised frame: {}", err);
            return;
        }
    };

    let envelope = match serde_json::from_str::<Envelope>(&payload) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!("Invalid event payload on {}: {}", topic, err);
            return;
        }
    };
    if envelope.socket_id == socket_id {
        trace!("dropping own event on {}", topic);
        return;
    }
    let Some(event) = ChannelEvent::from_name(&envelope.event) else {
        trace!("ignoring event {} on {}", envelope.event, topic);
        return;
    };

    let channel = channels
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&topic)
        .cloned();
    match channel {
        Some(channel) => {
            channel.dispatch(event, &envelope.data);
        }
        None => trace!("no channel for topic {}", topic),
    }
}
