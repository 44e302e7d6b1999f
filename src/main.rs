//! `popchat`: joins one room over a WebSocket broker, prints what arrives
//! and sends every stdin line as a chat message.

use std::sync::Arc;

use popchat::adapter::ChatChannelAdapter;
use popchat::chat::{ChatMessage, Room, User};
use popchat::client::ClientAuth;
use popchat::config::load_config;
use popchat::transport::WsPubSubClient;
use popchat::utils::logging;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    if let Err(e) = run().await {
        // no-op when run() already installed the configured subscriber
        logging::init("error");
        error!("popchat failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init(&config.logging.level);

    let client_auth = config.client.client_auth.then(ClientAuth::default);
    let client = WsPubSubClient::connect(&config.client.url, client_auth).await?;
    info!("Connected to {}", config.client.url);

    let mut user = User::new(config.chat.user_id.clone());
    if let Some(name) = &config.chat.user_name {
        user = user.with_name(name.clone());
    }
    let author = user.name.clone().unwrap_or_else(|| user.id.clone());

    let mut adapter = ChatChannelAdapter::new(client);
    adapter.set_user(user)?;

    let (tx, mut inbox) = mpsc::unbounded_channel();
    let room = Arc::new(Room::with_listener(config.chat.room.clone(), tx));
    adapter.add_room(room.clone())?;
    info!("Joined room {}", config.chat.room);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(text) if text.trim().is_empty() => {}
                    Some(text) => adapter.send(&*room, ChatMessage::new(author.clone(), text))?,
                    None => break,
                }
            }
            Some(message) = inbox.recv() => {
                println!("[{}] {}: {}", message.timestamp.format("%H:%M:%S"), message.author, message.text);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received. Exiting gracefully.");
                break;
            }
        }
    }

    Ok(())
}
