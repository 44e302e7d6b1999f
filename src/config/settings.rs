use serde::Deserialize;

/// Top-level configuration settings for the chat client.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub client: ClientSettings,
    pub chat: ChatSettings,
    pub logging: LoggingSettings,
}

/// Connection to the pub/sub service.
///
/// `client_auth` enables client-side authentication, which the chat adapter
/// requires.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    pub url: String,
    pub client_auth: bool,
}

/// Identity and room used by the `popchat` binary.
#[derive(Debug, Deserialize, Clone)]
pub struct ChatSettings {
    pub user_id: String,
    pub user_name: Option<String>,
    pub room: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from [`Settings::default`].
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub client: Option<PartialClientSettings>,
    pub chat: Option<PartialChatSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialClientSettings {
    pub url: Option<String>,
    pub client_auth: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PartialChatSettings {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client: ClientSettings {
                url: "ws://127.0.0.1:8080".to_string(),
                client_auth: true,
            },
            chat: ChatSettings {
                user_id: "guest".to_string(),
                user_name: None,
                room: "general".to_string(),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}
