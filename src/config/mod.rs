//! Configuration loading for the `popchat` binary.

mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{ChatSettings, ClientSettings, LoggingSettings, Settings};

/// Loads the configuration from `config/default` (any format the `config`
/// crate understands, optional) and `POPCHAT_`-prefixed environment
/// variables, e.g. `POPCHAT_CLIENT__URL` or `POPCHAT_CHAT__ROOM`.
///
/// Values that neither source provides come from [`Settings::default`].
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("POPCHAT")
                .prefix_separator("_")
                .separator("__"),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    let client = partial.client;
    let chat = partial.chat;
    let logging = partial.logging;

    Ok(Settings {
        client: ClientSettings {
            url: client
                .as_ref()
                .and_then(|c| c.url.clone())
                .unwrap_or(default.client.url),
            client_auth: client
                .as_ref()
                .and_then(|c| c.client_auth)
                .unwrap_or(default.client.client_auth),
        },
        chat: ChatSettings {
            user_id: chat
                .as_ref()
                .and_then(|c| c.user_id.clone())
                .unwrap_or(default.chat.user_id),
            user_name: chat
                .as_ref()
                .and_then(|c| c.user_name.clone())
                .or(default.chat.user_name),
            room: chat
                .as_ref()
                .and_then(|c| c.room.clone())
                .unwrap_or(default.chat.room),
        },
        logging: LoggingSettings {
            level: logging
                .and_then(|l| l.level)
                .unwrap_or(default.logging.level),
        },
    })
}
