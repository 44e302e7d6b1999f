use std::str::FromStr;

use tracing::Level;

/// Maps a configured level name to a tracing level.
///
/// Accepts anything `Level::from_str` does (`"warn"`, `"DEBUG"`, `"3"`...)
/// plus `"warning"`. Unrecognised names fall back to `INFO`.
pub fn level_from_name(name: &str) -> Level {
    let name = name.trim();
    if name.eq_ignore_ascii_case("warning") {
        return Level::WARN;
    }
    Level::from_str(name).unwrap_or(Level::INFO)
}

/// Installs the global fmt subscriber for the binary.
///
/// Returns `false` when a subscriber was already installed, in which case
/// the existing one is kept.
pub fn init(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level_from_name(level))
        .with_target(false)
        .try_init()
        .is_ok()
}
