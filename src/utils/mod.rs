//! The `utils` module provides the error types and logging setup shared
//! across the `popchat` crate.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests {
    use super::logging::{init, level_from_name};
    use tracing::Level;

    #[test]
    fn level_names_are_parsed_leniently() {
        assert_eq!(level_from_name("debug"), Level::DEBUG);
        assert_eq!(level_from_name(" WARN "), Level::WARN);
        assert_eq!(level_from_name("warning"), Level::WARN);
        assert_eq!(level_from_name("nonsense"), Level::INFO);
    }

    #[test]
    fn init_keeps_first_subscriber() {
        init("info");
        assert!(!init("debug"));
    }
}
