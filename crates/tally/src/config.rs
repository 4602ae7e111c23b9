//! Counter configuration.
use serde::{Deserialize, Serialize};
use tally_view::error::Error;

/// Settings for one counter screen.
///
/// Every field has a default, so any subset may be given:
///
/// ```json
/// { "initial_count": 5, "log_level": "debug" }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// The count shown when the screen first appears.
    pub initial_count: i64,
    pub log_level: log::LevelFilter,
}

impl Default for CounterConfig {
    fn default() -> Self {
        CounterConfig {
            initial_count: 0,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl CounterConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(Error::from)
            .map_err(|e| e.context("invalid counter configuration"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = CounterConfig::from_json("{}").unwrap();
        assert_eq!(config, CounterConfig::default());
        assert_eq!(config.initial_count, 0);
        assert_eq!(config.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn partial() {
        let config = CounterConfig::from_json(r#"{"initial_count": -3}"#).unwrap();
        assert_eq!(config.initial_count, -3);
        assert_eq!(config.log_level, log::LevelFilter::Info);

        let config = CounterConfig::from_json(r#"{"log_level": "DEBUG"}"#).unwrap();
        assert_eq!(config.initial_count, 0);
        assert_eq!(config.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn invalid() {
        let err = CounterConfig::from_json(r#"{"initial_count": "lots"}"#).unwrap_err();
        assert!(!err.is_unsupported());
        assert_eq!(err.to_string(), "invalid counter configuration");

        assert!(CounterConfig::from_json("not json").is_err());
    }
}
