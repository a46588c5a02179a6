use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Smallest grid width the game accepts
pub const MIN_WIDTH: usize = 26;
/// Smallest grid height the game accepts
pub const MIN_HEIGHT: usize = 14;

/// Game speed, each mapping to a fixed delay between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl Speed {
    /// Get the tick interval for this speed
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(150),
            Self::Fast => Duration::from_millis(100),
        }
    }

    /// Parse a speed name; anything unrecognised is `Medium`
    pub fn from_name(name: &str) -> Self {
        match name {
            "slow" => Self::Slow,
            "fast" => Self::Fast,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        };
        f.write_str(name)
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub width: usize,
    /// Height of the game grid
    pub height: usize,
    /// Pace of the tick loop
    pub speed: Speed,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: MIN_WIDTH,
            height: MIN_HEIGHT,
            speed: Speed::Medium,
        }
    }
}

impl GameConfig {
    /// Create a configuration, raising width and height to their minimums
    pub fn new(width: usize, height: usize, speed: Speed) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
            speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 26);
        assert_eq!(config.height, 14);
        assert_eq!(config.speed, Speed::Medium);
    }

    #[test]
    fn test_dimensions_are_floored() {
        let config = GameConfig::new(10, 5, Speed::Fast);
        assert_eq!(config.width, MIN_WIDTH);
        assert_eq!(config.height, MIN_HEIGHT);

        let config = GameConfig::new(30, 15, Speed::Fast);
        assert_eq!(config.width, 30);
        assert_eq!(config.height, 15);
    }

    #[test]
    fn test_tick_intervals() {
        assert_eq!(Speed::Slow.tick_interval(), Duration::from_millis(200));
        assert_eq!(Speed::Medium.tick_interval(), Duration::from_millis(150));
        assert_eq!(Speed::Fast.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_speed_names() {
        assert_eq!(Speed::from_name("slow"), Speed::Slow);
        assert_eq!(Speed::from_name("fast"), Speed::Fast);
        assert_eq!(Speed::from_name("medium"), Speed::Medium);
        assert_eq!(Speed::from_name("ludicrous"), Speed::Medium);
        assert_eq!(Speed::Slow.to_string(), "slow");
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = GameConfig::new(30, 15, Speed::Fast);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"speed\":\"fast\""));

        let parsed: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let parsed: GameConfig =
            serde_json::from_str(r#"{"width":26,"height":14,"speed":"slow"}"#).unwrap();
        assert_eq!(parsed.speed, Speed::Slow);
    }
}
