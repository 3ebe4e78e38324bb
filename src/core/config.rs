//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Battle engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Substitute a generated card pool when a circle's cards cannot be fetched.
    /// Masks real card-source failures, so it is off by default.
    pub enable_mock_fallback: bool,

    /// Lives each player starts a battle with.
    pub starting_lives: u32,

    /// Number of cards in a generated mock pool.
    pub mock_pool_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_mock_fallback: false,
            starting_lives: 3,
            mock_pool_size: 5,
        }
    }
}

impl EngineConfig {
    /// Enable or disable the mock card fallback.
    #[must_use]
    pub fn with_mock_fallback(mut self, enabled: bool) -> Self {
        self.enable_mock_fallback = enabled;
        self
    }

    /// Set the number of lives per player.
    #[must_use]
    pub fn with_starting_lives(mut self, lives: u32) -> Self {
        self.starting_lives = lives;
        self
    }

    /// Set the mock pool size.
    #[must_use]
    pub fn with_mock_pool_size(mut self, size: usize) -> Self {
        self.mock_pool_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(!config.enable_mock_fallback);
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.mock_pool_size, 5);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_mock_fallback(true)
            .with_starting_lives(1)
            .with_mock_pool_size(2);

        assert!(config.enable_mock_fallback);
        assert_eq!(config.starting_lives, 1);
        assert_eq!(config.mock_pool_size, 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"enableMockFallback": true}"#).unwrap();
        assert!(config.enable_mock_fallback);
        assert_eq!(config.starting_lives, 3);
    }
}
