use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{BOARD_SIZE, INITIAL_LENGTH};

/// On-disk form of the game settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub board_size: u32,
    pub tick_interval_ms: u32,
    pub initial_length: u32,
    pub leaderboard_capacity: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE as u32,
            tick_interval_ms: 150,
            initial_length: INITIAL_LENGTH as u32,
            leaderboard_capacity: 10,
        }
    }
}

impl Validate for SnakeConfig {
    fn validate(&self) -> Result<(), String> {
        if !(4..=64).contains(&self.board_size) {
            return Err("Board size must be between 4 and 64".to_string());
        }
        if !(20..=5000).contains(&self.tick_interval_ms) {
            return Err("Tick interval must be between 20ms and 5000ms".to_string());
        }
        if !(1..=16).contains(&self.initial_length) {
            return Err("Initial length must be between 1 and 16".to_string());
        }
        if !(1..=100).contains(&self.leaderboard_capacity) {
            return Err("Leaderboard capacity must be between 1 and 100".to_string());
        }
        Ok(())
    }
}

/// Runtime form of [`SnakeConfig`] used by the engine.
#[derive(Clone, Debug)]
pub struct SnakeSettings {
    pub board_size: i32,
    pub tick_interval: Duration,
    pub initial_length: usize,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self::from(&SnakeConfig::default())
    }
}

impl From<&SnakeConfig> for SnakeSettings {
    fn from(config: &SnakeConfig) -> Self {
        Self {
            board_size: config.board_size as i32,
            tick_interval: Duration::from_millis(config.tick_interval_ms as u64),
            initial_length: config.initial_length.max(1) as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SnakeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_settings_match_classic_rules() {
        let settings = SnakeSettings::default();
        assert_eq!(settings.board_size, 16);
        assert_eq!(settings.tick_interval, Duration::from_millis(150));
        assert_eq!(settings.initial_length, 4);
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let small_board = SnakeConfig { board_size: 2, ..SnakeConfig::default() };
        assert!(small_board.validate().is_err());

        let fast_tick = SnakeConfig { tick_interval_ms: 1, ..SnakeConfig::default() };
        assert!(fast_tick.validate().is_err());

        let no_length = SnakeConfig { initial_length: 0, ..SnakeConfig::default() };
        assert!(no_length.validate().is_err());

        let no_leaderboard = SnakeConfig { leaderboard_capacity: 0, ..SnakeConfig::default() };
        assert!(no_leaderboard.validate().is_err());
    }
}
