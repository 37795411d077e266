use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Board size and presentation timings. None of these change the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub columns: usize,
    /// Time between engine ticks while playing
    pub tick_interval_ms: u64,
    /// First number shown by the pre-game countdown
    pub countdown_from: u32,
    /// Time each countdown number stays on screen
    pub countdown_step_ms: u64,
    /// Delay between revealing dead body segments
    pub death_segment_ms: u64,
    /// Pause after the death animation before the next game can start
    pub game_over_pause_ms: u64,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            columns: 25,
            tick_interval_ms: 100,
            countdown_from: 3,
            countdown_step_ms: 500,
            death_segment_ms: 50,
            game_over_pause_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Parse a YAML document; missing keys fall back to defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: GameConfig =
            serde_yaml_ng::from_str(content).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).context("Failed to serialize config")
    }

    /// Reject timings that would stall or spin the front end.
    ///
    /// Board size is checked by the engine itself on construction.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        ensure!(
            self.countdown_step_ms > 0,
            "countdown_step_ms must be positive"
        );
        ensure!(self.death_segment_ms > 0, "death_segment_ms must be positive");
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }

    pub fn death_segment(&self) -> Duration {
        Duration::from_millis(self.death_segment_ms)
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.rows, 25);
        assert_eq!(config.columns, 25);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.countdown_from, 3);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.rows, 15);
        assert_eq!(config.columns, 12);
        assert_eq!(config.death_segment_ms, 50);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = GameConfig::from_yaml_str("rows: 30\nseed: 7\n").unwrap();
        assert_eq!(config.rows, 30);
        assert_eq!(config.columns, 25);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.game_over_pause_ms, 1000);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = GameConfig {
            seed: Some(42),
            ..GameConfig::small()
        };
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(GameConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let err = GameConfig::from_yaml_str("tick_interval_ms: 0").unwrap_err();
        assert!(err.to_string().contains("tick_interval_ms"));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        assert!(GameConfig::from_yaml_str("rows: [1, 2").is_err());
    }
}
