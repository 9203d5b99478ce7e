use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::state::{BoardSize, Position};

/// Milliseconds per tick at the start of a game
pub const INITIAL_SPEED_MS: u64 = 200;
/// Fastest the game is allowed to get
pub const MIN_SPEED_MS: u64 = 50;
/// How much faster each food item makes the game
pub const SPEED_STEP_MS: u64 = 10;
/// Food items on the board at once
pub const DEFAULT_FOOD_COUNT: usize = 5;
/// Food items in the classic single-food variant
pub const CLASSIC_FOOD_COUNT: usize = 1;
/// Where a fresh snake starts
pub const START_POSITION: Position = Position { x: 10, y: 10 };

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Number of food items kept on the board
    pub food_count: usize,

    // Speed ramp
    /// Tick period of a fresh game, in milliseconds
    pub initial_speed_ms: u64,
    /// Lower bound of the tick period
    pub min_speed_ms: u64,
    /// Tick period decrease per food item eaten
    pub speed_step_ms: u64,

    /// Starting cell of the snake
    pub start: Position,
    /// Follow the terminal size instead of keeping the grid fixed
    pub fit_to_terminal: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            food_count: DEFAULT_FOOD_COUNT,
            initial_speed_ms: INITIAL_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            speed_step_ms: SPEED_STEP_MS,
            start: START_POSITION,
            fit_to_terminal: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// The single-food variant
    pub fn classic() -> Self {
        Self {
            food_count: CLASSIC_FOOD_COUNT,
            ..Default::default()
        }
    }

    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        BoardSize::new(self.grid_width, self.grid_height).check()?;
        ensure!(self.food_count > 0, "food_count must be at least 1");
        ensure!(self.min_speed_ms > 0, "min_speed_ms must be positive");
        ensure!(
            self.initial_speed_ms >= self.min_speed_ms,
            "initial_speed_ms ({}) is below min_speed_ms ({})",
            self.initial_speed_ms,
            self.min_speed_ms
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.food_count, 5);
        assert_eq!(config.initial_speed_ms, 200);
        assert_eq!(config.min_speed_ms, 50);
        assert_eq!(config.speed_step_ms, 10);
        assert_eq!(config.start, Position::new(10, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.food_count, DEFAULT_FOOD_COUNT);
    }

    #[test]
    fn test_classic_has_one_food() {
        assert_eq!(GameConfig::classic().food_count, 1);
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        assert!(GameConfig::new(0, 10).validate().is_err());
        assert!(GameConfig::new(10, 0).validate().is_err());
        // Would not survive the conversion to cell coordinates
        assert!(GameConfig::new(1usize << 32, 10).validate().is_err());
        assert!(GameConfig::new(10, i32::MAX as usize + 1).validate().is_err());
        assert!(GameConfig::new(70_000, 10).validate().is_err());
        assert!(GameConfig::new(u16::MAX as usize, 10).validate().is_ok());

        let mut config = GameConfig::default();
        config.food_count = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.min_speed_ms = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.initial_speed_ms = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 32, "food_count": 3 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.food_count, 3);
        assert_eq!(config.initial_speed_ms, INITIAL_SPEED_MS);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_height": 0 }}"#).unwrap();

        assert!(GameConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GameConfig::load(&dir.path().join("nope.json")).is_err());
    }
}
