use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};
use wrap_snake::game::GameConfig;
use wrap_snake::game::config::CLASSIC_FOOD_COUNT;
use wrap_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a board that wraps around at the edges")]
struct Cli {
    /// Grid width; with --height pins the board instead of fitting the terminal
    #[arg(long, requires = "height")]
    width: Option<usize>,

    /// Grid height
    #[arg(long, requires = "width")]
    height: Option<usize>,

    /// Number of food items on the board
    #[arg(long, conflicts_with = "classic")]
    food: Option<usize>,

    /// Play with a single food item
    #[arg(long, action = ArgAction::SetTrue)]
    classic: bool,

    /// Starting tick period in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// JSON file with a game configuration; other flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log (the terminal is taken by the game)
    #[arg(long, default_value = "wrap_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig {
                fit_to_terminal: true,
                ..GameConfig::default()
            },
        };

        if let (Some(width), Some(height)) = (self.width, self.height) {
            config.grid_width = width;
            config.grid_height = height;
            config.fit_to_terminal = false;
        }
        if self.classic {
            config.food_count = CLASSIC_FOOD_COUNT;
        }
        if let Some(food) = self.food {
            config.food_count = food;
        }
        if let Some(speed) = self.speed {
            config.initial_speed_ms = speed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file, cli.log_level)?;

    let config = cli.game_config()?;
    info!("Starting with {:?}", config);

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fit_terminal() {
        let cli = Cli::parse_from(["wrap_snake"]);
        let config = cli.game_config().unwrap();
        assert!(config.fit_to_terminal);
        assert_eq!(config.food_count, 5);
    }

    #[test]
    fn test_fixed_board_and_overrides() {
        let cli = Cli::parse_from([
            "wrap_snake", "--width", "30", "--height", "12", "--classic", "--speed", "150",
        ]);
        let config = cli.game_config().unwrap();
        assert!(!config.fit_to_terminal);
        assert_eq!((config.grid_width, config.grid_height), (30, 12));
        assert_eq!(config.food_count, 1);
        assert_eq!(config.initial_speed_ms, 150);
    }

    #[test]
    fn test_width_requires_height() {
        assert!(Cli::try_parse_from(["wrap_snake", "--width", "30"]).is_err());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = Cli::parse_from(["wrap_snake", "--speed", "10"]);
        assert!(cli.game_config().is_err());
    }
}
