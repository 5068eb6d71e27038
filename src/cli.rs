use std::path::PathBuf;

use clap::{ArgAction, Parser};

use capitaly::config::{ConfigError, GameConfig};

/// Command-line interface for the Capitaly board game simulator!
#[derive(Debug, Parser)]
pub struct Cli {
    /// Scenario file listing the tiles, the players and optionally the rolls.
    /// Without rolls, the game is played interactively.
    pub input: PathBuf,
    /// Print the final report as JSON instead of text
    #[arg(long)]
    pub json: bool,
    /// Seed for the die used when rolling interactively
    #[arg(long)]
    pub seed: Option<u64>,
    /// JSON file with game settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Capital each player starts with
    #[arg(long)]
    pub starting_capital: Option<u32>,
    /// Number of faces on the die
    #[arg(long)]
    pub die_faces: Option<u32>,
    /// Log more details to stderr (repeat for even more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the game settings from the config file, if any, with individual
    /// flags taking precedence.
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(starting_capital) = self.starting_capital {
            config.starting_capital = starting_capital;
        }
        if let Some(die_faces) = self.die_faces {
            config.die_faces = die_faces;
        }

        Ok(config)
    }
}
