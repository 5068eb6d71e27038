use std::{fs, io, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

/// Tunable rules of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Capital every player starts with.
    pub starting_capital: u32,
    /// Rolls must fall between 1 and this value.
    pub die_faces: u32,
}

impl GameConfig {
    pub const STARTING_CAPITAL: u32 = 10000;
    pub const DIE_FACES: u32 = 6;

    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_owned(),
            source,
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_capital: Self::STARTING_CAPITAL,
            die_faces: Self::DIE_FACES,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
}
