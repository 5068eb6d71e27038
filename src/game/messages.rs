use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, StrategyKind};
use super::tile::TileId;

/// What happened when a player landed on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Outcome {
    /// The player bought an unowned piece of real estate.
    Bought { price: u32 },
    /// The player added a house to their own real estate.
    Upgraded { price: u32 },
    /// The player passed on buying or upgrading, or could not afford it.
    Declined { price: u32 },
    /// The player's own real estate already has a house.
    FullyDeveloped,
    /// The player landed on someone else's real estate. `amount` is what was
    /// actually handed over, which is less than the fee on bankruptcy.
    PaidRent { owner: PlayerId, amount: u32 },
    PaidFee { amount: u32 },
    Rewarded { amount: u32 },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Bought { price } => write!(f, "bought it for ${price}"),
            Outcome::Upgraded { price } => write!(f, "built a house for ${price}"),
            Outcome::Declined { price } => write!(f, "passed on the ${price} offer"),
            Outcome::FullyDeveloped => write!(f, "rested on their own property"),
            Outcome::PaidRent { owner, amount } => write!(f, "paid ${amount} to {owner}"),
            Outcome::PaidFee { amount } => write!(f, "paid a ${amount} fee"),
            Outcome::Rewarded { amount } => write!(f, "received ${amount}"),
        }
    }
}

/// Where a player ended up after moving along the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landing {
    pub tile: TileId,
    pub position: usize,
    pub outcome: Outcome,
}

/// A single completed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Counts from 1.
    pub turn: usize,
    pub player: PlayerId,
    pub player_name: Box<str>,
    pub roll: u32,
    #[serde(flatten)]
    pub landing: Landing,
    /// Capital of the player after the turn.
    pub capital: u32,
    pub eliminated: bool,
}

impl fmt::Display for TurnRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} rolled {}, landed on {} and {} (${} left)",
            self.turn,
            self.player_name,
            self.roll,
            self.landing.tile,
            self.landing.outcome,
            self.capital,
        )?;
        if self.eliminated {
            write!(f, ", going bankrupt")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub place: u8,
    pub player_name: Box<str>,
    pub strategy: StrategyKind,
    pub capital: u32,
    pub bankrupt: bool,
    pub properties: Box<[TileId]>,
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({}) with ${}",
            self.place,
            self.player_name,
            self.strategy,
            self.capital,
        )?;
        if !self.properties.is_empty() {
            write!(f, " and {} properties", self.properties.len())?;
        }
        if self.bankrupt {
            write!(f, ", bankrupt")?;
        }
        Ok(())
    }
}

/// Everything worth knowing about a game once it has been played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    /// [`None`] if the game ran out of rolls before a winner emerged.
    pub winner: Option<Box<str>>,
    pub standings: Box<[Standing]>,
    pub turns: Box<[TurnRecord]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case", tag = "error")]
pub enum GameError {
    #[error("invalid construction: {reason}")]
    InvalidConstruction { reason: ConstructionError },
    #[error("illegal roll {roll}, expected a value between 1 and {faces}")]
    IllegalRoll { roll: u32, faces: u32 },
    /// A player can only move forward.
    #[error("cannot advance by {steps} steps")]
    IllegalSteps { steps: u32 },
    #[error("the game is already over")]
    GameOver,
}

impl From<ConstructionError> for GameError {
    fn from(reason: ConstructionError) -> Self {
        GameError::InvalidConstruction { reason }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionError {
    #[error("the track needs at least one tile")]
    EmptyTrack,
    #[error("the game needs at least one player")]
    NoPlayers,
    #[error("the die needs at least one face")]
    NoDieFaces,
}
