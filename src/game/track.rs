use std::collections::HashMap;

use tracing::debug;

use super::messages::{ConstructionError, GameError, Landing};
use super::player::{PlayerId, Roster};
use super::tile::{Tile, TileId, TileSpec};

/// The circular sequence of tiles the players move along, and where each of
/// them currently stands.
#[derive(Debug, Clone)]
pub struct Track {
    /// Never empty, and never resized after construction.
    tiles: Box<[Tile]>,
    /// Players are added on their first move, so a missing entry means the
    /// player is still in front of the first tile.
    positions: HashMap<PlayerId, usize>,
}

impl Track {
    /// Lays out a track with one tile per spec, in order. Fails if there are
    /// no tiles.
    pub fn new(specs: impl IntoIterator<Item = TileSpec>) -> Result<Self, GameError> {
        let tiles: Box<[Tile]> = specs.into_iter()
            .enumerate()
            .map(|(index, spec)| Tile::new(TileId::new(index), spec))
            .collect();

        if tiles.is_empty() {
            return Err(ConstructionError::EmptyTrack.into());
        }

        Ok(Self { tiles, positions: HashMap::new() })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// Gets the index of the tile the player is standing on, or [`None`] if
    /// the player has not moved yet.
    pub fn position(&self, player: PlayerId) -> Option<usize> {
        self.positions.get(&player).copied()
    }

    /// Moves the player `steps` tiles forward, wrapping around the end of the
    /// track, and lets the tile act on the player.
    pub fn advance(&mut self, roster: &mut Roster, player: PlayerId, steps: u32)
        -> Result<Landing, GameError>
    {
        if steps == 0 {
            return Err(GameError::IllegalSteps { steps });
        }

        let current = self.position(player).map_or(-1, |index| index as i64);
        let position = (current + i64::from(steps)).rem_euclid(self.len() as i64) as usize;
        self.positions.insert(player, position);

        let tile = &mut self.tiles[position];
        let outcome = tile.enter(player, roster);
        debug!(%player, steps, position, tile = %tile, %outcome, "player landed");

        Ok(Landing { tile: tile.id(), position, outcome })
    }

    /// Forgets the player's position. Does nothing if the player is unknown.
    pub fn remove(&mut self, player: PlayerId) {
        self.positions.remove(&player);
    }

    /// Returns the given real estate to the bank.
    pub fn release(&mut self, tiles: impl IntoIterator<Item = TileId>) {
        for id in tiles {
            if let Some(estate) = self.tiles[id.index()].as_real_estate_mut() {
                estate.reset();
            }
        }
    }

    /// Lists the real estate owned by `player`.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter()
            .filter(move |tile| {
                tile.as_real_estate().and_then(|estate| estate.owner()) == Some(player)
            })
            .map(Tile::id)
    }
}
