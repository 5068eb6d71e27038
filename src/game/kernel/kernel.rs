use tracing::info;

use crate::config::GameConfig;
use crate::game::messages::*;
use crate::game::player::{PlayerId, PlayerSpec, Roster};
use crate::game::tile::TileSpec;
use crate::game::track::Track;

/// Holds the core components of a game. This is moved around.
#[derive(Debug, Clone)]
pub struct GameKernel {
    pub track: Track,
    /// Every player who joined, including the eliminated ones.
    pub roster: Roster,
    /// Players still in the game, in turn order.
    pub active: Vec<PlayerId>,
    /// Index into `active` of the player who moves next. May run past the end
    /// after an elimination, in which case it wraps on the next turn.
    pub next: usize,
    pub history: Vec<TurnRecord>,
    pub config: GameConfig,
}

impl GameKernel {
    pub fn new(
        tiles: impl IntoIterator<Item = TileSpec>,
        players: impl IntoIterator<Item = PlayerSpec>,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        if config.die_faces == 0 {
            return Err(ConstructionError::NoDieFaces.into());
        }

        let track = Track::new(tiles)?;

        let mut roster = Roster::new();
        for spec in players {
            roster.push(spec, config.starting_capital);
        }
        if roster.is_empty() {
            return Err(ConstructionError::NoPlayers.into());
        }

        Ok(Self {
            track,
            active: roster.ids(),
            roster,
            next: 0,
            history: vec![],
            config,
        })
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> PlayerId {
        self.active[self.next % self.active.len()]
    }

    /// The last player standing, if there is one.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.active.as_slice() {
            [winner] => Some(*winner),
            _ => None,
        }
    }

    /// Checks a roll against the die.
    pub fn check_roll(&self, roll: u32) -> Result<u32, GameError> {
        if (1..=self.config.die_faces).contains(&roll) {
            Ok(roll)
        } else {
            Err(GameError::IllegalRoll { roll, faces: self.config.die_faces })
        }
    }

    /// Moves the current player by `roll` and eliminates them if they went
    /// bankrupt. Assumes the roll has been checked and at least two players
    /// are active.
    pub fn play_turn(&mut self, roll: u32) -> Result<(), GameError> {
        if self.next >= self.active.len() {
            self.next = 0;
        }
        let player = self.active[self.next];

        let landing = self.track.advance(&mut self.roster, player, roll)?;
        if let Outcome::Bought { price } | Outcome::Upgraded { price } = landing.outcome {
            info!(player = self.roster[player].name(), tile = %landing.tile, price, "real estate developed");
        }

        let eliminated = self.roster[player].is_bankrupt();
        if eliminated {
            // The next player slides into the current index.
            self.eliminate(player);
        } else {
            self.next += 1;
        }

        self.history.push(TurnRecord {
            turn: self.history.len() + 1,
            player,
            player_name: self.roster[player].name().into(),
            roll,
            landing,
            capital: self.roster[player].capital(),
            eliminated,
        });

        Ok(())
    }

    /// Removes a player from the game and returns their real estate to the
    /// bank.
    fn eliminate(&mut self, player: PlayerId) {
        let properties = self.roster[player].lose();
        self.track.release(properties);
        self.track.remove(player);
        self.active.retain(|&id| id != player);

        info!(player = self.roster[player].name(), remaining = self.active.len(), "player eliminated");
    }

    /// Ranks every player by capital. Players still in the game rank above
    /// eliminated ones, and equal players share a place.
    pub fn get_standings(&self) -> Vec<Standing> {
        let mut players: Vec<_> = self.roster.iter().collect();
        players.sort_by(|a, b| {
            a.is_bankrupt().cmp(&b.is_bankrupt())
                .then(b.capital().cmp(&a.capital()))
        });

        let mut standings: Vec<Standing> = Vec::with_capacity(players.len());
        for (i, player) in players.into_iter().enumerate() {
            let place = match standings.last() {
                Some(prev) if prev.capital == player.capital()
                    && prev.bankrupt == player.is_bankrupt() => prev.place,
                _ => u8::try_from(i + 1).unwrap_or(u8::MAX),
            };

            standings.push(Standing {
                place,
                player_name: player.name().into(),
                strategy: player.strategy(),
                capital: player.capital(),
                bankrupt: player.is_bankrupt(),
                properties: player.properties().iter().copied().collect(),
            });
        }

        standings
    }
}

#[cfg(test)]
mod test {
    use crate::config::GameConfig;
    use crate::game::player::{PlayerSpec, StrategyKind};
    use crate::game::tile::TileSpec;

    use super::GameKernel;

    #[test]
    fn places_stop_at_the_last_representable_one() {
        let players = (0..300).map(|i| PlayerSpec::new(format!("p{i}"), StrategyKind::Greedy));
        let mut kernel = GameKernel::new([TileSpec::RealEstate], players, GameConfig::default())
            .unwrap();
        for (i, id) in kernel.roster.ids().into_iter().enumerate() {
            kernel.roster[id].receive(i as u32);
        }

        let standings = kernel.get_standings();
        assert_eq!(standings[0].player_name.as_ref(), "p299");
        assert_eq!(standings[254].place, 255);
        assert!(standings[255..].iter().all(|s| s.place == u8::MAX));
    }
}
