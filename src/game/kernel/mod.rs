use crate::config::GameConfig;
use crate::game::messages::*;
use crate::game::player::{Player, PlayerId, PlayerSpec, Roster};
use crate::game::tile::TileSpec;
use crate::game::track::Track;

use self::kernel::GameKernel;

mod kernel;
/// Declares everything surrounding the state [`Running`].
mod take_turn;
/// Declares [`Session`], which hides the state of a game at runtime.
mod session;

pub use {
    take_turn::Running,
    session::Session,
};

/// Controls a game. The game is in one of two states, indicated by the type
/// argument. It is [`Running`] while at least two players remain, and accepts
/// rolls through [`Game::take_turn`]. Once a single player is left the game is
/// [`Finished`], which only allows inspection of the final state.
#[derive(Debug, Clone)]
pub struct Game<S: State> {
    data: Box<GameKernel>,
    /// The current state of the game.
    state: S,
}

impl<S: State> Game<S> {
    /// Gets a reference to the track and its tiles.
    pub fn track(&self) -> &Track {
        &self.data.track
    }

    /// Gets every player that joined the game, eliminated or not.
    pub fn roster(&self) -> &Roster {
        &self.data.roster
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.data.roster[id]
    }

    /// Gets the players still in the game, in turn order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.data.active.iter().map(move |&id| &self.data.roster[id])
    }

    /// Gets every turn played so far.
    pub fn history(&self) -> &[TurnRecord] {
        &self.data.history
    }

    pub fn config(&self) -> &GameConfig {
        &self.data.config
    }

    /// Get the current standings of the game.
    #[inline]
    pub fn get_standings(&self) -> Vec<Standing> {
        self.data.get_standings()
    }
}

/// Result of a game update that captures both the running game and the
/// possibility of the game ending.
pub type GameUpdateResult<S> = Result<Game<S>, Game<Finished>>;
/// Result of a tried game update, with the [`Err`] capturing the reason the
/// update was not possible alongside the unchanged game.
pub type TryGameUpdateResult = Result<GameUpdateResult<Running>, (Game<Running>, GameError)>;

impl Game<Running> {
    /// Lays out the track and seats the players in the given order. A game
    /// with a single player is over before it starts.
    pub fn start(
        tiles: impl IntoIterator<Item = TileSpec>,
        players: impl IntoIterator<Item = PlayerSpec>,
        config: GameConfig,
    ) -> Result<GameUpdateResult<Running>, GameError> {
        let data = Box::new(GameKernel::new(tiles, players, config)?);
        Ok(Game { data, state: Running }.check_winner())
    }

    /// Moves to [`Finished`] if only one player remains.
    fn check_winner(self) -> GameUpdateResult<Running> {
        match self.data.winner() {
            Some(winner) => Err(Game {
                data: self.data,
                state: Finished { winner },
            }),
            None => Ok(self),
        }
    }
}

/// The terminal state of a [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finished {
    winner: PlayerId,
}
impl State for Finished {}

impl Game<Finished> {
    pub fn winner(&self) -> &Player {
        &self.data.roster[self.state.winner]
    }

    /// Summarizes the finished game.
    pub fn report(&self) -> GameReport {
        GameReport {
            winner: Some(self.winner().name().into()),
            standings: self.get_standings().into_boxed_slice(),
            turns: self.history().into(),
        }
    }
}

mod sealed {
    pub trait SealedState {}
    impl SealedState for super::Running {}
    impl SealedState for super::Finished {}
}

pub trait State: std::fmt::Debug + Clone + sealed::SealedState {}
