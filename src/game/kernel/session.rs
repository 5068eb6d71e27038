use crate::config::GameConfig;
use crate::game::messages::*;
use crate::game::player::Player;

use super::{Finished, Game, GameUpdateResult, Running};

/// A game in either of its two states, for drivers that feed it one roll at
/// a time and cannot track the state in the type system.
#[derive(Debug, Clone)]
pub enum Session {
    Running(Game<Running>),
    Finished(Game<Finished>),
}

impl Session {
    pub fn is_finished(&self) -> bool {
        matches!(self, Session::Finished(_))
    }

    /// Gets the player who rolls next, or [`None`] if the game is over.
    pub fn active_player(&self) -> Option<&Player> {
        match self {
            Session::Running(game) => Some(game.active_player()),
            Session::Finished(_) => None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        match self {
            Session::Running(game) => game.config(),
            Session::Finished(game) => game.config(),
        }
    }

    pub fn history(&self) -> &[TurnRecord] {
        match self {
            Session::Running(game) => game.history(),
            Session::Finished(game) => game.history(),
        }
    }

    pub fn get_standings(&self) -> Vec<Standing> {
        match self {
            Session::Running(game) => game.get_standings(),
            Session::Finished(game) => game.get_standings(),
        }
    }

    /// Takes a turn if the game is still running. A finished game rejects
    /// every roll with [`GameError::GameOver`] and stays as it is, as does a
    /// running game given an illegal roll.
    pub fn take_turn(self, roll: u32) -> Result<Session, (Session, GameError)> {
        match self {
            Session::Running(game) => match game.take_turn(roll) {
                Ok(update) => Ok(update.into()),
                Err((game, invalid)) => Err((Session::Running(game), invalid)),
            },
            finished @ Session::Finished(_) => Err((finished, GameError::GameOver)),
        }
    }

    /// Summarizes the game so far.
    pub fn report(&self) -> GameReport {
        match self {
            Session::Running(game) => GameReport {
                winner: None,
                standings: game.get_standings().into_boxed_slice(),
                turns: game.history().into(),
            },
            Session::Finished(game) => game.report(),
        }
    }
}

impl From<GameUpdateResult<Running>> for Session {
    fn from(value: GameUpdateResult<Running>) -> Self {
        match value {
            Ok(game) => Session::Running(game),
            Err(game) => Session::Finished(game),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::GameConfig;
    use crate::game::messages::GameError;
    use crate::game::player::{PlayerSpec, StrategyKind};
    use crate::game::tile::TileSpec;

    use super::super::Game;
    use super::Session;

    fn session() -> Session {
        Game::start(
            [TileSpec::Service { fee: 6000 }],
            [
                PlayerSpec::new("A", StrategyKind::Strategic),
                PlayerSpec::new("B", StrategyKind::Careful),
            ],
            GameConfig::default(),
        ).unwrap().into()
    }

    #[test]
    fn finished_session_rejects_turns() {
        let session = session();
        assert_eq!(session.active_player().map(|p| p.name()), Some("A"));

        let session = session.take_turn(1).unwrap();
        let session = session.take_turn(1).unwrap();
        let session = session.take_turn(1).unwrap();
        assert!(session.is_finished());
        assert!(session.active_player().is_none());
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.report().winner.as_deref(), Some("B"));

        let (session, error) = session.take_turn(1).unwrap_err();
        assert_eq!(error, GameError::GameOver);
        assert!(session.is_finished());
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn illegal_roll_keeps_session_running() {
        let (session, error) = session().take_turn(12).unwrap_err();
        assert_eq!(error, GameError::IllegalRoll { roll: 12, faces: 6 });
        assert!(!session.is_finished());
        assert!(session.history().is_empty());
        assert_eq!(session.report().winner, None);
    }
}
