use tracing::info;

use crate::game::player::Player;

use super::{State, Game, TryGameUpdateResult};

/// The state of a [`Game`] in which it is waiting for the active player to
/// roll the die.
#[derive(Debug, Clone, Copy)]
pub struct Running;
impl State for Running {}

impl Game<Running> {
    /// Gets the player who rolls next.
    pub fn active_player(&self) -> &Player {
        &self.data.roster[self.data.current_player()]
    }

    /// Moves the active player by `roll`. A bankrupt player is eliminated at
    /// the end of their turn, and the game ends once one player remains. If
    /// the roll is not a face of the die, the game is handed back unchanged
    /// along with the reason.
    pub fn take_turn(self, roll: u32) -> TryGameUpdateResult {
        if let Err(invalid) = self.data.check_roll(roll) {
            return Err((self, invalid));
        }

        let mut data = self.data;

        if let Err(invalid) = data.play_turn(roll) {
            return Err((Game { data, state: Running }, invalid));
        }

        let game = Game { data, state: Running }.check_winner();
        if let Err(finished) = &game {
            info!(
                winner = finished.winner().name(),
                turns = finished.history().len(),
                "game over"
            );
        }

        Ok(game)
    }

    /// Plays the rolls in order until they run out or the game ends. Rolls
    /// after the end of the game are ignored.
    pub fn speed_play<I: IntoIterator<Item = u32>>(self, rolls: I)
        -> TryGameUpdateResult
    {
        let mut game = self;

        for roll in rolls {
            game = match game.take_turn(roll)? {
                Ok(game) => game,
                Err(game_over) => return Ok(Err(game_over)),
            }
        }

        Ok(Ok(game))
    }
}
