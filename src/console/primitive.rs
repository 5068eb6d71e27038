use std::io::{self, BufRead, Write};

use rand::Rng;

use super::{parse_command, render_standings, Command};
use crate::game::kernel::Session;

/// Plays the game one line of input at a time, prompting the active player
/// for a roll. Runs until the game is over, the player quits, or the input
/// runs out, and returns the session in whatever state it reached.
pub fn run<R, W, G>(
    mut session: Session,
    mut input: R,
    out: &mut W,
    rng: &mut G,
    colored: bool,
) -> io::Result<Session>
where
    R: BufRead,
    W: Write,
    G: Rng,
{
    let faces = session.config().die_faces;
    let mut buffer = String::new();

    writeln!(out, "Manual mode: enter a roll between 1 and {faces}, or press Enter to roll the die.")?;

    while let Some(player) = session.active_player() {
        write!(out, "{}: ", player.name())?;
        out.flush()?;

        buffer.clear();
        if input.read_line(&mut buffer)? == 0 {
            writeln!(out)?;
            break;
        }

        let roll = match parse_command(&buffer) {
            Ok(Command::Roll(roll)) => roll,
            Ok(Command::RandomRoll) => {
                let roll = rng.gen_range(1..=faces);
                writeln!(out, "Rolled {roll}.")?;
                roll
            },
            Ok(Command::Status) => {
                render_standings(out, &session.get_standings(), colored)?;
                continue;
            },
            Ok(Command::Quit) => break,
            Err(err) => {
                writeln!(out, "Invalid input: {err}")?;
                continue;
            },
        };

        session = match session.take_turn(roll) {
            Ok(session) => {
                if let Some(turn) = session.history().last() {
                    writeln!(out, "{turn}")?;
                }
                session
            },
            Err((session, invalid)) => {
                writeln!(out, "Invalid roll: {invalid}")?;
                session
            },
        };
    }

    if let Session::Finished(game) = &session {
        writeln!(out, "{} won the game!", game.winner().name())?;
    }

    Ok(session)
}
