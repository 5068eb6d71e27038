use std::io::{self, Write};

use termion::{color, style};

use crate::game::messages::Standing;
use crate::input::{parse_roll, RollParseError};

pub mod primitive;

/// Something typed at the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move by the given roll.
    Roll(u32),
    /// Let the computer roll the die.
    RandomRoll,
    /// Print the current standings.
    Status,
    Quit,
}

/// Decodes a line of text into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, CommandParseErr> {
    match line.trim() {
        "" | "r" | "roll" => Ok(Command::RandomRoll),
        "?" | "status" => Ok(Command::Status),
        "q" | "quit" => Ok(Command::Quit),
        other => Ok(Command::Roll(parse_roll(other)?)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseErr {
    #[error("{0}, or \"status\" / \"quit\"")]
    Roll(#[from] RollParseError),
}

/// Writes the standings, one player per line. With `colored` set, the leader
/// is highlighted and bankrupt players are dimmed in red.
pub fn render_standings<W: Write>(out: &mut W, standings: &[Standing], colored: bool)
    -> io::Result<()>
{
    for standing in standings {
        if !colored {
            writeln!(out, "  {standing}")?;
        } else if standing.bankrupt {
            writeln!(out, "  {}{standing}{}", color::Fg(color::Red), color::Fg(color::Reset))?;
        } else if standing.place == 1 {
            writeln!(out, "  {}{}{standing}{}{}",
                style::Bold,
                color::Fg(color::Green),
                color::Fg(color::Reset),
                style::Reset,
            )?;
        } else {
            writeln!(out, "  {standing}")?;
        }
    }
    Ok(())
}

/// Checks if standard output is a terminal that can show colors.
pub fn stdout_is_tty() -> bool {
    termion::is_tty(&io::stdout())
}
