use std::{fmt, fs, io, path::{Path, PathBuf}, str::FromStr};

use crate::game::player::{PlayerSpec, PlayerSpecError};
use crate::game::tile::{TileSpec, TileSpecError};

/// Everything needed to set up and play a game, as read from a scenario
/// file.
///
/// The file lists the tiles, then the players, then optionally the rolls.
/// Each list starts with a line holding its length:
///
/// ```text
/// 3
/// realestate
/// service 500
/// luck 200
/// 2
/// A greedy
/// B careful
/// 4
/// 1
/// 2
/// 2
/// 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub tiles: Vec<TileSpec>,
    pub players: Vec<PlayerSpec>,
    /// [`None`] if the file stops after the players, meaning the rolls are
    /// entered by hand.
    pub rolls: Option<Vec<u32>>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_owned(),
            source,
        })?;
        text.parse()
    }
}

impl FromStr for Scenario {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().enumerate();

        let tiles = read_section(&mut lines, Section::Tiles, |line, text| {
            text.parse::<TileSpec>().map_err(|source| InputError::Tile { line, source })
        })?;
        let players = read_section(&mut lines, Section::Players, |line, text| {
            text.parse::<PlayerSpec>().map_err(|source| InputError::Player { line, source })
        })?;

        // Anything but blank lines after the players means rolls follow.
        let mut rest = lines.skip_while(|(_, text)| text.trim().is_empty()).peekable();
        let rolls = match rest.peek() {
            None => None,
            Some(_) => Some(read_section(&mut rest, Section::Rolls, |line, text| {
                parse_roll(text).map_err(|source| InputError::Roll { line, source })
            })?),
        };

        Ok(Scenario { tiles, players, rolls })
    }
}

/// Reads a count line followed by that many items.
fn read_section<'a, T, I, F>(lines: &mut I, section: Section, mut parse: F)
    -> Result<Vec<T>, InputError>
where
    I: Iterator<Item = (usize, &'a str)>,
    F: FnMut(usize, &str) -> Result<T, InputError>,
{
    let (index, text) = lines.next().ok_or(InputError::MissingCount { section })?;
    let expected: usize = text.trim().parse().map_err(|_| InputError::InvalidCount {
        section,
        line: index + 1,
        found: text.to_owned(),
    })?;

    let mut items = Vec::new();
    for found in 0..expected {
        let (index, text) = lines.next()
            .ok_or(InputError::MissingLines { section, expected, found })?;
        items.push(parse(index + 1, text)?);
    }

    Ok(items)
}

/// Parses a single roll of the die. Whether the roll fits the die is up to
/// the game.
pub fn parse_roll(s: &str) -> Result<u32, RollParseError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let token = match tokens.as_slice() {
        [] => return Err(RollParseError::Blank),
        [token] => *token,
        _ => return Err(RollParseError::TokenCount(tokens.len())),
    };

    match token.parse() {
        Ok(0) => Err(RollParseError::Zero),
        Ok(roll) => Ok(roll),
        Err(_) => Err(RollParseError::NotANumber(token.to_owned())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Tiles,
    Players,
    Rolls,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str = match self {
            Section::Tiles => "tiles",
            Section::Players => "players",
            Section::Rolls => "rolls",
        };

        write!(f, "{}", str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("could not read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("expected the number of {section}, found the end of the file")]
    MissingCount { section: Section },
    #[error("line {line}: expected the number of {section}, found \"{found}\"")]
    InvalidCount { section: Section, line: usize, found: String },
    #[error("expected {expected} {section}, found only {found}")]
    MissingLines { section: Section, expected: usize, found: usize },
    #[error("line {line}: {source}")]
    Tile { line: usize, source: TileSpecError },
    #[error("line {line}: {source}")]
    Player { line: usize, source: PlayerSpecError },
    #[error("line {line}: {source}")]
    Roll { line: usize, source: RollParseError },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RollParseError {
    #[error("expected a roll, found a blank line")]
    Blank,
    #[error("expected a single roll, found {0} tokens")]
    TokenCount(usize),
    #[error("expected a positive integer, found \"{0}\"")]
    NotANumber(String),
    #[error("a roll must be at least 1")]
    Zero,
}

#[cfg(test)]
mod test {
    use crate::game::player::{PlayerSpec, PlayerSpecError, StrategyKind};
    use crate::game::tile::{TileSpec, TileSpecError};

    use super::*;

    const FULL: &str = "3\nrealestate\nservice 500\nluck 200\n2\nA greedy\nB careful\n4\n1\n2\n2\n2\n";

    #[test]
    fn full_scenario() {
        let scenario: Scenario = FULL.parse().unwrap();
        assert_eq!(scenario.tiles, [
            TileSpec::RealEstate,
            TileSpec::Service { fee: 500 },
            TileSpec::Luck { reward: 200 },
        ]);
        assert_eq!(scenario.players, [
            PlayerSpec::new("A", StrategyKind::Greedy),
            PlayerSpec::new("B", StrategyKind::Careful),
        ]);
        assert_eq!(scenario.rolls, Some(vec![1, 2, 2, 2]));
    }

    #[test]
    fn scenario_without_rolls() {
        let scenario: Scenario = "1\nrealestate\n1\nA strategic\n\n\n".parse().unwrap();
        assert_eq!(scenario.rolls, None);
    }

    #[test]
    fn malformed_scenarios() {
        assert!(matches!(
            "".parse::<Scenario>(),
            Err(InputError::MissingCount { section: Section::Tiles })
        ));
        assert!(matches!(
            "two\n".parse::<Scenario>(),
            Err(InputError::InvalidCount { section: Section::Tiles, line: 1, .. })
        ));
        assert!(matches!(
            "2\nrealestate\n".parse::<Scenario>(),
            Err(InputError::MissingLines { section: Section::Tiles, expected: 2, found: 1 })
        ));
        assert!(matches!(
            "18446744073709551615\nrealestate\n".parse::<Scenario>(),
            Err(InputError::MissingLines { section: Section::Tiles, found: 1, .. })
        ));
        assert!(matches!(
            "1\nservice -5\n".parse::<Scenario>(),
            Err(InputError::Tile { line: 2, source: TileSpecError::InvalidAmount(_) })
        ));
        assert!(matches!(
            "1\nrealestate\n1\nA reckless\n".parse::<Scenario>(),
            Err(InputError::Player { line: 4, source: PlayerSpecError::UnknownStrategy(_) })
        ));
        assert!(matches!(
            "1\nrealestate\n1\nA greedy\n2\n3\nfour\n".parse::<Scenario>(),
            Err(InputError::Roll { line: 7, source: RollParseError::NotANumber(_) })
        ));
    }

    #[test]
    fn roll_parsing() {
        assert_eq!(parse_roll("4"), Ok(4));
        assert_eq!(parse_roll(" 6 "), Ok(6));
        assert_eq!(parse_roll(""), Err(RollParseError::Blank));
        assert_eq!(parse_roll("0"), Err(RollParseError::Zero));
        assert_eq!(parse_roll("1 2"), Err(RollParseError::TokenCount(2)));
        assert_eq!(parse_roll("-1"), Err(RollParseError::NotANumber("-1".to_owned())));
    }

    #[test]
    fn error_messages() {
        let error = "1\nrealestate\n1\nA reckless\n".parse::<Scenario>().unwrap_err();
        assert_eq!(
            error.to_string(),
            "line 4: expected \"greedy\", \"careful\" or \"strategic\", found \"reckless\""
        );
    }
}
