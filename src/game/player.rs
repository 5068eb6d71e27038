use std::collections::BTreeSet;
use std::{fmt, ops, str::FromStr};

use serde::{Deserialize, Serialize};

use super::tile::{RealEstate, TileId};

/// Identifies a player by its position in the [`Roster`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(usize);

impl PlayerId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Decides whether a player commits money to a piece of real estate.
pub trait BuyPolicy {
    /// `price` is what the purchase or upgrade would cost given `capital`.
    fn wants_to_buy(&mut self, capital: u32, price: u32) -> bool;
}

/// Buys whenever it is asked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Greedy;

impl BuyPolicy for Greedy {
    fn wants_to_buy(&mut self, _capital: u32, _price: u32) -> bool {
        true
    }
}

/// Buys only if it keeps at least the price in hand afterwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Careful;

impl BuyPolicy for Careful {
    fn wants_to_buy(&mut self, capital: u32, price: u32) -> bool {
        u64::from(capital) >= 2 * u64::from(price)
    }
}

/// Buys on every other affordable offer, starting with the first one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Strategic {
    skip: bool,
}

impl BuyPolicy for Strategic {
    fn wants_to_buy(&mut self, capital: u32, price: u32) -> bool {
        // Offers the player cannot afford do not count towards the rhythm.
        if capital < price {
            return false;
        }
        self.skip = !self.skip;
        self.skip
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Greedy(Greedy),
    Careful(Careful),
    Strategic(Strategic),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Greedy(_) => StrategyKind::Greedy,
            Strategy::Careful(_) => StrategyKind::Careful,
            Strategy::Strategic(_) => StrategyKind::Strategic,
        }
    }
}

impl BuyPolicy for Strategy {
    fn wants_to_buy(&mut self, capital: u32, price: u32) -> bool {
        match self {
            Strategy::Greedy(policy) => policy.wants_to_buy(capital, price),
            Strategy::Careful(policy) => policy.wants_to_buy(capital, price),
            Strategy::Strategic(policy) => policy.wants_to_buy(capital, price),
        }
    }
}

impl From<StrategyKind> for Strategy {
    fn from(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Greedy => Strategy::Greedy(Greedy),
            StrategyKind::Careful => Strategy::Careful(Careful),
            StrategyKind::Strategic => Strategy::Strategic(Strategic::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Greedy,
    Careful,
    Strategic,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str = match self {
            StrategyKind::Greedy => "greedy",
            StrategyKind::Careful => "careful",
            StrategyKind::Strategic => "strategic",
        };

        write!(f, "{}", str)
    }
}

impl FromStr for StrategyKind {
    type Err = PlayerSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(StrategyKind::Greedy),
            "careful" => Ok(StrategyKind::Careful),
            "strategic" => Ok(StrategyKind::Strategic),
            other => Err(PlayerSpecError::UnknownStrategy(other.to_owned())),
        }
    }
}

/// Describes a player before the game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: Box<str>,
    pub strategy: StrategyKind,
}

impl PlayerSpec {
    pub fn new(name: impl Into<Box<str>>, strategy: StrategyKind) -> Self {
        Self { name: name.into(), strategy }
    }
}

impl FromStr for PlayerSpec {
    type Err = PlayerSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Err(PlayerSpecError::Blank),
            [name, strategy] => Ok(PlayerSpec::new(*name, strategy.parse()?)),
            _ => Err(PlayerSpecError::TokenCount(tokens.len())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerSpecError {
    #[error("expected a player, found a blank line")]
    Blank,
    #[error("expected 2 tokens (name and strategy), found {0}")]
    TokenCount(usize),
    #[error("expected \"greedy\", \"careful\" or \"strategic\", found \"{0}\"")]
    UnknownStrategy(String),
}

/// A participant of the game along with its money and holdings.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    name: Box<str>,
    capital: u32,
    bankrupt: bool,
    properties: BTreeSet<TileId>,
    strategy: Strategy,
}

impl Player {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capital(&self) -> u32 {
        self.capital
    }

    /// Once set, stays set for the rest of the game.
    pub fn is_bankrupt(&self) -> bool {
        self.bankrupt
    }

    pub fn properties(&self) -> &BTreeSet<TileId> {
        &self.properties
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Checks if the player has enough capital to pay for `tile`.
    pub fn can_buy(&self, tile: &RealEstate) -> bool {
        self.capital >= tile.price_for(self.id)
    }

    /// Asks the player's strategy about `tile`. This may change the
    /// strategy's state, so it must be called exactly once per offer.
    pub fn wants_to_buy(&mut self, tile: &RealEstate) -> bool {
        let price = tile.price_for(self.id);
        self.strategy.wants_to_buy(self.capital, price)
    }

    /// Takes `amount` from the player. If they cannot cover it, they pay
    /// everything they have and go bankrupt. Returns the amount actually paid.
    pub fn pay(&mut self, amount: u32) -> u32 {
        if amount > self.capital {
            self.bankrupt = true;
            std::mem::take(&mut self.capital)
        } else {
            self.capital -= amount;
            amount
        }
    }

    pub fn receive(&mut self, amount: u32) {
        self.capital = self.capital.saturating_add(amount);
    }

    pub fn assign(&mut self, tile: TileId) {
        self.properties.insert(tile);
    }

    /// Gives up every property. The caller is responsible for resetting the
    /// returned tiles.
    #[must_use]
    pub fn lose(&mut self) -> BTreeSet<TileId> {
        std::mem::take(&mut self.properties)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] with ${}", self.name, self.strategy(), self.capital)?;
        if !self.properties.is_empty() {
            let tiles = self.properties.iter()
                .map(TileId::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, ", owning {tiles}")?;
        }
        if self.bankrupt {
            write!(f, " (bankrupt)")?;
        }
        Ok(())
    }
}

/// Every player that took part in a game, eliminated or not.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new player and returns its id.
    pub fn push(&mut self, spec: PlayerSpec, starting_capital: u32) -> PlayerId {
        let id = PlayerId::from_index(self.players.len());
        self.players.push(Player {
            id,
            name: spec.name,
            capital: starting_capital,
            bankrupt: false,
            properties: BTreeSet::new(),
            strategy: spec.strategy.into(),
        });
        id
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(Player::id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Borrows two distinct players at once.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` are the same player.
    pub fn pair_mut(&mut self, a: PlayerId, b: PlayerId) -> (&mut Player, &mut Player) {
        assert_ne!(a, b, "cannot borrow player {a} twice");

        if a.0 < b.0 {
            let (left, right) = self.players.split_at_mut(b.0);
            (&mut left[a.0], &mut right[0])
        } else {
            let (left, right) = self.players.split_at_mut(a.0);
            (&mut right[0], &mut left[b.0])
        }
    }
}

impl ops::Index<PlayerId> for Roster {
    type Output = Player;

    fn index(&self, index: PlayerId) -> &Self::Output {
        &self.players[index.0]
    }
}

impl ops::IndexMut<PlayerId> for Roster {
    fn index_mut(&mut self, index: PlayerId) -> &mut Self::Output {
        &mut self.players[index.0]
    }
}
