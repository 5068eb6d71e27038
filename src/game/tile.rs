use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::messages::Outcome;
use super::player::{PlayerId, Roster};

/// Identifies a tile by its position in the [`Track`](super::track::Track)
/// that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(usize);

impl TileId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Anything a player can step on.
pub trait Enter {
    /// Applies the effect of `visitor` landing on this tile.
    fn enter(&mut self, tile: TileId, visitor: PlayerId, roster: &mut Roster) -> Outcome;
}

/// A piece of real estate that can be bought once and upgraded with a house
/// once. Everyone else landing on it owes its owner a fee.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RealEstate {
    owner: Option<PlayerId>,
    has_house: bool,
}

impl RealEstate {
    /// Cost of buying an unowned tile.
    pub const PURCHASE_PRICE: u32 = 1000;
    /// Cost for the owner to add a house.
    pub const HOUSE_PRICE: u32 = 4000;
    /// Owed by a visitor when the tile has no house.
    pub const FEE_NO_HOUSE: u32 = 500;
    /// Owed by a visitor when the tile has a house.
    pub const FEE_WITH_HOUSE: u32 = 2000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn has_house(&self) -> bool {
        self.has_house
    }

    /// The amount `player` would pay when landing here, either to buy,
    /// to upgrade, or as a landing fee.
    pub fn price_for(&self, player: PlayerId) -> u32 {
        match self.owner {
            None => Self::PURCHASE_PRICE,
            Some(owner) if owner == player => {
                if self.has_house { 0 } else { Self::HOUSE_PRICE }
            },
            Some(_) => {
                if self.has_house { Self::FEE_WITH_HOUSE } else { Self::FEE_NO_HOUSE }
            },
        }
    }

    /// Returns the tile to the bank: no owner and no house.
    pub fn reset(&mut self) {
        self.owner = None;
        self.has_house = false;
    }
}

impl Enter for RealEstate {
    fn enter(&mut self, tile: TileId, visitor: PlayerId, roster: &mut Roster) -> Outcome {
        let price = self.price_for(visitor);

        match self.owner {
            // Someone else owns it, so the visitor pays whatever they can.
            Some(owner) if owner != visitor => {
                let (payer, receiver) = roster.pair_mut(visitor, owner);
                let amount = payer.pay(price);
                receiver.receive(amount);
                Outcome::PaidRent { owner, amount }
            },
            // Nothing left to buy, but the strategy still sees the offer.
            Some(_) if self.has_house => {
                roster[visitor].wants_to_buy(self);
                Outcome::FullyDeveloped
            },
            _ => {
                let player = &mut roster[visitor];

                // The strategy is consulted first so that its internal state
                // advances even when affordability fails afterwards.
                if !(player.wants_to_buy(self) && player.can_buy(self)) {
                    return Outcome::Declined { price };
                }

                player.pay(price);
                match self.owner {
                    None => {
                        self.owner = Some(visitor);
                        player.assign(tile);
                        Outcome::Bought { price }
                    },
                    Some(_) => {
                        self.has_house = true;
                        Outcome::Upgraded { price }
                    },
                }
            },
        }
    }
}

/// Takes a fixed fee from everyone who lands here. The bank keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    fee: u32,
}

impl Service {
    pub fn new(fee: u32) -> Self {
        Self { fee }
    }

    pub fn fee(&self) -> u32 {
        self.fee
    }
}

impl Enter for Service {
    fn enter(&mut self, _tile: TileId, visitor: PlayerId, roster: &mut Roster) -> Outcome {
        let amount = roster[visitor].pay(self.fee);
        Outcome::PaidFee { amount }
    }
}

/// Hands a fixed reward to everyone who lands here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Luck {
    reward: u32,
}

impl Luck {
    pub fn new(reward: u32) -> Self {
        Self { reward }
    }

    pub fn reward(&self) -> u32 {
        self.reward
    }
}

impl Enter for Luck {
    fn enter(&mut self, _tile: TileId, visitor: PlayerId, roster: &mut Roster) -> Outcome {
        roster[visitor].receive(self.reward);
        Outcome::Rewarded { amount: self.reward }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileKind {
    RealEstate(RealEstate),
    Service(Service),
    Luck(Luck),
}

/// A single cell of the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    kind: TileKind,
}

impl Tile {
    pub(crate) fn new(id: TileId, spec: TileSpec) -> Self {
        let kind = match spec {
            TileSpec::RealEstate => TileKind::RealEstate(RealEstate::new()),
            TileSpec::Service { fee } => TileKind::Service(Service::new(fee)),
            TileSpec::Luck { reward } => TileKind::Luck(Luck::new(reward)),
        };
        Self { id, kind }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn kind(&self) -> &TileKind {
        &self.kind
    }

    pub fn as_real_estate(&self) -> Option<&RealEstate> {
        match &self.kind {
            TileKind::RealEstate(estate) => Some(estate),
            _ => None,
        }
    }

    pub(crate) fn as_real_estate_mut(&mut self) -> Option<&mut RealEstate> {
        match &mut self.kind {
            TileKind::RealEstate(estate) => Some(estate),
            _ => None,
        }
    }

    pub fn enter(&mut self, visitor: PlayerId, roster: &mut Roster) -> Outcome {
        let id = self.id;
        match &mut self.kind {
            TileKind::RealEstate(estate) => estate.enter(id, visitor, roster),
            TileKind::Service(service) => service.enter(id, visitor, roster),
            TileKind::Luck(luck) => luck.enter(id, visitor, roster),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TileKind::RealEstate(estate) => {
                write!(f, "{} real estate", self.id)?;
                if let Some(owner) = estate.owner {
                    write!(f, " owned by {owner}")?;
                    if estate.has_house {
                        write!(f, " with a house")?;
                    }
                }
                Ok(())
            },
            TileKind::Service(service) => write!(f, "{} service (-{})", self.id, service.fee),
            TileKind::Luck(luck) => write!(f, "{} luck (+{})", self.id, luck.reward),
        }
    }
}

/// Describes a tile before it is placed on a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TileSpec {
    RealEstate,
    Service { fee: u32 },
    Luck { reward: u32 },
}

impl FromStr for TileSpec {
    type Err = TileSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use TileSpecError::*;

        let tokens: Vec<&str> = s.split_whitespace().collect();

        let (kind, amount) = match tokens.as_slice() {
            [] => return Err(Blank),
            [kind] => (*kind, None),
            [kind, amount] => (*kind, Some(*amount)),
            _ => return Err(TokenCount(tokens.len())),
        };

        let parse_amount = |amount: Option<&str>| -> Result<u32, TileSpecError> {
            let amount = amount.ok_or_else(|| MissingAmount(kind.to_owned()))?;
            amount.parse().map_err(|_| InvalidAmount(amount.to_owned()))
        };

        match kind {
            "realestate" => match amount {
                None => Ok(TileSpec::RealEstate),
                Some(_) => Err(TokenCount(2)),
            },
            "service" => Ok(TileSpec::Service { fee: parse_amount(amount)? }),
            "luck" => Ok(TileSpec::Luck { reward: parse_amount(amount)? }),
            other => Err(UnknownKind(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileSpecError {
    #[error("expected a tile, found a blank line")]
    Blank,
    #[error("expected 1 or 2 tokens, found {0}")]
    TokenCount(usize),
    #[error("expected \"realestate\", \"service\" or \"luck\", found \"{0}\"")]
    UnknownKind(String),
    #[error("{0} tile requires an amount")]
    MissingAmount(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

#[cfg(test)]
mod test {
    use crate::game::messages::Outcome;
    use crate::game::player::{PlayerSpec, Roster, StrategyKind};

    use super::*;

    fn roster(strategies: &[StrategyKind]) -> Roster {
        let mut roster = Roster::new();
        for (i, strategy) in strategies.iter().enumerate() {
            roster.push(PlayerSpec::new(format!("p{i}"), *strategy), 10000);
        }
        roster
    }

    const TILE: TileId = TileId(0);

    #[test]
    fn price_table() {
        let mut roster = roster(&[StrategyKind::Greedy, StrategyKind::Greedy]);
        let (a, b) = (roster.ids()[0], roster.ids()[1]);
        let mut estate = RealEstate::new();

        assert_eq!(estate.price_for(a), 1000);
        assert_eq!(estate.price_for(b), 1000);

        assert_eq!(estate.enter(TILE, a, &mut roster), Outcome::Bought { price: 1000 });
        assert_eq!(estate.price_for(a), 4000);
        assert_eq!(estate.price_for(b), 500);

        assert_eq!(estate.enter(TILE, a, &mut roster), Outcome::Upgraded { price: 4000 });
        assert_eq!(estate.price_for(a), 0);
        assert_eq!(estate.price_for(b), 2000);
    }

    #[test]
    fn purchase_updates_both_sides() {
        let mut roster = roster(&[StrategyKind::Greedy]);
        let a = roster.ids()[0];
        let mut estate = RealEstate::new();

        estate.enter(TILE, a, &mut roster);

        assert_eq!(estate.owner(), Some(a));
        assert!(!estate.has_house());
        assert_eq!(roster[a].capital(), 9000);
        assert!(roster[a].properties().contains(&TILE));
    }

    #[test]
    fn visitor_pays_owner_what_they_have() {
        let mut roster = roster(&[StrategyKind::Greedy, StrategyKind::Greedy]);
        let (a, b) = (roster.ids()[0], roster.ids()[1]);
        let mut estate = RealEstate::new();
        estate.enter(TILE, a, &mut roster);
        estate.enter(TILE, a, &mut roster);
        assert_eq!(roster[a].capital(), 5000);

        // Leave the visitor short of the 2000 fee.
        roster[b].pay(8500);
        let outcome = estate.enter(TILE, b, &mut roster);

        assert_eq!(outcome, Outcome::PaidRent { owner: a, amount: 1500 });
        assert!(roster[b].is_bankrupt());
        assert_eq!(roster[b].capital(), 0);
        assert_eq!(roster[a].capital(), 6500);
        assert_eq!(estate.owner(), Some(a));
    }

    #[test]
    fn declined_purchase_leaves_tile_unowned() {
        let mut roster = roster(&[StrategyKind::Careful]);
        let a = roster.ids()[0];
        roster[a].pay(8500);
        let mut estate = RealEstate::new();

        assert_eq!(estate.enter(TILE, a, &mut roster), Outcome::Declined { price: 1000 });
        assert_eq!(estate.owner(), None);
        assert_eq!(roster[a].capital(), 1500);
    }

    #[test]
    fn fully_developed_tile_does_nothing() {
        let mut roster = roster(&[StrategyKind::Greedy]);
        let a = roster.ids()[0];
        let mut estate = RealEstate::new();
        estate.enter(TILE, a, &mut roster);
        estate.enter(TILE, a, &mut roster);

        assert_eq!(estate.enter(TILE, a, &mut roster), Outcome::FullyDeveloped);
        assert_eq!(roster[a].capital(), 5000);
    }

    #[test]
    fn fully_developed_tile_counts_as_an_offer() {
        let mut roster = roster(&[StrategyKind::Strategic]);
        let a = roster.ids()[0];
        let mut estate = RealEstate::new();

        assert_eq!(estate.enter(TILE, a, &mut roster), Outcome::Bought { price: 1000 });
        assert_eq!(estate.enter(TILE, a, &mut roster), Outcome::Declined { price: 4000 });
        assert_eq!(estate.enter(TILE, a, &mut roster), Outcome::Upgraded { price: 4000 });
        assert_eq!(estate.enter(TILE, a, &mut roster), Outcome::FullyDeveloped);

        // The skipped turn on the developed tile makes this one a buy.
        let mut other = RealEstate::new();
        assert_eq!(other.enter(TileId(1), a, &mut roster), Outcome::Bought { price: 1000 });
        assert_eq!(roster[a].capital(), 4000);
    }

    #[test]
    fn reset_clears_owner_and_house() {
        let mut roster = roster(&[StrategyKind::Greedy]);
        let a = roster.ids()[0];
        let mut estate = RealEstate::new();
        estate.enter(TILE, a, &mut roster);
        estate.enter(TILE, a, &mut roster);
        assert!(estate.has_house());

        estate.reset();
        assert_eq!(estate, RealEstate::new());
    }

    #[test]
    fn service_and_luck() {
        let mut roster = roster(&[StrategyKind::Greedy]);
        let a = roster.ids()[0];

        let mut service = Service::new(12000);
        assert_eq!(service.enter(TILE, a, &mut roster), Outcome::PaidFee { amount: 10000 });
        assert!(roster[a].is_bankrupt());

        let mut luck = Luck::new(200);
        assert_eq!(luck.enter(TILE, a, &mut roster), Outcome::Rewarded { amount: 200 });
        assert_eq!(roster[a].capital(), 200);
        assert!(roster[a].is_bankrupt());
    }

    #[test]
    fn spec_parsing() {
        assert_eq!("realestate".parse(), Ok(TileSpec::RealEstate));
        assert_eq!("service 500".parse(), Ok(TileSpec::Service { fee: 500 }));
        assert_eq!("luck 200".parse(), Ok(TileSpec::Luck { reward: 200 }));
        assert_eq!("".parse::<TileSpec>(), Err(TileSpecError::Blank));
        assert_eq!("luck".parse::<TileSpec>(), Err(TileSpecError::MissingAmount("luck".to_owned())));
        assert_eq!("service -5".parse::<TileSpec>(), Err(TileSpecError::InvalidAmount("-5".to_owned())));
        assert_eq!("realestate 5".parse::<TileSpec>(), Err(TileSpecError::TokenCount(2)));
        assert_eq!("luck 1 2".parse::<TileSpec>(), Err(TileSpecError::TokenCount(3)));
        assert_eq!("hotel".parse::<TileSpec>(), Err(TileSpecError::UnknownKind("hotel".to_owned())));
    }
}
