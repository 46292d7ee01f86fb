//! Player intents and how they resolve against the world.
//!
//! Every intent is a small struct implementing [`ActionTransition`]. The
//! engine validates the acting hero, applies the transition and hands the
//! caller a [`Resolution`]: the player-facing [`Outcome`] plus anything the
//! rest of the world needs to hear about (notices for other heroes and
//! heroes that died).
//!
//! Validation results such as an invalid move or a full backpack are
//! outcomes, never errors. [`EngineError`] is reserved for callers that
//! reference heroes which do not exist or can no longer act.

mod combat;
mod inventory;
mod movement;

pub use combat::{DuelWinner, FightAction, duel};
pub use inventory::{DropItemAction, SwapAction, UseItemAction};
pub use movement::MoveAction;

use std::fmt;

use strum::{Display, EnumString};

use crate::engine::EngineError;
use crate::item::UseOutcome;
use crate::state::{Combatant, GameState, Hero, HeroId};

/// Defines how a concrete action variant mutates world state.
pub trait ActionTransition {
    /// Hero performing the action.
    fn actor(&self) -> HeroId;

    /// Rejects actions from unknown or dead heroes before any mutation.
    fn pre_validate(&self, state: &GameState) -> Result<(), EngineError> {
        living_hero(state, self.actor()).map(|_| ())
    }

    fn apply(&self, state: &mut GameState) -> Result<Resolution, EngineError>;
}

pub(crate) fn living_hero(state: &GameState, id: HeroId) -> Result<&Hero, EngineError> {
    let hero = state.hero(id).ok_or(EngineError::UnknownHero(id))?;
    if !hero.is_alive() {
        return Err(EngineError::HeroDead(id));
    }
    Ok(hero)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    Up,
    Down,
    Left,
    Right,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::Up,
        CardinalDirection::Down,
        CardinalDirection::Left,
        CardinalDirection::Right,
    ];

    /// `(d_row, d_col)` step. Rows grow downward.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::Up => (-1, 0),
            CardinalDirection::Down => (1, 0),
            CardinalDirection::Left => (0, -1),
            CardinalDirection::Right => (0, 1),
        }
    }
}

/// Any intent a hero can submit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Fight(FightAction),
    Swap(SwapAction),
    UseItem(UseItemAction),
    DropItem(DropItemAction),
}

impl Action {
    pub fn actor(&self) -> HeroId {
        match self {
            Action::Move(action) => action.actor(),
            Action::Fight(action) => action.actor(),
            Action::Swap(action) => action.actor(),
            Action::UseItem(action) => action.actor(),
            Action::DropItem(action) => action.actor(),
        }
    }

    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::Fight(_) => "fight",
            Action::Swap(_) => "swap",
            Action::UseItem(_) => "use_item",
            Action::DropItem(_) => "drop_item",
        }
    }

    pub(crate) fn transition(&self) -> &dyn ActionTransition {
        match self {
            Action::Move(action) => action,
            Action::Fight(action) => action,
            Action::Swap(action) => action,
            Action::UseItem(action) => action,
            Action::DropItem(action) => action,
        }
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<FightAction> for Action {
    fn from(action: FightAction) -> Self {
        Self::Fight(action)
    }
}

impl From<SwapAction> for Action {
    fn from(action: SwapAction) -> Self {
        Self::Swap(action)
    }
}

impl From<UseItemAction> for Action {
    fn from(action: UseItemAction) -> Self {
        Self::UseItem(action)
    }
}

impl From<DropItemAction> for Action {
    fn from(action: DropItemAction) -> Self {
        Self::DropItem(action)
    }
}

/// Player-facing result of an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    InvalidMove,
    Moved,
    PickedUp { name: String },
    BackpackFull,
    MinionKilled { xp: u32 },
    /// The acting hero died; `killer` describes the winner.
    PlayerKilled { killer: String },
    /// The acting hero won a duel; `victim` describes the loser.
    KilledOther { victim: String },
    NotOnSameSpot,
    OpponentBackpackFull,
    ItemNotFound,
    Swapped { name: String },
    Used(UseOutcome),
    Dropped { name: String },
    /// The hero's cell already holds an object, so nothing can be dropped.
    SpotTaken,
}

impl Outcome {
    /// Whether the rendered map may differ after this outcome.
    pub fn changes_map(&self) -> bool {
        matches!(
            self,
            Outcome::Moved
                | Outcome::PickedUp { .. }
                | Outcome::BackpackFull
                | Outcome::MinionKilled { .. }
                | Outcome::PlayerKilled { .. }
                | Outcome::KilledOther { .. }
                | Outcome::Dropped { .. }
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InvalidMove => f.write_str("Invalid move"),
            Outcome::Moved => f.write_str("Player moved"),
            Outcome::PickedUp { name } => write!(f, "{name} added"),
            Outcome::BackpackFull => f.write_str("Backpack is full"),
            Outcome::MinionKilled { xp } => write!(f, "Minion killed +{xp}XP"),
            Outcome::PlayerKilled { killer } => write!(f, "You died from {killer}"),
            Outcome::KilledOther { victim } => write!(f, "You killed {victim}"),
            Outcome::NotOnSameSpot => f.write_str("Not on same coordinates"),
            Outcome::OpponentBackpackFull => f.write_str("Other player's backpack is full"),
            Outcome::ItemNotFound => f.write_str("No item at that index"),
            Outcome::Swapped { name } => write!(f, "{name} swapped"),
            Outcome::Used(used) => fmt::Display::fmt(used, f),
            Outcome::Dropped { name } => write!(f, "{name} removed"),
            Outcome::SpotTaken => f.write_str("Something already lies here"),
        }
    }
}

/// Message addressed to a hero other than the actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Notice {
    pub hero: HeroId,
    pub outcome: Outcome,
}

/// Everything one resolved action produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub outcome: Outcome,
    pub notices: Vec<Notice>,
    /// Heroes killed by this action. They are off the grid but still
    /// registered until despawned.
    pub casualties: Vec<HeroId>,
}

impl Resolution {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            notices: Vec::new(),
            casualties: Vec::new(),
        }
    }

    pub fn with_notice(mut self, hero: HeroId, outcome: Outcome) -> Self {
        self.notices.push(Notice { hero, outcome });
        self
    }

    pub fn with_casualty(mut self, hero: HeroId) -> Self {
        self.casualties.push(hero);
        self
    }

    pub fn changes_map(&self) -> bool {
        self.outcome.changes_map() || !self.casualties.is_empty()
    }
}

impl From<Outcome> for Resolution {
    fn from(outcome: Outcome) -> Self {
        Self::new(outcome)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::env::MapLayout;
    use crate::state::{GameState, Hero, HeroId, Position, WorldGrid};

    pub fn id(value: u8) -> HeroId {
        HeroId::new(value).unwrap()
    }

    pub fn world(map: &str) -> GameState {
        GameState::new(WorldGrid::new(MapLayout::parse(map).unwrap()))
    }

    pub fn spawn(state: &mut GameState, hero: u8, position: Position) {
        state.insert_hero(Hero::new(id(hero), position));
        assert!(state.grid.add_occupant(position, id(hero)));
    }
}
