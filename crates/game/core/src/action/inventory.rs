use tracing::{debug, warn};

use super::{ActionTransition, Outcome, Resolution, living_hero};
use crate::engine::EngineError;
use crate::state::{GameState, Hero, HeroId, WorldObject};

/// Hands the backpack entry at `index` to a hero on the same cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapAction {
    pub actor: HeroId,
    pub target: HeroId,
    pub index: usize,
}

impl SwapAction {
    pub fn new(actor: HeroId, target: HeroId, index: usize) -> Self {
        Self {
            actor,
            target,
            index,
        }
    }
}

impl ActionTransition for SwapAction {
    fn actor(&self) -> HeroId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), EngineError> {
        if self.actor == self.target {
            return Err(EngineError::SelfTarget(self.actor));
        }
        living_hero(state, self.actor)?;
        living_hero(state, self.target)?;
        Ok(())
    }

    /// Checks run in a fixed order: shared cell, receiver capacity, then the
    /// index. Nothing changes unless all three pass.
    fn apply(&self, state: &mut GameState) -> Result<Resolution, EngineError> {
        let giver = living_hero(state, self.actor)?;
        let receiver = living_hero(state, self.target)?;
        if giver.position() != receiver.position() {
            return Ok(Outcome::NotOnSameSpot.into());
        }
        if receiver.is_backpack_full() {
            return Ok(Outcome::OpponentBackpackFull.into());
        }
        if giver.backpack_item(self.index).is_err() {
            return Ok(Outcome::ItemNotFound.into());
        }

        let index = self.index;
        let name = match state
            .with_pair(self.actor, self.target, |giver, receiver| {
                hand_over(giver, receiver, index)
            })
            .ok_or(EngineError::UnknownHero(self.target))?
        {
            Ok(name) => name,
            Err(refused) => return Ok(refused.into()),
        };

        debug!(from = %self.actor, to = %self.target, item = %name, "item swapped");
        Ok(Resolution::new(Outcome::Swapped { name: name.clone() })
            .with_notice(self.target, Outcome::Swapped { name }))
    }
}

/// Moves the giver's entry at `index` into the receiver's backpack.
///
/// On refusal the item goes back to its old slot and nobody's backpack
/// changes.
fn hand_over(giver: &mut Hero, receiver: &mut Hero, index: usize) -> Result<String, Outcome> {
    let item = giver
        .take_from_backpack(index)
        .map_err(|_| Outcome::ItemNotFound)?;
    let name = item.name().to_owned();
    if let Err(full) = receiver.add_to_backpack(item) {
        if let Err(lost) = giver.return_to_backpack(index, full.element()) {
            warn!(
                hero = %giver.id(),
                item = %lost.element(),
                "swapped item could not be returned"
            );
        }
        return Err(Outcome::OpponentBackpackFull);
    }
    Ok(name)
}

/// Uses the backpack entry at `index` on its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub actor: HeroId,
    pub index: usize,
}

impl UseItemAction {
    pub fn new(actor: HeroId, index: usize) -> Self {
        Self { actor, index }
    }
}

impl ActionTransition for UseItemAction {
    fn actor(&self) -> HeroId {
        self.actor
    }

    fn apply(&self, state: &mut GameState) -> Result<Resolution, EngineError> {
        living_hero(state, self.actor)?;
        let hero = state
            .hero_mut(self.actor)
            .ok_or(EngineError::UnknownHero(self.actor))?;
        let outcome = match hero.use_item(self.index) {
            Ok(used) => Outcome::Used(used),
            Err(_) => Outcome::ItemNotFound,
        };
        Ok(outcome.into())
    }
}

/// Puts the backpack entry at `index` back on the map under its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropItemAction {
    pub actor: HeroId,
    pub index: usize,
}

impl DropItemAction {
    pub fn new(actor: HeroId, index: usize) -> Self {
        Self { actor, index }
    }
}

impl ActionTransition for DropItemAction {
    fn actor(&self) -> HeroId {
        self.actor
    }

    fn apply(&self, state: &mut GameState) -> Result<Resolution, EngineError> {
        let hero = living_hero(state, self.actor)?;
        let position = hero.position();
        if hero.backpack_item(self.index).is_err() {
            return Ok(Outcome::ItemNotFound.into());
        }
        if state.grid.object_at(position).is_some() {
            return Ok(Outcome::SpotTaken.into());
        }

        let hero = state
            .hero_mut(self.actor)
            .ok_or(EngineError::UnknownHero(self.actor))?;
        let Ok(item) = hero.take_from_backpack(self.index) else {
            return Ok(Outcome::ItemNotFound.into());
        };
        let name = item.name().to_owned();
        state.grid.place_object(position, WorldObject::Treasure(item));

        debug!(hero = %self.actor, item = %name, ?position, "item dropped");
        Ok(Outcome::Dropped { name }.into())
    }
}
