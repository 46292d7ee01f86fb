use tracing::debug;

use super::{ActionTransition, Outcome, Resolution, duel, living_hero};
use crate::action::{CardinalDirection, DuelWinner};
use crate::config::GameConfig;
use crate::engine::EngineError;
use crate::state::{CellKind, GameState, HeroId, Position, WorldObject};

/// One step in a cardinal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: HeroId,
    pub direction: CardinalDirection,
}

impl MoveAction {
    pub fn new(actor: HeroId, direction: CardinalDirection) -> Self {
        Self { actor, direction }
    }

    fn destination_from(&self, origin: Position) -> Position {
        origin.offset(self.direction.delta())
    }
}

impl ActionTransition for MoveAction {
    fn actor(&self) -> HeroId {
        self.actor
    }

    fn apply(&self, state: &mut GameState) -> Result<Resolution, EngineError> {
        let origin = living_hero(state, self.actor)?.position();
        let destination = self.destination_from(origin);

        let Ok(kind) = state.grid.classify(destination) else {
            return Ok(Outcome::InvalidMove.into());
        };
        debug!(hero = %self.actor, ?origin, ?destination, ?kind, "resolving move");

        match kind {
            CellKind::Obstacle => Ok(Outcome::InvalidMove.into()),
            CellKind::Occupied
                if state.grid.occupants(destination).len() >= GameConfig::MAX_OCCUPANTS_PER_TILE =>
            {
                Ok(Outcome::InvalidMove.into())
            }
            CellKind::Free | CellKind::Occupied => {
                self.relocate(state, origin, destination)?;
                Ok(Outcome::Moved.into())
            }
            CellKind::Treasure => self.collect_treasure(state, origin, destination),
            CellKind::Minion => self.fight_minion(state, origin, destination),
        }
    }
}

impl MoveAction {
    fn relocate(
        &self,
        state: &mut GameState,
        origin: Position,
        destination: Position,
    ) -> Result<(), EngineError> {
        state.grid.remove_occupant(origin, self.actor);
        state.grid.add_occupant(destination, self.actor);
        state
            .hero_mut(self.actor)
            .ok_or(EngineError::UnknownHero(self.actor))?
            .set_position(destination);
        Ok(())
    }

    /// Picks the treasure up when there is room; otherwise the hero stands on
    /// it and it stays registered.
    fn collect_treasure(
        &self,
        state: &mut GameState,
        origin: Position,
        destination: Position,
    ) -> Result<Resolution, EngineError> {
        let Some(WorldObject::Treasure(treasure)) = state.grid.remove_object(destination) else {
            return Err(EngineError::RegistryDesync(destination));
        };
        let hero = state
            .hero_mut(self.actor)
            .ok_or(EngineError::UnknownHero(self.actor))?;

        let name = treasure.name().to_owned();
        let outcome = match hero.add_to_backpack(treasure) {
            Ok(()) => Outcome::PickedUp { name },
            Err(full) => {
                state
                    .grid
                    .place_object(destination, WorldObject::Treasure(full.element()));
                Outcome::BackpackFull
            }
        };

        self.relocate(state, origin, destination)?;
        Ok(outcome.into())
    }

    /// Hero strikes first. A losing hero is already off its old cell and
    /// never reaches the new one; the minion keeps its wounds.
    fn fight_minion(
        &self,
        state: &mut GameState,
        origin: Position,
        destination: Position,
    ) -> Result<Resolution, EngineError> {
        let Some(WorldObject::Minion(mut minion)) = state.grid.remove_object(destination) else {
            return Err(EngineError::RegistryDesync(destination));
        };
        state.grid.remove_occupant(origin, self.actor);

        let hero = state
            .hero_mut(self.actor)
            .ok_or(EngineError::UnknownHero(self.actor))?;
        match duel(hero, &mut minion) {
            DuelWinner::Initiator => {
                let xp = minion.give_xp();
                hero.increase_xp(xp);
                hero.set_position(destination);
                state.grid.add_occupant(destination, self.actor);
                debug!(hero = %self.actor, xp, "minion killed");
                Ok(Outcome::MinionKilled { xp }.into())
            }
            DuelWinner::Defender => {
                hero.mark_dead();
                let killer = minion.to_string();
                state
                    .grid
                    .place_object(destination, WorldObject::Minion(minion));
                debug!(hero = %self.actor, %killer, "hero killed by minion");
                Ok(Resolution::new(Outcome::PlayerKilled { killer }).with_casualty(self.actor))
            }
        }
    }
}
