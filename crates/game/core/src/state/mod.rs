//! Authoritative world state.
//!
//! Actors, identities and the grid that ties them to coordinates. Runtime
//! layers query this state but mutate it exclusively through the engine.
mod actor;
mod common;
mod world;

use std::collections::BTreeMap;

pub use actor::{BACKPACK_EMPTY, Combatant, Hero, Inventory, InventoryError, Minion};
pub use common::{HeroId, ItemHandle, Position};
pub use world::{CellKind, GridError, WorldGrid, WorldObject};

/// Grid plus the registry of live heroes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub grid: WorldGrid,
    heroes: BTreeMap<HeroId, Hero>,
}

impl GameState {
    pub fn new(grid: WorldGrid) -> Self {
        Self {
            grid,
            heroes: BTreeMap::new(),
        }
    }

    pub fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.get(&id)
    }

    pub fn hero_mut(&mut self, id: HeroId) -> Option<&mut Hero> {
        self.heroes.get_mut(&id)
    }

    pub fn heroes(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.values()
    }

    pub fn hero_count(&self) -> usize {
        self.heroes.len()
    }

    pub fn contains_hero(&self, id: HeroId) -> bool {
        self.heroes.contains_key(&id)
    }

    pub(crate) fn insert_hero(&mut self, hero: Hero) -> Option<Hero> {
        self.heroes.insert(hero.id(), hero)
    }

    pub(crate) fn remove_hero(&mut self, id: HeroId) -> Option<Hero> {
        self.heroes.remove(&id)
    }

    /// Runs `f` with mutable access to two distinct heroes.
    ///
    /// Returns `None` when `first == second` or either hero is unknown.
    pub(crate) fn with_pair<R>(
        &mut self,
        first: HeroId,
        second: HeroId,
        f: impl FnOnce(&mut Hero, &mut Hero) -> R,
    ) -> Option<R> {
        if first == second || !self.heroes.contains_key(&first) {
            return None;
        }
        let mut other = self.heroes.remove(&second)?;
        let result = self.heroes.get_mut(&first).map(|hero| f(hero, &mut other));
        self.heroes.insert(second, other);
        result
    }
}
