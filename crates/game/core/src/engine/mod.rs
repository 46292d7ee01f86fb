//! World construction and action execution.
//!
//! [`GameEngine`] owns the [`GameState`] and is the only code path that
//! mutates it. It is synchronous and holds no locks; callers that share one
//! world between sessions must serialize access to it.

mod errors;

pub use errors::{EngineError, LoadError};

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::action::{Action, ActionTransition, Resolution};
use crate::env::{MapLayout, Marker};
use crate::item::Treasure;
use crate::state::{GameState, Hero, HeroId, Minion, Position, WorldGrid, WorldObject};

#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Builds the world from a layout and a treasure pool.
    ///
    /// Minion markers get levels by rotation in scan order. Treasure markers
    /// draw from the pool at random without replacement.
    pub fn new(
        layout: MapLayout,
        mut pool: Vec<Treasure>,
        mut rng: StdRng,
    ) -> Result<Self, LoadError> {
        let required = layout.count_markers(Marker::Treasure);
        if pool.len() < required {
            return Err(LoadError::NotEnoughTreasures {
                required,
                available: pool.len(),
            });
        }
        pool.shuffle(&mut rng);

        let markers = layout.markers().to_vec();
        let mut grid = WorldGrid::new(layout);
        let mut treasures = pool.into_iter();
        let mut minions = 0usize;
        for (position, marker) in markers {
            let object = match marker {
                Marker::Minion => {
                    let level = Minion::level_for_spawn_index(minions);
                    minions += 1;
                    WorldObject::Minion(Minion::new(level, position))
                }
                Marker::Treasure => {
                    let Some(treasure) = treasures.next() else {
                        return Err(LoadError::NotEnoughTreasures {
                            required,
                            available: 0,
                        });
                    };
                    WorldObject::Treasure(treasure)
                }
            };
            grid.place_object(position, object);
        }

        info!(
            width = grid.dimensions().width,
            height = grid.dimensions().height,
            minions,
            treasures = required,
            "world built"
        );
        Ok(Self {
            state: GameState::new(grid),
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.state.grid
    }

    pub fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.state.hero(id)
    }

    /// Places `hero` at its stored position.
    pub fn spawn(&mut self, hero: Hero) -> Result<(), EngineError> {
        let id = hero.id();
        let position = hero.position();
        if self.state.contains_hero(id) {
            return Err(EngineError::DuplicateHero(id));
        }
        let passable = self
            .state
            .grid
            .terrain(position)
            .is_ok_and(|terrain| terrain.is_passable());
        if !passable || !self.state.grid.add_occupant(position, id) {
            return Err(EngineError::InvalidSpawn(position));
        }
        self.state.insert_hero(hero);
        info!(hero = %id, ?position, "hero spawned");
        Ok(())
    }

    /// Creates a fresh hero on a random free cell.
    pub fn spawn_at_random(&mut self, id: HeroId) -> Result<Position, EngineError> {
        if self.state.contains_hero(id) {
            return Err(EngineError::DuplicateHero(id));
        }
        let position = self
            .random_free_position()
            .ok_or(EngineError::NoFreeCell)?;
        self.spawn(Hero::new(id, position))?;
        Ok(position)
    }

    /// Removes a hero from the registry and strips its token from the grid.
    pub fn despawn(&mut self, id: HeroId) -> Option<Hero> {
        let hero = self.state.remove_hero(id)?;
        self.state.grid.remove_occupant(hero.position(), id);
        info!(hero = %id, "hero despawned");
        Some(hero)
    }

    /// Validates and applies one action.
    pub fn execute(&mut self, action: &Action) -> Result<Resolution, EngineError> {
        let transition = action.transition();
        transition.pre_validate(&self.state)?;
        let resolution = transition.apply(&mut self.state)?;
        debug!(
            hero = %action.actor(),
            action = action.as_snake_case(),
            outcome = %resolution.outcome,
            "action resolved"
        );
        Ok(resolution)
    }

    /// The other hero sharing `id`'s cell, when there is exactly one.
    pub fn partner_of(&self, id: HeroId) -> Option<HeroId> {
        let hero = self.state.hero(id)?;
        match self.state.grid.occupants(hero.position()) {
            [a, b] if *a == id => Some(*b),
            [a, b] if *b == id => Some(*a),
            _ => None,
        }
    }

    /// Samples uniformly until a bare floor cell comes up.
    ///
    /// Returns `None` only when the map has no such cell at all; otherwise the
    /// retry loop is unbounded and slows down as the map fills.
    pub fn random_free_position(&mut self) -> Option<Position> {
        let dimensions = self.state.grid.dimensions();
        let any_free = (0..dimensions.height as i32).any(|row| {
            (0..dimensions.width as i32).any(|col| self.state.grid.is_free(Position::new(row, col)))
        });
        if !any_free {
            return None;
        }
        loop {
            let candidate = Position::new(
                self.rng.gen_range(0..dimensions.height as i32),
                self.rng.gen_range(0..dimensions.width as i32),
            );
            if self.state.grid.is_free(candidate) {
                return Some(candidate);
            }
        }
    }

    pub fn render(&self) -> String {
        self.state.grid.render()
    }
}
