//! Shared spatial state: terrain, the object registry and hero occupancy.
//!
//! Cells are never stored as rendered text. Each coordinate is the
//! combination of its terrain, at most one [`WorldObject`] and up to
//! [`GameConfig::MAX_OCCUPANTS_PER_TILE`] hero ids; the display token is
//! derived on demand.

use std::collections::BTreeMap;
use std::fmt;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::{MINION_SYMBOL, MapDimensions, MapLayout, TREASURE_SYMBOL, TerrainKind};
use crate::error::{ErrorSeverity, GameError};
use crate::item::Treasure;
use crate::state::{HeroId, Minion, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("position {0} is out of map bounds")]
    OutOfBounds(Position),
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "GRID_OUT_OF_BOUNDS"
    }
}

/// Object attached to a floor cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldObject {
    Minion(Minion),
    Treasure(Treasure),
}

impl WorldObject {
    pub fn symbol(&self) -> char {
        match self {
            WorldObject::Minion(_) => MINION_SYMBOL,
            WorldObject::Treasure(_) => TREASURE_SYMBOL,
        }
    }
}

impl fmt::Display for WorldObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldObject::Minion(minion) => fmt::Display::fmt(minion, f),
            WorldObject::Treasure(treasure) => fmt::Display::fmt(treasure, f),
        }
    }
}

/// What a mover finds when stepping onto a cell.
///
/// Heroes take precedence: a cell with a hero standing on a treasure is
/// [`CellKind::Occupied`], not [`CellKind::Treasure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Obstacle,
    Free,
    Treasure,
    Minion,
    Occupied,
}

type Occupants = ArrayVec<HeroId, { GameConfig::MAX_OCCUPANTS_PER_TILE }>;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldGrid {
    layout: MapLayout,
    objects: BTreeMap<Position, WorldObject>,
    occupants: BTreeMap<Position, Occupants>,
}

impl WorldGrid {
    /// Empty world over `layout`. Markers are left for the caller to fill.
    pub fn new(layout: MapLayout) -> Self {
        Self {
            layout,
            objects: BTreeMap::new(),
            occupants: BTreeMap::new(),
        }
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.layout.dimensions()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.layout.contains(position)
    }

    pub fn terrain(&self, position: Position) -> Result<TerrainKind, GridError> {
        self.layout
            .terrain(position)
            .ok_or(GridError::OutOfBounds(position))
    }

    /// Rendered token: hero digits (newest first) followed by the object
    /// symbol when heroes are present, otherwise the object or terrain symbol.
    pub fn token_at(&self, position: Position) -> Result<String, GridError> {
        let terrain = self.terrain(position)?;
        let object = self.objects.get(&position).map(WorldObject::symbol);
        let heroes = self.occupants(position);

        let mut token: String = heroes.iter().map(|id| id.symbol()).collect();
        match object {
            Some(symbol) => token.push(symbol),
            None if heroes.is_empty() => token.push(terrain.symbol()),
            None => {}
        }
        Ok(token)
    }

    pub fn classify(&self, position: Position) -> Result<CellKind, GridError> {
        let terrain = self.terrain(position)?;
        if !terrain.is_passable() {
            return Ok(CellKind::Obstacle);
        }
        if !self.occupants(position).is_empty() {
            return Ok(CellKind::Occupied);
        }
        Ok(match self.objects.get(&position) {
            Some(WorldObject::Minion(_)) => CellKind::Minion,
            Some(WorldObject::Treasure(_)) => CellKind::Treasure,
            None => CellKind::Free,
        })
    }

    /// Floor cell with no object and nobody on it.
    pub fn is_free(&self, position: Position) -> bool {
        matches!(self.classify(position), Ok(CellKind::Free))
    }

    pub fn occupants(&self, position: Position) -> &[HeroId] {
        self.occupants
            .get(&position)
            .map_or(&[], |heroes| heroes.as_slice())
    }

    /// Puts `hero` on `position` ahead of anyone already there.
    ///
    /// Out-of-bounds positions are ignored. Returns `false` when nothing was
    /// recorded (out of bounds or the cell already holds its maximum).
    pub fn add_occupant(&mut self, position: Position, hero: HeroId) -> bool {
        if !self.contains(position) {
            return false;
        }
        let heroes = self.occupants.entry(position).or_default();
        if heroes.contains(&hero) {
            return true;
        }
        if heroes.is_full() {
            return false;
        }
        heroes.insert(0, hero);
        true
    }

    /// Strips exactly `hero`'s token from `position`. Out-of-bounds positions
    /// are ignored.
    pub fn remove_occupant(&mut self, position: Position, hero: HeroId) -> bool {
        let Some(heroes) = self.occupants.get_mut(&position) else {
            return false;
        };
        let Some(index) = heroes.iter().position(|id| *id == hero) else {
            return false;
        };
        heroes.remove(index);
        if heroes.is_empty() {
            self.occupants.remove(&position);
        }
        true
    }

    pub fn object_at(&self, position: Position) -> Option<&WorldObject> {
        self.objects.get(&position)
    }

    /// Registers `object` at `position`, returning whatever was there before.
    pub fn place_object(&mut self, position: Position, object: WorldObject) -> Option<WorldObject> {
        self.objects.insert(position, object)
    }

    pub fn remove_object(&mut self, position: Position) -> Option<WorldObject> {
        self.objects.remove(&position)
    }

    pub fn objects(&self) -> impl Iterator<Item = (&Position, &WorldObject)> {
        self.objects.iter()
    }

    /// Every occupied cell with its heroes.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Position, &[HeroId])> {
        self.occupants
            .iter()
            .map(|(position, heroes)| (*position, heroes.as_slice()))
    }

    /// Full-grid snapshot, one line per row.
    pub fn render(&self) -> String {
        let dimensions = self.dimensions();
        let mut out = String::with_capacity(dimensions.cell_count() + dimensions.height as usize);
        for row in 0..dimensions.height as i32 {
            for col in 0..dimensions.width as i32 {
                if let Ok(token) = self.token_at(Position::new(row, col)) {
                    out.push_str(&token);
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Weapon;

    fn id(value: u8) -> HeroId {
        HeroId::new(value).unwrap()
    }

    fn grid() -> WorldGrid {
        WorldGrid::new(MapLayout::parse("#..\n...\n").unwrap())
    }

    #[test]
    fn token_reflects_terrain_and_objects() {
        let mut grid = grid();
        let at = Position::new(0, 1);
        grid.place_object(at, WorldObject::Minion(Minion::new(1, at)));

        assert_eq!(grid.token_at(Position::new(0, 0)).unwrap(), "#");
        assert_eq!(grid.token_at(at).unwrap(), "M");
        assert_eq!(grid.token_at(Position::new(0, 2)).unwrap(), ".");
        assert_eq!(grid.classify(at).unwrap(), CellKind::Minion);
    }

    #[test]
    fn token_out_of_bounds_fails() {
        assert_eq!(
            grid().token_at(Position::new(5, 0)),
            Err(GridError::OutOfBounds(Position::new(5, 0)))
        );
    }

    #[test]
    fn newest_occupant_renders_first() {
        let mut grid = grid();
        let at = Position::new(1, 1);
        grid.add_occupant(at, id(1));
        grid.add_occupant(at, id(2));
        assert_eq!(grid.token_at(at).unwrap(), "21");
        assert_eq!(grid.classify(at).unwrap(), CellKind::Occupied);

        grid.remove_occupant(at, id(2));
        assert_eq!(grid.token_at(at).unwrap(), "1");
        grid.remove_occupant(at, id(1));
        assert_eq!(grid.token_at(at).unwrap(), ".");
    }

    #[test]
    fn third_occupant_is_refused() {
        let mut grid = grid();
        let at = Position::new(1, 0);
        assert!(grid.add_occupant(at, id(1)));
        assert!(grid.add_occupant(at, id(2)));
        assert!(!grid.add_occupant(at, id(3)));
        assert_eq!(grid.occupants(at), &[id(2), id(1)]);
    }

    #[test]
    fn out_of_bounds_occupancy_is_ignored() {
        let mut grid = grid();
        let outside = Position::new(-1, 0);
        assert!(!grid.add_occupant(outside, id(1)));
        assert!(!grid.remove_occupant(outside, id(1)));
        assert_eq!(grid.occupied_cells().count(), 0);
    }

    #[test]
    fn hero_on_treasure_renders_combined_token() {
        let mut grid = grid();
        let at = Position::new(1, 2);
        grid.place_object(at, WorldObject::Treasure(Weapon::new("Axe", 1, 1).into()));
        grid.add_occupant(at, id(4));
        assert_eq!(grid.token_at(at).unwrap(), "4T");
        assert_eq!(grid.classify(at).unwrap(), CellKind::Occupied);
    }

    #[test]
    fn render_is_stable() {
        let mut grid = grid();
        grid.add_occupant(Position::new(1, 0), id(1));
        let first = grid.render();
        assert_eq!(first, "#..\n1..\n");
        assert_eq!(first, grid.render());
    }

    #[test]
    fn free_means_bare_floor() {
        let mut grid = grid();
        assert!(grid.is_free(Position::new(0, 1)));
        assert!(!grid.is_free(Position::new(0, 0)));
        grid.add_occupant(Position::new(0, 1), id(1));
        assert!(!grid.is_free(Position::new(0, 1)));
    }
}
