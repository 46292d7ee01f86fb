use std::str::FromStr;

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

pub const OBSTACLE_SYMBOL: char = '#';
pub const FLOOR_SYMBOL: char = '.';
pub const TREASURE_SYMBOL: char = 'T';
pub const MINION_SYMBOL: char = 'M';

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map symbol '{symbol}' at {position}")]
    UnknownSymbol { symbol: char, position: Position },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            MapError::Empty => "MAP_EMPTY",
            MapError::Ragged { .. } => "MAP_RAGGED",
            MapError::UnknownSymbol { .. } => "MAP_UNKNOWN_SYMBOL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && position.row < self.height as i32
            && position.col < self.width as i32
    }

    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Static terrain of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Obstacle,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    pub fn symbol(self) -> char {
        match self {
            TerrainKind::Floor => FLOOR_SYMBOL,
            TerrainKind::Obstacle => OBSTACLE_SYMBOL,
        }
    }
}

/// Object the layout asks to be placed on a floor cell at world creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    Minion,
    Treasure,
}

/// Parsed terrain grid plus initial object markers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLayout {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
    /// Marker cells in row-major scan order.
    markers: Vec<(Position, Marker)>,
}

impl MapLayout {
    /// Parses one row per line. Blank lines are skipped; every remaining row
    /// must have the same width.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().ok_or(MapError::Empty)?.chars().count();

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut markers = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let position = Position::new(row as i32, col as i32);
                let terrain = match symbol {
                    OBSTACLE_SYMBOL => TerrainKind::Obstacle,
                    FLOOR_SYMBOL => TerrainKind::Floor,
                    TREASURE_SYMBOL => {
                        markers.push((position, Marker::Treasure));
                        TerrainKind::Floor
                    }
                    MINION_SYMBOL => {
                        markers.push((position, Marker::Minion));
                        TerrainKind::Floor
                    }
                    _ => return Err(MapError::UnknownSymbol { symbol, position }),
                };
                tiles.push(terrain);
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, rows.len() as u32),
            tiles,
            markers,
        })
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    /// Terrain at `position`, or `None` outside the grid.
    pub fn terrain(&self, position: Position) -> Option<TerrainKind> {
        if !self.contains(position) {
            return None;
        }
        let index = position.row as usize * self.dimensions.width as usize + position.col as usize;
        self.tiles.get(index).copied()
    }

    pub fn markers(&self) -> &[(Position, Marker)] {
        &self.markers
    }

    pub fn count_markers(&self, marker: Marker) -> usize {
        self.markers.iter().filter(|(_, m)| *m == marker).count()
    }
}

impl FromStr for MapLayout {
    type Err = MapError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}
