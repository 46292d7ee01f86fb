//! Read-only world data.
//!
//! The terrain layout is parsed once and never mutated afterwards. Marker
//! cells record where minions and treasures start; the engine turns them into
//! live objects when it builds the world.
mod map;

pub use map::{
    FLOOR_SYMBOL, MINION_SYMBOL, MapDimensions, MapError, MapLayout, Marker, OBSTACLE_SYMBOL,
    TREASURE_SYMBOL, TerrainKind,
};
