//! Deterministic rules and state for the shared dungeon world.
//!
//! `game-core` defines the canonical rules (stats, items, actors, the world
//! grid and action resolution) as pure synchronous APIs. All state mutation
//! flows through [`engine::GameEngine`]; the runtime wraps it in a single
//! writer task and supporting crates depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod item;
pub mod state;
pub mod stats;

pub use action::{
    Action, ActionTransition, CardinalDirection, DropItemAction, DuelWinner, FightAction,
    MoveAction, Notice, Outcome, Resolution, SwapAction, UseItemAction, duel,
};
pub use config::GameConfig;
pub use engine::{EngineError, GameEngine, LoadError};
pub use env::{MapDimensions, MapError, MapLayout, Marker, TerrainKind};
pub use error::{ErrorSeverity, GameError};
pub use item::{Potion, RecordError, Spell, Treasure, TreasureKind, UseOutcome, Weapon};
pub use state::{
    BACKPACK_EMPTY, CellKind, Combatant, GameState, GridError, Hero, HeroId, Inventory,
    InventoryError, ItemHandle, Minion, Position, WorldGrid, WorldObject,
};
pub use stats::{DamageReport, StatBlock, StatKind};
