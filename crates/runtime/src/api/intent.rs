//! What a session can ask of the world.
//!
//! Fight and swap carry no target: the worker pairs the hero with whoever
//! shares its cell.
use serde::{Deserialize, Serialize};

use game_core::CardinalDirection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move(CardinalDirection),
    Fight,
    Swap { index: usize },
    Use { index: usize },
    Remove { index: usize },
}

/// Read-only views of a hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroView {
    Stats,
    Backpack,
}
