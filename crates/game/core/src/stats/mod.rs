//! Stat system.
//!
//! A single flat layer: the four numeric attributes an actor carries, the
//! per-hit damage rule, and level-up growth. Equipment bonuses are not folded
//! into the block; heroes add them when computing an attack.

pub mod core;

pub use core::{DamageReport, StatBlock, StatKind};
