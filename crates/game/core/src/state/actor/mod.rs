//! Actors: heroes (player controlled) and minions (static hostiles).

mod hero;
mod inventory;
mod minion;

pub use hero::Hero;
pub use inventory::{BACKPACK_EMPTY, Inventory, InventoryError};
pub use minion::Minion;

use crate::stats::{DamageReport, StatBlock};

/// Anything that can take part in an exchange of blows.
pub trait Combatant {
    fn stats(&self) -> &StatBlock;

    fn is_alive(&self) -> bool;

    /// Damage of the next strike. May consume resources (a hero's mana).
    fn attack(&mut self) -> u32;

    /// Applies one incoming hit; marks the actor dead when health runs out.
    fn take_damage(&mut self, raw: u32) -> DamageReport;
}
