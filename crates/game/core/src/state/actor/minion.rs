use std::fmt;

use super::Combatant;
use crate::config::GameConfig;
use crate::state::Position;
use crate::stats::{DamageReport, StatBlock};

/// Hostile actor with a level fixed at spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minion {
    level: u32,
    position: Position,
    stats: StatBlock,
    alive: bool,
}

impl Minion {
    /// Creates a minion. Levels above 1 add `level * XP_PER_MINION_KILL` to
    /// every stat, once.
    pub fn new(level: u32, position: Position) -> Self {
        let mut stats = StatBlock::default();
        if level > 1 {
            let bonus = level * GameConfig::XP_PER_MINION_KILL;
            stats.health += bonus;
            stats.mana += bonus;
            stats.attack += bonus;
            stats.defense += bonus;
        }
        Self {
            level,
            position,
            stats,
            alive: true,
        }
    }

    /// Level for the `index`-th minion placed on a map: 1, 2, .., MAX, 1, ..
    pub const fn level_for_spawn_index(index: usize) -> u32 {
        (index as u32 % GameConfig::MINION_MAX_LEVEL) + 1
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Experience awarded to whoever kills this minion.
    pub fn give_xp(&self) -> u32 {
        self.level * GameConfig::XP_PER_MINION_KILL
    }
}

impl Combatant for Minion {
    fn stats(&self) -> &StatBlock {
        &self.stats
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn attack(&mut self) -> u32 {
        self.stats.strike()
    }

    fn take_damage(&mut self, raw: u32) -> DamageReport {
        let report = self.stats.apply_damage(raw);
        if report.depleted {
            self.alive = false;
        }
        report
    }
}

impl fmt::Display for Minion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Minion level= {}", self.level)
    }
}
