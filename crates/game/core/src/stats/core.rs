//! Core stats: health, mana, attack, defense.
//!
//! Damage absorption permanently wears down defense, so repeated hits against
//! the same actor get progressively less mitigated.

use std::fmt;

use crate::config::{GameConfig, percent_of};

/// Enum naming a single stat, used by potions and formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Health,
    Mana,
    Attack,
    Defense,
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatKind::Health => "health",
            StatKind::Mana => "mana",
            StatKind::Attack => "attack",
            StatKind::Defense => "defense",
        };
        f.write_str(label)
    }
}

/// Numeric attributes of an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub health: u32,
    pub mana: u32,
    pub attack: u32,
    pub defense: u32,
}

/// What a single [`StatBlock::apply_damage`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageReport {
    pub absorbed: u32,
    pub taken: u32,
    pub depleted: bool,
}

impl StatBlock {
    pub const fn new(health: u32, mana: u32, attack: u32, defense: u32) -> Self {
        Self {
            health,
            mana,
            attack,
            defense,
        }
    }

    /// Applies one hit of `raw` damage.
    ///
    /// Defense soaks `min(defense, floor(raw * 20%))` and loses exactly that
    /// much; the remainder comes off health, which floors at zero.
    pub fn apply_damage(&mut self, raw: u32) -> DamageReport {
        let absorbed = percent_of(raw, GameConfig::DEFENSE_ABSORPTION_PERCENT).min(self.defense);
        let taken = raw - absorbed;
        self.defense -= absorbed;
        self.health = self.health.saturating_sub(taken);
        DamageReport {
            absorbed,
            taken,
            depleted: self.health == 0,
        }
    }

    /// One level worth of growth. Callers decide when a level is earned.
    pub fn level_up(&mut self) {
        self.health = self.health.saturating_add(GameConfig::HEALTH_PER_LEVEL);
        self.mana = self.mana.saturating_add(GameConfig::MANA_PER_LEVEL);
        self.attack = self.attack.saturating_add(GameConfig::ATTACK_PER_LEVEL);
        self.defense = self.defense.saturating_add(GameConfig::DEFENSE_PER_LEVEL);
    }

    /// Base damage of one strike, before any equipment.
    pub fn strike(&self) -> u32 {
        percent_of(self.attack, GameConfig::ATTACK_PERCENT_PER_HIT)
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Mana => self.mana,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
        }
    }

    /// Adds `amount` to one stat. No upper cap.
    pub fn increase(&mut self, kind: StatKind, amount: u32) {
        let stat = match kind {
            StatKind::Health => &mut self.health,
            StatKind::Mana => &mut self.mana,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
        };
        *stat = stat.saturating_add(amount);
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new(
            GameConfig::HEALTH_START,
            GameConfig::MANA_START,
            GameConfig::ATTACK_START,
            GameConfig::DEFENSE_START,
        )
    }
}

impl fmt::Display for StatBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats: health={}, mana={}, attack={}, defense={}",
            self.health, self.mana, self.attack, self.defense
        )
    }
}
