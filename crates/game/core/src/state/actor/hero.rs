use std::fmt;

use arrayvec::CapacityError;
use tracing::warn;

use super::{Combatant, Inventory, InventoryError};
use crate::config::GameConfig;
use crate::item::{Potion, Spell, Treasure, UseOutcome, Weapon};
use crate::state::{HeroId, Position};
use crate::stats::{DamageReport, StatBlock};

/// Player-controlled actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    id: HeroId,
    position: Position,
    stats: StatBlock,
    alive: bool,
    level: u32,
    experience: u32,
    inventory: Inventory,
    weapon: Option<Weapon>,
    spell: Option<Spell>,
}

impl Hero {
    pub fn new(id: HeroId, position: Position) -> Self {
        Self {
            id,
            position,
            stats: StatBlock::default(),
            alive: true,
            level: GameConfig::HERO_START_LEVEL,
            experience: 0,
            inventory: Inventory::new(),
            weapon: None,
            spell: None,
        }
    }

    pub fn id(&self) -> HeroId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub fn spell(&self) -> Option<&Spell> {
        self.spell.as_ref()
    }

    /// Adds experience and grants at most one level.
    ///
    /// Crossing the threshold wraps experience modulo the threshold, so a gain
    /// worth several levels still yields a single level-up. Returns whether a
    /// level was gained.
    pub fn increase_xp(&mut self, amount: u32) -> bool {
        self.experience = self.experience.saturating_add(amount);
        if self.experience < GameConfig::XP_PER_LEVEL {
            return false;
        }
        self.experience %= GameConfig::XP_PER_LEVEL;
        self.level = self.level.saturating_add(1);
        self.stats.level_up();
        true
    }

    pub fn add_to_backpack(&mut self, item: Treasure) -> Result<(), CapacityError<Treasure>> {
        self.inventory.add(item)
    }

    pub fn backpack_item(&self, index: usize) -> Result<&Treasure, InventoryError> {
        self.inventory.get(index)
    }

    pub fn take_from_backpack(&mut self, index: usize) -> Result<Treasure, InventoryError> {
        self.inventory.take(index)
    }

    pub(crate) fn return_to_backpack(
        &mut self,
        index: usize,
        item: Treasure,
    ) -> Result<(), CapacityError<Treasure>> {
        self.inventory.insert(index, item)
    }

    pub fn is_backpack_full(&self) -> bool {
        self.inventory.is_full()
    }

    /// Uses the backpack entry at `index`.
    pub fn use_item(&mut self, index: usize) -> Result<UseOutcome, InventoryError> {
        let item = self.inventory.get(index)?.clone();
        Ok(item.use_on(self))
    }

    /// Equips `weapon`, moving it out of the backpack and the previous weapon
    /// back into it. Returns the previous weapon if it did not fit.
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Option<Treasure> {
        self.inventory.remove(weapon.handle());
        let previous = self.weapon.replace(weapon)?;
        self.stash(previous.into())
    }

    /// Learns `spell`, moving it out of the backpack and the previous spell
    /// back into it. Returns the previous spell if it did not fit.
    pub fn learn_spell(&mut self, spell: Spell) -> Option<Treasure> {
        self.inventory.remove(spell.handle());
        let previous = self.spell.replace(spell)?;
        self.stash(previous.into())
    }

    /// Consumes `potion` for good.
    pub fn drink_potion(&mut self, potion: &Potion) {
        self.inventory.remove(potion.handle());
        self.stats.increase(potion.target(), potion.points());
    }

    fn stash(&mut self, item: Treasure) -> Option<Treasure> {
        let lost = self.inventory.add(item).err()?.element();
        warn!(
            hero = %self.id,
            item = %lost,
            "backpack full, unequipped item discarded"
        );
        Some(lost)
    }

    pub(crate) fn mark_dead(&mut self) {
        self.alive = false;
        self.stats.health = 0;
    }

    pub fn display_backpack(&self) -> String {
        self.inventory.to_string()
    }

    pub fn display_stats(&self) -> String {
        let weapon = self
            .weapon
            .as_ref()
            .map_or_else(|| "None".to_owned(), ToString::to_string);
        let spell = self
            .spell
            .as_ref()
            .map_or_else(|| "None".to_owned(), ToString::to_string);
        format!(
            "Level= {}, Weapon= {}, Spell= {}, {}",
            self.level, weapon, spell, self.stats
        )
    }
}

impl Combatant for Hero {
    fn stats(&self) -> &StatBlock {
        &self.stats
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    /// Base strike plus weapon points plus spell points. The spell only fires
    /// when there is enough mana to pay for it.
    fn attack(&mut self) -> u32 {
        let mut damage = self.stats.strike();
        if let Some(weapon) = &self.weapon {
            damage = damage.saturating_add(weapon.points());
        }
        if let Some(spell) = &self.spell
            && self.stats.mana >= spell.mana_cost()
        {
            damage = damage.saturating_add(spell.points());
            self.stats.mana = self.stats.mana.saturating_sub(spell.mana_cost());
        }
        damage
    }

    fn take_damage(&mut self, raw: u32) -> DamageReport {
        let report = self.stats.apply_damage(raw);
        if report.depleted {
            self.alive = false;
        }
        report
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hero {}, {}", self.id, self.display_stats())
    }
}
