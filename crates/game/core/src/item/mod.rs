//! Treasure model.
//!
//! Treasures are immutable once created. A hero holding one in the backpack,
//! a weapon slot or a spell slot owns that instance exclusively; the grid owns
//! the ones still lying on the map.

mod record;

pub use record::{RECORD_DELIMITER, RecordError};

use std::fmt;

use strum::{Display, EnumString, IntoStaticStr};

use crate::state::{Hero, ItemHandle};
use crate::stats::StatKind;

/// Variant tag used by treasure records and item descriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreasureKind {
    Weapon,
    Spell,
    ManaPotion,
    HealthPotion,
}

/// Equippable weapon; adds its points to every strike.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    handle: ItemHandle,
    name: String,
    points: u32,
    min_level: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, points: u32, min_level: u32) -> Self {
        Self {
            handle: ItemHandle::next(),
            name: name.into(),
            points,
            min_level,
        }
    }

    pub fn handle(&self) -> ItemHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn min_level(&self) -> u32 {
        self.min_level
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, Damage= {}, level= {}",
            TreasureKind::Weapon,
            self.name,
            self.points,
            self.min_level
        )
    }
}

/// Learnable spell; adds its points to a strike whenever the caster can pay
/// the mana cost.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    handle: ItemHandle,
    name: String,
    points: u32,
    min_level: u32,
    mana_cost: u32,
}

impl Spell {
    pub fn new(name: impl Into<String>, points: u32, min_level: u32, mana_cost: u32) -> Self {
        Self {
            handle: ItemHandle::next(),
            name: name.into(),
            points,
            min_level,
            mana_cost,
        }
    }

    pub fn handle(&self) -> ItemHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn min_level(&self) -> u32 {
        self.min_level
    }

    pub fn mana_cost(&self) -> u32 {
        self.mana_cost
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, Damage= {}, level= {}, min Mana= {}",
            TreasureKind::Spell,
            self.name,
            self.points,
            self.min_level,
            self.mana_cost
        )
    }
}

/// Single-use stat restore.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Potion {
    handle: ItemHandle,
    name: String,
    points: u32,
    target: StatKind,
}

impl Potion {
    pub fn health(name: impl Into<String>, points: u32) -> Self {
        Self::new(name, points, StatKind::Health)
    }

    pub fn mana(name: impl Into<String>, points: u32) -> Self {
        Self::new(name, points, StatKind::Mana)
    }

    fn new(name: impl Into<String>, points: u32, target: StatKind) -> Self {
        Self {
            handle: ItemHandle::next(),
            name: name.into(),
            points,
            target,
        }
    }

    pub fn handle(&self) -> ItemHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn target(&self) -> StatKind {
        self.target
    }

    pub fn kind(&self) -> TreasureKind {
        match self.target {
            StatKind::Mana => TreasureKind::ManaPotion,
            _ => TreasureKind::HealthPotion,
        }
    }
}

impl fmt::Display for Potion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, points={}", self.kind(), self.name, self.points)
    }
}

/// Any collectible item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Treasure {
    Weapon(Weapon),
    Spell(Spell),
    Potion(Potion),
}

impl Treasure {
    pub fn handle(&self) -> ItemHandle {
        match self {
            Treasure::Weapon(weapon) => weapon.handle(),
            Treasure::Spell(spell) => spell.handle(),
            Treasure::Potion(potion) => potion.handle(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Treasure::Weapon(weapon) => weapon.name(),
            Treasure::Spell(spell) => spell.name(),
            Treasure::Potion(potion) => potion.name(),
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Treasure::Weapon(weapon) => weapon.points(),
            Treasure::Spell(spell) => spell.points(),
            Treasure::Potion(potion) => potion.points(),
        }
    }

    pub fn kind(&self) -> TreasureKind {
        match self {
            Treasure::Weapon(_) => TreasureKind::Weapon,
            Treasure::Spell(_) => TreasureKind::Spell,
            Treasure::Potion(potion) => potion.kind(),
        }
    }

    /// Level a hero needs before the item can be used, if gated.
    pub fn min_level(&self) -> Option<u32> {
        match self {
            Treasure::Weapon(weapon) => Some(weapon.min_level()),
            Treasure::Spell(spell) => Some(spell.min_level()),
            Treasure::Potion(_) => None,
        }
    }

    /// Uses this item on `hero`.
    ///
    /// Weapons are equipped and spells learned only when the hero's level is
    /// high enough; otherwise nothing changes. Potions always apply. In every
    /// successful case the item leaves the hero's backpack (if it was there).
    pub fn use_on(&self, hero: &mut Hero) -> UseOutcome {
        if let Some(required) = self.min_level()
            && hero.level() < required
        {
            return UseOutcome::LevelNotEnough {
                name: self.name().to_owned(),
                level: required,
            };
        }

        match self {
            Treasure::Weapon(weapon) => {
                let lost = hero.equip_weapon(weapon.clone());
                UseOutcome::WeaponEquipped {
                    name: weapon.name().to_owned(),
                    lost: lost.map(|item| item.name().to_owned()),
                }
            }
            Treasure::Spell(spell) => {
                let lost = hero.learn_spell(spell.clone());
                UseOutcome::SpellLearned {
                    name: spell.name().to_owned(),
                    lost: lost.map(|item| item.name().to_owned()),
                }
            }
            Treasure::Potion(potion) => {
                hero.drink_potion(potion);
                UseOutcome::StatIncreased {
                    stat: potion.target(),
                    points: potion.points(),
                }
            }
        }
    }
}

impl fmt::Display for Treasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Treasure::Weapon(weapon) => fmt::Display::fmt(weapon, f),
            Treasure::Spell(spell) => fmt::Display::fmt(spell, f),
            Treasure::Potion(potion) => fmt::Display::fmt(potion, f),
        }
    }
}

impl From<Weapon> for Treasure {
    fn from(weapon: Weapon) -> Self {
        Treasure::Weapon(weapon)
    }
}

impl From<Spell> for Treasure {
    fn from(spell: Spell) -> Self {
        Treasure::Spell(spell)
    }
}

impl From<Potion> for Treasure {
    fn from(potion: Potion) -> Self {
        Treasure::Potion(potion)
    }
}

/// Result of using an item.
///
/// `lost` names the previously held weapon or spell when the backpack had no
/// room to take it back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseOutcome {
    WeaponEquipped { name: String, lost: Option<String> },
    SpellLearned { name: String, lost: Option<String> },
    LevelNotEnough { name: String, level: u32 },
    StatIncreased { stat: StatKind, points: u32 },
}

impl fmt::Display for UseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UseOutcome::WeaponEquipped { name, lost } => {
                write!(f, "{name} equipped")?;
                write_lost(f, lost.as_deref())
            }
            UseOutcome::SpellLearned { name, lost } => {
                write!(f, "{name} spell learnt")?;
                write_lost(f, lost.as_deref())
            }
            UseOutcome::LevelNotEnough { name, level } => {
                write!(f, "Minimum level to use {name} is {level}")
            }
            UseOutcome::StatIncreased { stat, points } => write!(f, "+{points} {stat}"),
        }
    }
}

fn write_lost(f: &mut fmt::Formatter<'_>, lost: Option<&str>) -> fmt::Result {
    match lost {
        Some(name) => write!(f, ", {name} lost (backpack full)"),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Combatant, Position};

    fn hero() -> Hero {
        Hero::new(crate::HeroId::new(1).unwrap(), Position::new(1, 1))
    }

    #[test]
    fn descriptions_follow_variant_format() {
        assert_eq!(
            Treasure::from(Weapon::new("Axe", 10, 1)).to_string(),
            "WEAPON Axe, Damage= 10, level= 1"
        );
        assert_eq!(
            Treasure::from(Spell::new("Fire", 20, 2, 30)).to_string(),
            "SPELL Fire, Damage= 20, level= 2, min Mana= 30"
        );
        assert_eq!(
            Treasure::from(Potion::mana("Blue", 40)).to_string(),
            "MANA_POTION, Blue, points=40"
        );
    }

    #[test]
    fn weapon_gated_by_level() {
        let mut hero = hero();
        let weapon = Treasure::from(Weapon::new("Greatsword", 10, 2));
        let outcome = weapon.use_on(&mut hero);
        assert_eq!(
            outcome,
            UseOutcome::LevelNotEnough {
                name: "Greatsword".into(),
                level: 2
            }
        );
        assert_eq!(outcome.to_string(), "Minimum level to use Greatsword is 2");
        assert!(hero.weapon().is_none());
    }

    #[test]
    fn spell_gated_by_level() {
        let mut hero = hero();
        let spell = Treasure::from(Spell::new("Meteor", 10, 2, 10));
        assert!(matches!(
            spell.use_on(&mut hero),
            UseOutcome::LevelNotEnough { level: 2, .. }
        ));
        assert!(hero.spell().is_none());
    }

    #[test]
    fn potion_reports_stat_increase() {
        let mut hero = hero();
        let outcome = Treasure::from(Potion::health("Red", 30)).use_on(&mut hero);
        assert_eq!(outcome.to_string(), "+30 health");
        assert_eq!(hero.stats().health, 130);
    }

    #[test]
    fn replaced_spell_lost_when_backpack_full() {
        let mut hero = hero();
        Treasure::from(Spell::new("Spark", 5, 1, 5)).use_on(&mut hero);
        for n in 0..crate::GameConfig::MAX_INVENTORY_SLOTS {
            let potion = Potion::mana(format!("Blue{n}"), 1);
            hero.add_to_backpack(potion.into()).unwrap();
        }

        let outcome = Treasure::from(Spell::new("Storm", 9, 1, 5)).use_on(&mut hero);
        assert_eq!(
            outcome,
            UseOutcome::SpellLearned {
                name: "Storm".into(),
                lost: Some("Spark".into()),
            }
        );
        assert_eq!(outcome.to_string(), "Storm spell learnt, Spark lost (backpack full)");
        assert!(hero.inventory().iter().all(|item| item.name() != "Spark"));
    }

    #[test]
    fn kind_parses_from_record_tag() {
        assert_eq!("HEALTH_POTION".parse::<TreasureKind>(), Ok(TreasureKind::HealthPotion));
        assert!("ARMOR".parse::<TreasureKind>().is_err());
    }
}
