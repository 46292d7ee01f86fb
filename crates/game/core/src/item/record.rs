//! Flat treasure records.
//!
//! One record per line, fields separated by [`RECORD_DELIMITER`]:
//!
//! ```text
//! WEAPON;name;points;min_level
//! SPELL;name;points;min_level;mana_cost
//! HEALTH_POTION;name;points
//! MANA_POTION;name;points
//! ```

use std::str::FromStr;

use super::{Potion, Spell, Treasure, TreasureKind, Weapon};
use crate::error::{ErrorSeverity, GameError};

pub const RECORD_DELIMITER: char = ';';

/// Malformed treasure record. Only raised while building the world.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("unknown treasure kind '{0}'")]
    UnknownKind(String),

    #[error("{kind} record expects {expected} fields, found {found}")]
    FieldCount {
        kind: TreasureKind,
        expected: usize,
        found: usize,
    },

    #[error("field '{field}' is not a non-negative integer: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

impl GameError for RecordError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            RecordError::UnknownKind(_) => "RECORD_UNKNOWN_KIND",
            RecordError::FieldCount { .. } => "RECORD_FIELD_COUNT",
            RecordError::InvalidNumber { .. } => "RECORD_INVALID_NUMBER",
        }
    }
}

impl TreasureKind {
    /// Number of fields, tag included, a record of this kind carries.
    pub const fn field_count(self) -> usize {
        match self {
            TreasureKind::Weapon => 4,
            TreasureKind::Spell => 5,
            TreasureKind::ManaPotion | TreasureKind::HealthPotion => 3,
        }
    }
}

fn number(field: &'static str, value: &str) -> Result<u32, RecordError> {
    value
        .trim()
        .parse()
        .map_err(|_| RecordError::InvalidNumber {
            field,
            value: value.to_owned(),
        })
}

impl FromStr for Treasure {
    type Err = RecordError;

    /// Builds a fresh treasure (with a new handle) from one record line.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim().split(RECORD_DELIMITER).collect();
        let tag = fields[0].trim();
        let kind: TreasureKind = tag
            .parse()
            .map_err(|_| RecordError::UnknownKind(tag.to_owned()))?;

        if fields.len() != kind.field_count() {
            return Err(RecordError::FieldCount {
                kind,
                expected: kind.field_count(),
                found: fields.len(),
            });
        }

        let name = fields[1];
        let points = number("points", fields[2])?;
        let treasure = match kind {
            TreasureKind::Weapon => {
                Weapon::new(name, points, number("min_level", fields[3])?).into()
            }
            TreasureKind::Spell => Spell::new(
                name,
                points,
                number("min_level", fields[3])?,
                number("mana_cost", fields[4])?,
            )
            .into(),
            TreasureKind::HealthPotion => Potion::health(name, points).into(),
            TreasureKind::ManaPotion => Potion::mana(name, points).into(),
        };
        Ok(treasure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKind;

    #[test]
    fn parses_spell_record() {
        let treasure: Treasure = "SPELL;Dark magic;25;1;20".parse().unwrap();
        let Treasure::Spell(spell) = treasure else {
            panic!("expected a spell, got {treasure:?}");
        };
        assert_eq!(spell.name(), "Dark magic");
        assert_eq!(spell.points(), 25);
        assert_eq!(spell.min_level(), 1);
        assert_eq!(spell.mana_cost(), 20);
    }

    #[test]
    fn parses_potion_record() {
        let treasure: Treasure = "HEALTH_POTION;Health potion 1;30".parse().unwrap();
        assert_eq!(treasure.kind(), TreasureKind::HealthPotion);
        assert_eq!(treasure.name(), "Health potion 1");
        assert_eq!(treasure.points(), 30);
        let Treasure::Potion(potion) = treasure else {
            unreachable!()
        };
        assert_eq!(potion.target(), StatKind::Health);
    }

    #[test]
    fn parses_weapon_record_with_trailing_newline() {
        let treasure: Treasure = "WEAPON;Sword;12;2\r\n".parse().unwrap();
        assert_eq!(treasure.min_level(), Some(2));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            "WEAPON;Sword;12".parse::<Treasure>(),
            Err(RecordError::FieldCount {
                kind: TreasureKind::Weapon,
                expected: 4,
                found: 3
            })
        );
        assert!(matches!(
            "MANA_POTION;Blue;10;1".parse::<Treasure>(),
            Err(RecordError::FieldCount { found: 4, .. })
        ));
    }

    #[test]
    fn rejects_unknown_kind_and_bad_numbers() {
        assert_eq!(
            "SHIELD;Buckler;3".parse::<Treasure>(),
            Err(RecordError::UnknownKind("SHIELD".into()))
        );
        assert!(matches!(
            "WEAPON;Sword;lots;1".parse::<Treasure>(),
            Err(RecordError::InvalidNumber {
                field: "points",
                ..
            })
        ));
    }
}
