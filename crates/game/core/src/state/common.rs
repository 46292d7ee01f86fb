use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::GameConfig;

/// Discrete grid position. Origin is the top-left cell, rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position shifted by a `(d_row, d_col)` delta.
    pub const fn offset(self, (d_row, d_col): (i32, i32)) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Identifier of a connected hero. Doubles as the hero's map token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroId(u8);

impl HeroId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = GameConfig::MAX_HEROES as u8;

    /// Returns `None` unless `value` is a single non-zero digit.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// The single-character token drawn on the map.
    pub const fn symbol(self) -> char {
        (b'0' + self.0) as char
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-unique identity of a treasure instance.
///
/// Two treasures with identical names and points are still different items;
/// inventory removal compares handles, never contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

static NEXT_ITEM_HANDLE: AtomicU32 = AtomicU32::new(1);

impl ItemHandle {
    /// Allocates a fresh handle.
    pub fn next() -> Self {
        Self(NEXT_ITEM_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_id_accepts_only_digits() {
        assert!(HeroId::new(0).is_none());
        assert!(HeroId::new(10).is_none());
        let id = HeroId::new(7).unwrap();
        assert_eq!(id.symbol(), '7');
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn item_handles_are_unique() {
        let a = ItemHandle::next();
        let b = ItemHandle::next();
        assert_ne!(a, b);
    }
}
