//! Hero backpack.
//!
//! Fixed capacity, insertion ordered. Indices shown to players are storage
//! positions and shift down when an earlier entry is removed.

use std::fmt;

use arrayvec::{ArrayVec, CapacityError};

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::item::Treasure;
use crate::state::ItemHandle;

pub const BACKPACK_EMPTY: &str = "Backpack is empty";

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("no item at index {index} (backpack holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "INVENTORY_INDEX_OUT_OF_RANGE"
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: ArrayVec<Treasure, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Appends `item`. A full backpack hands the item back untouched.
    pub fn add(&mut self, item: Treasure) -> Result<(), CapacityError<Treasure>> {
        self.items.try_push(item)
    }

    /// Removes the entry with the same identity as `handle`.
    ///
    /// Returns `None` when no such entry exists.
    pub fn remove(&mut self, handle: ItemHandle) -> Option<Treasure> {
        let index = self.items.iter().position(|item| item.handle() == handle)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&Treasure, InventoryError> {
        self.items.get(index).ok_or(InventoryError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Removes and returns the entry at `index`.
    pub fn take(&mut self, index: usize) -> Result<Treasure, InventoryError> {
        if index >= self.items.len() {
            return Err(InventoryError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Puts `item` back at `index`, shifting later entries up. Used to undo a
    /// [`Inventory::take`].
    pub fn insert(&mut self, index: usize, item: Treasure) -> Result<(), CapacityError<Treasure>> {
        let index = index.min(self.items.len());
        self.items.try_insert(index, item)
    }

    pub fn contains(&self, handle: ItemHandle) -> bool {
        self.items.iter().any(|item| item.handle() == handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Treasure> {
        self.items.iter()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "{BACKPACK_EMPTY}");
        }
        for (index, item) in self.items.iter().enumerate() {
            writeln!(f, "{index}. {item}")?;
        }
        Ok(())
    }
}
