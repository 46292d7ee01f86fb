//! Treasure record loader.
//!
//! The first line of a record file is a header and is skipped. Blank lines
//! are ignored. Every other line must be a valid record; one bad line fails
//! the whole load.

use std::path::Path;

use anyhow::Context;
use game_core::Treasure;

use crate::loaders::{LoadResult, read_file};

/// Loader for treasure record files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load the treasure pool from a record file.
    pub fn load(path: &Path) -> LoadResult<Vec<Treasure>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse treasure records {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Treasure>> {
        content
            .lines()
            .enumerate()
            .skip(1)
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                line.parse::<Treasure>()
                    .with_context(|| format!("line {}: '{}'", index + 1, line.trim()))
            })
            .collect()
    }
}
