//! Content loaders for reading dungeon data from files.

pub mod factory;
pub mod item;
pub mod manifest;
pub mod map;

pub use factory::{ContentFactory, WorldContent};
pub use item::ItemLoader;
pub use manifest::ContentManifest;
pub use map::MapLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
