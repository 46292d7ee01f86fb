//! Content factory for building world inputs from data files.

use std::path::{Path, PathBuf};

use game_core::{MapLayout, Treasure};
use tracing::info;

use crate::loaders::{ContentManifest, ItemLoader, LoadResult, MapLoader};

const BUILTIN_MAP: &str = include_str!("../../data/map.txt");
const BUILTIN_TREASURES: &str = include_str!("../../data/TreasureItems.csv");

/// Immutable inputs for building a world.
#[derive(Clone, Debug)]
pub struct WorldContent {
    pub layout: MapLayout,
    pub treasures: Vec<Treasure>,
}

/// Content factory that loads dungeon content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── dungeon.toml        (optional)
/// ├── map.txt
/// └── TreasureItems.csv
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The dungeon bundled with the crate.
    pub fn builtin() -> LoadResult<WorldContent> {
        Ok(WorldContent {
            layout: MapLoader::parse(BUILTIN_MAP)?,
            treasures: ItemLoader::parse(BUILTIN_TREASURES)?,
        })
    }

    pub fn load_manifest(&self) -> LoadResult<ContentManifest> {
        ContentManifest::load(&self.data_dir)
    }

    /// Load the terrain grid named by the manifest.
    pub fn load_map(&self, manifest: &ContentManifest) -> LoadResult<MapLayout> {
        MapLoader::load(&self.data_dir.join(&manifest.map))
    }

    /// Load the treasure pool named by the manifest.
    pub fn load_treasures(&self, manifest: &ContentManifest) -> LoadResult<Vec<Treasure>> {
        ItemLoader::load(&self.data_dir.join(&manifest.treasures))
    }

    /// Load everything a world needs.
    pub fn load(&self) -> LoadResult<WorldContent> {
        let manifest = self.load_manifest()?;
        let layout = self.load_map(&manifest)?;
        let treasures = self.load_treasures(&manifest)?;
        info!(
            data_dir = %self.data_dir.display(),
            treasures = treasures.len(),
            "content loaded"
        );
        Ok(WorldContent { layout, treasures })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
