//! Optional `dungeon.toml` naming the data files of a dungeon.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

pub const MANIFEST_FILE_NAME: &str = "dungeon.toml";
pub const DEFAULT_MAP_FILE: &str = "map.txt";
pub const DEFAULT_TREASURE_FILE: &str = "TreasureItems.csv";

/// File names, relative to the data directory.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentManifest {
    pub map: PathBuf,
    pub treasures: PathBuf,
}

impl Default for ContentManifest {
    fn default() -> Self {
        Self {
            map: PathBuf::from(DEFAULT_MAP_FILE),
            treasures: PathBuf::from(DEFAULT_TREASURE_FILE),
        }
    }
}

impl ContentManifest {
    /// Reads `dungeon.toml` from `data_dir`, falling back to the default file
    /// names when it does not exist.
    pub fn load(data_dir: &Path) -> LoadResult<Self> {
        let path = data_dir.join(MANIFEST_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = read_file(&path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse manifest {}: {}", path.display(), e))
    }
}
