//! Terrain grid loader.

use std::path::Path;

use anyhow::Context;
use game_core::MapLayout;

use crate::loaders::{LoadResult, read_file};

/// Loader for plain-text terrain grids.
pub struct MapLoader;

impl MapLoader {
    /// Load a terrain grid from a text file.
    pub fn load(path: &Path) -> LoadResult<MapLayout> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Failed to parse map {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<MapLayout> {
        Ok(MapLayout::parse(content)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use game_core::{MapDimensions, Marker};
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn loads_grid_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "#.T\n.M.\n").unwrap();

        let layout = MapLoader::load(file.path()).unwrap();
        assert_eq!(layout.dimensions(), MapDimensions::new(3, 2));
        assert_eq!(layout.count_markers(Marker::Treasure), 1);
        assert_eq!(layout.count_markers(Marker::Minion), 1);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = MapLoader::load(Path::new("/nonexistent/map.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/map.txt"));
    }

    #[test]
    fn bad_symbol_is_reported_with_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "#?\n").unwrap();

        let err = MapLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse map"));
        assert!(format!("{err:#}").contains("unknown map symbol '?'"));
    }
}
