//! Static dungeon content and its loaders.
//!
//! Two flat data sources feed a world: a terrain grid (one text row per map
//! row) and a pool of treasure records. Both are read once at startup and
//! handed to [`game_core::GameEngine::new`] as immutable inputs.
//!
//! A data directory may carry a `dungeon.toml` manifest naming the two
//! files; without it the default file names are used. A built-in dungeon is
//! compiled into the crate so a server can start with no data directory.

pub mod loaders;

pub use loaders::{
    ContentFactory, ContentManifest, ItemLoader, LoadResult, MapLoader, WorldContent,
};
