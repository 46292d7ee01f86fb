//! Error types for world construction and action execution.

use crate::env::MapError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{HeroId, Position};

/// Raised by the engine when a caller references heroes or cells it should
/// have checked first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("hero {0} is not in the world")]
    UnknownHero(HeroId),

    #[error("hero {0} is dead")]
    HeroDead(HeroId),

    #[error("hero {0} is already in the world")]
    DuplicateHero(HeroId),

    #[error("cannot spawn at {0}")]
    InvalidSpawn(Position),

    #[error("no free cell left on the map")]
    NoFreeCell,

    #[error("hero {0} cannot target itself")]
    SelfTarget(HeroId),

    #[error("object registry out of sync at {0}")]
    RegistryDesync(Position),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        use EngineError::*;
        match self {
            UnknownHero(_) | HeroDead(_) | DuplicateHero(_) | InvalidSpawn(_) | SelfTarget(_) => {
                ErrorSeverity::Validation
            }
            NoFreeCell => ErrorSeverity::Fatal,
            RegistryDesync(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use EngineError::*;
        match self {
            UnknownHero(_) => "ENGINE_UNKNOWN_HERO",
            HeroDead(_) => "ENGINE_HERO_DEAD",
            DuplicateHero(_) => "ENGINE_DUPLICATE_HERO",
            InvalidSpawn(_) => "ENGINE_INVALID_SPAWN",
            NoFreeCell => "ENGINE_NO_FREE_CELL",
            SelfTarget(_) => "ENGINE_SELF_TARGET",
            RegistryDesync(_) => "ENGINE_REGISTRY_DESYNC",
        }
    }
}

/// World construction failure. Always fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("map needs {required} treasures but only {available} records are available")]
    NotEnoughTreasures { required: usize, available: usize },

    #[error("invalid map: {0}")]
    Map(#[from] MapError),
}

impl GameError for LoadError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            LoadError::NotEnoughTreasures { .. } => "LOAD_NOT_ENOUGH_TREASURES",
            LoadError::Map(inner) => inner.error_code(),
        }
    }
}
