//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine, world construction and worker
//! coordination so sessions can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{EngineError, ErrorSeverity, GameError, HeroId, LoadError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to build the world")]
    Load(#[from] LoadError),

    #[error("runtime requires world content to be configured before building")]
    MissingContent,

    #[error("all {} hero slots are taken", HeroId::MAX)]
    RosterFull,

    #[error("session no longer controls hero {0}")]
    StaleSession(HeroId),

    #[error("world worker command channel closed")]
    CommandChannelClosed,

    #[error("world worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("world worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Severity of the underlying failure, for logging decisions.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Engine(inner) => inner.severity(),
            RuntimeError::Load(inner) => inner.severity(),
            RuntimeError::RosterFull | RuntimeError::StaleSession(_) => ErrorSeverity::Validation,
            RuntimeError::MissingContent => ErrorSeverity::Fatal,
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_the_wrapped_error() {
        let hero = HeroId::new(4).unwrap();
        assert_eq!(
            RuntimeError::StaleSession(hero).severity(),
            ErrorSeverity::Validation
        );
        assert_eq!(
            RuntimeError::from(EngineError::HeroDead(hero)).severity(),
            ErrorSeverity::Validation
        );
        assert_eq!(
            RuntimeError::from(EngineError::NoFreeCell).severity(),
            ErrorSeverity::Fatal
        );
        assert_eq!(RuntimeError::CommandChannelClosed.severity(), ErrorSeverity::Internal);
    }
}
