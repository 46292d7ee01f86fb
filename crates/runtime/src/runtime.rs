//! High-level runtime orchestrator.
//!
//! The runtime owns the world worker, wires up command/event channels, and
//! exposes a builder-based API for servers to start a shared world.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use game_content::WorldContent;
use game_core::GameEngine;

use crate::api::{Result, RuntimeError, WorldHandle};
use crate::events::{EventBus, WorldEvent};
use crate::workers::{Command, WorldWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for treasure draws and spawn points. Entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

/// Main runtime that hosts one shared world
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`WorldHandle`] provides a cloneable façade for sessions.
pub struct Runtime {
    handle: WorldHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across sessions and async tasks.
    pub fn handle(&self) -> WorldHandle {
        self.handle.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<WorldEvent> {
        self.handle.subscribe()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker, which stops once every outstanding handle clone
    /// has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<WorldContent>,
    engine: Option<GameEngine>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            engine: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Map and treasure pool to build the world from
    pub fn content(mut self, content: WorldContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Use an already constructed engine. Takes precedence over `content`.
    pub fn engine(mut self, engine: GameEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Build the runtime and start the world worker
    pub async fn build(self) -> Result<Runtime> {
        let engine = match (self.engine, self.content) {
            (Some(engine), _) => engine,
            (None, Some(content)) => {
                let rng = match self.config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                GameEngine::new(content.layout, content.treasures, rng)?
            }
            (None, None) => return Err(RuntimeError::MissingContent),
        };

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = WorldHandle::new(command_tx, event_bus.clone());

        let worker = WorldWorker::new(engine, command_rx, event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        info!(
            target: "runtime",
            command_buffer = self.config.command_buffer_size,
            event_buffer = self.config.event_buffer_size,
            seeded = self.config.seed.is_some(),
            "runtime started"
        );

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
