//! Runtime orchestration for the shared dungeon world.
//!
//! This crate puts the synchronous [`game_core::GameEngine`] behind a single
//! writer task so that any number of sessions can drive one world at once.
//! Consumers build a [`Runtime`], hand out clones of [`WorldHandle`] to their
//! sessions, and listen to [`WorldEvent`]s for broadcasts.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the broadcast bus sessions listen on
//! - [`roster`] tracks which hero ids are held by which session
//! - `workers` keeps the world task internal to the crate
pub mod api;
pub mod events;
pub mod roster;
pub mod runtime;

mod workers;

pub use api::{HeroView, Intent, Joined, Result, RuntimeError, WorldHandle};
pub use events::{EventBus, WorldEvent};
pub use roster::{HeroRoster, SessionId, Ticket};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
