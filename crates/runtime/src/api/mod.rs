//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and the world worker.

pub mod errors;
pub mod handle;
pub mod intent;

pub use errors::{Result, RuntimeError};
pub use handle::{Joined, WorldHandle};
pub use intent::{HeroView, Intent};
