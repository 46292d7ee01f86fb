//! Worker tasks that back the runtime orchestration.
//!
//! The world worker is the single writer of the shared world.

mod world;

pub use world::{Command, WorldWorker};
