//! TCP front door for the shared dungeon.
//!
//! Each connection becomes a session: it joins the world through a
//! [`runtime::WorldHandle`], translates text commands into intents and
//! forwards world events back to the player as lines of text.
pub mod command;
pub mod config;
pub mod line;
pub mod logging;
pub mod server;
pub mod session;

pub use command::{Command, CommandError};
pub use config::ServerConfig;
pub use server::serve;
