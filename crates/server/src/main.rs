//! Dungeon server binary.
//!
//! Composition root: configuration, logging, world content, runtime and the
//! TCP accept loop.
//!
//! # Examples
//!
//! ```bash
//! # Built-in dungeon on 127.0.0.1:6968
//! cargo run -p dungeon-server
//!
//! # Custom content, fixed seed, file logging
//! DUNGEON_DATA_DIR=./data DUNGEON_SEED=7 DUNGEON_LOG_DIR=./logs cargo run -p dungeon-server
//! ```

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use dungeon_server::{ServerConfig, logging, serve};
use game_content::ContentFactory;
use runtime::Runtime;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();
    let _log_guard = logging::init(config.log_dir.as_deref())?;

    let content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir).load()?,
        None => {
            tracing::info!("No data directory configured, using the built-in dungeon");
            ContentFactory::builtin()?
        }
    };

    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .content(content)
        .build()
        .await?;

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tokio::select! {
        result = serve(listener, runtime.handle()) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutdown requested"),
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
