//! Accept loop.
use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use runtime::WorldHandle;

use crate::session::handle_connection;

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, world: WorldHandle) -> Result<()> {
    info!("Server is listening on {}", listener.local_addr()?);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(error = %err, "failed to accept connection");
                continue;
            }
        };
        info!(%peer, "connection accepted");

        let world = world.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, peer, world).await {
                error!(%peer, error = %err, "session failed");
            }
        });
    }
}
