//! Cloneable façade for issuing commands to the world worker.
//!
//! [`WorldHandle`] hides channel plumbing and offers async helpers for
//! joining, acting and listening to world events.
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{GameState, Outcome, Position};

use super::errors::{Result, RuntimeError};
use super::intent::{HeroView, Intent};
use crate::events::{EventBus, WorldEvent};
use crate::roster::Ticket;
use crate::workers::Command;

/// Returned by [`WorldHandle::join`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joined {
    pub ticket: Ticket,
    pub position: Position,
}

/// Client-facing handle to interact with the world
#[derive(Clone)]
pub struct WorldHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl WorldHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Spawn a new hero on a random free cell.
    ///
    /// Subscribe before joining to receive the map update the join triggers.
    pub async fn join(&self) -> Result<Joined> {
        self.request(|reply| Command::Join { reply }).await?
    }

    /// Remove the ticket's hero from the world and release its id.
    pub async fn leave(&self, ticket: Ticket) -> Result<()> {
        self.request(|reply| Command::Leave { ticket, reply }).await?
    }

    /// Resolve one intent and return the acting hero's outcome.
    pub async fn act(&self, ticket: Ticket, intent: Intent) -> Result<Outcome> {
        self.request(|reply| Command::Act {
            ticket,
            intent,
            reply,
        })
        .await?
    }

    pub async fn inspect(&self, ticket: Ticket, view: HeroView) -> Result<String> {
        self.request(|reply| Command::Inspect {
            ticket,
            view,
            reply,
        })
        .await?
    }

    pub async fn stats(&self, ticket: Ticket) -> Result<String> {
        self.inspect(ticket, HeroView::Stats).await
    }

    pub async fn backpack(&self, ticket: Ticket) -> Result<String> {
        self.inspect(ticket, HeroView::Backpack).await
    }

    /// Full-grid snapshot, one line per row.
    pub async fn render(&self) -> Result<String> {
        self.request(|reply| Command::Render { reply }).await
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorldEvent> {
        self.event_bus.subscribe()
    }
}
