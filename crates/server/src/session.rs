//! One connected player.
//!
//! A session joins the world, then waits on two sources at once: lines from
//! its socket and events from the world bus. It ends on `quit`, on EOF, or
//! when the world reports its hero dead.

use std::net::SocketAddr;

use anyhow::Result;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use game_core::{ErrorSeverity, Outcome};
use runtime::{HeroView, Intent, RuntimeError, Ticket, WorldEvent, WorldHandle};

use crate::command::Command;
use crate::line::{LineError, LineReader};

pub const GOODBYE: &str = "Goodbye";
pub const SERVER_FULL: &str = "Server is full";
pub const LINE_TOO_LONG: &str = "Line too long";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

struct Session {
    world: WorldHandle,
    ticket: Ticket,
    events: broadcast::Receiver<WorldEvent>,
    lines: LineReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    peer: SocketAddr,
}

/// Drives one connection from join to disconnect.
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    world: WorldHandle,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    // Subscribe first so the map update of our own join is not missed.
    let events = world.subscribe();

    let joined = match world.join().await {
        Ok(joined) => joined,
        Err(RuntimeError::RosterFull) => {
            info!(%peer, "connection refused, roster full");
            writer.write_all(format!("{SERVER_FULL}\n").as_bytes()).await?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let mut session = Session {
        world,
        ticket: joined.ticket,
        events,
        lines: LineReader::new(reader),
        writer,
        peer,
    };
    info!(%peer, hero = %joined.ticket.hero, "player joined");
    session
        .send_line(&format!(
            "Welcome to Dungeons! Your player symbol is {}",
            joined.ticket.hero
        ))
        .await?;

    let result = session.run().await;
    // No-op when the hero already died or quit.
    if let Err(err) = session.world.leave(session.ticket).await {
        warn!(%peer, error = %err, "failed to release hero");
    }
    info!(%peer, hero = %session.ticket.hero, "player left");
    result
}

impl Session {
    async fn run(&mut self) -> Result<()> {
        loop {
            let flow = tokio::select! {
                line = self.lines.read_line() => match line {
                    Ok(Some(line)) => self.handle_line(&line).await?,
                    Ok(None) => {
                        debug!(peer = %self.peer, "peer closed the connection");
                        Flow::Close
                    }
                    Err(LineError::TooLong(max)) => {
                        warn!(peer = %self.peer, max, "input line too long, closing");
                        self.send_line(LINE_TOO_LONG).await?;
                        Flow::Close
                    }
                    Err(LineError::Io(err)) => return Err(err.into()),
                },
                event = self.events.recv() => self.handle_event(event).await?,
            };
            if flow == Flow::Close {
                return Ok(());
            }
        }
    }

    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                self.send_line(&err.to_string()).await?;
                return Ok(Flow::Continue);
            }
        };
        debug!(hero = %self.ticket.hero, ?command, "command received");

        match command {
            Command::Act(intent) => self.act(intent).await,
            Command::View(view) => self.view(view).await,
            Command::Quit => {
                self.world.leave(self.ticket).await?;
                self.send_line(GOODBYE).await?;
                Ok(Flow::Close)
            }
        }
    }

    async fn act(&mut self, intent: Intent) -> Result<Flow> {
        let outcome = match self.world.act(self.ticket, intent).await {
            Ok(outcome) => outcome,
            Err(err) => return self.refused(err),
        };

        // The worker publishes before replying: deliver this intent's map
        // update ahead of the outcome line.
        let mut flow = Flow::Continue;
        while let Ok(event) = self.events.try_recv() {
            if self.handle_event(Ok(event)).await? == Flow::Close {
                flow = Flow::Close;
                break;
            }
        }

        self.send_line(&outcome.to_string()).await?;
        if matches!(outcome, Outcome::PlayerKilled { .. }) {
            flow = Flow::Close;
        }
        Ok(flow)
    }

    async fn view(&mut self, view: HeroView) -> Result<Flow> {
        match self.world.inspect(self.ticket, view).await {
            Ok(text) => {
                self.send_line(text.trim_end()).await?;
                Ok(Flow::Continue)
            }
            Err(err) => self.refused(err),
        }
    }

    /// The world no longer accepts this session's hero. Validation failures
    /// (stale ticket, dead or unknown hero) end the session quietly; anything
    /// else is a server fault.
    fn refused(&self, err: RuntimeError) -> Result<Flow> {
        match err.severity() {
            ErrorSeverity::Validation => {
                debug!(peer = %self.peer, hero = %self.ticket.hero, error = %err, "hero no longer playable");
                Ok(Flow::Close)
            }
            ErrorSeverity::Internal | ErrorSeverity::Fatal => Err(err.into()),
        }
    }

    async fn handle_event(
        &mut self,
        event: std::result::Result<WorldEvent, RecvError>,
    ) -> Result<Flow> {
        let event = match event {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!(hero = %self.ticket.hero, skipped, "session lagging behind world events");
                return Ok(Flow::Continue);
            }
            Err(RecvError::Closed) => return Ok(Flow::Close),
        };
        if !event.concerns(self.ticket.hero) {
            return Ok(Flow::Continue);
        }

        match event {
            WorldEvent::MapChanged { map } => {
                self.writer.write_all(map.as_bytes()).await?;
                Ok(Flow::Continue)
            }
            WorldEvent::Notice { message, .. } => {
                self.send_line(&message).await?;
                Ok(Flow::Continue)
            }
            WorldEvent::HeroKilled { .. } => Ok(Flow::Close),
        }
    }

    async fn send_line(&mut self, message: &str) -> Result<()> {
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        Ok(())
    }
}
