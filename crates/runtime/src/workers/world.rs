//! World worker that owns the authoritative [`GameEngine`].
//!
//! Receives commands from [`WorldHandle`](crate::WorldHandle), executes them
//! one at a time and publishes the resulting events. Being the only task
//! that touches the engine is what makes every command atomic with respect
//! to every other.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use game_core::{
    Action, DropItemAction, EngineError, FightAction, GameEngine, GameState, Hero, HeroId,
    MoveAction, Outcome, Resolution, SwapAction, UseItemAction,
};

use crate::api::{HeroView, Intent, Joined, Result, RuntimeError};
use crate::events::{EventBus, WorldEvent};
use crate::roster::{HeroRoster, Ticket};

/// Commands that can be sent to the world worker
pub enum Command {
    /// Claim a hero id and spawn it on a random free cell.
    Join { reply: oneshot::Sender<Result<Joined>> },
    /// Remove the ticket's hero from the world.
    Leave {
        ticket: Ticket,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Resolve one intent for the ticket's hero.
    Act {
        ticket: Ticket,
        intent: Intent,
        reply: oneshot::Sender<Result<Outcome>>,
    },
    /// Describe the ticket's hero.
    Inspect {
        ticket: Ticket,
        view: HeroView,
        reply: oneshot::Sender<Result<String>>,
    },
    /// Current map text.
    Render { reply: oneshot::Sender<String> },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Background task that processes world commands.
pub struct WorldWorker {
    engine: GameEngine,
    roster: HeroRoster,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl WorldWorker {
    pub fn new(engine: GameEngine, command_rx: mpsc::Receiver<Command>, event_bus: EventBus) -> Self {
        Self {
            engine,
            roster: HeroRoster::new(),
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        info!(target: "runtime::worker", "world worker started");
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        info!(
            target: "runtime::worker",
            heroes = self.roster.len(),
            "world worker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Join { reply } => {
                let result = self.handle_join();
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Join reply channel closed (caller dropped)");
                }
            }
            Command::Leave { ticket, reply } => {
                let result = self.handle_leave(ticket);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Leave reply channel closed (caller dropped)");
                }
            }
            Command::Act {
                ticket,
                intent,
                reply,
            } => {
                let result = self.handle_act(ticket, intent);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Act reply channel closed (caller dropped)");
                }
            }
            Command::Inspect {
                ticket,
                view,
                reply,
            } => {
                let result = self.checked_hero(ticket).map(|hero| match view {
                    HeroView::Stats => hero.display_stats(),
                    HeroView::Backpack => hero.display_backpack(),
                });
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Inspect reply channel closed (caller dropped)");
                }
            }
            Command::Render { reply } => {
                if reply.send(self.engine.render()).is_err() {
                    debug!(target: "runtime::worker", "Render reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.engine.state().clone()).is_err() {
                    debug!(target: "runtime::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_join(&mut self) -> Result<Joined> {
        let ticket = self.roster.claim().ok_or(RuntimeError::RosterFull)?;
        let position = match self.engine.spawn_at_random(ticket.hero) {
            Ok(position) => position,
            Err(err) => {
                self.roster.release(ticket.hero);
                return Err(err.into());
            }
        };
        info!(
            target: "runtime::worker",
            hero = %ticket.hero,
            session = %ticket.session,
            ?position,
            "session joined"
        );
        self.publish_map();
        Ok(Joined { ticket, position })
    }

    /// Leaving twice, or after death, is a no-op.
    fn handle_leave(&mut self, ticket: Ticket) -> Result<()> {
        if !self.roster.holds(ticket) {
            debug!(target: "runtime::worker", hero = %ticket.hero, "leave from stale session ignored");
            return Ok(());
        }
        self.roster.release(ticket.hero);
        if self.engine.despawn(ticket.hero).is_some() {
            self.publish_map();
        }
        info!(target: "runtime::worker", hero = %ticket.hero, session = %ticket.session, "session left");
        Ok(())
    }

    fn handle_act(&mut self, ticket: Ticket, intent: Intent) -> Result<Outcome> {
        self.checked_hero(ticket)?;
        let Some(action) = self.resolve_intent(ticket.hero, intent) else {
            return Ok(Outcome::NotOnSameSpot);
        };
        let resolution = self.engine.execute(&action)?;
        self.publish_resolution(&resolution);
        Ok(resolution.outcome)
    }

    /// Turns a session intent into an engine action. `None` when the intent
    /// needs a partner and nobody shares the hero's cell.
    fn resolve_intent(&self, hero: HeroId, intent: Intent) -> Option<Action> {
        let action = match intent {
            Intent::Move(direction) => MoveAction::new(hero, direction).into(),
            Intent::Fight => FightAction::new(hero, self.engine.partner_of(hero)?).into(),
            Intent::Swap { index } => {
                SwapAction::new(hero, self.engine.partner_of(hero)?, index).into()
            }
            Intent::Use { index } => UseItemAction::new(hero, index).into(),
            Intent::Remove { index } => DropItemAction::new(hero, index).into(),
        };
        Some(action)
    }

    fn publish_resolution(&mut self, resolution: &Resolution) {
        for notice in &resolution.notices {
            self.event_bus.publish(WorldEvent::Notice {
                hero: notice.hero,
                message: notice.outcome.to_string(),
            });
        }
        for &hero in &resolution.casualties {
            self.engine.despawn(hero);
            self.roster.release(hero);
            info!(target: "runtime::worker", hero = %hero, "hero killed");
            self.event_bus.publish(WorldEvent::HeroKilled { hero });
        }
        if resolution.changes_map() {
            self.publish_map();
        }
    }

    fn publish_map(&self) {
        self.event_bus.publish(WorldEvent::MapChanged {
            map: self.engine.render(),
        });
    }

    fn checked_hero(&self, ticket: Ticket) -> Result<&Hero> {
        if !self.roster.holds(ticket) {
            return Err(RuntimeError::StaleSession(ticket.hero));
        }
        self.engine.hero(ticket.hero).ok_or_else(|| {
            warn!(target: "runtime::worker", hero = %ticket.hero, "roster holds a hero the engine does not know");
            RuntimeError::Engine(EngineError::UnknownHero(ticket.hero))
        })
    }
}
