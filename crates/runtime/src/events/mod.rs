//! Broadcast events published by the world worker.
//!
//! Every session subscribes to the same bus and filters for what concerns
//! its own hero; map updates go to everyone.

mod bus;

pub use bus::EventBus;

use serde::{Deserialize, Serialize};

use game_core::HeroId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Fresh render after any state change visible on the map.
    MapChanged { map: String },
    /// Message for a hero that did not issue the action.
    Notice { hero: HeroId, message: String },
    /// `hero` died and has been removed from the world.
    HeroKilled { hero: HeroId },
}

impl WorldEvent {
    /// The hero this event is addressed to, `None` for broadcasts.
    pub fn recipient(&self) -> Option<HeroId> {
        match self {
            WorldEvent::MapChanged { .. } => None,
            WorldEvent::Notice { hero, .. } | WorldEvent::HeroKilled { hero } => Some(*hero),
        }
    }

    /// Whether a session controlling `hero` should act on this event.
    pub fn concerns(&self, hero: HeroId) -> bool {
        self.recipient().is_none_or(|recipient| recipient == hero)
    }
}
