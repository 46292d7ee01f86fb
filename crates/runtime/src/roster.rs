//! Process-scoped registry of hero ids held by sessions.
//!
//! Created once with the runtime and owned by the world worker. An id is
//! claimed on join and released on leave or death; the lowest free id is
//! always handed out first.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use game_core::HeroId;

/// Identifies one join. Never reused within a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Proof that a session controls a hero.
///
/// Hero ids are recycled once a hero dies or leaves; the session id tells a
/// late request from a dead session apart from the hero's new owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub hero: HeroId,
    pub session: SessionId,
}

#[derive(Debug, Default)]
pub struct HeroRoster {
    holders: BTreeMap<HeroId, SessionId>,
    next_session: u64,
}

impl HeroRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the lowest free id, or `None` when every id is taken.
    pub fn claim(&mut self) -> Option<Ticket> {
        let hero = (HeroId::MIN..=HeroId::MAX)
            .filter_map(HeroId::new)
            .find(|id| !self.holders.contains_key(id))?;
        self.next_session += 1;
        let session = SessionId(self.next_session);
        self.holders.insert(hero, session);
        Some(Ticket { hero, session })
    }

    /// Frees `hero`. Returns the session that held it.
    pub fn release(&mut self, hero: HeroId) -> Option<SessionId> {
        self.holders.remove(&hero)
    }

    pub fn holds(&self, ticket: Ticket) -> bool {
        self.holders.get(&ticket.hero) == Some(&ticket.session)
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_lowest_free_id() {
        let mut roster = HeroRoster::new();
        let first = roster.claim().unwrap();
        let second = roster.claim().unwrap();
        let third = roster.claim().unwrap();
        assert_eq!(first.hero.get(), 1);
        assert_eq!(second.hero.get(), 2);
        assert_eq!(third.hero.get(), 3);

        roster.release(second.hero);
        let again = roster.claim().unwrap();
        assert_eq!(again.hero.get(), 2);
        assert_ne!(again.session, second.session);
    }

    #[test]
    fn full_roster_refuses() {
        let mut roster = HeroRoster::new();
        assert!(roster.is_empty());
        for _ in 0..HeroId::MAX {
            assert!(roster.claim().is_some());
        }
        assert!(roster.claim().is_none());
        assert_eq!(roster.len(), HeroId::MAX as usize);
    }

    #[test]
    fn recycled_id_invalidates_old_ticket() {
        let mut roster = HeroRoster::new();
        let old = roster.claim().unwrap();
        assert!(roster.holds(old));

        roster.release(old.hero);
        let new = roster.claim().unwrap();
        assert_eq!(old.hero, new.hero);
        assert!(!roster.holds(old));
        assert!(roster.holds(new));
    }
}
