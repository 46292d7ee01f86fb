use tracing::debug;

use super::{ActionTransition, Outcome, Resolution, living_hero};
use crate::engine::EngineError;
use crate::state::{Combatant, GameState, HeroId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuelWinner {
    Initiator,
    Defender,
}

/// Alternating exchange of blows until one side drops.
///
/// The initiator strikes first. There is no round cap: attacks never shrink
/// and at least 80% of every hit lands, so health strictly decreases.
pub fn duel<A, B>(initiator: &mut A, defender: &mut B) -> DuelWinner
where
    A: Combatant + ?Sized,
    B: Combatant + ?Sized,
{
    loop {
        let damage = initiator.attack();
        defender.take_damage(damage);
        if !defender.is_alive() {
            return DuelWinner::Initiator;
        }

        let damage = defender.attack();
        initiator.take_damage(damage);
        if !initiator.is_alive() {
            return DuelWinner::Defender;
        }
    }
}

/// Explicit hero-versus-hero fight on a shared cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FightAction {
    pub actor: HeroId,
    pub target: HeroId,
}

impl FightAction {
    pub fn new(actor: HeroId, target: HeroId) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for FightAction {
    fn actor(&self) -> HeroId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), EngineError> {
        if self.actor == self.target {
            return Err(EngineError::SelfTarget(self.actor));
        }
        living_hero(state, self.actor)?;
        living_hero(state, self.target)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<Resolution, EngineError> {
        let position = living_hero(state, self.actor)?.position();
        if living_hero(state, self.target)?.position() != position {
            return Ok(Outcome::NotOnSameSpot.into());
        }

        let (winner, loser, loser_view, winner_view) = state
            .with_pair(self.actor, self.target, |actor, target| {
                let winner = duel(actor, target);
                let (won, lost) = match winner {
                    DuelWinner::Initiator => (actor, target),
                    DuelWinner::Defender => (target, actor),
                };
                lost.mark_dead();
                (won.id(), lost.id(), lost.to_string(), won.to_string())
            })
            .ok_or(EngineError::UnknownHero(self.target))?;

        state.grid.remove_occupant(position, loser);
        debug!(%winner, %loser, ?position, "duel resolved");

        let resolution = if winner == self.actor {
            Resolution::new(Outcome::KilledOther { victim: loser_view })
                .with_notice(loser, Outcome::PlayerKilled { killer: winner_view })
        } else {
            Resolution::new(Outcome::PlayerKilled { killer: winner_view })
                .with_notice(winner, Outcome::KilledOther { victim: loser_view })
        };
        Ok(resolution.with_casualty(loser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::fixtures::{id, spawn, world};
    use crate::item::Weapon;
    use crate::state::{Minion, Position};

    #[test]
    fn initiator_strikes_first_between_equals() {
        let mut a = Minion::new(1, Position::ORIGIN);
        let mut b = Minion::new(1, Position::ORIGIN);
        assert_eq!(duel(&mut a, &mut b), DuelWinner::Initiator);
        assert!(a.is_alive());
        assert!(!b.is_alive());
    }

    #[test]
    fn duel_is_deterministic() {
        let run = || {
            let mut a = Minion::new(1, Position::ORIGIN);
            let mut b = Minion::new(2, Position::ORIGIN);
            let winner = duel(&mut a, &mut b);
            (winner, a.stats().clone(), b.stats().clone())
        };
        assert_eq!(run(), run());
        assert_eq!(run().0, DuelWinner::Defender);
    }

    #[test]
    fn fight_requires_shared_cell() {
        let mut state = world("...\n");
        spawn(&mut state, 1, Position::new(0, 0));
        spawn(&mut state, 2, Position::new(0, 2));

        let result = FightAction::new(id(1), id(2)).apply(&mut state).unwrap();
        assert_eq!(result.outcome, Outcome::NotOnSameSpot);
        assert!(result.casualties.is_empty());
        assert_eq!(state.grid.render(), "1.2\n");
    }

    #[test]
    fn winner_stays_and_loser_leaves_the_grid() {
        let mut state = world("...\n");
        let at = Position::new(0, 1);
        spawn(&mut state, 1, at);
        spawn(&mut state, 2, at);

        let result = FightAction::new(id(1), id(2)).apply(&mut state).unwrap();
        assert!(result.outcome.to_string().starts_with("You killed Hero 2"));
        assert_eq!(result.casualties, vec![id(2)]);
        assert_eq!(result.notices.len(), 1);
        assert_eq!(result.notices[0].hero, id(2));
        assert!(
            result.notices[0]
                .outcome
                .to_string()
                .starts_with("You died from Hero 1")
        );

        assert_eq!(state.grid.token_at(at).unwrap(), "1");
        assert_eq!(state.hero(id(1)).unwrap().position(), at);
        assert!(!state.hero(id(2)).unwrap().is_alive());
    }

    #[test]
    fn stronger_defender_wins() {
        let mut state = world("..\n");
        let at = Position::new(0, 0);
        spawn(&mut state, 1, at);
        spawn(&mut state, 2, at);
        state
            .hero_mut(id(2))
            .unwrap()
            .equip_weapon(Weapon::new("Greatsword", 40, 1));

        let result = FightAction::new(id(1), id(2)).apply(&mut state).unwrap();
        assert!(result.outcome.to_string().starts_with("You died from Hero 2"));
        assert_eq!(result.casualties, vec![id(1)]);
        assert_eq!(result.notices[0].hero, id(2));
        assert_eq!(state.grid.token_at(at).unwrap(), "2");
    }

    #[test]
    fn fighting_yourself_is_rejected() {
        let mut state = world("..\n");
        spawn(&mut state, 1, Position::ORIGIN);
        assert_eq!(
            FightAction::new(id(1), id(1)).pre_validate(&state),
            Err(EngineError::SelfTarget(id(1)))
        );
    }
}
