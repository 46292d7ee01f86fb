//! Many sessions hammering one world at once.
//!
//! Every command is serialized by the world worker, so whatever interleaving
//! the scheduler picks, the grid and the hero registry must agree afterwards.

use std::collections::BTreeMap;

use game_content::ContentFactory;
use game_core::{
    CardinalDirection, Combatant, GameConfig, GameState, HeroId, Outcome, WorldObject,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use runtime::{Intent, Runtime, RuntimeConfig, RuntimeError, WorldEvent};

const STEPS_PER_SESSION: usize = 150;

fn random_intent(rng: &mut StdRng) -> Intent {
    match rng.gen_range(0..10) {
        0 => Intent::Fight,
        1 => Intent::Swap {
            index: rng.gen_range(0..3),
        },
        2 => Intent::Use {
            index: rng.gen_range(0..3),
        },
        3 => Intent::Remove {
            index: rng.gen_range(0..3),
        },
        _ => {
            let direction = CardinalDirection::ALL[rng.gen_range(0..4)];
            Intent::Move(direction)
        }
    }
}

fn assert_consistent(state: &GameState) {
    let grid = &state.grid;

    let mut seen: BTreeMap<HeroId, usize> = BTreeMap::new();
    for (position, heroes) in grid.occupied_cells() {
        assert!(heroes.len() <= GameConfig::MAX_OCCUPANTS_PER_TILE);
        assert!(grid.terrain(position).unwrap().is_passable());
        for hero in heroes {
            *seen.entry(*hero).or_default() += 1;
            let registered = state
                .hero(*hero)
                .unwrap_or_else(|| panic!("hero {hero} on the grid but not registered"));
            assert_eq!(registered.position(), position);
            assert!(registered.is_alive());
        }
    }
    assert_eq!(seen.len(), state.hero_count());
    assert!(seen.values().all(|count| *count == 1));

    for (position, object) in grid.objects() {
        assert!(grid.terrain(*position).unwrap().is_passable());
        if let WorldObject::Minion(minion) = object {
            assert!(minion.is_alive());
        }
    }

    let rendered = grid.render();
    assert_eq!(rendered, grid.render());
    assert_eq!(
        rendered.lines().count(),
        grid.dimensions().height as usize
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sessions_keep_the_world_consistent() {
    let content = ContentFactory::builtin().unwrap();
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            seed: Some(42),
            ..RuntimeConfig::default()
        })
        .content(content)
        .build()
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for session in 0..HeroId::MAX as u64 {
        let handle = runtime.handle();
        tasks.push(tokio::spawn(async move {
            let mut rng = StdRng::seed_from_u64(session);
            let joined = handle.join().await.unwrap();
            let mut outcomes = 0usize;
            for _ in 0..STEPS_PER_SESSION {
                match handle.act(joined.ticket, random_intent(&mut rng)).await {
                    Ok(Outcome::PlayerKilled { .. }) => return outcomes + 1,
                    Ok(_) => outcomes += 1,
                    // Killed by another session between two of our intents.
                    Err(RuntimeError::StaleSession(_)) => return outcomes,
                    Err(err) => panic!("unexpected runtime error: {err}"),
                }
            }
            if rng.gen_bool(0.5) {
                handle.leave(joined.ticket).await.unwrap();
            }
            outcomes
        }));
    }

    let mut total = 0;
    for task in tasks {
        total += task.await.unwrap();
    }
    assert!(total > 0);

    let state = runtime.handle().query_state().await.unwrap();
    assert_consistent(&state);
    assert!(state.hero_count() <= HeroId::MAX as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_joins_never_share_an_id() {
    let content = ContentFactory::builtin().unwrap();
    let runtime = Runtime::builder()
        .content(content)
        .build()
        .await
        .unwrap();
    let mut rx = runtime.subscribe_events();

    let joins: Vec<_> = (0..HeroId::MAX)
        .map(|_| {
            let handle = runtime.handle();
            tokio::spawn(async move { handle.join().await.unwrap() })
        })
        .collect();

    let mut heroes = Vec::new();
    for join in joins {
        heroes.push(join.await.unwrap().ticket.hero);
    }
    heroes.sort();
    heroes.dedup();
    assert_eq!(heroes.len(), HeroId::MAX as usize);

    let mut maps = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, WorldEvent::MapChanged { .. }) {
            maps += 1;
        }
    }
    assert_eq!(maps, HeroId::MAX as usize);

    let state = runtime.handle().query_state().await.unwrap();
    assert_consistent(&state);
}
