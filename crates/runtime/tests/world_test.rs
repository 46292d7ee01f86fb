use game_content::WorldContent;
use game_core::{BACKPACK_EMPTY, CardinalDirection, EngineError, HeroId, MapLayout, Outcome};
use runtime::{Intent, Runtime, RuntimeConfig, RuntimeError, Ticket, WorldEvent};
use tokio::sync::broadcast;

async fn start(map: &str, records: &[&str]) -> Runtime {
    let content = WorldContent {
        layout: MapLayout::parse(map).unwrap(),
        treasures: records.iter().map(|record| record.parse().unwrap()).collect(),
    };
    Runtime::builder()
        .config(RuntimeConfig {
            seed: Some(7),
            ..RuntimeConfig::default()
        })
        .content(content)
        .build()
        .await
        .unwrap()
}

fn hero(value: u8) -> HeroId {
    HeroId::new(value).unwrap()
}

/// Everything published so far. The worker publishes before it replies, so
/// after an awaited call its events are already queued.
fn drain(rx: &mut broadcast::Receiver<WorldEvent>) -> Vec<WorldEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Walks `ticket`'s hero one step toward column `col` on a single-row map.
async fn step_toward(runtime: &Runtime, ticket: Ticket, col: i32) -> Outcome {
    let state = runtime.handle().query_state().await.unwrap();
    let at = state.hero(ticket.hero).unwrap().position();
    let direction = if at.col < col {
        CardinalDirection::Right
    } else {
        CardinalDirection::Left
    };
    runtime
        .handle()
        .act(ticket, Intent::Move(direction))
        .await
        .unwrap()
}

#[tokio::test]
async fn join_assigns_lowest_ids_and_broadcasts_map() {
    let runtime = start("...\n", &[]).await;
    let handle = runtime.handle();
    let mut rx = handle.subscribe();

    let first = handle.join().await.unwrap();
    let second = handle.join().await.unwrap();
    assert_eq!(first.ticket.hero, hero(1));
    assert_eq!(second.ticket.hero, hero(2));
    assert_ne!(first.position, second.position);

    let maps: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter(|event| matches!(event, WorldEvent::MapChanged { .. }))
        .collect();
    assert_eq!(maps.len(), 2);

    let map = handle.render().await.unwrap();
    assert!(map.contains('1') && map.contains('2'));
    assert!(map.ends_with('\n'));
}

#[tokio::test]
async fn full_map_rejects_join_and_releases_the_id() {
    let runtime = start("..\n", &[]).await;
    let handle = runtime.handle();

    let first = handle.join().await.unwrap();
    handle.join().await.unwrap();
    assert!(matches!(
        handle.join().await,
        Err(RuntimeError::Engine(EngineError::NoFreeCell))
    ));

    handle.leave(first.ticket).await.unwrap();
    let again = handle.join().await.unwrap();
    assert_eq!(again.ticket.hero, hero(1));
    assert_ne!(again.ticket.session, first.ticket.session);
}

#[tokio::test]
async fn roster_caps_at_nine_heroes() {
    let runtime = start("..........\n", &[]).await;
    let handle = runtime.handle();
    for _ in 0..HeroId::MAX {
        handle.join().await.unwrap();
    }
    assert!(matches!(handle.join().await, Err(RuntimeError::RosterFull)));
}

#[tokio::test]
async fn fight_kills_partner_and_notifies_it() {
    let runtime = start("..\n", &[]).await;
    let handle = runtime.handle();
    let mut rx = handle.subscribe();
    let one = handle.join().await.unwrap().ticket;
    let two = handle.join().await.unwrap().ticket;

    assert_eq!(
        handle.act(one, Intent::Fight).await.unwrap(),
        Outcome::NotOnSameSpot
    );

    let other = handle
        .query_state()
        .await
        .unwrap()
        .hero(two.hero)
        .unwrap()
        .position();
    assert_eq!(step_toward(&runtime, one, other.col).await, Outcome::Moved);
    drain(&mut rx);

    let outcome = handle.act(one, Intent::Fight).await.unwrap();
    assert!(outcome.to_string().starts_with("You killed Hero 2"));

    let personal: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter(|event| event.recipient() == Some(two.hero))
        .collect();
    assert_eq!(personal.len(), 2);
    let WorldEvent::Notice { message, .. } = &personal[0] else {
        panic!("expected a notice, got {:?}", personal[0]);
    };
    assert!(message.starts_with("You died from Hero 1"));
    assert_eq!(personal[1], WorldEvent::HeroKilled { hero: two.hero });

    assert!(matches!(
        handle.act(two, Intent::Fight).await,
        Err(RuntimeError::StaleSession(id)) if id == two.hero
    ));
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.hero_count(), 1);
    assert_eq!(handle.render().await.unwrap().matches('2').count(), 0);

    let replacement = handle.join().await.unwrap().ticket;
    assert_eq!(replacement.hero, two.hero);
    // The dead session's late leave must not evict the new owner.
    handle.leave(two).await.unwrap();
    assert!(handle.query_state().await.unwrap().hero(two.hero).is_some());
}

#[tokio::test]
async fn swap_moves_item_and_notifies_receiver() {
    let runtime = start(".T.\n", &["WEAPON;Sword;10;1"]).await;
    let handle = runtime.handle();
    let mut rx = handle.subscribe();
    let a = handle.join().await.unwrap().ticket;
    let b = handle.join().await.unwrap().ticket;

    assert_eq!(
        step_toward(&runtime, a, 1).await,
        Outcome::PickedUp {
            name: "Sword".into()
        }
    );
    assert_eq!(step_toward(&runtime, b, 1).await, Outcome::Moved);
    drain(&mut rx);

    let outcome = handle.act(a, Intent::Swap { index: 0 }).await.unwrap();
    assert_eq!(outcome.to_string(), "Sword swapped");
    assert!(drain(&mut rx).contains(&WorldEvent::Notice {
        hero: b.hero,
        message: "Sword swapped".into(),
    }));

    assert!(handle.backpack(a).await.unwrap().contains(BACKPACK_EMPTY));
    assert!(handle.backpack(b).await.unwrap().contains("Sword"));

    assert_eq!(
        handle.act(a, Intent::Swap { index: 0 }).await.unwrap(),
        Outcome::ItemNotFound
    );
}

#[tokio::test]
async fn minion_kill_moves_hero_and_grants_xp() {
    let runtime = start(".M\n", &[]).await;
    let handle = runtime.handle();
    let ticket = handle.join().await.unwrap().ticket;

    let outcome = handle
        .act(ticket, Intent::Move(CardinalDirection::Right))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::MinionKilled { xp: 10 });
    assert_eq!(handle.render().await.unwrap(), ".1\n");

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.hero(ticket.hero).unwrap().experience(), 10);
}

#[tokio::test]
async fn use_and_remove_items_through_the_handle() {
    let runtime = start(".TT\n", &["HEALTH_POTION;Red;5", "MANA_POTION;Blue;7"]).await;
    let handle = runtime.handle();
    let ticket = handle.join().await.unwrap().ticket;
    let right = Intent::Move(CardinalDirection::Right);

    assert!(matches!(
        handle.act(ticket, right).await.unwrap(),
        Outcome::PickedUp { .. }
    ));
    assert!(matches!(
        handle.act(ticket, right).await.unwrap(),
        Outcome::PickedUp { .. }
    ));

    let used = handle.act(ticket, Intent::Use { index: 0 }).await.unwrap();
    assert!(used.to_string().starts_with('+'));
    assert_eq!(
        handle
            .act(ticket, Intent::Use { index: 5 })
            .await
            .unwrap(),
        Outcome::ItemNotFound
    );

    let dropped = handle
        .act(ticket, Intent::Remove { index: 0 })
        .await
        .unwrap();
    assert!(dropped.to_string().ends_with("removed"));
    assert_eq!(handle.render().await.unwrap(), "..1T\n");
    assert!(handle.backpack(ticket).await.unwrap().contains(BACKPACK_EMPTY));
}

#[tokio::test]
async fn stats_view_describes_the_hero() {
    let runtime = start("..\n", &[]).await;
    let handle = runtime.handle();
    let ticket = handle.join().await.unwrap().ticket;

    let stats = handle.stats(ticket).await.unwrap();
    assert!(stats.starts_with("Level= 1, Weapon= None, Spell= None"));
    assert!(stats.contains("health=100"));
}

#[tokio::test]
async fn missing_content_is_an_error() {
    assert!(matches!(
        Runtime::builder().build().await,
        Err(RuntimeError::MissingContent)
    ));
}

#[tokio::test]
async fn not_enough_treasures_fails_the_build() {
    let content = WorldContent {
        layout: MapLayout::parse("TT\n").unwrap(),
        treasures: vec!["WEAPON;Sword;10;1".parse().unwrap()],
    };
    assert!(matches!(
        Runtime::builder().content(content).build().await,
        Err(RuntimeError::Load(_))
    ));
}

#[tokio::test]
async fn shutdown_waits_for_the_worker() {
    let runtime = start("..\n", &[]).await;
    let ticket = runtime.handle().join().await.unwrap().ticket;
    runtime.handle().leave(ticket).await.unwrap();
    runtime.shutdown().await.unwrap();
}
