use holdem_engine::action::Action;
use holdem_engine::cards::parse_cards;
use holdem_engine::config::TableConfig;
use holdem_engine::deck::Deck;
use holdem_engine::engine::{Engine, Street};
use holdem_engine::player::Player;
use holdem_engine::snapshot::{Phase, TableSnapshot};

fn heads_up() -> Engine {
    let deck = Deck::stacked(parse_cards("Th 9s 3h 4s As Ks Qs Jd 2c").unwrap());
    let config = TableConfig {
        burn_cards: false,
        ..TableConfig::default()
    };
    let players = vec![Player::new(0, "alice", 1000), Player::new(1, "bob", 1000)];
    Engine::with_deck(config, players, 0, deck)
}

fn phases(snaps: &[TableSnapshot]) -> Vec<Phase> {
    snaps.iter().map(|s| s.phase).collect()
}

#[test]
fn phases_follow_the_hand() {
    let mut e = heads_up();
    e.start_hand().unwrap();
    assert_eq!(phases(e.snapshots()), [Phase::BlindsPosted, Phase::HoleCardsDealt]);

    e.submit(1, Action::call(10)).unwrap();
    e.submit(0, Action::check()).unwrap();
    for _ in 0..3 {
        e.submit(1, Action::check()).unwrap();
        e.submit(0, Action::check()).unwrap();
    }

    assert_eq!(
        phases(e.snapshots()),
        [
            Phase::BlindsPosted,
            Phase::HoleCardsDealt,
            Phase::StreetComplete(Street::Preflop),
            Phase::StreetDealt(Street::Flop),
            Phase::StreetComplete(Street::Flop),
            Phase::StreetDealt(Street::Turn),
            Phase::StreetComplete(Street::Turn),
            Phase::StreetDealt(Street::River),
            Phase::StreetComplete(Street::River),
            Phase::Showdown,
            Phase::Settled,
        ]
    );

    let flop = &e.snapshots()[3];
    assert_eq!(flop.board.len(), 3);
    assert_eq!(flop.pot_total, 40);
    assert_eq!(flop.to_act, None);

    let showdown = &e.snapshots()[9];
    assert_eq!(showdown.pot_total, 40);
    assert_eq!(showdown.board.len(), 5);
}

#[test]
fn hole_cards_hidden_until_showdown() {
    let mut e = heads_up();
    e.start_hand().unwrap();
    let live = e.snapshot();
    assert!(live.players.iter().all(|p| p.hole.is_none()));
    let json = serde_json::to_string(&live).unwrap();
    assert!(!json.contains("\"hole\""), "{json}");

    e.submit(1, Action::call(10)).unwrap();
    e.submit(0, Action::check()).unwrap();
    for _ in 0..3 {
        e.submit(1, Action::check()).unwrap();
        e.submit(0, Action::check()).unwrap();
    }

    for snap in e.snapshots() {
        let revealed = matches!(snap.phase, Phase::Showdown | Phase::Settled);
        for p in &snap.players {
            assert_eq!(p.hole.is_some(), revealed, "{:?} seat {}", snap.phase, p.seat);
        }
    }
    let alice = e.snapshot().player(0).cloned().unwrap();
    assert_eq!(alice.hole, Some(parse_cards("9s 4s").unwrap()));
    assert_eq!(alice.stack, 1020);
}

#[test]
fn uncontested_hand_never_reveals() {
    let mut e = heads_up();
    e.start_hand().unwrap();
    e.submit(1, Action::fold()).unwrap();
    assert_eq!(
        phases(e.snapshots()),
        [Phase::BlindsPosted, Phase::HoleCardsDealt, Phase::Settled]
    );
    assert!(e
        .snapshots()
        .iter()
        .flat_map(|s| &s.players)
        .all(|p| p.hole.is_none()));
}

#[test]
fn blinds_snapshot_shows_bets_and_turn() {
    let mut e = heads_up();
    e.start_hand().unwrap();
    let blinds = &e.snapshots()[0];
    assert_eq!(blinds.pot_total, 30);
    assert_eq!(blinds.current_bet, 20);
    assert_eq!(blinds.player(1).unwrap().street_bet, 10);
    assert_eq!(blinds.player(0).unwrap().street_bet, 20);
    assert_eq!(e.snapshot().to_act, Some(1));
}

#[test]
fn snapshots_round_trip_and_drain() {
    let mut e = heads_up();
    e.start_hand().unwrap();
    let snap = e.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let back: TableSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);

    let drained = e.drain_snapshots();
    assert_eq!(drained.len(), 2);
    assert!(e.snapshots().is_empty());
}
