use holdem_engine::action::Action;
use holdem_engine::cards::parse_cards;
use holdem_engine::config::TableConfig;
use holdem_engine::deck::Deck;
use holdem_engine::engine::{Engine, Street};
use holdem_engine::logger::{format_hand_id, ActionRecord, HandRecord, ShowdownInfo};
use holdem_engine::player::Player;

fn heads_up_showdown() -> Engine {
    // bob (seat 1) posts the small blind and is dealt first
    let deck = Deck::stacked(parse_cards("Th 9s 3h 4s As Ks Qs Jd 2c").unwrap());
    let config = TableConfig {
        burn_cards: false,
        seed: Some(9),
        ..TableConfig::with_blinds(10, 20)
    };
    let players = vec![Player::new(0, "alice", 1000), Player::new(1, "bob", 1000)];
    let mut engine = Engine::with_deck(config, players, 0, deck);
    engine.start_hand().unwrap();
    engine.submit(1, Action::call(10)).unwrap();
    engine.submit(0, Action::check()).unwrap();
    for _ in 0..3 {
        engine.submit(1, Action::check()).unwrap();
        engine.submit(0, Action::check()).unwrap();
    }
    engine
}

#[test]
fn hand_record_serializes_and_deserializes() {
    let rec = HandRecord {
        hand_id: "20250102-000123".to_string(),
        seed: Some(42),
        actions: vec![
            ActionRecord {
                player_id: 0,
                street: Street::Preflop,
                action: Action::bet(50),
            },
            ActionRecord {
                player_id: 1,
                street: Street::Preflop,
                action: Action::call(50),
            },
        ],
        board: parse_cards("Ah Ad Ac").unwrap(),
        result: Some("alice wins 100".to_string()),
        ts: None,
        meta: Some(serde_json::json!({"dealer": 0})),
        showdown: Some(ShowdownInfo {
            winners: vec![0],
            notes: None,
        }),
    };

    let s = serde_json::to_string(&rec).expect("serialize");
    let back: HandRecord = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(rec, back);
}

#[test]
fn optional_fields_may_be_absent() {
    let json = r#"{"hand_id":"20250102-000001","seed":null,"actions":[],"board":[],"result":null}"#;
    let rec: HandRecord = serde_json::from_str(json).expect("deserialize");
    assert!(rec.ts.is_none());
    assert!(rec.meta.is_none());
    assert!(rec.showdown.is_none());
}

#[test]
fn id_format_is_date_and_six_digit_sequence() {
    assert_eq!(format_hand_id("20251231", 42), "20251231-000042");
}

#[test]
fn engine_builds_record_after_showdown() {
    let engine = heads_up_showdown();
    let rec = engine.hand_record("20250102-000007").expect("hand is settled");
    assert_eq!(rec.hand_id, "20250102-000007");
    assert_eq!(rec.seed, Some(9));
    assert_eq!(rec.board, parse_cards("As Ks Qs Jd 2c").unwrap());
    // two blinds, call + check, then three streets of checks
    assert_eq!(rec.actions.len(), 10);
    assert_eq!(rec.actions[0].action, Action::bet(10));
    assert_eq!(rec.actions[1].action, Action::bet(20));
    assert_eq!(rec.actions.last().unwrap().street, Street::River);
    assert_eq!(rec.result.as_deref(), Some("alice wins 40"));

    let showdown = rec.showdown.expect("went to showdown");
    assert_eq!(showdown.winners, vec![0]);
    assert!(showdown.notes.unwrap().starts_with("Flush"));

    let meta = rec.meta.expect("meta present");
    assert_eq!(meta["dealer"], 0);
    assert_eq!(meta["big_blind"], 20);
    assert_eq!(meta["pot"], 40);
}

#[test]
fn uncontested_record_has_no_showdown() {
    let mut engine = Engine::with_names(TableConfig::default(), &["alice", "bob", "carol"]);
    assert!(engine.hand_record("20250102-000001").is_none());
    engine.start_hand().unwrap();
    engine.submit(0, Action::fold()).unwrap();
    engine.submit(1, Action::fold()).unwrap();
    let rec = engine.hand_record("20250102-000001").unwrap();
    assert!(rec.showdown.is_none());
    assert!(rec.board.is_empty());
    assert_eq!(rec.result.as_deref(), Some("carol wins 30"));
}
