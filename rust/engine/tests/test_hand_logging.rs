use std::fs;

use holdem_engine::action::Action;
use holdem_engine::cards::parse_cards;
use holdem_engine::config::TableConfig;
use holdem_engine::engine::{Engine, Street};
use holdem_engine::logger::{ActionRecord, HandLogger, HandRecord};

fn sample_record(hand_id: &str) -> HandRecord {
    HandRecord {
        hand_id: hand_id.to_string(),
        seed: Some(1),
        actions: vec![ActionRecord {
            player_id: 0,
            street: Street::Preflop,
            action: Action::check(),
        }],
        board: parse_cards("Ac").unwrap(),
        result: Some("alice wins 40".to_string()),
        ts: None,
        meta: None,
        showdown: None,
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("handlog.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&sample_record("20250102-000001")).expect("write");
    logger.write(&sample_record("20250102-000002")).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let content = String::from_utf8(bytes).unwrap();
    assert_eq!(content.lines().count(), 2);
    for line in content.lines() {
        let back: HandRecord = serde_json::from_str(line).expect("each line is a record");
        assert_eq!(back.actions.len(), 1);
    }
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("logs").join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&sample_record("20250102-000003")).expect("write");
    assert!(path.exists());
}

#[test]
fn sequential_ids_increment() {
    let mut logger = HandLogger::ids_only("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
}

#[test]
fn ids_only_logger_accepts_writes() {
    let mut logger = HandLogger::ids_only("20251231");
    logger
        .write(&sample_record("20251231-000001"))
        .expect("write without a file is a no-op");
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("handlog_ts.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let rec = sample_record("20250102-000010");
    logger.write(&rec).expect("write");
    let line = fs::read_to_string(&path).unwrap();
    let first: HandRecord = serde_json::from_str(line.trim_end()).unwrap();
    let ts = first.ts.expect("ts should be injected");
    assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok(), "{ts}");

    let preset = "2030-01-01T00:00:00Z".to_string();
    let rec2 = HandRecord {
        ts: Some(preset.clone()),
        ..rec
    };
    logger.write(&rec2).expect("write2");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(&preset), "preset ts must be kept");
}

#[test]
fn logs_settled_hands_from_the_engine() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("table.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let mut engine = Engine::with_names(TableConfig::default(), &["alice", "bob", "carol"]);
    assert_eq!(logger.log_hand(&engine).unwrap(), None);

    engine.start_hand().unwrap();
    engine.submit(0, Action::fold()).unwrap();
    engine.submit(1, Action::fold()).unwrap();
    let id = logger.log_hand(&engine).unwrap().expect("hand settled");
    assert!(id.ends_with("-000001"), "{id}");

    let line = fs::read_to_string(&path).unwrap();
    let rec: HandRecord = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(rec.hand_id, id);
    assert_eq!(rec.result.as_deref(), Some("carol wins 30"));
    assert_eq!(rec.actions.len(), 4);
    assert!(rec.ts.is_some());
}
