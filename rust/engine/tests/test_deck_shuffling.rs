use std::collections::HashSet;

use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::deck::{CardSource, Deck};
use holdem_engine::errors::{ErrorKind, GameError};

#[test]
fn deck_reset_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.reset();
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.draw().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn exhausted_deck_reports_error() {
    let mut deck = Deck::new_with_seed(1);
    for _ in 0..52 {
        deck.draw().unwrap();
    }
    let err = deck.draw().unwrap_err();
    assert_eq!(err, GameError::DeckExhausted);
    assert_eq!(err.kind(), ErrorKind::DeckExhausted);
    assert!(err.is_fatal());
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.draw().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    let a: Vec<Card> = (0..10).map(|_| d1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.draw().unwrap()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn reset_reshuffles_between_hands() {
    let mut deck = Deck::new_with_seed(7);
    deck.reset();
    let first: Vec<Card> = (0..10).map(|_| deck.draw().unwrap()).collect();
    deck.reset();
    assert_eq!(deck.remaining(), 52);
    let second: Vec<Card> = (0..10).map(|_| deck.draw().unwrap()).collect();
    assert_ne!(first, second);
}

#[test]
fn burn_consumes_one_card() {
    let mut deck = Deck::new_with_seed(777);
    deck.shuffle();
    deck.burn().unwrap();
    assert_eq!(deck.remaining(), 51);
}

#[test]
fn stacked_deck_deals_in_order_and_rewinds() {
    let cards = parse_cards("As Kd 7c").unwrap();
    let mut deck = Deck::stacked(cards.clone());
    let dealt: Vec<Card> = (0..3).map(|_| deck.draw().unwrap()).collect();
    assert_eq!(dealt, cards);
    assert_eq!(deck.draw(), Err(GameError::DeckExhausted));
    deck.reset();
    assert_eq!(deck.draw().unwrap(), cards[0]);
}
