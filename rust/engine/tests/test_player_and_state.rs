use holdem_engine::cards::{parse_cards, Card, Rank, Suit};
use holdem_engine::errors::GameError;
use holdem_engine::player::{Player, STARTING_STACK};

#[test]
fn players_start_active_with_their_stack() {
    let p = Player::new(3, "alice", STARTING_STACK);
    assert_eq!(p.id(), 3);
    assert_eq!(p.name(), "alice");
    assert_eq!(p.stack(), 1_000);
    assert!(p.is_active());
    assert!(p.can_act());
    assert!(!p.is_all_in());
    assert!(p.hole_cards().is_empty());
}

#[test]
fn player_receives_two_hole_cards() {
    let mut p = Player::new(0, "bob", STARTING_STACK);
    let a = Card {
        suit: Suit::Spades,
        rank: Rank::Ace,
    };
    let k = Card {
        suit: Suit::Spades,
        rank: Rank::King,
    };
    p.give_card(a).unwrap();
    p.give_card(k).unwrap();
    assert_eq!(p.hole_cards(), &[a, k]);
    let third = parse_cards("2c").unwrap()[0];
    assert!(p.give_card(third).is_err());
}

#[test]
fn betting_reduces_stack_and_cannot_overbet() {
    let mut p = Player::new(0, "carol", STARTING_STACK);
    p.bet(500).expect("bet should succeed");
    assert_eq!(p.stack(), 500);
    assert_eq!(p.street_bet(), 500);
    assert_eq!(p.total_bet(), 500);
    let err = p.bet(100_000).unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientChips {
            amount: 100_000,
            stack: 500
        }
    );
    assert_eq!(p.stack(), 500);
}

#[test]
fn all_in_player_stays_active_but_cannot_act() {
    let mut p = Player::new(0, "dave", 200);
    p.bet(200).unwrap();
    assert!(p.is_active());
    assert!(p.is_all_in());
    assert!(!p.can_act());
}

#[test]
fn folding_deactivates() {
    let mut p = Player::new(0, "erin", 200);
    p.fold();
    assert!(!p.is_active());
    assert!(!p.can_act());
    assert!(!p.is_all_in());
}

#[test]
fn card_notation_round_trips() {
    let cards = parse_cards("As Td 9c 2h").unwrap();
    let shown: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    assert_eq!(shown, ["As", "Td", "9c", "2h"]);
    assert_eq!(cards[1].value(), 10);
    assert!("1s".parse::<Card>().is_err());
    assert!("Asx".parse::<Card>().is_err());
    assert_eq!("K♠".parse::<Card>().unwrap(), Card::new(Rank::King, Suit::Spades));
}
