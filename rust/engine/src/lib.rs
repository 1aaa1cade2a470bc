//! # holdem-engine: Texas Hold'em Hand Engine
//!
//! Plays out a single hand of Texas Hold'em: blinds, dealing, the betting
//! protocol across four streets, best-hand evaluation over 5 to 7 cards and
//! settlement of the main pot and any side pots.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and short notation
//! - [`deck`] - Card supplier trait and a seeded ChaCha20 deck
//! - [`action`] - Player action requests and their stack arithmetic
//! - [`rules`] - Street-level action legality and seat order
//! - [`hand`] - Hand evaluation and total ordering of hands
//! - [`player`] - Player state mutated by the engine
//! - [`pot`] - Pots, side-pot layering and the odd-chip rule
//! - [`showdown`] - Winner determination and settlement
//! - [`engine`] - Betting round state machine driving a hand
//! - [`snapshot`] - Serializable table state for transport layers
//! - [`logger`] - HandRecord serialization to JSON Lines
//! - [`config`] - Table configuration (blinds, stacks, seed)
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate, Category};
//!
//! // Evaluate a 7-card poker hand
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let strength = evaluate(&cards).unwrap();
//! assert_eq!(strength.category, Category::RoyalFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! The engine asks for one action at a time and rejects illegal ones
//! without touching any state:
//!
//! ```rust
//! use holdem_engine::action::Action;
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::engine::{Engine, Street};
//!
//! let mut engine = Engine::with_names(TableConfig::default(), &["alice", "bob", "carol"]);
//! engine.start_hand().unwrap();
//!
//! // Dealer is seat 0, blinds are seats 1 and 2, so seat 0 opens
//! assert_eq!(engine.to_act(), Some(0));
//! assert!(engine.submit(0, Action::call(5)).is_err());
//!
//! engine.submit(0, Action::call(20)).unwrap();
//! engine.submit(1, Action::call(10)).unwrap();
//! engine.submit(2, Action::check()).unwrap();
//! assert_eq!(engine.street(), Street::Flop);
//! assert_eq!(engine.board().len(), 3);
//! ```

pub mod action;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod showdown;
pub mod snapshot;
