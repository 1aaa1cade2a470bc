use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Supplier of cards for one hand. Implementations hand out each card at
/// most once between resets.
pub trait CardSource {
    /// Takes the next card, failing with [`GameError::DeckExhausted`] when
    /// nothing is left.
    fn draw(&mut self) -> Result<Card, GameError>;

    /// Restores a full set of cards ready for the next hand.
    fn reset(&mut self);

    fn remaining(&self) -> usize;

    /// Discards the next card face down.
    fn burn(&mut self) -> Result<(), GameError> {
        self.draw().map(|_| ())
    }
}

#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
    stacked: bool,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
            stacked: false,
        }
    }

    /// A deck that deals `cards` in the given order. Resetting rewinds to the
    /// first card instead of reshuffling.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self {
            cards,
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(0),
            stacked: true,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }
}

impl CardSource for Deck {
    fn draw(&mut self) -> Result<Card, GameError> {
        self.deal_card().ok_or(GameError::DeckExhausted)
    }

    fn reset(&mut self) {
        if self.stacked {
            self.position = 0;
        } else {
            self.shuffle();
        }
    }

    fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
