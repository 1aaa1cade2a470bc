use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// A seated player as seen by the hand engine.
/// Tracks chips, hole cards and this hand's wagers. The table owns the
/// roster; the engine only mutates stacks, cards and the active flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: usize,
    name: String,
    stack: u32,
    hole: Vec<Card>,
    /// Chips put in on the current street
    street_bet: u32,
    /// Chips put in over the whole hand
    total_bet: u32,
    /// False once folded, or when sitting out a hand
    active: bool,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>, stack: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole: Vec::with_capacity(2),
            street_bet: 0,
            total_bet: 0,
            active: true,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn street_bet(&self) -> u32 {
        self.street_bet
    }
    pub fn total_bet(&self) -> u32 {
        self.total_bet
    }
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Still in the hand with no chips behind.
    pub fn is_all_in(&self) -> bool {
        self.active && self.stack == 0 && self.total_bet > 0
    }

    /// Still in the hand and able to put in more chips.
    pub fn can_act(&self) -> bool {
        self.active && self.stack > 0
    }

    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), GameError> {
        if self.hole.len() >= 2 {
            return Err(GameError::TooManyCards {
                count: self.hole.len() + 1,
            });
        }
        self.hole.push(c);
        Ok(())
    }

    /// Moves `amount` chips from the stack into this hand's wagers.
    pub fn bet(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientChips {
                amount,
                stack: self.stack,
            });
        }
        self.stack -= amount;
        self.street_bet += amount;
        self.total_bet += amount;
        Ok(())
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub fn fold(&mut self) {
        self.active = false;
    }

    pub(crate) fn clear_street(&mut self) {
        self.street_bet = 0;
    }

    /// Returns this hand's wagers to the stack.
    pub(crate) fn refund(&mut self) {
        self.stack = self.stack.saturating_add(self.total_bet);
        self.street_bet = 0;
        self.total_bet = 0;
    }

    /// Prepares for a new hand; a busted player sits the hand out.
    pub(crate) fn reset_for_hand(&mut self) {
        self.hole.clear();
        self.street_bet = 0;
        self.total_bet = 0;
        self.active = self.stack > 0;
    }
}
