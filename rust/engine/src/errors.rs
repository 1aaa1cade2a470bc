use thiserror::Error;

use crate::cards::Card;

/// Coarse classification of [`GameError`] used by orchestrators to decide
/// whether a failure is retryable (re-prompt the player) or aborts the hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Action amount exceeds the player's stack
    InsufficientChips,
    /// Unrecognized action or action illegal in the current state
    InvalidAction,
    /// Evaluator given too few, too many or duplicate cards
    InvalidHand,
    /// Draw requested with no cards remaining
    DeckExhausted,
    /// Settlement attempted with nobody to pay
    NoActivePlayers,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Insufficient chips: action needs {amount}, stack is {stack}")]
    InsufficientChips { amount: u32, stack: u32 },
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Call amount {amount} does not match the {required} owed")]
    CallMismatch { amount: u32, required: u32 },
    #[error("Unknown action type: {name}")]
    UnknownAction { name: String },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("A hand needs two players with chips, found {seated}")]
    NotEnoughPlayers { seated: usize },
    #[error("No player at seat {seat}")]
    NoSuchSeat { seat: usize },
    #[error("Chip total {total} does not fit in a single stack")]
    ChipOverflow { total: u64 },
    #[error("Hand evaluation needs at least 5 cards, got {count}")]
    NotEnoughCards { count: usize },
    #[error("Hand evaluation takes at most 7 cards, got {count}")]
    TooManyCards { count: usize },
    #[error("Duplicate card {card} in hand")]
    DuplicateCard { card: Card },
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("No active players to settle the pot")]
    NoActivePlayers,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InsufficientChips { .. } => ErrorKind::InsufficientChips,
            GameError::InvalidBetAmount { .. }
            | GameError::CallMismatch { .. }
            | GameError::UnknownAction { .. }
            | GameError::NotPlayersTurn { .. }
            | GameError::PlayerAlreadyFolded
            | GameError::NoHandInProgress
            | GameError::HandAlreadyComplete
            | GameError::HandInProgress
            | GameError::NotEnoughPlayers { .. }
            | GameError::NoSuchSeat { .. }
            | GameError::ChipOverflow { .. } => ErrorKind::InvalidAction,
            GameError::NotEnoughCards { .. }
            | GameError::TooManyCards { .. }
            | GameError::DuplicateCard { .. } => ErrorKind::InvalidHand,
            GameError::DeckExhausted => ErrorKind::DeckExhausted,
            GameError::NoActivePlayers => ErrorKind::NoActivePlayers,
        }
    }

    /// Errors after which the hand cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DeckExhausted | ErrorKind::NoActivePlayers
        )
    }
}
