//! Player action requests and their pure stack/pot arithmetic.
//!
//! An [`Action`] only knows about the acting player's stack. Whether it is
//! legal at this point of the hand (turn order, amount owed, minimum bet) is
//! decided by [`crate::rules`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Bet,
    Call,
    Raise,
    Fold,
}

impl ActionKind {
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Bet => "Bet",
            ActionKind::Call => "Call",
            ActionKind::Raise => "Raise",
            ActionKind::Fold => "Fold",
        }
    }
}

impl FromStr for ActionKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bet" => Ok(ActionKind::Bet),
            "call" => Ok(ActionKind::Call),
            "raise" => Ok(ActionKind::Raise),
            "fold" => Ok(ActionKind::Fold),
            _ => Err(GameError::UnknownAction {
                name: s.to_string(),
            }),
        }
    }
}

/// A single player request. `amount` is the number of chips the action moves
/// from the player's stack; it is ignored for folds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub amount: u32,
}

impl Action {
    pub fn new(kind: ActionKind, amount: u32) -> Self {
        Self { kind, amount }
    }

    pub fn bet(amount: u32) -> Self {
        Self::new(ActionKind::Bet, amount)
    }

    pub fn call(amount: u32) -> Self {
        Self::new(ActionKind::Call, amount)
    }

    /// A call of nothing.
    pub fn check() -> Self {
        Self::new(ActionKind::Call, 0)
    }

    pub fn raise(amount: u32) -> Self {
        Self::new(ActionKind::Raise, amount)
    }

    pub fn fold() -> Self {
        Self::new(ActionKind::Fold, 0)
    }

    /// Parses a kind name and amount as received from an untyped source.
    ///
    /// ```
    /// use holdem_engine::action::{Action, ActionKind};
    /// use holdem_engine::errors::ErrorKind;
    ///
    /// assert_eq!(Action::parse("raise", 40).unwrap().kind, ActionKind::Raise);
    /// let err = Action::parse("Check-raise", 40).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidAction);
    /// ```
    pub fn parse(kind: &str, amount: u32) -> Result<Self, GameError> {
        Ok(Self::new(kind.parse()?, amount))
    }

    /// Chips this action takes from the stack.
    pub fn chips(&self) -> u32 {
        match self.kind {
            ActionKind::Fold => 0,
            _ => self.amount,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Fold => f.write_str("Fold"),
            ActionKind::Call if self.amount == 0 => f.write_str("Check"),
            kind => write!(f, "{} {}", kind.name(), self.amount),
        }
    }
}

/// Checks that the player can afford `action`. Folding never fails.
///
/// `_current_bet` is accepted so callers can use the same signature as the
/// street-aware checks in [`crate::rules`]; the stack is the only constraint
/// enforced here.
pub fn validate(action: &Action, player_stack: u32, _current_bet: u32) -> Result<(), GameError> {
    match action.kind {
        ActionKind::Fold => Ok(()),
        ActionKind::Bet | ActionKind::Raise | ActionKind::Call => {
            if action.amount > player_stack {
                Err(GameError::InsufficientChips {
                    amount: action.amount,
                    stack: player_stack,
                })
            } else {
                Ok(())
            }
        }
    }
}

/// Applies `action` to a stack and a running pot (or bet) total.
///
/// Returns `(new_stack, new_total)`. A fold leaves both unchanged; marking
/// the player inactive is the caller's job.
///
/// ```
/// use holdem_engine::action::{execute, Action};
///
/// assert_eq!(execute(&Action::bet(40), 1000, 60).unwrap(), (960, 100));
/// assert_eq!(execute(&Action::fold(), 1000, 60).unwrap(), (1000, 60));
/// ```
pub fn execute(
    action: &Action,
    player_stack: u32,
    current_total: u32,
) -> Result<(u32, u32), GameError> {
    validate(action, player_stack, current_total)?;
    let moved = action.chips();
    Ok((player_stack - moved, current_total.saturating_add(moved)))
}
