use crate::action::{self, Action, ActionKind};
use crate::errors::GameError;
use crate::player::Player;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    /// Chips moved from the stack.
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n)
            | ValidatedAction::Bet(n)
            | ValidatedAction::Raise(n)
            | ValidatedAction::AllIn(n) => n,
        }
    }
}

/// Validates a player action against the betting state of the street.
///
/// Amounts are chips moved from the stack by this action. A call must put in
/// exactly what is owed (or the whole stack when that is less). A bet or a
/// raise must be at least the current bet and must lift the player above it;
/// the only exception is moving the whole stack, which is always allowed.
///
/// # Arguments
///
/// * `stack` - Player's remaining chip stack
/// * `street_bet` - Chips the player already put in on this street
/// * `current_bet` - Street total every player has to match
/// * `action` - The action the player wishes to perform
///
/// # Errors
///
/// - [`GameError::InsufficientChips`] - amount exceeds the stack
/// - [`GameError::CallMismatch`] - call amount differs from what is owed
/// - [`GameError::InvalidBetAmount`] - bet or raise below the minimum
///
/// # Examples
///
/// ```
/// use holdem_engine::action::Action;
/// use holdem_engine::rules::{validate_action, ValidatedAction};
///
/// // Facing a bet of 20 with nothing in yet
/// assert_eq!(validate_action(1000, 0, 20, &Action::call(20)), Ok(ValidatedAction::Call(20)));
/// // Short stack moves in for less than a full raise
/// assert_eq!(validate_action(30, 0, 20, &Action::raise(30)), Ok(ValidatedAction::AllIn(30)));
/// ```
///
/// ```
/// use holdem_engine::action::Action;
/// use holdem_engine::errors::GameError;
/// use holdem_engine::rules::validate_action;
///
/// let result = validate_action(1000, 0, 50, &Action::raise(40));
/// assert_eq!(result, Err(GameError::InvalidBetAmount { amount: 40, minimum: 51 }));
/// ```
pub fn validate_action(
    stack: u32,
    street_bet: u32,
    current_bet: u32,
    action: &Action,
) -> Result<ValidatedAction, GameError> {
    action::validate(action, stack, current_bet)?;
    let owed = current_bet.saturating_sub(street_bet);
    match action.kind {
        ActionKind::Fold => Ok(ValidatedAction::Fold),
        ActionKind::Call => {
            let required = owed.min(stack);
            if action.amount != required {
                return Err(GameError::CallMismatch {
                    amount: action.amount,
                    required,
                });
            }
            if required == 0 {
                Ok(ValidatedAction::Check)
            } else if required == stack {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(required))
            }
        }
        ActionKind::Bet | ActionKind::Raise => {
            let minimum = current_bet.max(owed.saturating_add(1));
            let amount = action.amount;
            if amount > 0 && amount == stack {
                return Ok(ValidatedAction::AllIn(stack));
            }
            if amount < minimum {
                return Err(GameError::InvalidBetAmount { amount, minimum });
            }
            if action.kind == ActionKind::Bet {
                Ok(ValidatedAction::Bet(amount))
            } else {
                Ok(ValidatedAction::Raise(amount))
            }
        }
    }
}

/// Next seat clockwise after `from` that satisfies `pred`, wrapping around
/// and considering `from` itself last.
pub fn next_seat<F>(players: &[Player], from: usize, pred: F) -> Option<usize>
where
    F: Fn(&Player) -> bool,
{
    let n = players.len();
    (1..=n)
        .map(|i| (from + i) % n)
        .find(|&seat| pred(&players[seat]))
}

/// Small and big blind seats: the first two seats with chips after the dealer.
pub fn blind_seats(players: &[Player], dealer: usize) -> Option<(usize, usize)> {
    let sb = next_seat(players, dealer, Player::is_active)?;
    let bb = next_seat(players, sb, Player::is_active)?;
    if sb == bb {
        None
    } else {
        Some((sb, bb))
    }
}

/// Seats still contesting the hand, in seat order.
pub fn active_seats(players: &[Player]) -> Vec<usize> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_active())
        .map(|(i, _)| i)
        .collect()
}
