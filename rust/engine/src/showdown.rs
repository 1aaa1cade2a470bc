use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{self, HandStrength};
use crate::player::Player;
use crate::pot::{Contribution, Payout, PotManager};

/// A live player's best hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownHand {
    pub seat: usize,
    pub hand: HandStrength,
}

/// Outcome of a finished hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Chips paid per seat, summed over all pots
    pub payouts: Vec<Payout>,
    /// Revealed hands, empty when everyone else folded
    pub hands: Vec<ShowdownHand>,
    /// Winners of the main pot
    pub winners: Vec<usize>,
}

impl Settlement {
    pub fn amount_for(&self, seat: usize) -> u64 {
        self.payouts
            .iter()
            .filter(|p| p.seat == seat)
            .map(|p| p.amount)
            .sum()
    }

    pub fn went_to_showdown(&self) -> bool {
        !self.hands.is_empty()
    }
}

/// Evaluates hole + board for every active player.
pub fn evaluate_players(
    players: &[Player],
    board: &[Card],
) -> Result<Vec<ShowdownHand>, GameError> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_active())
        .map(|(seat, p)| {
            let mut cards: Vec<Card> = p.hole_cards().to_vec();
            cards.extend_from_slice(board);
            Ok(ShowdownHand {
                seat,
                hand: hand::evaluate(&cards)?,
            })
        })
        .collect()
}

/// Seats holding the equal-best hand among `eligible`.
pub fn winners_among(hands: &[ShowdownHand], eligible: &[usize]) -> Vec<usize> {
    let contenders: Vec<&ShowdownHand> = hands
        .iter()
        .filter(|h| eligible.contains(&h.seat))
        .collect();
    let Some(top) = contenders.iter().map(|h| &h.hand).max() else {
        return Vec::new();
    };
    contenders
        .iter()
        .filter(|h| h.hand == *top)
        .map(|h| h.seat)
        .collect()
}

/// Seats with the best hand among all active players.
///
/// # Errors
///
/// [`GameError::NoActivePlayers`] when nobody is left, or an evaluation
/// error for malformed hole/board cards.
pub fn determine_winners(players: &[Player], board: &[Card]) -> Result<Vec<usize>, GameError> {
    let hands = evaluate_players(players, board)?;
    let seats: Vec<usize> = hands.iter().map(|h| h.seat).collect();
    let winners = winners_among(&hands, &seats);
    if winners.is_empty() {
        return Err(GameError::NoActivePlayers);
    }
    Ok(winners)
}

/// Splits contributions into main and side pots and pays each one to its
/// best eligible hand(s).
///
/// All winner sets are worked out before any chips move, so an error leaves
/// stacks and pots untouched.
pub fn settle(
    pots: &mut PotManager,
    players: &mut [Player],
    board: &[Card],
    dealer: usize,
) -> Result<Settlement, GameError> {
    let contributions: Vec<Contribution> = players
        .iter()
        .enumerate()
        .map(|(seat, p)| Contribution::of(seat, p))
        .collect();
    let hands = evaluate_players(players, board)?;

    let mut layered = pots.clone();
    layered.layer(&contributions);
    let richest = players.iter().map(|p| u64::from(p.stack())).max().unwrap_or(0);
    let total = richest + layered.total();
    if total > u64::from(u32::MAX) {
        return Err(GameError::ChipOverflow { total });
    }
    let mut plan = Vec::with_capacity(layered.pots().len());
    for pot in layered.pots() {
        let winners = winners_among(&hands, pot.eligible());
        if winners.is_empty() && pot.chips() > 0 {
            return Err(GameError::NoActivePlayers);
        }
        plan.push(winners);
    }

    let mut payouts: Vec<Payout> = Vec::new();
    for (pot, winners) in layered.pots_mut().iter_mut().zip(plan.iter()) {
        if pot.chips() == 0 {
            continue;
        }
        for paid in pot.distribute(winners, players, dealer)? {
            merge_payout(&mut payouts, paid);
        }
    }
    *pots = layered;

    let winners = plan.into_iter().next().unwrap_or_default();
    info!(?winners, "showdown settled");
    Ok(Settlement {
        payouts,
        hands,
        winners,
    })
}

/// Pays every pot to the last player standing.
pub fn award_uncontested(
    pots: &mut PotManager,
    players: &mut [Player],
    seat: usize,
    dealer: usize,
) -> Result<Settlement, GameError> {
    if !players.get(seat).is_some_and(Player::is_active) {
        return Err(GameError::NoActivePlayers);
    }
    let mut payouts: Vec<Payout> = Vec::new();
    for pot in pots.pots_mut() {
        if pot.chips() == 0 {
            continue;
        }
        for paid in pot.distribute(&[seat], players, dealer)? {
            merge_payout(&mut payouts, paid);
        }
    }
    info!(seat, "pot awarded uncontested");
    Ok(Settlement {
        payouts,
        hands: Vec::new(),
        winners: vec![seat],
    })
}

fn merge_payout(payouts: &mut Vec<Payout>, paid: Payout) {
    match payouts.iter_mut().find(|p| p.seat == paid.seat) {
        Some(existing) => existing.amount += paid.amount,
        None => payouts.push(paid),
    }
}
