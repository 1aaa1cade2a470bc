//! Pot accounting and settlement.
//!
//! Chips only flow into a [`Pot`] while betting is open and leave it in a
//! single [`Pot::distribute`] call. Side pots are built by layering each
//! player's total contribution, see [`PotManager::layer`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::GameError;
use crate::player::Player;

/// Chips paid to one seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub seat: usize,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    /// Wide enough for every stack at the table combined
    chips: u64,
    /// Seats that may win this pot
    eligible: Vec<usize>,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }

    pub fn eligible(&self) -> &[usize] {
        &self.eligible
    }

    pub fn is_eligible(&self, seat: usize) -> bool {
        self.eligible.contains(&seat)
    }

    pub fn add_chips(&mut self, amount: u64) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub fn add_eligible(&mut self, seat: usize) {
        if !self.eligible.contains(&seat) {
            self.eligible.push(seat);
        }
    }

    /// Pays the whole pot to `winners` and empties it.
    ///
    /// Each winner gets `chips / winners`; the remainder goes one chip at a
    /// time to the winners closest to the dealer's left. Nothing is changed
    /// when the winner set is empty, names a seat that does not exist, or
    /// would push a winner's stack past `u32::MAX`.
    ///
    /// ```
    /// use holdem_engine::player::Player;
    /// use holdem_engine::pot::Pot;
    ///
    /// let mut players = vec![Player::new(0, "a", 0), Player::new(1, "b", 0)];
    /// let mut pot = Pot::new();
    /// pot.add_chips(1001);
    /// pot.distribute(&[0, 1], &mut players, 0).unwrap();
    /// assert_eq!(players[1].stack(), 501);
    /// assert_eq!(players[0].stack(), 500);
    /// assert_eq!(pot.chips(), 0);
    /// ```
    pub fn distribute(
        &mut self,
        winners: &[usize],
        players: &mut [Player],
        dealer: usize,
    ) -> Result<Vec<Payout>, GameError> {
        if winners.is_empty() {
            return Err(GameError::NoActivePlayers);
        }
        let n = players.len();
        if let Some(&seat) = winners.iter().find(|&&s| s >= n) {
            return Err(GameError::NoSuchSeat { seat });
        }
        let mut order = winners.to_vec();
        order.sort_unstable_by_key(|&seat| (seat + n - dealer % n - 1) % n);
        order.dedup();

        let count = order.len() as u64;
        let share = self.chips / count;
        let mut remainder = self.chips % count;
        let mut credits = Vec::with_capacity(order.len());
        for seat in order {
            let mut amount = share;
            if remainder > 0 {
                amount += 1;
                remainder -= 1;
            }
            let total = u64::from(players[seat].stack()) + amount;
            let credit = u32::try_from(amount)
                .ok()
                .filter(|_| total <= u64::from(u32::MAX))
                .ok_or(GameError::ChipOverflow { total })?;
            credits.push((seat, credit));
        }
        let mut payouts = Vec::with_capacity(credits.len());
        for (seat, amount) in credits {
            players[seat].add_chips(amount);
            debug!(seat, amount, "pot awarded");
            payouts.push(Payout {
                seat,
                amount: u64::from(amount),
            });
        }
        self.chips = 0;
        self.eligible.clear();
        Ok(payouts)
    }
}

/// One player's chips committed over the whole hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Contribution {
    pub seat: usize,
    pub amount: u32,
    /// Still contesting the hand (not folded)
    pub live: bool,
}

impl Contribution {
    pub fn of(seat: usize, player: &Player) -> Self {
        Self {
            seat,
            amount: player.total_bet(),
            live: player.is_active(),
        }
    }
}

/// The main pot followed by any side pots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl Default for PotManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PotManager {
    pub fn new() -> Self {
        Self {
            pots: vec![Pot::new()],
        }
    }

    /// Builds layered pots straight from per-seat contributions, all live.
    pub fn from_contributions<I>(amounts: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let contributions: Vec<Contribution> = amounts
            .into_iter()
            .enumerate()
            .map(|(seat, amount)| Contribution {
                seat,
                amount,
                live: true,
            })
            .collect();
        let mut pm = Self::new();
        pm.layer(&contributions);
        pm
    }

    /// Records chips put in by `seat` during betting.
    pub fn add_bet(&mut self, seat: usize, amount: u32) {
        let main = &mut self.pots[0];
        main.add_chips(u64::from(amount));
        main.add_eligible(seat);
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn pots_mut(&mut self) -> &mut [Pot] {
        &mut self.pots
    }

    pub fn main_pot(&self) -> u64 {
        self.pots[0].chips()
    }

    pub fn side_pots(&self) -> Vec<u64> {
        self.pots[1..].iter().map(Pot::chips).collect()
    }

    pub fn total(&self) -> u64 {
        self.pots.iter().map(Pot::chips).sum()
    }

    /// Rebuilds the pots from total contributions.
    ///
    /// Distinct contribution levels are taken in ascending order; the layer
    /// between two levels holds `(level - previous) * contributors` chips and
    /// only live players who reached the level may win it. Folded chips stay
    /// in the layers they reached. Adjacent layers with the same eligible
    /// seats are merged, and a layer nobody live reached falls into the pot
    /// below it.
    pub fn layer(&mut self, contributions: &[Contribution]) {
        let mut levels: Vec<u32> = contributions
            .iter()
            .map(|c| c.amount)
            .filter(|&a| a > 0)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::new();
        let mut unclaimed = 0u64;
        let mut prev = 0u32;
        for level in levels {
            let contributors = contributions.iter().filter(|c| c.amount >= level).count() as u64;
            let chips = u64::from(level - prev) * contributors;
            prev = level;

            let mut eligible: Vec<usize> = contributions
                .iter()
                .filter(|c| c.live && c.amount >= level)
                .map(|c| c.seat)
                .collect();
            eligible.sort_unstable();

            let merge = eligible.is_empty()
                || pots.last().is_some_and(|below| below.eligible == eligible);
            if !merge {
                pots.push(Pot {
                    chips: chips + unclaimed,
                    eligible,
                });
                unclaimed = 0;
            } else if let Some(below) = pots.last_mut() {
                below.add_chips(chips);
            } else {
                unclaimed += chips;
            }
        }
        if pots.is_empty() {
            pots.push(Pot {
                chips: unclaimed,
                eligible: Vec::new(),
            });
        }
        self.pots = pots;
    }
}
