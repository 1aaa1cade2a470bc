use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// Evaluated best five-card hand.
///
/// Equality and ordering look at `category` then `strength` only, so two
/// hands that differ just in suits compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // tie-break ranks, high -> low, 0 where absent
    pub strength: [u8; 5],
    /// The five cards making the hand, most significant first
    pub best: [Card; 5],
}

impl PartialEq for HandStrength {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandStrength {}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.category.name())?;
        for (i, c) in self.best.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str(")")
    }
}

pub fn compare(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.strength.cmp(&b.strength),
        ord => ord,
    }
}

/// Evaluates the best five-card hand out of 5 to 7 distinct cards.
///
/// Every five-card subset is classified and the strongest kept, so the
/// result does not depend on input order.
///
/// # Errors
///
/// [`GameError::NotEnoughCards`], [`GameError::TooManyCards`] or
/// [`GameError::DuplicateCard`] when the input is not a valid hand.
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{evaluate, Category};
///
/// let wheel = parse_cards("As 2h 3d 4c 5s").unwrap();
/// let hs = evaluate(&wheel).unwrap();
/// assert_eq!(hs.category, Category::Straight);
/// assert_eq!(hs.strength[0], 5);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandStrength, GameError> {
    if cards.len() < 5 {
        return Err(GameError::NotEnoughCards { count: cards.len() });
    }
    if cards.len() > 7 {
        return Err(GameError::TooManyCards { count: cards.len() });
    }
    let mut sorted = cards.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(GameError::DuplicateCard { card: w[0] });
    }

    let n = sorted.len();
    let mut best: Option<HandStrength> = None;
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        let mut five = [sorted[0]; 5];
        let mut k = 0;
        for (i, &c) in sorted.iter().enumerate() {
            if mask & (1 << i) != 0 {
                five[k] = c;
                k += 1;
            }
        }
        let hs = classify_five(five);
        // strictly greater keeps the first of equal hands
        if best.as_ref().is_none_or(|b| hs > *b) {
            best = Some(hs);
        }
    }
    best.ok_or(GameError::NotEnoughCards { count: n })
}

fn classify_five(mut five: [Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    for c in &five {
        rank_counts[c.value() as usize] += 1;
    }
    // group ranks by multiplicity, then by rank; never rely on count order
    five.sort_unstable_by(|a, b| {
        let ka = (rank_counts[a.value() as usize], a.rank, a.suit);
        let kb = (rank_counts[b.value() as usize], b.rank, b.suit);
        kb.cmp(&ka)
    });

    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for c in &five {
        let r = c.value();
        if groups.last().is_none_or(|&(_, last)| last != r) {
            groups.push((rank_counts[r as usize], r));
        }
    }
    let mut grouped = [0u8; 5];
    for (slot, &(_, r)) in grouped.iter_mut().zip(groups.iter()) {
        *slot = r;
    }

    let flush = five.iter().all(|c| c.suit == five[0].suit);
    let straight = straight_high(&five, &groups);

    if let (true, Some(high)) = (flush, straight) {
        let category = if high == Rank::Ace.value() {
            Category::RoyalFlush
        } else {
            Category::StraightFlush
        };
        return straight_hand(category, high, five);
    }

    let (top, second) = (groups[0].0, groups.get(1).map_or(0, |g| g.0));
    let category = match (top, second) {
        (4, _) => Category::FourOfAKind,
        (3, 2) => Category::FullHouse,
        _ if flush => Category::Flush,
        _ if straight.is_some() => Category::Straight,
        (3, _) => Category::ThreeOfAKind,
        (2, 2) => Category::TwoPair,
        (2, _) => Category::OnePair,
        _ => Category::HighCard,
    };
    if let (Category::Straight, Some(high)) = (category, straight) {
        return straight_hand(category, high, five);
    }
    HandStrength {
        category,
        strength: grouped,
        best: five,
    }
}

/// High card of a five-card straight; the wheel A-2-3-4-5 counts as 5 high.
fn straight_high(five: &[Card; 5], groups: &[(u8, u8)]) -> Option<u8> {
    if groups.len() != 5 {
        return None;
    }
    let ranks: Vec<u8> = five.iter().map(Card::value).collect();
    if ranks.windows(2).all(|w| w[0] == w[1] + 1) {
        return Some(ranks[0]);
    }
    if ranks == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

fn straight_hand(category: Category, high: u8, mut five: [Card; 5]) -> HandStrength {
    if high == 5 {
        // ace plays low
        five.rotate_left(1);
    }
    HandStrength {
        category,
        strength: [high, 0, 0, 0, 0],
        best: five,
    }
}

/// Indices of all hands that compare equal-highest.
pub fn best_indices(hands: &[HandStrength]) -> Vec<usize> {
    let Some(top) = hands.iter().max() else {
        return Vec::new();
    };
    hands
        .iter()
        .enumerate()
        .filter(|(_, h)| *h == top)
        .map(|(i, _)| i)
        .collect()
}
