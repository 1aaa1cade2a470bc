use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::Street;
use crate::player::Player;

/// Point in the hand at which a snapshot was taken.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    BlindsPosted,
    HoleCardsDealt,
    /// Community cards for this street are on the board
    StreetDealt(Street),
    /// Betting on this street is closed
    StreetComplete(Street),
    Showdown,
    Settled,
}

/// Public view of one seat. Hole cards are only present once revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub seat: usize,
    pub id: usize,
    pub name: String,
    pub stack: u32,
    pub street_bet: u32,
    pub active: bool,
    pub all_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole: Option<Vec<Card>>,
}

impl PlayerView {
    pub fn of(seat: usize, player: &Player, reveal: bool) -> Self {
        Self {
            seat,
            id: player.id(),
            name: player.name().to_string(),
            stack: player.stack(),
            street_bet: player.street_bet(),
            active: player.is_active(),
            all_in: player.is_all_in(),
            hole: (reveal && player.is_active() && !player.hole_cards().is_empty())
                .then(|| player.hole_cards().to_vec()),
        }
    }
}

/// Read-only table state handed to a transport layer after each phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: Phase,
    pub street: Street,
    pub dealer: usize,
    pub board: Vec<Card>,
    pub pot_total: u64,
    pub current_bet: u32,
    pub to_act: Option<usize>,
    pub players: Vec<PlayerView>,
}

impl TableSnapshot {
    pub fn player(&self, seat: usize) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.seat == seat)
    }
}
