use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::cards::{format_cards, Card};
use crate::config::TableConfig;
use crate::deck::{CardSource, Deck};
use crate::errors::GameError;
use crate::logger::{ActionRecord, HandRecord, ShowdownInfo};
use crate::player::Player;
use crate::pot::PotManager;
use crate::rules::{self, ValidatedAction};
use crate::showdown::{self, Settlement};
use crate::snapshot::{Phase, PlayerView, TableSnapshot};

const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Represents a betting street in Texas Hold'em poker.
/// `Showdown` is terminal and has no betting.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
    /// Remaining hands revealed and compared
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Community cards dealt when this street opens.
    pub fn community_cards(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

/// Betting state machine for one table, one hand at a time.
///
/// The engine owns the seated players for its lifetime and refers to them
/// by seat index; it never adds or removes seats. Each hand runs
/// [`start_hand`](Engine::start_hand), then one [`submit`](Engine::submit)
/// per turn until [`is_hand_complete`](Engine::is_hand_complete).
///
/// # Examples
///
/// ```
/// use holdem_engine::action::Action;
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::engine::Engine;
/// use holdem_engine::player::Player;
///
/// let players = vec![Player::new(0, "alice", 1000), Player::new(1, "bob", 1000)];
/// let mut engine = Engine::new(TableConfig::with_blinds(5, 10), players, 0);
/// engine.start_hand().unwrap();
///
/// // Heads-up: seat 1 posted the small blind and acts first
/// let seat = engine.to_act().unwrap();
/// engine.submit(seat, Action::fold()).unwrap();
///
/// assert!(engine.is_hand_complete());
/// assert_eq!(engine.players()[0].stack(), 1005);
/// ```
#[derive(Debug)]
pub struct Engine<D: CardSource = Deck> {
    config: TableConfig,
    deck: D,
    /// Seed behind `deck`, when known
    seed: Option<u64>,
    players: Vec<Player>,
    dealer: usize,
    street: Street,
    phase: Phase,
    in_hand: bool,
    /// Street total every player has to match
    current_bet: u32,
    to_act: Option<usize>,
    /// Seats that still owe a decision on this street
    needs_action: Vec<bool>,
    board: Vec<Card>,
    pots: PotManager,
    revealed: bool,
    actions: Vec<ActionRecord>,
    snapshots: Vec<TableSnapshot>,
    settlement: Option<Settlement>,
}

impl Engine<Deck> {
    /// Engine dealing from a deck shuffled with `config.seed`.
    pub fn new(config: TableConfig, players: Vec<Player>, dealer: usize) -> Self {
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        let mut engine = Self::with_deck(config, players, dealer, Deck::new_with_seed(seed));
        engine.seed = Some(seed);
        engine
    }

    /// Seats one player per name with the configured starting stack.
    pub fn with_names(config: TableConfig, names: &[&str]) -> Self {
        let players = names
            .iter()
            .enumerate()
            .map(|(id, name)| Player::new(id, *name, config.starting_stack))
            .collect();
        Self::new(config, players, 0)
    }
}

impl<D: CardSource> Engine<D> {
    pub fn with_deck(config: TableConfig, players: Vec<Player>, dealer: usize, deck: D) -> Self {
        let dealer = if players.is_empty() {
            0
        } else {
            dealer % players.len()
        };
        let seats = players.len();
        Self {
            seed: config.seed,
            config,
            deck,
            players,
            dealer,
            street: Street::Preflop,
            phase: Phase::Settled,
            in_hand: false,
            current_bet: 0,
            to_act: None,
            needs_action: vec![false; seats],
            board: Vec::with_capacity(5),
            pots: PotManager::new(),
            revealed: false,
            actions: Vec::new(),
            snapshots: Vec::new(),
            settlement: None,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    /// Seat whose decision is awaited, if betting is open.
    pub fn to_act(&self) -> Option<usize> {
        self.to_act
    }
    pub fn pots(&self) -> &PotManager {
        &self.pots
    }
    pub fn pot_total(&self) -> u64 {
        self.pots.total()
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn is_in_progress(&self) -> bool {
        self.in_hand
    }
    pub fn is_hand_complete(&self) -> bool {
        !self.in_hand && self.settlement.is_some()
    }

    /// Chips `seat` must put in to call, capped by their stack.
    pub fn to_call(&self, seat: usize) -> u32 {
        self.players.get(seat).map_or(0, |p| {
            self.current_bet.saturating_sub(p.street_bet()).min(p.stack())
        })
    }

    /// Smallest bet or raise `seat` may make short of moving all in.
    pub fn min_raise(&self, seat: usize) -> u32 {
        self.players.get(seat).map_or(0, |p| {
            let owed = self.current_bet.saturating_sub(p.street_bet());
            self.current_bet.max(owed.saturating_add(1))
        })
    }

    /// Moves the button to the next seat with chips. Only between hands.
    pub fn rotate_dealer(&mut self) -> Result<(), GameError> {
        if self.in_hand {
            return Err(GameError::HandInProgress);
        }
        if let Some(next) = rules::next_seat(&self.players, self.dealer, |p| p.stack() > 0) {
            self.dealer = next;
        }
        Ok(())
    }

    /// Resets the table for a new hand, posts blinds and deals hole cards.
    ///
    /// Players without chips sit the hand out. On return the first player
    /// left of the big blind is to act, unless blinds already put everyone
    /// all in, in which case the board is run out and the hand settled.
    /// A table holding more chips than one stack can carry is refused with
    /// [`GameError::ChipOverflow`].
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if self.in_hand {
            return Err(GameError::HandInProgress);
        }
        // every chip at the table must fit in the stack of whoever wins it
        let total: u64 = self.players.iter().map(|p| u64::from(p.stack())).sum();
        if total > u64::from(u32::MAX) {
            return Err(GameError::ChipOverflow { total });
        }
        for p in &mut self.players {
            p.reset_for_hand();
        }
        let seated = self.players.iter().filter(|p| p.is_active()).count();
        let (sb, bb) = rules::blind_seats(&self.players, self.dealer)
            .ok_or(GameError::NotEnoughPlayers { seated })?;

        self.deck.reset();
        self.board.clear();
        self.pots = PotManager::new();
        self.actions.clear();
        self.snapshots.clear();
        self.settlement = None;
        self.revealed = false;
        self.street = Street::Preflop;
        self.current_bet = 0;
        self.to_act = None;
        self.needs_action = vec![false; self.players.len()];
        self.in_hand = true;
        info!(dealer = self.dealer, sb, bb, seated, "starting hand");

        self.post_blind(sb, self.config.small_blind)?;
        self.post_blind(bb, self.config.big_blind)?;
        // a short big blind only prices the hand at what it actually posted
        self.current_bet = self.players[sb].street_bet().max(self.players[bb].street_bet());
        self.record(Phase::BlindsPosted);

        if let Err(e) = self.deal_hole_cards(sb) {
            return Err(self.abort(e));
        }
        self.record(Phase::HoleCardsDealt);

        self.open_betting();
        self.progress(bb)
    }

    /// Applies `action` for `seat` and advances the hand.
    ///
    /// A rejected action leaves every player, the pot and the turn as they
    /// were; the error names the violated constraint so the caller can
    /// re-prompt or force a fold.
    pub fn submit(&mut self, seat: usize, action: Action) -> Result<(), GameError> {
        if !self.in_hand {
            return Err(if self.settlement.is_some() {
                GameError::HandAlreadyComplete
            } else {
                GameError::NoHandInProgress
            });
        }
        let player = self.players.get(seat).ok_or(GameError::NoSuchSeat { seat })?;
        if !player.is_active() {
            return Err(GameError::PlayerAlreadyFolded);
        }
        let expected = self.to_act.ok_or(GameError::NoHandInProgress)?;
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }
        let validated =
            rules::validate_action(player.stack(), player.street_bet(), self.current_bet, &action)?;

        self.apply(seat, &validated)?;
        self.actions.push(ActionRecord {
            player_id: seat,
            street: self.street,
            action,
        });
        self.progress(seat)
    }

    /// Current table state. Hole cards are shown only after showdown.
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            phase: self.phase,
            street: self.street,
            dealer: self.dealer,
            board: self.board.clone(),
            pot_total: self.pots.total(),
            current_bet: self.current_bet,
            to_act: self.to_act,
            players: self
                .players
                .iter()
                .enumerate()
                .map(|(seat, p)| PlayerView::of(seat, p, self.revealed))
                .collect(),
        }
    }

    /// Snapshots taken at each phase transition of the current hand.
    pub fn snapshots(&self) -> &[TableSnapshot] {
        &self.snapshots
    }

    /// Hands the recorded snapshots over, e.g. to a broadcaster.
    pub fn drain_snapshots(&mut self) -> Vec<TableSnapshot> {
        std::mem::take(&mut self.snapshots)
    }

    /// History entry for the finished hand.
    pub fn hand_record(&self, hand_id: impl Into<String>) -> Option<HandRecord> {
        let settlement = self.settlement.as_ref()?;
        let result = settlement
            .payouts
            .iter()
            .map(|p| format!("{} wins {}", self.players[p.seat].name(), p.amount))
            .collect::<Vec<_>>()
            .join(", ");
        let showdown = settlement.went_to_showdown().then(|| ShowdownInfo {
            winners: settlement.winners.clone(),
            notes: settlement
                .hands
                .iter()
                .find(|h| settlement.winners.first() == Some(&h.seat))
                .map(|h| h.hand.to_string()),
        });
        let paid: u64 = settlement.payouts.iter().map(|p| p.amount).sum();
        Some(HandRecord {
            hand_id: hand_id.into(),
            seed: self.seed,
            actions: self.actions.clone(),
            board: self.board.clone(),
            result: Some(result),
            ts: None,
            meta: Some(serde_json::json!({
                "dealer": self.dealer,
                "small_blind": self.config.small_blind,
                "big_blind": self.config.big_blind,
                "pot": paid,
            })),
            showdown,
        })
    }

    fn post_blind(&mut self, seat: usize, blind: u32) -> Result<(), GameError> {
        let amount = blind.min(self.players[seat].stack());
        self.players[seat].bet(amount)?;
        self.pots.add_bet(seat, amount);
        self.actions.push(ActionRecord {
            player_id: seat,
            street: Street::Preflop,
            action: Action::bet(amount),
        });
        debug!(seat, amount, "blind posted");
        Ok(())
    }

    fn deal_hole_cards(&mut self, first: usize) -> Result<(), GameError> {
        let n = self.players.len();
        for _ in 0..2 {
            for i in 0..n {
                let seat = (first + i) % n;
                if self.players[seat].is_active() {
                    let c = self.deck.draw()?;
                    self.players[seat].give_card(c)?;
                }
            }
        }
        debug!(remaining = self.deck.remaining(), "hole cards dealt");
        Ok(())
    }

    fn apply(&mut self, seat: usize, action: &ValidatedAction) -> Result<(), GameError> {
        match *action {
            ValidatedAction::Fold => {
                self.players[seat].fold();
                info!(seat, street = ?self.street, "player folded");
            }
            ValidatedAction::Check => debug!(seat, "check"),
            ValidatedAction::Call(n)
            | ValidatedAction::Bet(n)
            | ValidatedAction::Raise(n)
            | ValidatedAction::AllIn(n) => {
                self.players[seat].bet(n)?;
                self.pots.add_bet(seat, n);
                let total = self.players[seat].street_bet();
                if total > self.current_bet {
                    self.current_bet = total;
                    // a raise reopens the action for everyone else
                    for (i, p) in self.players.iter().enumerate() {
                        if i != seat && p.can_act() {
                            self.needs_action[i] = true;
                        }
                    }
                }
                debug!(seat, chips = n, street_bet = total, action = ?action, "chips in");
            }
        }
        self.needs_action[seat] = false;
        Ok(())
    }

    /// Flags who owes a decision on a freshly opened street. With fewer
    /// than two players able to bet, only an unmatched bet needs answering.
    fn open_betting(&mut self) {
        let can_act = self.players.iter().filter(|p| p.can_act()).count();
        let current_bet = self.current_bet;
        for (needs, p) in self.needs_action.iter_mut().zip(&self.players) {
            *needs = p.can_act() && (can_act >= 2 || p.street_bet() < current_bet);
        }
    }

    fn next_to_act(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|&seat| self.needs_action[seat] && self.players[seat].can_act())
    }

    /// Hands the turn on, or closes the street and deals the next one until
    /// somebody has to act or the hand is settled.
    fn progress(&mut self, mut from: usize) -> Result<(), GameError> {
        loop {
            let live = rules::active_seats(&self.players);
            if live.len() < 2 {
                return self.finish_uncontested(live.first().copied());
            }
            if let Some(seat) = self.next_to_act(from) {
                self.to_act = Some(seat);
                return Ok(());
            }
            self.to_act = None;
            self.record(Phase::StreetComplete(self.street));
            if self.street == Street::River {
                return self.showdown();
            }
            if let Err(e) = self.deal_street() {
                return Err(self.abort(e));
            }
            self.open_betting();
            from = self.dealer;
        }
    }

    fn deal_street(&mut self) -> Result<(), GameError> {
        self.street = self.street.next();
        for p in &mut self.players {
            p.clear_street();
        }
        self.current_bet = 0;
        if self.config.burn_cards {
            self.deck.burn()?;
        }
        for _ in 0..self.street.community_cards() {
            let c = self.deck.draw()?;
            self.board.push(c);
        }
        info!(street = ?self.street, board = %format_cards(&self.board), "street dealt");
        self.record(Phase::StreetDealt(self.street));
        Ok(())
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        self.street = Street::Showdown;
        self.revealed = true;
        self.record(Phase::Showdown);
        match showdown::settle(&mut self.pots, &mut self.players, &self.board, self.dealer) {
            Ok(settlement) => self.finish(settlement),
            Err(e) => Err(self.abort(e)),
        }
    }

    fn finish_uncontested(&mut self, survivor: Option<usize>) -> Result<(), GameError> {
        let result = match survivor {
            Some(seat) => {
                showdown::award_uncontested(&mut self.pots, &mut self.players, seat, self.dealer)
            }
            None => Err(GameError::NoActivePlayers),
        };
        match result {
            Ok(settlement) => self.finish(settlement),
            Err(e) => Err(self.abort(e)),
        }
    }

    fn finish(&mut self, settlement: Settlement) -> Result<(), GameError> {
        info!(
            payouts = ?settlement.payouts,
            board = %format_cards(&self.board),
            "hand complete"
        );
        self.in_hand = false;
        self.to_act = None;
        self.needs_action.iter_mut().for_each(|n| *n = false);
        self.settlement = Some(settlement);
        self.record(Phase::Settled);
        Ok(())
    }

    /// Stops the hand and returns every wager to its owner.
    fn abort(&mut self, err: GameError) -> GameError {
        warn!(error = %err, street = ?self.street, "aborting hand");
        for p in &mut self.players {
            p.refund();
        }
        self.pots = PotManager::new();
        self.in_hand = false;
        self.to_act = None;
        self.needs_action.iter_mut().for_each(|n| *n = false);
        err
    }

    fn record(&mut self, phase: Phase) {
        self.phase = phase;
        let snap = self.snapshot();
        self.snapshots.push(snap);
    }
}
