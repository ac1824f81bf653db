//! The rules engine: flip legality, pair scoring, turn rotation, completion.
//!
//! ## Event model
//!
//! All state transitions happen on one logical event path. The surface feeds
//! discrete [`GameEvent`]s to [`GameEngine::handle`]; the engine validates
//! each against its [`TransitionPolicy`], commands card transitions, reacts
//! to the committed changes, and pushes display updates back out.
//!
//! ## Admission control
//!
//! `timer_active` is the sole gate: from the moment a mismatched second card
//! is revealed until the scheduled conceal fires, every selection is ignored
//! and every card transition is vetoed. The conceal is never cancelled; a
//! shuffle requested while it is pending is rejected, not queued.
//!
//! ## Bypass mode
//!
//! `bypass_veto` suppresses both veto rules (no reverse transitions, no
//! transitions during the timer) for engine-internal bulk operations only:
//! the shuffle reset and the scheduled conceal. User clicks are always
//! checked.

use std::time::Duration;

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, error, info, warn};

use crate::cards::{Card, CardId, CardState, Deck};
use crate::core::{GameRng, Player, PlayerId, PlayerMap};
use crate::events::{FlipRecord, GameEvent, StateObserver};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::surface::BoardSurface;

use super::error::{ConfigError, EngineError, ShuffleError};
use super::policy::TransitionPolicy;

/// How long a mismatched pair stays revealed before the scheduled conceal.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Most players a table supports.
pub const MAX_PLAYERS: usize = 8;

/// What the event loop should do after an event is processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep playing.
    Continue,
    /// Every pair is matched; the round has been adjudicated and recorded.
    /// The board stays on screen until the next shuffle.
    RoundComplete,
}

/// The two revealed cards waiting for the conceal timer, in selection order.
#[derive(Clone, Debug)]
struct PendingConceal {
    cards: SmallVec<[CardId; 2]>,
}

/// The card-flip rules engine.
///
/// Owns the deck, the player list, the turn cursor, all score counters, and
/// the leaderboard. Construct with [`GameEngine::new`], then call
/// [`GameEngine::initialize`] once to deal the first board.
#[derive(Clone, Debug)]
pub struct GameEngine {
    deck: Deck,
    players: PlayerMap<Player>,
    current: PlayerId,
    matched_pairs: u32,
    total_flips: u32,
    sequence: u32,
    first_selected: Option<CardId>,
    pending_conceal: Option<PendingConceal>,
    timer_active: bool,
    bypass_veto: bool,
    rng: GameRng,
    history: Vector<FlipRecord>,
    leaderboard: Leaderboard,
}

impl GameEngine {
    /// Create an engine for the given players and board size.
    ///
    /// The deck starts unvalued; call [`GameEngine::initialize`] to deal.
    pub fn new(names: Vec<String>, pair_count: u16, seed: u64) -> Result<Self, ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        if names.len() > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                count: names.len(),
                max: MAX_PLAYERS,
            });
        }
        if pair_count == 0 {
            return Err(ConfigError::ZeroPairs);
        }

        let players = PlayerMap::new(names.len(), |p| Player::new(names[p.index()].clone()));

        Ok(Self {
            deck: Deck::new(pair_count),
            players,
            current: PlayerId::new(0),
            matched_pairs: 0,
            total_flips: 0,
            sequence: 0,
            first_selected: None,
            pending_conceal: None,
            timer_active: false,
            bypass_veto: false,
            rng: GameRng::new(seed),
            history: Vector::new(),
            leaderboard: Leaderboard::new(),
        })
    }

    /// Deal the first board and populate the displays.
    pub fn initialize(&mut self, surface: &mut dyn BoardSurface) {
        // No timer can be pending before the first deal.
        if let Err(err) = self.shuffle(surface) {
            error!(%err, "initial shuffle rejected");
        }
    }

    /// Process one external event.
    ///
    /// Recoverable problems (vetoed flips, rejected shuffles) are handled
    /// internally; an `Err` from this method is a fatal bookkeeping defect
    /// and the session must stop.
    pub fn handle(
        &mut self,
        event: GameEvent,
        surface: &mut dyn BoardSurface,
    ) -> Result<Flow, EngineError> {
        match event {
            GameEvent::CardChosen(id) => self.select(id, surface),
            GameEvent::RevealTimerElapsed => self.conceal_revealed(surface),
            GameEvent::ShuffleRequested => {
                if let Err(err) = self.shuffle(surface) {
                    warn!(%err, "shuffle rejected");
                    surface.report_error(&err.to_string());
                }
                Ok(Flow::Continue)
            }
        }
    }

    /// Deal a fresh board: zero every counter, rotate back to the first
    /// player, assign a uniformly shuffled value layout, and conceal all
    /// cards under bypass.
    ///
    /// Rejected while a reveal is pending; the pending conceal always fires
    /// and is never silently replaced by a new board.
    pub fn shuffle(&mut self, surface: &mut dyn BoardSurface) -> Result<(), ShuffleError> {
        if self.timer_active {
            return Err(ShuffleError::TimerActive);
        }

        self.matched_pairs = 0;
        self.total_flips = 0;
        self.sequence = 0;
        for (_, player) in self.players.iter_mut() {
            player.reset();
        }
        self.current = PlayerId::new(0);
        self.history = Vector::new();

        // Each pair identifier 1..=N exactly twice, uniformly permuted.
        let mut values: Vec<u16> = (1..=self.deck.pair_count()).flat_map(|v| [v, v]).collect();
        self.rng.shuffle(&mut values);
        debug!(
            seed = self.rng.seed(),
            pairs = self.deck.pair_count(),
            "dealing fresh board"
        );

        self.bypass_veto = true;
        let policy = self.policy();
        for (id, value) in self.deck.card_ids().zip(values) {
            self.deck.set_value(id, value);
            match self.deck.set_state(id, CardState::FaceDown, &policy) {
                Ok(change) => surface.on_state_changed(change),
                Err(rejected) => error!(card = %id, %rejected, "reset unexpectedly vetoed"),
            }
        }
        self.bypass_veto = false;

        self.first_selected = None;
        self.pending_conceal = None;
        self.timer_active = false;
        self.refresh_score_displays(surface);

        Ok(())
    }

    /// Replace the board with one of a different size and deal it.
    ///
    /// Same admission rule as [`GameEngine::shuffle`].
    ///
    /// ## Panics
    ///
    /// Panics on a zero pair count; interactive callers validate first.
    pub fn set_pair_count(
        &mut self,
        pair_count: u16,
        surface: &mut dyn BoardSurface,
    ) -> Result<(), ShuffleError> {
        assert!(pair_count > 0, "A board needs at least 1 pair");

        if self.timer_active {
            return Err(ShuffleError::TimerActive);
        }
        self.deck = Deck::new(pair_count);
        self.shuffle(surface)
    }

    /// Advance the turn cursor to the next player at the table.
    pub fn next_player(&mut self) {
        self.current = self.current.next(self.players.player_count());
    }

    // === Event handling ===

    /// A card was selected. Flip it if admissible, then treat the committed
    /// reveal as the selection.
    fn select(
        &mut self,
        id: CardId,
        surface: &mut dyn BoardSurface,
    ) -> Result<Flow, EngineError> {
        let policy = self.policy();
        match self.deck.flip(id, &policy) {
            // Unknown card, or a click on a revealed/excluded card: no-op.
            None => Ok(Flow::Continue),
            Some(Err(rejected)) => {
                debug!(card = %id, %rejected, "flip vetoed");
                Ok(Flow::Continue)
            }
            Some(Ok(change)) => {
                surface.on_state_changed(change);
                self.on_card_revealed(id, surface)
            }
        }
    }

    /// React to a committed face-up transition: count the flip, then either
    /// hold the card as the pending selection or resolve it against the one
    /// already pending.
    fn on_card_revealed(
        &mut self,
        id: CardId,
        surface: &mut dyn BoardSurface,
    ) -> Result<Flow, EngineError> {
        // The veto already froze interactions; this re-check also covers a
        // surface that delivers stale notifications.
        if self.timer_active || self.deck.get(id).map(Card::state) != Some(CardState::FaceUp) {
            return Ok(Flow::Continue);
        }

        self.players[self.current].record_flip();
        self.total_flips += 1;
        self.sequence += 1;
        let value = self.deck.get(id).and_then(Card::value).unwrap_or(0);
        self.history.push_back(FlipRecord {
            player: self.current,
            card: id,
            value,
            sequence: self.sequence,
        });
        self.refresh_score_displays(surface);

        match self.first_selected.take() {
            None => {
                self.first_selected = Some(id);
                Ok(Flow::Continue)
            }
            Some(first) => {
                let first_value = self.deck.get(first).and_then(Card::value);
                let second_value = self.deck.get(id).and_then(Card::value);

                if first_value.is_some() && first_value == second_value {
                    self.resolve_match(first, id, surface)
                } else {
                    self.begin_conceal(first, id, surface);
                    Ok(Flow::Continue)
                }
            }
        }
    }

    /// A pair was claimed: score it, exclude both cards, and check the books
    /// and the board.
    fn resolve_match(
        &mut self,
        first: CardId,
        second: CardId,
        surface: &mut dyn BoardSurface,
    ) -> Result<Flow, EngineError> {
        self.matched_pairs += 1;
        self.players[self.current].record_match();
        self.refresh_score_displays(surface);

        let policy = self.policy();
        for id in [first, second] {
            match self.deck.set_state(id, CardState::Excluded, &policy) {
                Ok(change) => surface.on_state_changed(change),
                Err(rejected) => error!(card = %id, %rejected, "exclusion unexpectedly vetoed"),
            }
        }

        self.verify_consistency()?;

        if self.matched_pairs == u32::from(self.deck.pair_count()) {
            self.complete_round(surface)?;
            return Ok(Flow::RoundComplete);
        }
        Ok(Flow::Continue)
    }

    /// Two mismatched cards are revealed: freeze interactions and ask the
    /// surface to call back after [`REVEAL_DELAY`].
    fn begin_conceal(&mut self, first: CardId, second: CardId, surface: &mut dyn BoardSurface) {
        self.timer_active = true;
        self.pending_conceal = Some(PendingConceal {
            cards: SmallVec::from_buf([first, second]),
        });
        surface.schedule_conceal(REVEAL_DELAY);
    }

    /// The reveal timer elapsed: conceal the mismatched pair under bypass,
    /// pass the turn, and lift the freeze. Runs to completion before any
    /// further selection is accepted.
    fn conceal_revealed(&mut self, surface: &mut dyn BoardSurface) -> Result<Flow, EngineError> {
        let Some(pending) = self.pending_conceal.take() else {
            warn!("reveal timer fired with nothing to conceal");
            return Ok(Flow::Continue);
        };

        self.bypass_veto = true;
        let policy = self.policy();
        for id in pending.cards {
            match self.deck.set_state(id, CardState::FaceDown, &policy) {
                Ok(change) => surface.on_state_changed(change),
                Err(rejected) => error!(card = %id, %rejected, "conceal unexpectedly vetoed"),
            }
        }
        self.bypass_veto = false;

        self.first_selected = None;
        self.next_player();
        self.refresh_score_displays(surface);
        self.timer_active = false;

        Ok(Flow::Continue)
    }

    // === Adjudication ===

    /// The global counter and the per-player books must agree after every
    /// pair resolution. Disagreement is a defect, not a game state.
    fn verify_consistency(&self) -> Result<(), EngineError> {
        let summed: u32 = self.players.iter().map(|(_, p)| p.matched_pairs()).sum();
        if summed != self.matched_pairs {
            error!(
                global = self.matched_pairs,
                summed, "matched-pair books out of balance"
            );
            return Err(EngineError::ScoreConsistency {
                global: self.matched_pairs,
                summed,
            });
        }
        Ok(())
    }

    /// Every pair is matched: adjudicate, announce, and record the winner.
    fn complete_round(&mut self, surface: &mut dyn BoardSurface) -> Result<(), EngineError> {
        self.verify_consistency()?;

        // Greatest matched pairs wins; ties go to the fewest flips. The sort
        // is stable, so remaining ties keep registration order.
        let mut ranking: Vec<(PlayerId, &Player)> = self.players.iter().collect();
        ranking.sort_by(|(_, a), (_, b)| {
            b.matched_pairs()
                .cmp(&a.matched_pairs())
                .then(a.total_flips().cmp(&b.total_flips()))
        });
        let (_, winner) = ranking[0];

        if self.players.player_count() == 1 {
            surface.announce(&format!(
                "Congratulations {}! You matched all {} pairs in {} flips.",
                winner.name(),
                self.deck.pair_count(),
                winner.total_flips()
            ));
        } else {
            surface.announce(&format!(
                "{} wins with {} matched pairs ({} flips).",
                winner.name(),
                winner.matched_pairs(),
                winner.total_flips()
            ));
        }

        let standings: Vec<String> = ranking
            .iter()
            .enumerate()
            .map(|(i, (_, p))| {
                format!(
                    "{}. {}: {} pairs, {} flips",
                    i + 1,
                    p.name(),
                    p.matched_pairs(),
                    p.total_flips()
                )
            })
            .collect();
        surface.announce(&format!("Final standings:\n{}", standings.join("\n")));

        info!(
            winner = winner.name(),
            flips = winner.total_flips(),
            pairs = self.deck.pair_count(),
            "game complete"
        );
        let entry = LeaderboardEntry::new(winner.name(), winner.total_flips());
        let pair_count = self.deck.pair_count();
        self.leaderboard.record(pair_count, entry);

        Ok(())
    }

    // === Display ===

    /// Push the current player's counters (and the title, when more than one
    /// player is at the table) out to the surface.
    fn refresh_score_displays(&self, surface: &mut dyn BoardSurface) {
        let player = &self.players[self.current];
        if self.players.player_count() > 1 {
            surface.set_title(&format!("Matching Pairs: {}", player.name()));
            surface.set_matched_pairs_text(&format!(
                "Matched pairs ({}): {}",
                player.name(),
                player.matched_pairs()
            ));
            surface.set_total_flips_text(&format!(
                "Total flips ({}): {}",
                player.name(),
                player.total_flips()
            ));
        } else {
            surface.set_title("Matching Pairs");
            surface.set_matched_pairs_text(&format!("Matched pairs: {}", player.matched_pairs()));
            surface.set_total_flips_text(&format!("Total flips: {}", player.total_flips()));
        }
    }

    /// Policy snapshot of the current admission flags.
    fn policy(&self) -> TransitionPolicy {
        TransitionPolicy::new(self.timer_active, self.bypass_veto)
    }

    // === Accessors ===

    /// Number of pairs on the current board.
    #[must_use]
    pub fn pair_count(&self) -> u16 {
        self.deck.pair_count()
    }

    /// The deck, in board order.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The players, in registration (turn) order.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Pairs matched on this board, across all players.
    #[must_use]
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Flips spent on this board, across all players.
    #[must_use]
    pub fn total_flips(&self) -> u32 {
        self.total_flips
    }

    /// True while a mismatched pair is waiting to be concealed.
    #[must_use]
    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    /// The card held as the first half of a selection, if any.
    #[must_use]
    pub fn first_selected(&self) -> Option<CardId> {
        self.first_selected
    }

    /// A card's face state, or `None` for an unknown ID.
    #[must_use]
    pub fn card_state(&self, id: CardId) -> Option<CardState> {
        self.deck.get(id).map(Card::state)
    }

    /// A card's pair value, or `None` before the first deal or for an
    /// unknown ID.
    #[must_use]
    pub fn card_value(&self, id: CardId) -> Option<u16> {
        self.deck.get(id).and_then(Card::value)
    }

    /// Accepted flips since the last shuffle, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<FlipRecord> {
        &self.history
    }

    /// Best scores for a board size, ascending by flips. Empty when no game
    /// of that size has finished; never fails.
    #[must_use]
    pub fn leaderboard_for_size(&self, pair_count: u16) -> &[LeaderboardEntry] {
        self.leaderboard.for_size(pair_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::NullSurface;

    fn engine(names: &[&str], pairs: u16) -> GameEngine {
        let mut engine = GameEngine::new(
            names.iter().map(|n| n.to_string()).collect(),
            pairs,
            42,
        )
        .unwrap();
        engine.initialize(&mut NullSurface);
        engine
    }

    #[test]
    fn test_constructor_rejects_bad_config() {
        assert_eq!(
            GameEngine::new(vec![], 4, 0).unwrap_err(),
            ConfigError::NoPlayers
        );
        assert_eq!(
            GameEngine::new(vec!["A".into()], 0, 0).unwrap_err(),
            ConfigError::ZeroPairs
        );

        let names = (0..9).map(|i| format!("P{i}")).collect();
        assert_eq!(
            GameEngine::new(names, 4, 0).unwrap_err(),
            ConfigError::TooManyPlayers { count: 9, max: 8 }
        );
    }

    #[test]
    fn test_initialize_deals_a_full_board() {
        let engine = engine(&["Solo"], 3);

        assert_eq!(engine.deck().len(), 6);
        assert_eq!(engine.deck().count_in_state(CardState::FaceDown), 6);

        let mut values: Vec<u16> = engine
            .deck()
            .iter()
            .map(|(_, c)| c.value().unwrap())
            .collect();
        values.sort();
        assert_eq!(values, vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_first_selection_is_held_pending() {
        let mut engine = engine(&["Solo"], 2);
        let mut surface = NullSurface;

        let flow = engine
            .handle(GameEvent::CardChosen(CardId::new(0)), &mut surface)
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(engine.first_selected(), Some(CardId::new(0)));
        assert_eq!(engine.card_state(CardId::new(0)), Some(CardState::FaceUp));
        assert_eq!(engine.total_flips(), 1);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_clicks_on_revealed_cards_are_no_ops() {
        let mut engine = engine(&["Solo"], 2);
        let mut surface = NullSurface;

        engine
            .handle(GameEvent::CardChosen(CardId::new(0)), &mut surface)
            .unwrap();
        engine
            .handle(GameEvent::CardChosen(CardId::new(0)), &mut surface)
            .unwrap();

        // The second click neither counts a flip nor clears the selection.
        assert_eq!(engine.total_flips(), 1);
        assert_eq!(engine.first_selected(), Some(CardId::new(0)));
    }

    #[test]
    fn test_unknown_card_is_ignored() {
        let mut engine = engine(&["Solo"], 2);
        let mut surface = NullSurface;

        let flow = engine
            .handle(GameEvent::CardChosen(CardId::new(99)), &mut surface)
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(engine.total_flips(), 0);
    }

    #[test]
    fn test_shuffle_resets_counters_and_books() {
        let mut engine = engine(&["A", "B"], 2);
        let mut surface = NullSurface;

        engine
            .handle(GameEvent::CardChosen(CardId::new(0)), &mut surface)
            .unwrap();
        engine.handle(GameEvent::ShuffleRequested, &mut surface).unwrap();

        assert_eq!(engine.total_flips(), 0);
        assert_eq!(engine.matched_pairs(), 0);
        assert_eq!(engine.current_player(), PlayerId::new(0));
        assert_eq!(engine.first_selected(), None);
        assert!(engine.history().is_empty());
        assert_eq!(engine.deck().count_in_state(CardState::FaceDown), 4);
        for (_, player) in engine.players().iter() {
            assert_eq!(player.total_flips(), 0);
            assert_eq!(player.matched_pairs(), 0);
        }
    }

    #[test]
    fn test_set_pair_count_rebuilds_the_board() {
        let mut engine = engine(&["Solo"], 2);
        let mut surface = NullSurface;

        engine.set_pair_count(5, &mut surface).unwrap();

        assert_eq!(engine.pair_count(), 5);
        assert_eq!(engine.deck().len(), 10);
        assert_eq!(engine.deck().count_in_state(CardState::FaceDown), 10);
    }

    #[test]
    fn test_next_player_rotates() {
        let mut engine = engine(&["A", "B", "C"], 2);

        assert_eq!(engine.current_player(), PlayerId::new(0));
        engine.next_player();
        assert_eq!(engine.current_player(), PlayerId::new(1));
        engine.next_player();
        engine.next_player();
        assert_eq!(engine.current_player(), PlayerId::new(0));
    }

    #[test]
    fn test_leaderboard_starts_empty() {
        let engine = engine(&["Solo"], 4);
        assert!(engine.leaderboard_for_size(4).is_empty());
        assert!(engine.leaderboard_for_size(99).is_empty());
    }
}
