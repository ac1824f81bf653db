//! The deck: the full card sequence for one board, in board order.
//!
//! A deck is a fixed-length sequence of 2 x pair_count cards. The engine owns
//! it exclusively; layout math and rendering live behind the board surface.

use serde::{Deserialize, Serialize};

use crate::events::{StateChange, TransitionAuthority, TransitionRejected};

use super::card::{Card, CardId, CardState};

/// The full card sequence for one board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    pair_count: u16,
}

impl Deck {
    /// Create a deck of `2 * pair_count` unvalued, face-down cards.
    #[must_use]
    pub fn new(pair_count: u16) -> Self {
        Self {
            cards: (0..pair_count as usize * 2).map(|_| Card::new()).collect(),
            pair_count,
        }
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> u16 {
        self.pair_count
    }

    /// Number of cards on the board (always `2 * pair_count`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for the degenerate zero-pair board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Iterate over all card IDs in board order.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> {
        (0..self.cards.len() as u16).map(CardId)
    }

    /// Iterate over (CardId, &Card) pairs in board order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, c)| (CardId(i as u16), c))
    }

    /// Count cards currently in the given state.
    #[must_use]
    pub fn count_in_state(&self, state: CardState) -> usize {
        self.cards.iter().filter(|c| c.state() == state).count()
    }

    /// Assign a pair value to one card. See [`Card::set_value`].
    ///
    /// Out-of-range IDs are ignored; the engine only hands out IDs it got
    /// from [`Deck::card_ids`].
    pub fn set_value(&mut self, id: CardId, value: u16) {
        if let Some(card) = self.cards.get_mut(id.index()) {
            card.set_value(value);
        }
    }

    /// Request a state transition on one card. See [`Card::set_state`].
    pub fn set_state(
        &mut self,
        id: CardId,
        new: CardState,
        authority: &dyn TransitionAuthority,
    ) -> Result<StateChange, TransitionRejected> {
        match self.cards.get_mut(id.index()) {
            Some(card) => card.set_state(id, new, authority),
            None => Err(TransitionRejected::UnknownCard),
        }
    }

    /// A click on one card. See [`Card::flip`].
    pub fn flip(
        &mut self,
        id: CardId,
        authority: &dyn TransitionAuthority,
    ) -> Option<Result<StateChange, TransitionRejected>> {
        self.cards.get_mut(id.index())?.flip(id, authority)
    }
}
