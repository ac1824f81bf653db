//! A single board cell: pair value plus face state.
//!
//! Cards enforce nothing on their own beyond "only a face-down card can be
//! flipped". Every other rule (no reverse transitions, no interaction while a
//! reveal is pending) belongs to the [`TransitionAuthority`] consulted before
//! each state change, so bulk operations such as a shuffle can run the same
//! code path under a permissive authority.

use serde::{Deserialize, Serialize};

use crate::events::{StateChange, TransitionAuthority, TransitionRejected};

/// Identifier for a card on the board: its index in the deck's board order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw board index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card {}", self.0)
    }
}

/// Face state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Concealed and selectable.
    #[default]
    FaceDown,
    /// Revealed, awaiting its partner.
    FaceUp,
    /// Matched and removed from play.
    Excluded,
}

impl std::fmt::Display for CardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardState::FaceDown => "face-down",
            CardState::FaceUp => "face-up",
            CardState::Excluded => "excluded",
        };
        f.write_str(name)
    }
}

/// One cell of the board.
///
/// Created unvalued at board setup; the engine assigns a pair value and
/// forces the state back to [`CardState::FaceDown`] on every shuffle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    value: Option<u16>,
    state: CardState,
}

impl Card {
    /// Create an unvalued, face-down card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pair value, or `None` before the first shuffle.
    #[must_use]
    pub fn value(&self) -> Option<u16> {
        self.value
    }

    /// Assign the pair value. Plain assignment, no notification.
    ///
    /// Only meaningful during a shuffle; the engine never calls this while
    /// the card is revealed.
    pub fn set_value(&mut self, value: u16) {
        self.value = Some(value);
    }

    /// The current face state.
    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    /// Request a state transition.
    ///
    /// The authority is consulted first: on rejection the state is left
    /// untouched and the rejection is returned. On acceptance the state is
    /// updated and the resulting [`StateChange`] is handed back for the
    /// caller to dispatch to its observers.
    ///
    /// `id` identifies this card in the emitted notification; the card does
    /// not know its own board position.
    pub fn set_state(
        &mut self,
        id: CardId,
        new: CardState,
        authority: &dyn TransitionAuthority,
    ) -> Result<StateChange, TransitionRejected> {
        authority.may_transition(id, self.state, new)?;

        let old = std::mem::replace(&mut self.state, new);
        Ok(StateChange {
            card: id,
            from: old,
            to: new,
        })
    }

    /// A click on this card: request the face-down-to-face-up transition.
    ///
    /// Returns `None` when the card is not face-down (clicks on revealed or
    /// excluded cards are no-ops, not errors).
    pub fn flip(
        &mut self,
        id: CardId,
        authority: &dyn TransitionAuthority,
    ) -> Option<Result<StateChange, TransitionRejected>> {
        if self.state != CardState::FaceDown {
            return None;
        }
        Some(self.set_state(id, CardState::FaceUp, authority))
    }
}
