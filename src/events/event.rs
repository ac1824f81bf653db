//! Input events for the dispatch loop, and the flip history record.
//!
//! All state transitions happen on one logical event path: the surface turns
//! clicks, the elapsed reveal timer, and the shuffle command into
//! [`GameEvent`] values and feeds them to the engine one at a time.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::PlayerId;

/// A discrete external event for the engine to process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The user selected a card.
    CardChosen(CardId),
    /// The scheduled conceal delay elapsed.
    RevealTimerElapsed,
    /// The user asked for a fresh board.
    ShuffleRequested,
}

/// One accepted flip, for replay and debugging.
///
/// Appended to the engine's history for every flip that survives admission
/// control; cleared on shuffle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipRecord {
    /// The player who flipped.
    pub player: PlayerId,
    /// The card that was revealed.
    pub card: CardId,
    /// The card's pair value at the time of the flip.
    pub value: u16,
    /// Position in the flip sequence since the last shuffle (starts at 1).
    pub sequence: u32,
}
