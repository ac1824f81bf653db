//! Typed callback seams between cards, engine, and board surface.
//!
//! The original listener pattern is two hooks: a "state will change" check
//! that may reject, and a "state changed" notification with no return. Here
//! they are plain traits; the engine's transition policy implements the
//! first, the board surface implements the second. No dynamic listener lists
//! are needed beyond this fixed pair.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardState};

/// A committed card state transition.
///
/// Produced by `Card::set_state` after the authority accepts; dispatched by
/// the engine to its observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// The card that changed.
    pub card: CardId,
    /// State before the transition.
    pub from: CardState,
    /// State after the transition.
    pub to: CardState,
}

/// Why a requested transition was refused.
///
/// Rejections are recoverable: the requested change is discarded, a
/// diagnostic is logged, and play continues.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum TransitionRejected {
    /// A reveal timer is pending; interactions are frozen.
    #[display("state change not allowed while the reveal timer is active")]
    TimerActive,
    /// Revealed and excluded cards cannot be turned back down.
    #[display("state transition {from} -> {to} not allowed")]
    Irreversible {
        /// State the card was in.
        from: CardState,
        /// State that was requested.
        to: CardState,
    },
    /// The ID does not name a card on this board.
    #[display("no such card on the board")]
    UnknownCard,
}

/// Pre-transition check: may this card move from `from` to `to`?
///
/// Consulted by [`Card::set_state`](crate::cards::Card::set_state) before
/// any state is touched. Rejecting leaves the card unchanged.
pub trait TransitionAuthority {
    /// Allow or reject the transition.
    fn may_transition(
        &self,
        card: CardId,
        from: CardState,
        to: CardState,
    ) -> Result<(), TransitionRejected>;
}

/// Post-transition notification.
///
/// The board surface implements this to repaint cells; it is told about
/// every committed transition, including bulk resets during a shuffle.
pub trait StateObserver {
    /// React to a committed transition.
    fn on_state_changed(&mut self, change: StateChange);
}
