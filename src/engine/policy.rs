//! The transition policy: the engine's veto authority.
//!
//! A policy is a snapshot of the two admission flags the engine keeps:
//! whether a reveal timer is pending, and whether bypass mode is set. Bypass
//! suppresses both veto rules and exists only for engine-internal bulk
//! operations (the shuffle reset and the scheduled conceal); user clicks are
//! always checked.

use crate::cards::{CardId, CardState};
use crate::events::{TransitionAuthority, TransitionRejected};

/// Veto authority over card transitions.
///
/// Rejects a transition when:
/// - a reveal timer is active (interactions frozen), or
/// - the transition would turn a revealed or excluded card face-down,
///
/// unless bypass is set, in which case everything is admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionPolicy {
    timer_active: bool,
    bypass: bool,
}

impl TransitionPolicy {
    /// Snapshot a policy from the engine's admission flags.
    #[must_use]
    pub const fn new(timer_active: bool, bypass: bool) -> Self {
        Self {
            timer_active,
            bypass,
        }
    }
}

impl TransitionAuthority for TransitionPolicy {
    fn may_transition(
        &self,
        _card: CardId,
        from: CardState,
        to: CardState,
    ) -> Result<(), TransitionRejected> {
        if self.bypass {
            return Ok(());
        }

        if self.timer_active {
            return Err(TransitionRejected::TimerActive);
        }

        if matches!(from, CardState::FaceUp | CardState::Excluded) && to == CardState::FaceDown {
            return Err(TransitionRejected::Irreversible { from, to });
        }

        Ok(())
    }
}
