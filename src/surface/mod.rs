//! The board surface: everything the engine asks of the outside world.
//!
//! Window construction, widgets, layout math, and rendering are collaborator
//! concerns. The engine talks to them through [`BoardSurface`]: display
//! updaters, modal prompts, error reporting, and scheduling of the conceal
//! callback. A surface is also the engine's [`StateObserver`], so it hears
//! about every committed card transition and can repaint.
//!
//! [`NullSurface`] is the headless implementation used by tests and doctests.

use std::time::Duration;

use crate::events::{StateChange, StateObserver};

/// Collaborator contract between the engine and the UI.
///
/// Prompt methods return `None` when the user cancels. Implementations must
/// deliver a [`GameEvent::RevealTimerElapsed`](crate::events::GameEvent)
/// back to the engine once per [`BoardSurface::schedule_conceal`] call, after
/// the given delay; the engine never cancels a scheduled conceal.
pub trait BoardSurface: StateObserver {
    /// Update the window title.
    fn set_title(&mut self, text: &str);

    /// Update the matched-pairs display.
    fn set_matched_pairs_text(&mut self, text: &str);

    /// Update the total-flips display.
    fn set_total_flips_text(&mut self, text: &str);

    /// Arrange for the reveal timer to fire after `delay`.
    fn schedule_conceal(&mut self, delay: Duration);

    /// Show a modal message.
    fn announce(&mut self, text: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str) -> bool;

    /// Prompt for an integer; `None` on cancel.
    fn prompt_integer(&mut self, question: &str) -> Option<i64>;

    /// Prompt for a line of text; `None` on cancel.
    fn prompt_string(&mut self, question: &str) -> Option<String>;

    /// Report a rejected operation or invalid input.
    fn report_error(&mut self, text: &str);
}

/// A surface that discards all output.
///
/// Confirms everything and cancels every prompt. Handy for driving the
/// engine without a UI:
///
/// ```
/// use matchpairs::engine::GameEngine;
/// use matchpairs::surface::NullSurface;
///
/// let mut surface = NullSurface;
/// let mut engine = GameEngine::new(vec!["Solo".into()], 4, 42).unwrap();
/// engine.initialize(&mut surface);
/// assert_eq!(engine.pair_count(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl StateObserver for NullSurface {
    fn on_state_changed(&mut self, _change: StateChange) {}
}

impl BoardSurface for NullSurface {
    fn set_title(&mut self, _text: &str) {}

    fn set_matched_pairs_text(&mut self, _text: &str) {}

    fn set_total_flips_text(&mut self, _text: &str) {}

    fn schedule_conceal(&mut self, _delay: Duration) {}

    fn announce(&mut self, _text: &str) {}

    fn confirm(&mut self, _question: &str) -> bool {
        true
    }

    fn prompt_integer(&mut self, _question: &str) -> Option<i64> {
        None
    }

    fn prompt_string(&mut self, _question: &str) -> Option<String> {
        None
    }

    fn report_error(&mut self, _text: &str) {}
}
