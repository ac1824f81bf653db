//! A playable session: registration, configuration, and command dispatch.
//!
//! The engine knows nothing about dialogs; this module runs the interactive
//! parts of a session through the board surface's modal prompts. Invalid
//! configuration input is reported and re-asked here, so the engine only
//! ever sees validated values.

use tracing::warn;

use crate::cards::CardId;
use crate::engine::{ConfigError, EngineError, Flow, GameEngine, MAX_PLAYERS};
use crate::events::GameEvent;
use crate::surface::BoardSurface;

/// Board size used when the player cancels the pair-count prompt at startup.
pub const DEFAULT_PAIRS: u16 = 4;

/// A user-level command, as translated from buttons and clicks by the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// A card was clicked.
    Select(CardId),
    /// The scheduled conceal delay elapsed.
    TimerElapsed,
    /// The shuffle button.
    Shuffle,
    /// The change-pairs button: prompt for a new board size.
    ChangePairs,
    /// The leaderboard button: prompt for a size and show its best scores.
    ShowLeaderboard,
    /// The exit button: confirm before quitting.
    Exit,
}

/// What the outer loop should do after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionFlow {
    /// Keep playing.
    Continue,
    /// The round finished and was recorded; the session stays open.
    RoundComplete,
    /// The user confirmed the exit.
    Quit,
}

impl From<Flow> for SessionFlow {
    fn from(flow: Flow) -> Self {
        match flow {
            Flow::Continue => SessionFlow::Continue,
            Flow::RoundComplete => SessionFlow::RoundComplete,
        }
    }
}

/// Ask how many players are at the table, then one name each.
///
/// Re-asks until the count is in range; a cancelled count means a solo game,
/// and a cancelled or blank name falls back to `"Guest"`.
pub fn register_players(surface: &mut dyn BoardSurface) -> Vec<String> {
    let count = loop {
        match surface.prompt_integer(&format!("How many players? (1-{MAX_PLAYERS})")) {
            None => break 1,
            Some(n) if (1..=MAX_PLAYERS as i64).contains(&n) => break n as usize,
            Some(n) => {
                warn!(n, "player count out of range");
                surface.report_error(&format!(
                    "Player count must be between 1 and {MAX_PLAYERS}."
                ));
            }
        }
    };

    (1..=count)
        .map(|i| {
            match surface.prompt_string(&format!("Enter name for player {i}:")) {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                _ => "Guest".to_string(),
            }
        })
        .collect()
}

/// Ask for a board size, re-asking until it is a positive even number.
///
/// Cancelling keeps `current`. Evenness is a table-layout nicety, not an
/// engine rule; the engine accepts any size of at least one pair.
pub fn prompt_pair_count(surface: &mut dyn BoardSurface, current: u16) -> u16 {
    loop {
        match surface.prompt_integer("Enter the number of pairs (a positive even number):") {
            None => break current,
            Some(n) if n > 0 && n % 2 == 0 && n <= i64::from(u16::MAX) => break n as u16,
            Some(_) => {
                surface.report_error("Invalid input! Please enter a positive even number.");
            }
        }
    }
}

/// One game session: an engine plus the interactive command handling around
/// it.
#[derive(Clone, Debug)]
pub struct Session {
    engine: GameEngine,
}

impl Session {
    /// Register players, configure the board, and deal the first layout.
    pub fn start(surface: &mut dyn BoardSurface) -> Result<Self, ConfigError> {
        let names = register_players(surface);
        let pair_count = prompt_pair_count(surface, DEFAULT_PAIRS);

        let mut engine = GameEngine::new(names, pair_count, rand::random())?;
        engine.initialize(surface);
        Ok(Self { engine })
    }

    /// Wrap an already-configured engine (used by tests and embedders).
    #[must_use]
    pub fn with_engine(engine: GameEngine) -> Self {
        Self { engine }
    }

    /// The wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Process one user command.
    ///
    /// An `Err` is a fatal engine failure; the caller must end the session.
    pub fn dispatch(
        &mut self,
        command: Command,
        surface: &mut dyn BoardSurface,
    ) -> Result<SessionFlow, EngineError> {
        match command {
            Command::Select(id) => {
                Ok(self.engine.handle(GameEvent::CardChosen(id), surface)?.into())
            }
            Command::TimerElapsed => {
                Ok(self.engine.handle(GameEvent::RevealTimerElapsed, surface)?.into())
            }
            Command::Shuffle => {
                Ok(self.engine.handle(GameEvent::ShuffleRequested, surface)?.into())
            }
            Command::ChangePairs => {
                self.change_pairs(surface);
                Ok(SessionFlow::Continue)
            }
            Command::ShowLeaderboard => {
                self.show_leaderboard(surface);
                Ok(SessionFlow::Continue)
            }
            Command::Exit => {
                if surface.confirm("Are you sure you want to exit?") {
                    Ok(SessionFlow::Quit)
                } else {
                    Ok(SessionFlow::Continue)
                }
            }
        }
    }

    fn change_pairs(&mut self, surface: &mut dyn BoardSurface) {
        let current = self.engine.pair_count();
        let pair_count = prompt_pair_count(surface, current);

        if pair_count != current {
            if let Err(err) = self.engine.set_pair_count(pair_count, surface) {
                surface.report_error(&err.to_string());
            }
        }
    }

    fn show_leaderboard(&self, surface: &mut dyn BoardSurface) {
        let Some(input) =
            surface.prompt_integer("Enter the board size (pairs) to view the leaderboard:")
        else {
            return;
        };

        match u16::try_from(input) {
            Ok(pair_count) if pair_count > 0 => {
                let entries = self.engine.leaderboard_for_size(pair_count);
                if entries.is_empty() {
                    surface.announce(&format!("No games recorded for {pair_count} pairs."));
                } else {
                    let lines: Vec<String> = entries.iter().map(ToString::to_string).collect();
                    surface.announce(&format!(
                        "Leaderboard for {pair_count} pairs:\n{}",
                        lines.join("\n")
                    ));
                }
            }
            _ => surface.report_error("Invalid board size entered!"),
        }
    }
}
