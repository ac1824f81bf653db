//! Engine error types.

use derive_more::{Display, Error};

/// Rejection of a game-construction request.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// At least one player must be registered.
    #[display("a game needs at least one player")]
    NoPlayers,
    /// More players than the table supports.
    #[display("too many players: {count} (maximum {max})")]
    TooManyPlayers {
        /// Players requested.
        count: usize,
        /// Supported maximum.
        max: usize,
    },
    /// A board needs at least one pair.
    #[display("a board needs at least one pair")]
    ZeroPairs,
}

/// Rejection of a shuffle request.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum ShuffleError {
    /// Two cards are revealed and waiting to be concealed; the board cannot
    /// be rebuilt under them. The request is rejected, not queued.
    #[display("cannot shuffle while a reveal is pending")]
    TimerActive,
}

/// Fatal engine failure.
///
/// Unlike vetoes and shuffle rejections, these are not recoverable: they
/// signal a defect in pair bookkeeping and the game session must stop
/// rather than continue with corrupted scores.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The global matched-pair counter disagrees with the per-player sum.
    #[display("score books out of balance: global {global}, player sum {summed}")]
    ScoreConsistency {
        /// The engine's global counter.
        global: u32,
        /// Sum over all players.
        summed: u32,
    },
}
