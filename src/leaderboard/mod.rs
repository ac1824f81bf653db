//! Best-score records, bucketed by board size.
//!
//! Entries are appended when a game completes and never removed; each bucket
//! is kept sorted ascending by flips so the best score is first. Storage is
//! in-memory for the life of the process.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One finished game: the winner's name and flip count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    player_name: String,
    flips: u32,
}

impl LeaderboardEntry {
    /// Create an entry.
    pub fn new(player_name: impl Into<String>, flips: u32) -> Self {
        Self {
            player_name: player_name.into(),
            flips,
        }
    }

    /// The winner's name.
    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Flips the winner needed to finish the game.
    #[must_use]
    pub fn flips(&self) -> u32 {
        self.flips
    }
}

impl std::fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} flips", self.player_name, self.flips)
    }
}

/// Best scores per board size, keyed by pair count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    buckets: FxHashMap<u16, Vec<LeaderboardEntry>>,
}

impl Leaderboard {
    /// Create an empty leaderboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished game for the given board size.
    ///
    /// The bucket is re-sorted ascending by flips; earlier entries win ties,
    /// so a newly tied score ranks behind the score that got there first.
    pub fn record(&mut self, pair_count: u16, entry: LeaderboardEntry) {
        let bucket = self.buckets.entry(pair_count).or_default();
        bucket.push(entry);
        bucket.sort_by_key(LeaderboardEntry::flips);
    }

    /// The sorted entries for a board size.
    ///
    /// Returns an empty slice when no game of that size has been recorded;
    /// lookup never fails.
    #[must_use]
    pub fn for_size(&self, pair_count: u16) -> &[LeaderboardEntry] {
        self.buckets
            .get(&pair_count)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
