//! # matchpairs
//!
//! Rules engine for a multi-player memory-matching ("Concentration") card
//! game: a grid of face-down cards is revealed two at a time, matching pairs
//! leave play, and best scores are kept per board size.
//!
//! ## Design Principles
//!
//! 1. **Engine owns the state**: the deck, player list, turn cursor, and all
//!    counters live exclusively in [`GameEngine`]. Cards and players are pure
//!    data holders.
//!
//! 2. **One event path**: clicks, the reveal timer, and the shuffle command
//!    arrive as discrete [`GameEvent`]s and are processed to completion one
//!    at a time. The `timer_active` flag is the only admission gate.
//!
//! 3. **UI behind a seam**: windowing, layout, and dialogs are collaborator
//!    concerns behind the [`BoardSurface`] trait; the engine is fully
//!    playable headless.
//!
//! ## Modules
//!
//! - `core`: player identity, per-player storage, deterministic RNG
//! - `cards`: the card state machine and the deck
//! - `events`: input events, transition hooks, flip history
//! - `engine`: the rules engine and its transition policy
//! - `leaderboard`: best scores per board size
//! - `surface`: the collaborator contract for the UI
//! - `session`: registration, configuration, and command dispatch
//!
//! ## Example
//!
//! ```
//! use matchpairs::cards::CardId;
//! use matchpairs::engine::GameEngine;
//! use matchpairs::events::GameEvent;
//! use matchpairs::surface::NullSurface;
//!
//! let mut surface = NullSurface;
//! let mut engine = GameEngine::new(vec!["Ada".into(), "Lin".into()], 2, 7).unwrap();
//! engine.initialize(&mut surface);
//!
//! engine.handle(GameEvent::CardChosen(CardId::new(0)), &mut surface).unwrap();
//! assert_eq!(engine.total_flips(), 1);
//! ```

pub mod cards;
pub mod core;
pub mod engine;
pub mod events;
pub mod leaderboard;
pub mod session;
pub mod surface;

// Re-export commonly used types
pub use crate::core::{GameRng, Player, PlayerId, PlayerMap};

pub use crate::cards::{Card, CardId, CardState, Deck};

pub use crate::events::{
    FlipRecord, GameEvent, StateChange, StateObserver, TransitionAuthority, TransitionRejected,
};

pub use crate::engine::{
    ConfigError, EngineError, Flow, GameEngine, ShuffleError, TransitionPolicy, MAX_PLAYERS,
    REVEAL_DELAY,
};

pub use crate::leaderboard::{Leaderboard, LeaderboardEntry};

pub use crate::session::{Command, Session, SessionFlow, DEFAULT_PAIRS};

pub use crate::surface::{BoardSurface, NullSurface};
