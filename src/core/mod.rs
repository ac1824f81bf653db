//! Core types: players, per-player storage, deterministic RNG.
//!
//! This module contains the building blocks the rules engine is assembled
//! from. Nothing here knows about cards or turn order; that lives in
//! `cards` and `engine`.

pub mod player;
pub mod rng;

pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
