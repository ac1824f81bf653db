//! Event-driven seams: input events, transition hooks, flip history.
//!
//! ## Key Types
//!
//! - `GameEvent`: discrete external inputs (card click, timer, shuffle)
//! - `StateChange`: committed transition notification
//! - `TransitionAuthority` / `StateObserver`: the two typed hooks
//! - `TransitionRejected`: recoverable refusal of a transition
//! - `FlipRecord`: history entry for accepted flips

pub mod event;
pub mod hooks;

pub use event::{FlipRecord, GameEvent};
pub use hooks::{StateChange, StateObserver, TransitionAuthority, TransitionRejected};
