//! Shared test fixtures: a scripted board surface and board inspection
//! helpers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use matchpairs::{BoardSurface, CardId, GameEngine, StateChange, StateObserver};

/// A board surface that records everything the engine pushes out and answers
/// prompts from pre-scripted queues.
///
/// Exhausted queues answer like a cancelling user: prompts return `None`,
/// confirmations return `false`.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    pub integer_responses: VecDeque<Option<i64>>,
    pub string_responses: VecDeque<Option<String>>,
    pub confirm_responses: VecDeque<bool>,

    pub titles: Vec<String>,
    pub matched_pairs_texts: Vec<String>,
    pub total_flips_texts: Vec<String>,
    pub scheduled: Vec<Duration>,
    pub announcements: Vec<String>,
    pub errors: Vec<String>,
    pub changes: Vec<StateChange>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_integers(mut self, responses: &[Option<i64>]) -> Self {
        self.integer_responses = responses.iter().copied().collect();
        self
    }

    pub fn with_strings(mut self, responses: &[Option<&str>]) -> Self {
        self.string_responses = responses
            .iter()
            .map(|r| r.map(ToString::to_string))
            .collect();
        self
    }

    pub fn with_confirms(mut self, responses: &[bool]) -> Self {
        self.confirm_responses = responses.iter().copied().collect();
        self
    }
}

impl StateObserver for ScriptedSurface {
    fn on_state_changed(&mut self, change: StateChange) {
        self.changes.push(change);
    }
}

impl BoardSurface for ScriptedSurface {
    fn set_title(&mut self, text: &str) {
        self.titles.push(text.to_string());
    }

    fn set_matched_pairs_text(&mut self, text: &str) {
        self.matched_pairs_texts.push(text.to_string());
    }

    fn set_total_flips_text(&mut self, text: &str) {
        self.total_flips_texts.push(text.to_string());
    }

    fn schedule_conceal(&mut self, delay: Duration) {
        self.scheduled.push(delay);
    }

    fn announce(&mut self, text: &str) {
        self.announcements.push(text.to_string());
    }

    fn confirm(&mut self, _question: &str) -> bool {
        self.confirm_responses.pop_front().unwrap_or(false)
    }

    fn prompt_integer(&mut self, _question: &str) -> Option<i64> {
        self.integer_responses.pop_front().flatten()
    }

    fn prompt_string(&mut self, _question: &str) -> Option<String> {
        self.string_responses.pop_front().flatten()
    }

    fn report_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}

/// All cards carrying the given pair value, in board order.
pub fn cards_with_value(engine: &GameEngine, value: u16) -> Vec<CardId> {
    engine
        .deck()
        .card_ids()
        .filter(|&id| engine.card_value(id) == Some(value))
        .collect()
}

/// Two face-down cards with different values, in board order.
pub fn find_mismatch(engine: &GameEngine) -> (CardId, CardId) {
    let face_down: Vec<CardId> = engine
        .deck()
        .iter()
        .filter(|(_, card)| card.state() == matchpairs::CardState::FaceDown)
        .map(|(id, _)| id)
        .collect();

    let first = *face_down.first().expect("board must have face-down cards");
    let first_value = engine.card_value(first).expect("board must be dealt");
    let second = face_down
        .into_iter()
        .find(|&id| engine.card_value(id) != Some(first_value))
        .expect("two distinct values must remain face-down");
    (first, second)
}
