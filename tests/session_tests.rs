//! Session-level tests: registration and configuration prompts, command
//! dispatch, exit confirmation, and leaderboard viewing.

mod common;

use common::{find_mismatch, ScriptedSurface};
use matchpairs::session::{prompt_pair_count, register_players};
use matchpairs::{Command, GameEngine, Session, SessionFlow};

fn session(names: &[&str], pairs: u16, surface: &mut ScriptedSurface) -> Session {
    let mut engine =
        GameEngine::new(names.iter().map(|n| n.to_string()).collect(), pairs, 42).unwrap();
    engine.initialize(surface);
    Session::with_engine(engine)
}

/// Out-of-range player counts are reported and re-asked, not accepted.
#[test]
fn test_registration_reasks_invalid_counts() {
    let mut surface = ScriptedSurface::new()
        .with_integers(&[Some(99), Some(0), Some(2)])
        .with_strings(&[Some("Alice"), Some("Bob")]);

    let names = register_players(&mut surface);

    assert_eq!(names, vec!["Alice".to_string(), "Bob".to_string()]);
    assert_eq!(surface.errors.len(), 2);
    assert!(surface.errors[0].contains("between 1 and 8"));
}

/// Blank or cancelled names fall back to "Guest"; surrounding whitespace is
/// trimmed.
#[test]
fn test_registration_guest_fallback() {
    let mut surface = ScriptedSurface::new()
        .with_integers(&[Some(3)])
        .with_strings(&[Some("  Ada  "), Some("   "), None]);

    let names = register_players(&mut surface);

    assert_eq!(
        names,
        vec!["Ada".to_string(), "Guest".to_string(), "Guest".to_string()]
    );
}

/// Cancelling the player-count prompt means a solo game.
#[test]
fn test_registration_cancel_means_solo() {
    let mut surface = ScriptedSurface::new().with_strings(&[Some("Solo")]);

    let names = register_players(&mut surface);

    assert_eq!(names, vec!["Solo".to_string()]);
}

/// The pair-count prompt re-asks until the input is a positive even number,
/// and cancelling keeps the current value.
#[test]
fn test_pair_count_validation() {
    let mut surface = ScriptedSurface::new().with_integers(&[Some(3), Some(-2), Some(6)]);
    assert_eq!(prompt_pair_count(&mut surface, 4), 6);
    assert_eq!(surface.errors.len(), 2);

    let mut cancelled = ScriptedSurface::new();
    assert_eq!(prompt_pair_count(&mut cancelled, 4), 4);
}

/// A full scripted startup: count, names, board size, dealt board.
#[test]
fn test_session_start() {
    let mut surface = ScriptedSurface::new()
        .with_integers(&[Some(2), Some(2)])
        .with_strings(&[Some("Ada"), Some("Lin")]);

    let session = Session::start(&mut surface).unwrap();

    assert_eq!(session.engine().players().player_count(), 2);
    assert_eq!(session.engine().pair_count(), 2);
    assert_eq!(session.engine().deck().len(), 4);
    // The deal told the surface about every card.
    assert_eq!(surface.changes.len(), 4);
}

/// Exit asks for confirmation; declining keeps the session alive.
#[test]
fn test_exit_requires_confirmation() {
    let mut surface = ScriptedSurface::new().with_confirms(&[false, true]);
    let mut session = session(&["Solo"], 2, &mut surface);

    assert_eq!(
        session.dispatch(Command::Exit, &mut surface).unwrap(),
        SessionFlow::Continue
    );
    assert_eq!(
        session.dispatch(Command::Exit, &mut surface).unwrap(),
        SessionFlow::Quit
    );
}

/// Viewing the leaderboard for an unplayed size announces an empty result
/// rather than failing; junk input is reported.
#[test]
fn test_show_leaderboard() {
    let mut surface = ScriptedSurface::new().with_integers(&[Some(4), Some(-1)]);
    let mut session = session(&["Solo"], 2, &mut surface);

    session
        .dispatch(Command::ShowLeaderboard, &mut surface)
        .unwrap();
    assert_eq!(surface.announcements, vec!["No games recorded for 4 pairs."]);

    session
        .dispatch(Command::ShowLeaderboard, &mut surface)
        .unwrap();
    assert_eq!(surface.errors, vec!["Invalid board size entered!"]);
}

/// Changing the board size is refused while a reveal is pending.
#[test]
fn test_change_pairs_rejected_during_timer() {
    let mut surface = ScriptedSurface::new().with_integers(&[Some(6)]);
    let mut session = session(&["Ada", "Lin"], 3, &mut surface);

    let (a, b) = find_mismatch(session.engine());
    session.dispatch(Command::Select(a), &mut surface).unwrap();
    session.dispatch(Command::Select(b), &mut surface).unwrap();
    assert!(session.engine().timer_active());

    session
        .dispatch(Command::ChangePairs, &mut surface)
        .unwrap();

    assert!(surface
        .errors
        .iter()
        .any(|e| e.contains("cannot shuffle while a reveal is pending")));
    // The old board survives untouched.
    assert_eq!(session.engine().pair_count(), 3);

    // Once the conceal fires, resizing works.
    session
        .dispatch(Command::TimerElapsed, &mut surface)
        .unwrap();
    surface.integer_responses.push_back(Some(6));
    session
        .dispatch(Command::ChangePairs, &mut surface)
        .unwrap();
    assert_eq!(session.engine().pair_count(), 6);
}

/// The shuffle command deals a new layout without restarting the session.
#[test]
fn test_shuffle_command() {
    let mut surface = ScriptedSurface::new();
    let mut session = session(&["Ada", "Lin"], 2, &mut surface);

    let (a, _) = find_mismatch(session.engine());
    session.dispatch(Command::Select(a), &mut surface).unwrap();
    assert_eq!(session.engine().total_flips(), 1);

    let flow = session.dispatch(Command::Shuffle, &mut surface).unwrap();

    assert_eq!(flow, SessionFlow::Continue);
    assert_eq!(session.engine().total_flips(), 0);
    assert_eq!(session.engine().first_selected(), None);
}
