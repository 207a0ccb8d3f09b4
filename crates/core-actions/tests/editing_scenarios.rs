mod common;

use common::Harness;
use core_actions::{Action, DispatchResult, Outcome};
use core_events::{KeyCode, KeyEvent};
use core_state::{Capacity, SessionConfig};
use core_text::MAX_QUERY_BYTES;
use pretty_assertions::assert_eq;

fn return_early(items: &[&str]) -> Harness {
    Harness::new(
        items,
        SessionConfig {
            return_early: true,
            capacity: Capacity::Rows(5),
            ..SessionConfig::default()
        },
    )
}

#[test]
fn auto_accepts_single_remaining_match() {
    let mut h = return_early(&["only"]);
    assert_eq!(h.outcome, None, "initial filter never auto-accepts");
    h.type_str("o");
    assert_eq!(h.outcome, Some(Outcome::Accepted("only".into())));
}

#[test]
fn auto_accept_waits_for_a_single_match() {
    let mut h = return_early(&["alpha", "alps", "beta"]);
    h.type_str("al");
    assert_eq!(h.outcome, None);
    h.type_str("ph");
    assert_eq!(h.outcome, Some(Outcome::Accepted("alpha".into())));
}

#[test]
fn cursor_left_steps_over_multibyte_rune() {
    let mut h = Harness::rows(&["x"], 3);
    h.type_str("aé");
    assert_eq!(h.session.buffer().cursor(), 3);
    h.press(KeyCode::Left);
    assert_eq!(h.session.buffer().cursor(), 1);
    h.press(KeyCode::Delete);
    assert_eq!(h.session.query(), "a");
}

#[test]
fn backspace_restores_wider_match_set() {
    let mut h = Harness::rows(&["banana", "bar", "cabal", "band"], 5);
    h.type_str("ban");
    assert_eq!(h.visible(), ["banana", "band"]);
    h.press(KeyCode::Backspace);
    assert_eq!(h.visible(), ["banana", "bar", "band", "cabal"]);
}

#[test]
fn word_and_line_deletes() {
    let mut h = Harness::rows(&["x"], 3);
    h.type_str("foo bar  ");
    h.key(KeyEvent::ctrl('w'));
    assert_eq!(h.session.query(), "foo ");
    h.key(KeyEvent::ctrl('w'));
    assert_eq!(h.session.query(), "");

    h.type_str("left right");
    for _ in 0..5 {
        h.press(KeyCode::Left);
    }
    h.key(KeyEvent::ctrl('k'));
    assert_eq!(h.session.query(), "left ");
    h.key(KeyEvent::ctrl('u'));
    assert_eq!(h.session.query(), "");
}

#[test]
fn tab_completes_selected_item() {
    let mut h = Harness::rows(&["firefox", "fish"], 3);
    h.type_str("fi");
    h.press(KeyCode::Down);
    h.press(KeyCode::Tab);
    assert_eq!(h.session.query(), "fish");
    assert_eq!(h.session.buffer().cursor(), 4);
    assert_eq!(h.selected_text(), Some("fish"));
}

#[test]
fn tab_without_selection_is_noop() {
    let mut h = Harness::rows(&["firefox"], 3);
    h.type_str("zz");
    assert_eq!(h.press(KeyCode::Tab), Some(DispatchResult::clean()));
    assert_eq!(h.session.query(), "zz");
}

#[test]
fn shift_enter_returns_typed_text() {
    let mut h = Harness::rows(&["firefox"], 3);
    h.type_str("fire");
    h.key(KeyEvent::new(KeyCode::Enter, core_events::KeyModifiers::SHIFT));
    assert_eq!(h.outcome, Some(Outcome::Accepted("fire".into())));
}

#[test]
fn insertion_past_capacity_is_refused() {
    let mut h = Harness::rows(&["x"], 3);
    let big = "a".repeat(MAX_QUERY_BYTES);
    assert!(h.act(Action::InsertText(big)).dirty);
    let r = h.act(Action::InsertText("b".into()));
    assert_eq!(r, DispatchResult::clean());
    assert_eq!(h.session.query().len(), MAX_QUERY_BYTES);
}

#[test]
fn paste_inserts_first_line_and_refilters() {
    let mut h = Harness::rows(&["alpha", "beta"], 3);
    h.act(Action::PasteText("bet\nsecond line".into()));
    assert_eq!(h.session.query(), "bet");
    assert_eq!(h.visible(), ["beta"]);
}
