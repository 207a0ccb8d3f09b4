//! Dispatcher applying `Action` to the menu session.
//!
//! Sub-modules:
//! * `edit`   - query mutation followed by re-filter and auto-accept
//! * `select` - selection and page movement over the current matches
//!
//! Terminal actions (submit, cancel, dismiss) are handled here directly.
//! Once the session has left `Phase::Editing` every action is a no-op.

use crate::{Action, Outcome};
use core_state::{Phase, Session};

mod edit;
mod select;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    /// Set when the action ended the session.
    pub outcome: Option<Outcome>,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            outcome: None,
        }
    }

    pub fn clean() -> Self {
        Self {
            dirty: false,
            outcome: None,
        }
    }

    pub fn finished(outcome: Outcome) -> Self {
        Self {
            dirty: true,
            outcome: Some(outcome),
        }
    }

    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed { Self::dirty() } else { Self::clean() }
    }
}

/// Apply an action to the session. Returns `DispatchResult` describing
/// whether a render is needed (`dirty`) or the session ended (`outcome`).
pub fn dispatch(action: Action, session: &mut Session) -> DispatchResult {
    if session.is_finished() {
        return DispatchResult::clean();
    }
    if session.config().message && !action.allowed_in_message_mode() {
        tracing::trace!(target: "actions", "ignored_in_message_mode");
        return DispatchResult::clean();
    }

    match action {
        Action::InsertText(s) => edit::insert(session, &s),
        Action::PasteText(s) => {
            let first_line = s.split('\n').next().unwrap_or_default();
            tracing::trace!(
                target: "actions",
                paste_len = s.len(),
                kept = first_line.len(),
                "paste"
            );
            edit::insert(session, first_line)
        }
        Action::CursorLeft => DispatchResult::from_changed(session.buffer_mut().move_left()),
        Action::CursorRight => DispatchResult::from_changed(session.buffer_mut().move_right()),
        Action::CursorToStart => {
            let moved = !session.buffer().at_start();
            session.buffer_mut().cursor_to_start();
            DispatchResult::from_changed(moved)
        }
        Action::CursorToEnd => {
            let moved = !session.buffer().at_end();
            session.buffer_mut().cursor_to_end();
            DispatchResult::from_changed(moved)
        }
        Action::DeleteBackward => edit::mutate(session, |b| b.delete_rune_before()),
        Action::DeleteForward => edit::mutate(session, |b| b.delete_rune_at()),
        Action::DeleteWordBackward => edit::mutate(session, |b| b.delete_word_back()),
        Action::DeleteToLineStart => edit::mutate(session, |b| b.delete_to_start()),
        Action::ClearToEnd => edit::mutate(session, |b| b.truncate_at_cursor()),
        Action::AcceptCompletion => edit::complete(session),
        Action::SelectFirst => select::first(session),
        Action::SelectLast => select::last(session),
        Action::SelectPrevPage => select::prev_page(session),
        Action::SelectNextPage => select::next_page(session),
        Action::SelectPrev => select::prev(session),
        Action::SelectNext => select::next(session),
        Action::Submit { raw } => {
            let payload = match session.selected_text() {
                Some(text) if !raw => text.to_string(),
                _ => session.query().to_string(),
            };
            tracing::debug!(target: "actions", raw, payload_len = payload.len(), "submit");
            finish(session, Outcome::Accepted(payload))
        }
        Action::Cancel => {
            tracing::debug!(target: "actions", "cancel");
            finish(session, Outcome::Cancelled)
        }
        Action::Dismiss => {
            tracing::debug!(target: "actions", "dismiss");
            finish(session, Outcome::Accepted(String::new()))
        }
    }
}

pub(crate) fn finish(session: &mut Session, outcome: Outcome) -> DispatchResult {
    let phase = match &outcome {
        Outcome::Accepted(payload) => Phase::Accepted(payload.clone()),
        Outcome::Cancelled => Phase::Cancelled,
    };
    session.finish(phase);
    DispatchResult::finished(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_match::MasterList;
    use core_state::{Capacity, SessionConfig};

    fn session_with(items: &[&str], config: SessionConfig) -> Session {
        Session::new(
            MasterList::new(items.iter().copied()),
            config,
            Box::new(|s: &str| s.chars().count() + 2),
        )
    }

    fn session(items: &[&str]) -> Session {
        session_with(items, SessionConfig::default())
    }

    fn type_str(session: &mut Session, s: &str) -> DispatchResult {
        dispatch(Action::InsertText(s.to_string()), session)
    }

    #[test]
    fn insert_filters_and_marks_dirty() {
        let mut s = session(&["apple", "app", "application", "banana"]);
        let r = type_str(&mut s, "app");
        assert!(r.dirty);
        assert_eq!(r.outcome, None);
        let texts: Vec<&str> = s.matches().texts(s.master()).collect();
        assert_eq!(texts, ["app", "apple", "application"]);
        assert_eq!(s.selected_text(), Some("app"));
    }

    #[test]
    fn submit_prefers_selection() {
        let mut s = session(&["alpha", "beta"]);
        type_str(&mut s, "be");
        let r = dispatch(Action::Submit { raw: false }, &mut s);
        assert_eq!(r.outcome, Some(Outcome::Accepted("beta".into())));
        assert_eq!(s.phase(), &Phase::Accepted("beta".into()));
    }

    #[test]
    fn raw_submit_returns_query() {
        let mut s = session(&["alpha", "beta"]);
        type_str(&mut s, "be");
        let r = dispatch(Action::Submit { raw: true }, &mut s);
        assert_eq!(r.outcome, Some(Outcome::Accepted("be".into())));
    }

    #[test]
    fn submit_without_matches_returns_query() {
        let mut s = session(&["alpha"]);
        type_str(&mut s, "zzz");
        let r = dispatch(Action::Submit { raw: false }, &mut s);
        assert_eq!(r.outcome, Some(Outcome::Accepted("zzz".into())));
    }

    #[test]
    fn cancel_ends_session_and_blocks_further_actions() {
        let mut s = session(&["alpha"]);
        let r = dispatch(Action::Cancel, &mut s);
        assert_eq!(r.outcome, Some(Outcome::Cancelled));
        assert_eq!(r.outcome.as_ref().map(Outcome::exit_code), Some(1));
        let r = type_str(&mut s, "a");
        assert_eq!(r, DispatchResult::clean());
        assert_eq!(s.query(), "");
    }

    #[test]
    fn paste_keeps_first_line_only() {
        let mut s = session(&["alpha"]);
        dispatch(Action::PasteText("al\nignored".into()), &mut s);
        assert_eq!(s.query(), "al");
    }

    #[test]
    fn empty_paste_is_noop() {
        let mut s = session(&["alpha"]);
        let r = dispatch(Action::PasteText(String::new()), &mut s);
        assert_eq!(r, DispatchResult::clean());
        let r = dispatch(Action::PasteText("\nrest".into()), &mut s);
        assert_eq!(r, DispatchResult::clean());
        assert_eq!(s.query(), "");
    }

    #[test]
    fn message_mode_ignores_editing_but_allows_cancel() {
        let config = SessionConfig {
            message: true,
            capacity: Capacity::Width(80),
            ..SessionConfig::default()
        };
        let mut s = session_with(&["hello"], config);
        assert_eq!(type_str(&mut s, "x"), DispatchResult::clean());
        assert_eq!(dispatch(Action::SelectNext, &mut s), DispatchResult::clean());
        assert_eq!(
            dispatch(Action::Submit { raw: false }, &mut s),
            DispatchResult::clean()
        );
        let r = dispatch(Action::Cancel, &mut s);
        assert_eq!(r.outcome, Some(Outcome::Cancelled));
    }

    #[test]
    fn dismiss_accepts_empty_payload() {
        let config = SessionConfig {
            message: true,
            ..SessionConfig::default()
        };
        let mut s = session_with(&["hello"], config);
        let r = dispatch(Action::Dismiss, &mut s);
        assert_eq!(r.outcome, Some(Outcome::Accepted(String::new())));
    }

    #[test]
    fn cursor_moves_report_dirty_only_when_moving() {
        let mut s = session(&["a"]);
        assert_eq!(dispatch(Action::CursorLeft, &mut s), DispatchResult::clean());
        type_str(&mut s, "é");
        assert!(dispatch(Action::CursorLeft, &mut s).dirty);
        assert_eq!(s.buffer().cursor(), 0);
        assert!(dispatch(Action::CursorToEnd, &mut s).dirty);
        assert_eq!(s.buffer().cursor(), 2);
        assert!(!dispatch(Action::CursorToEnd, &mut s).dirty);
    }

    #[test]
    fn labels_carry_no_payload() {
        assert_eq!(Action::InsertText("secret".into()).label(), "insert_text");
        assert_eq!(Action::PasteText("secret".into()).label(), "paste_text");
        assert_eq!(Action::Submit { raw: true }.label(), "submit");
    }
}
