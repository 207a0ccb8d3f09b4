//! KeyTranslator: key -> `Action` translation.
//!
//! Control chords are first rewritten onto the named key they stand for
//! (Ctrl-a is Home, Ctrl-n is Down, ...); the few chords without a named
//! equivalent map straight to an action. Several named keys then depend on
//! session state:
//! * Home selects the first match, or moves the cursor to the start when the
//!   first match is already selected or nothing matches.
//! * End moves the cursor to the end, or selects the last match when the
//!   cursor is already there.
//! * Left/Right edit the cursor until it reaches the query edge; past the
//!   edge they move the selection in the horizontal bar and do nothing in
//!   the vertical list.

use crate::Action;
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::Session;

#[derive(Debug, Default, Clone, Copy)]
pub struct KeyTranslator;

impl KeyTranslator {
    pub fn new() -> Self {
        Self
    }

    pub fn translate(&self, session: &Session, key: &KeyEvent) -> Option<Action> {
        let mut code = key.code;
        if key.mods.contains(KeyModifiers::CTRL) {
            let KeyCode::Char(c) = code else {
                return None;
            };
            code = match c.to_ascii_lowercase() {
                'a' => KeyCode::Home,
                'b' => KeyCode::Left,
                'c' => KeyCode::Esc,
                'd' => KeyCode::Delete,
                'e' => KeyCode::End,
                'f' => KeyCode::Right,
                'h' => KeyCode::Backspace,
                'i' => KeyCode::Tab,
                'j' | 'm' => KeyCode::Enter,
                'n' => KeyCode::Down,
                'p' => KeyCode::Up,
                'k' => return Some(Action::ClearToEnd),
                'u' => return Some(Action::DeleteToLineStart),
                'w' => return Some(Action::DeleteWordBackward),
                _ => return None,
            };
        } else if key.mods.contains(KeyModifiers::ALT) {
            return None;
        }

        let rows = session.config().capacity.is_rows();
        let buffer = session.buffer();
        let action = match code {
            KeyCode::Char(c) if c.is_control() => return None,
            KeyCode::Char(c) => Action::InsertText(c.to_string()),
            KeyCode::Enter => Action::Submit {
                raw: key.mods.contains(KeyModifiers::SHIFT),
            },
            KeyCode::Esc => Action::Cancel,
            KeyCode::Backspace => Action::DeleteBackward,
            KeyCode::Delete => Action::DeleteForward,
            KeyCode::Tab => Action::AcceptCompletion,
            KeyCode::Up => Action::SelectPrev,
            KeyCode::Down => Action::SelectNext,
            KeyCode::PageUp => Action::SelectPrevPage,
            KeyCode::PageDown => Action::SelectNextPage,
            KeyCode::Home => {
                if session.selected().is_none_or(|sel| sel == 0) {
                    Action::CursorToStart
                } else {
                    Action::SelectFirst
                }
            }
            KeyCode::End => {
                if buffer.at_end() {
                    Action::SelectLast
                } else {
                    Action::CursorToEnd
                }
            }
            KeyCode::Left => {
                let selection_at_head = session.selected().is_none_or(|sel| sel == 0);
                if !buffer.at_start() && (selection_at_head || rows) {
                    Action::CursorLeft
                } else if rows {
                    return None;
                } else {
                    Action::SelectPrev
                }
            }
            KeyCode::Right => {
                if !buffer.at_end() {
                    Action::CursorRight
                } else if rows {
                    return None;
                } else {
                    Action::SelectNext
                }
            }
        };
        tracing::trace!(target: "actions", key = %key, action = action.label(), "translated");
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_match::MasterList;
    use core_state::{Capacity, SessionConfig};

    fn session(capacity: Capacity) -> Session {
        let config = SessionConfig {
            capacity,
            ..SessionConfig::default()
        };
        Session::new(
            MasterList::new(["one", "two", "three"]),
            config,
            Box::new(|s: &str| s.len() + 2),
        )
    }

    fn tr(session: &Session, key: KeyEvent) -> Option<Action> {
        KeyTranslator::new().translate(session, &key)
    }

    #[test]
    fn printable_chars_insert() {
        let s = session(Capacity::Rows(3));
        assert_eq!(
            tr(&s, KeyEvent::plain(KeyCode::Char('x'))),
            Some(Action::InsertText("x".into()))
        );
    }

    #[test]
    fn ctrl_chords_alias_named_keys() {
        let s = session(Capacity::Rows(3));
        assert_eq!(tr(&s, KeyEvent::ctrl('c')), Some(Action::Cancel));
        assert_eq!(tr(&s, KeyEvent::ctrl('n')), Some(Action::SelectNext));
        assert_eq!(tr(&s, KeyEvent::ctrl('p')), Some(Action::SelectPrev));
        assert_eq!(tr(&s, KeyEvent::ctrl('h')), Some(Action::DeleteBackward));
        assert_eq!(tr(&s, KeyEvent::ctrl('i')), Some(Action::AcceptCompletion));
        assert_eq!(
            tr(&s, KeyEvent::ctrl('j')),
            Some(Action::Submit { raw: false })
        );
        assert_eq!(tr(&s, KeyEvent::ctrl('w')), Some(Action::DeleteWordBackward));
        assert_eq!(tr(&s, KeyEvent::ctrl('u')), Some(Action::DeleteToLineStart));
        assert_eq!(tr(&s, KeyEvent::ctrl('k')), Some(Action::ClearToEnd));
    }

    #[test]
    fn unknown_ctrl_and_alt_chords_are_ignored() {
        let s = session(Capacity::Rows(3));
        assert_eq!(tr(&s, KeyEvent::ctrl('z')), None);
        assert_eq!(tr(&s, KeyEvent::ctrl('y')), None);
        assert_eq!(
            tr(&s, KeyEvent::new(KeyCode::Left, KeyModifiers::CTRL)),
            None
        );
        assert_eq!(
            tr(&s, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
    }

    #[test]
    fn shift_enter_submits_raw() {
        let s = session(Capacity::Rows(3));
        assert_eq!(
            tr(&s, KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(Action::Submit { raw: true })
        );
    }

    #[test]
    fn home_on_first_match_moves_cursor() {
        let s = session(Capacity::Rows(3));
        assert_eq!(s.selected(), Some(0));
        assert_eq!(tr(&s, KeyEvent::plain(KeyCode::Home)), Some(Action::CursorToStart));
        assert_eq!(tr(&s, KeyEvent::ctrl('a')), Some(Action::CursorToStart));
    }

    #[test]
    fn end_with_cursor_at_end_selects_last() {
        let s = session(Capacity::Rows(3));
        assert!(s.buffer().at_end());
        assert_eq!(tr(&s, KeyEvent::plain(KeyCode::End)), Some(Action::SelectLast));
    }

    #[test]
    fn arrows_at_query_edge_depend_on_layout() {
        let rows = session(Capacity::Rows(3));
        assert_eq!(tr(&rows, KeyEvent::plain(KeyCode::Left)), None);
        assert_eq!(tr(&rows, KeyEvent::plain(KeyCode::Right)), None);

        let bar = session(Capacity::Width(40));
        assert_eq!(tr(&bar, KeyEvent::plain(KeyCode::Left)), Some(Action::SelectPrev));
        assert_eq!(tr(&bar, KeyEvent::plain(KeyCode::Right)), Some(Action::SelectNext));
    }

    #[test]
    fn page_keys_map_to_page_actions() {
        let s = session(Capacity::Rows(1));
        assert_eq!(tr(&s, KeyEvent::plain(KeyCode::PageDown)), Some(Action::SelectNextPage));
        assert_eq!(tr(&s, KeyEvent::plain(KeyCode::PageUp)), Some(Action::SelectPrevPage));
    }
}
