//! Selection movement. The window is only re-laid out when the selection
//! leaves it; otherwise just the selected position changes.

use super::DispatchResult;
use core_state::{Anchor, Session};

pub(crate) fn first(session: &mut Session) -> DispatchResult {
    if session.matches().is_empty() {
        return DispatchResult::clean();
    }
    let before = *session.window();
    session.relayout(0, Anchor::Start);
    DispatchResult::from_changed(*session.window() != before)
}

pub(crate) fn last(session: &mut Session) -> DispatchResult {
    let len = session.matches().len();
    if len == 0 {
        return DispatchResult::clean();
    }
    let before = *session.window();
    session.relayout(len - 1, Anchor::End);
    DispatchResult::from_changed(*session.window() != before)
}

pub(crate) fn next_page(session: &mut Session) -> DispatchResult {
    let Some(last) = session.window().last else {
        return DispatchResult::clean();
    };
    session.relayout(last, Anchor::Start);
    DispatchResult::dirty()
}

pub(crate) fn prev_page(session: &mut Session) -> DispatchResult {
    let Some(prev) = session.window().prev else {
        return DispatchResult::clean();
    };
    session.relayout(prev, Anchor::Start);
    DispatchResult::dirty()
}

pub(crate) fn prev(session: &mut Session) -> DispatchResult {
    let Some(sel) = session.selected() else {
        return DispatchResult::clean();
    };
    if sel == 0 {
        return DispatchResult::clean();
    }
    let target = sel - 1;
    let window = *session.window();
    if target < window.first {
        let first = window.prev.unwrap_or(target);
        session.relayout_selecting(first, target);
    } else {
        session.select_within(target);
    }
    DispatchResult::dirty()
}

pub(crate) fn next(session: &mut Session) -> DispatchResult {
    let Some(sel) = session.selected() else {
        return DispatchResult::clean();
    };
    if sel + 1 >= session.matches().len() {
        return DispatchResult::clean();
    }
    let target = sel + 1;
    if session.window().contains(target) {
        session.select_within(target);
    } else {
        session.relayout(target, Anchor::Start);
    }
    DispatchResult::dirty()
}
