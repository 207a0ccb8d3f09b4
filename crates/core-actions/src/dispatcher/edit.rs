//! Query mutation. Every change re-filters from the master list and then
//! checks for auto-accept.

use super::{DispatchResult, finish};
use crate::Outcome;
use core_state::Session;
use core_text::QueryBuffer;

pub(crate) fn insert(session: &mut Session, s: &str) -> DispatchResult {
    if s.is_empty() {
        return DispatchResult::clean();
    }
    if !session.buffer_mut().insert(s) {
        tracing::trace!(target: "actions", len = s.len(), "insert_refused_capacity");
        return DispatchResult::clean();
    }
    after_edit(session)
}

pub(crate) fn mutate(
    session: &mut Session,
    op: impl FnOnce(&mut QueryBuffer) -> bool,
) -> DispatchResult {
    if !op(session.buffer_mut()) {
        return DispatchResult::clean();
    }
    after_edit(session)
}

/// Tab: copy the selected item into the query.
pub(crate) fn complete(session: &mut Session) -> DispatchResult {
    let Some(text) = session.selected_text().map(str::to_string) else {
        return DispatchResult::clean();
    };
    session.buffer_mut().replace(&text);
    after_edit(session)
}

fn after_edit(session: &mut Session) -> DispatchResult {
    session.refilter();
    tracing::trace!(
        target: "actions",
        query_len = session.query().len(),
        matches = session.matches().len(),
        "refiltered"
    );
    if session.config().return_early
        && let Some(only) = session.sole_match()
    {
        let payload = only.to_string();
        tracing::debug!(target: "actions", payload_len = payload.len(), "auto_accept");
        return finish(session, Outcome::Accepted(payload));
    }
    DispatchResult::dirty()
}
