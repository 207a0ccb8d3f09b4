//! Menu session state: query buffer, ranked matches, visible window, phase.
//!
//! A `Session` is created once with an empty query and lives until a terminal
//! phase is reached. All mutation goes through the dispatcher in
//! `core-actions`; the helpers here keep the three derived pieces consistent:
//! every text change re-filters from the master list, and every re-filter or
//! selection jump re-lays out the window through `window::Window::recompute`.

use core_match::{CaseMode, MasterList, MatchView, filter};
use core_text::QueryBuffer;
use tracing::trace;

pub mod window;
pub use window::{Anchor, Capacity, Measure, Window};

/// Options fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub case: CaseMode,
    /// Accept automatically once a re-filter leaves exactly one match.
    pub return_early: bool,
    pub capacity: Capacity,
    /// Display-only: no editing or navigation, master list shown verbatim.
    pub message: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            case: CaseMode::Sensitive,
            return_early: false,
            capacity: Capacity::Rows(10),
            message: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Accepted(String),
    Cancelled,
}

pub struct Session {
    master: MasterList,
    buffer: QueryBuffer,
    matches: MatchView,
    window: Window,
    config: SessionConfig,
    phase: Phase,
    measure: Box<dyn Measure>,
}

impl Session {
    /// Build the session and run the initial (empty query) filter. The
    /// initial filter never auto-accepts.
    pub fn new(master: MasterList, config: SessionConfig, measure: Box<dyn Measure>) -> Self {
        let matches = if config.message {
            MatchView::identity(&master)
        } else {
            filter(&master, "", config.case)
        };
        let mut session = Self {
            master,
            buffer: QueryBuffer::new(),
            matches,
            window: Window::empty(),
            config,
            phase: Phase::Editing,
            measure,
        };
        session.relayout(0, Anchor::Start);
        session
    }

    pub fn master(&self) -> &MasterList {
        &self.master
    }

    pub fn buffer(&self) -> &QueryBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut QueryBuffer {
        &mut self.buffer
    }

    pub fn query(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn matches(&self) -> &MatchView {
        &self.matches
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.phase, Phase::Editing)
    }

    pub fn selected(&self) -> Option<usize> {
        self.window.selected
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.window
            .selected
            .and_then(|pos| self.matches.text(&self.master, pos))
    }

    /// Text of the only match, if exactly one remains.
    pub fn sole_match(&self) -> Option<&str> {
        if self.matches.len() == 1 {
            self.matches.text(&self.master, 0)
        } else {
            None
        }
    }

    /// Visible items as `(view position, text)` pairs.
    pub fn visible_items(&self) -> impl Iterator<Item = (usize, &str)> {
        self.window
            .visible(self.matches.len())
            .filter_map(|pos| self.matches.text(&self.master, pos).map(|t| (pos, t)))
    }

    /// Re-rank against the current query. The previous selection stays
    /// selected if it still matches; otherwise the first match is selected.
    /// Either way the window starts at the selection.
    pub fn refilter(&mut self) {
        if self.config.message {
            return;
        }
        let previous = self.window.selected.and_then(|pos| self.matches.get(pos));
        self.matches = filter(&self.master, self.buffer.as_str(), self.config.case);
        let pivot = previous
            .and_then(|idx| self.matches.position_of(idx))
            .unwrap_or(0);
        trace!(
            target: "window",
            matches = self.matches.len(),
            pivot,
            kept_selection = previous.is_some() && self.matches.get(pivot) == previous,
            "refilter"
        );
        self.relayout(pivot, Anchor::Start);
    }

    /// Lay the window out around `pivot` and select it.
    pub fn relayout(&mut self, pivot: usize, anchor: Anchor) {
        self.window = Window::recompute(
            &self.matches,
            &self.master,
            self.config.capacity,
            self.measure.as_ref(),
            pivot,
            anchor,
        );
    }

    /// Lay the window out starting at `first` but select `selected`.
    pub fn relayout_selecting(&mut self, first: usize, selected: usize) {
        self.relayout(first, Anchor::Start);
        if self.window.contains(selected) {
            self.window = self.window.with_selected(selected);
        }
    }

    /// Move the selection inside the current window without re-layout.
    pub fn select_within(&mut self, pos: usize) {
        if self.window.contains(pos) && pos < self.matches.len() {
            self.window.selected = Some(pos);
        }
    }

    /// New capacity (terminal resize); keeps the selection visible.
    pub fn set_capacity(&mut self, capacity: Capacity) {
        if self.config.capacity == capacity {
            return;
        }
        self.config.capacity = capacity;
        let pivot = self.window.selected.unwrap_or(0);
        self.relayout(pivot, Anchor::Reveal);
    }

    pub fn finish(&mut self, phase: Phase) {
        self.phase = phase;
    }
}
