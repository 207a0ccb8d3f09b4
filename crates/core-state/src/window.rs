//! Visible window over a `MatchView`.
//!
//! A window is a contiguous run of view positions whose accumulated cost fits
//! the capacity budget. In row mode every item costs one row; in width mode an
//! item costs its measured width, capped at the whole budget so a single
//! oversized item still gets a page of its own.
//!
//! Windows are anchored, not normalised: `Anchor::Start` puts the pivot at the
//! top/left edge and `Anchor::End` at the bottom/right edge, so a window near
//! either end of the view may be shorter than the capacity allows.

use core_match::{MasterList, MatchView};
use std::ops::Range;

/// Measures the display width of an item in width mode.
pub trait Measure {
    fn width(&self, text: &str) -> usize;
}

impl<F> Measure for F
where
    F: Fn(&str) -> usize,
{
    fn width(&self, text: &str) -> usize {
        self(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Fixed number of rows, one item per row.
    Rows(usize),
    /// Width budget shared by the items on a single line.
    Width(usize),
}

impl Capacity {
    pub fn budget(self) -> usize {
        match self {
            Capacity::Rows(n) | Capacity::Width(n) => n,
        }
    }

    pub fn is_rows(self) -> bool {
        matches!(self, Capacity::Rows(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Pivot is the first visible item.
    Start,
    /// Pivot is the last visible item.
    End,
    /// Head page if the pivot is on it, else `End` at the pivot.
    Reveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First visible position.
    pub first: usize,
    /// First position past the visible run; `None` when the view ends inside it.
    pub last: Option<usize>,
    /// Start of the page that ends just before `first`.
    pub prev: Option<usize>,
    /// Selected position; `None` only for an empty view.
    pub selected: Option<usize>,
}

impl Default for Window {
    fn default() -> Self {
        Self::empty()
    }
}

struct Costs<'a> {
    view: &'a MatchView,
    master: &'a MasterList,
    capacity: Capacity,
    measure: &'a dyn Measure,
}

impl Costs<'_> {
    fn cost(&self, pos: usize) -> usize {
        match self.capacity {
            Capacity::Rows(_) => 1,
            Capacity::Width(budget) => {
                let text = self.view.text(self.master, pos).unwrap_or("");
                // At least one unit, so a zero budget still pages.
                self.measure.width(text).min(budget).max(1)
            }
        }
    }

    // First position excluded by a run starting at `start`. `start` itself
    // always fits.
    fn forward_end(&self, start: usize) -> Option<usize> {
        let budget = self.capacity.budget();
        let mut total = 0usize;
        for pos in start..self.view.len() {
            total += self.cost(pos);
            if total > budget && pos > start {
                return Some(pos);
            }
        }
        None
    }

    // Earliest position of a run that ends at `end` (inclusive).
    fn backward_start(&self, end: usize) -> usize {
        let budget = self.capacity.budget();
        let mut total = self.cost(end);
        let mut first = end;
        while first > 0 {
            total += self.cost(first - 1);
            if total > budget {
                break;
            }
            first -= 1;
        }
        first
    }
}

impl Window {
    pub const fn empty() -> Self {
        Self {
            first: 0,
            last: None,
            prev: None,
            selected: None,
        }
    }

    /// Lay out a window around `pivot`; the pivot becomes the selection.
    /// An empty view yields `Window::empty()`; an out-of-range pivot is
    /// clamped to the last item.
    pub fn recompute(
        view: &MatchView,
        master: &MasterList,
        capacity: Capacity,
        measure: &dyn Measure,
        pivot: usize,
        anchor: Anchor,
    ) -> Self {
        if view.is_empty() {
            return Self::empty();
        }
        let pivot = pivot.min(view.len() - 1);
        let costs = Costs {
            view,
            master,
            capacity,
            measure,
        };
        let first = match anchor {
            Anchor::Start => pivot,
            Anchor::End => costs.backward_start(pivot),
            Anchor::Reveal => match costs.forward_end(0) {
                Some(end) if pivot >= end => costs.backward_start(pivot),
                _ => 0,
            },
        };
        let last = costs.forward_end(first);
        let prev = first.checked_sub(1).map(|p| costs.backward_start(p));
        Self {
            first,
            last,
            prev,
            selected: Some(pivot),
        }
    }

    /// Same window, different selection.
    pub fn with_selected(mut self, selected: usize) -> Self {
        debug_assert!(self.contains(selected));
        self.selected = Some(selected);
        self
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.first && self.last.is_none_or(|l| pos < l)
    }

    /// Visible positions for a view of `len` items.
    pub fn visible(&self, len: usize) -> Range<usize> {
        let end = self.last.unwrap_or(len).min(len);
        self.first.min(end)..end
    }
}
