//! Canonical menu actions, key translation and dispatch.
//!
//! Raw keys become `Action`s through `KeyTranslator`, which consults the
//! session because several bindings depend on state (Home selects the first
//! match unless it is already selected, Left at the cursor edge moves the
//! selection in the horizontal bar, ...). `dispatch` then applies one action
//! to the `Session` and reports whether a redraw is needed and whether the
//! session reached a terminal outcome.

pub mod dispatcher;
mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::KeyTranslator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InsertText(String),
    CursorLeft,
    CursorRight,
    CursorToStart,
    CursorToEnd,
    DeleteBackward,
    DeleteForward,
    DeleteWordBackward,
    DeleteToLineStart,
    ClearToEnd,
    SelectFirst,
    SelectLast,
    SelectPrevPage,
    SelectNextPage,
    SelectPrev,
    SelectNext,
    /// Replace the query with the selected item.
    AcceptCompletion,
    /// Finish with the selection, or with the query when `raw` is set or
    /// nothing is selected.
    Submit {
        raw: bool,
    },
    Cancel,
    /// Pasted text; only the first line is inserted.
    PasteText(String),
    /// Display-only timeout expired.
    Dismiss,
}

impl Action {
    /// Actions still honoured in display-only mode.
    pub fn allowed_in_message_mode(&self) -> bool {
        matches!(self, Action::Cancel | Action::Dismiss)
    }

    /// Payload-free name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Action::InsertText(_) => "insert_text",
            Action::PasteText(_) => "paste_text",
            Action::CursorLeft => "cursor_left",
            Action::CursorRight => "cursor_right",
            Action::CursorToStart => "cursor_to_start",
            Action::CursorToEnd => "cursor_to_end",
            Action::DeleteBackward => "delete_backward",
            Action::DeleteForward => "delete_forward",
            Action::DeleteWordBackward => "delete_word_backward",
            Action::DeleteToLineStart => "delete_to_line_start",
            Action::ClearToEnd => "clear_to_end",
            Action::SelectFirst => "select_first",
            Action::SelectLast => "select_last",
            Action::SelectPrevPage => "select_prev_page",
            Action::SelectNextPage => "select_next_page",
            Action::SelectPrev => "select_prev",
            Action::SelectNext => "select_next",
            Action::AcceptCompletion => "accept_completion",
            Action::Submit { .. } => "submit",
            Action::Cancel => "cancel",
            Action::Dismiss => "dismiss",
        }
    }
}

/// Terminal result of a session, handed to the top-level loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(String),
    Cancelled,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Accepted(_) => 0,
            Outcome::Cancelled => 1,
        }
    }
}
