use core_match::MasterList;
use core_state::Measure;
use core_text::grapheme::str_width;
use std::borrow::Cow;

/// Columns of padding around every drawn cell (one each side).
pub const PADDING: usize = 2;

/// Replace control characters so item text cannot move the terminal cursor
/// or inject escape sequences.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { '?' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Padded cell width of a text in terminal columns.
#[derive(Debug, Default, Clone, Copy)]
pub struct CellMeasure;

impl CellMeasure {
    pub fn padded(text: &str) -> usize {
        str_width(&sanitize(text)) + PADDING
    }

    /// Widest padded item; sizes the input field of the horizontal bar.
    pub fn max_width(master: &MasterList) -> usize {
        master.iter().map(Self::padded).max().unwrap_or(0)
    }
}

impl Measure for CellMeasure {
    fn width(&self, text: &str) -> usize {
        Self::padded(text)
    }
}
