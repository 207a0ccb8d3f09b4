//! Grapheme cluster display width.
//!
//! `egc_width` is the single authority for how many terminal cells a grapheme
//! cluster (EGC) occupies. Both the menu layout (item cost in width mode) and
//! the cursor column go through it, so the paginator and the renderer never
//! disagree about where an item ends.
//!
//! Baseline widths come from `unicode_width`; a small classifier widens emoji
//! compositions (ZWJ sequences, flags, keycaps, skin tones) that the
//! per-codepoint table under-measures. Over-estimating only leaves a blank
//! cell; under-estimating shifts every item to its right.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EgcKind {
    Ascii,
    Narrow,
    Wide,
    Emoji,
    Combining(bool), // base + combining mark(s); true when the base is wide
}

const ZWJ: char = '\u{200D}';
const KEYCAP_COMBINING: char = '\u{20E3}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_skin_tone_modifier(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

// Rough Extended Pictographic heuristic (emoji blocks + misc symbols/dingbats).
fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

#[inline]
fn char_width(c: char) -> usize {
    unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)
}

fn classify(egc: &str) -> EgcKind {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return EgcKind::Narrow;
    };
    if chars.next().is_none() {
        if first.is_ascii() {
            return EgcKind::Ascii;
        }
        if is_extended_pictographic(first) {
            return EgcKind::Emoji;
        }
        return if char_width(first) == 2 {
            EgcKind::Wide
        } else {
            EgcKind::Narrow
        };
    }

    let mut pictographic = 0usize;
    let mut regional = 0usize;
    let mut has_zwj = false;
    let mut has_skin = false;
    let mut has_keycap = false;
    let mut has_combining = false;
    let mut any_wide = false;
    for c in egc.chars() {
        if is_extended_pictographic(c) {
            pictographic += 1;
        }
        if is_regional_indicator(c) {
            regional += 1;
        }
        has_zwj |= c == ZWJ;
        has_skin |= is_skin_tone_modifier(c);
        has_keycap |= c == KEYCAP_COMBINING;
        has_combining |= is_combining_mark(c);
        any_wide |= char_width(c) == 2;
    }

    if has_keycap || regional > 0 || pictographic > 0 || (has_zwj && has_skin) {
        return EgcKind::Emoji;
    }
    if has_combining {
        return EgcKind::Combining(char_width(first) == 2);
    }
    if any_wide {
        return EgcKind::Wide;
    }
    EgcKind::Narrow
}

/// Display width in terminal cells of a single grapheme cluster.
///
/// Precondition: `egc` is one grapheme cluster (callers segment first).
/// Empty input has width 0.
pub fn egc_width(egc: &str) -> u16 {
    if egc.is_empty() {
        return 0;
    }
    match classify(egc) {
        EgcKind::Ascii | EgcKind::Narrow => 1,
        EgcKind::Wide | EgcKind::Emoji => 2,
        EgcKind::Combining(wide) => {
            if wide {
                2
            } else {
                1
            }
        }
    }
}
