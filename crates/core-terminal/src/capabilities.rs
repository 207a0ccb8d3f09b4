//! Terminal capability probing.
//!
//! Detection runs once, after raw mode is acquired. Each flag gates an
//! optional behaviour; nothing depends on a capability being present.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    /// Terminal understands the kitty keyboard protocol, which is what lets
    /// Shift+Enter be told apart from Enter.
    pub keyboard_enhancement: bool,
    /// 24-bit colour escapes are honoured.
    pub truecolor: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        let keyboard_enhancement =
            crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
        let colorterm = std::env::var("COLORTERM").ok();
        Self::from_probe(keyboard_enhancement, colorterm.as_deref())
    }

    pub fn from_probe(keyboard_enhancement: bool, colorterm: Option<&str>) -> Self {
        let truecolor = colorterm.is_some_and(|v| {
            v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit")
        });
        Self {
            keyboard_enhancement,
            truecolor,
        }
    }
}
