//! Colours for the two cell styles: normal and selected.

use core_config::ColorsConfig;
use crossterm::style::{Color, Colors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub normal: Colors,
    pub selected: Colors,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ColorsConfig::default(), true)
    }
}

impl Theme {
    /// Build from config strings. Unparseable entries fall back to the
    /// built-in colour for that slot. Without truecolor support RGB values
    /// are mapped onto the 256-colour palette.
    pub fn from_config(cfg: &ColorsConfig, truecolor: bool) -> Self {
        let defaults = ColorsConfig::default();
        let pick = |spec: &str, fallback: &str, slot: &'static str| {
            let color = parse_color(spec).unwrap_or_else(|| {
                tracing::warn!(target: "render", slot, spec, "invalid_color_using_default");
                parse_color(fallback).unwrap_or(Color::Reset)
            });
            if truecolor { color } else { to_ansi256(color) }
        };
        Self {
            normal: Colors::new(
                pick(&cfg.normal_fg, &defaults.normal_fg, "normal_fg"),
                pick(&cfg.normal_bg, &defaults.normal_bg, "normal_bg"),
            ),
            selected: Colors::new(
                pick(&cfg.selected_fg, &defaults.selected_fg, "selected_fg"),
                pick(&cfg.selected_bg, &defaults.selected_bg, "selected_bg"),
            ),
        }
    }

    /// Swapped normal colours, used for the cursor cell.
    pub fn cursor(&self) -> Colors {
        Colors {
            foreground: self.normal.background,
            background: self.normal.foreground,
        }
    }
}

/// Parse `#RGB`, `#RRGGBB` or a colour name (`red`, `dark_grey`, ...).
pub fn parse_color(spec: &str) -> Option<Color> {
    let spec = spec.trim();
    if let Some(hex) = spec.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Some(Color::Rgb {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            6 => Some(Color::Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            _ => None,
        };
    }
    Color::try_from(spec.to_ascii_lowercase().as_str()).ok()
}

// Nearest entry of the xterm 6x6x6 colour cube.
fn to_ansi256(color: Color) -> Color {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let Color::Rgb { r, g, b } = color else {
        return color;
    };
    let nearest = |v: u8| {
        LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, l)| (i16::from(**l) - i16::from(v)).unsigned_abs())
            .map(|(i, _)| i as u8)
            .unwrap_or(0)
    };
    Color::AnsiValue(16 + 36 * nearest(r) + 6 * nearest(g) + nearest(b))
}
