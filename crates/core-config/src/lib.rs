//! Configuration loading and parsing.
//!
//! Parses `oxmenu.toml` (or an override path provided by the binary). Every
//! field has a default, unknown fields are ignored, and a file that fails to
//! parse falls back to defaults with a warning. Command line flags are merged
//! on top through `Config::apply_overrides`, so the precedence is
//! flag > file > built-in default.

use anyhow::Result;
use core_match::CaseMode;
use core_state::{Capacity, SessionConfig};
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxmenu.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct MenuConfig {
    /// Draw the menu at the bottom of the screen.
    pub bottom: bool,
    pub case_insensitive: bool,
    pub return_early: bool,
    /// Vertical list rows; 0 selects the single-line horizontal bar.
    pub lines: usize,
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageAlign {
    #[default]
    Left,
    #[serde(alias = "center")]
    Centre,
    Right,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MessageConfig {
    pub align: MessageAlign,
    pub timeout_secs: u64,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            align: MessageAlign::Left,
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl MessageConfig {
    const fn default_timeout_secs() -> u64 {
        3
    }
}

/// Colour specs as written by the user (`#RGB`, `#RRGGBB` or a name).
/// Parsing into terminal colours happens in the renderer.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColorsConfig {
    pub normal_bg: String,
    pub normal_fg: String,
    pub selected_bg: String,
    pub selected_fg: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            normal_bg: "#222222".to_string(),
            normal_fg: "#bbbbbb".to_string(),
            selected_bg: "#005577".to_string(),
            selected_fg: "#eeeeee".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub message: MessageConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
}

/// Values supplied on the command line. `None` / `false` leaves the file
/// value in place; boolean flags can only switch a feature on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub bottom: bool,
    pub case_insensitive: bool,
    pub return_early: bool,
    pub lines: Option<usize>,
    pub prompt: Option<String>,
    pub prompt_only: bool,
    /// Display-only mode with the given alignment.
    pub echo: Option<MessageAlign>,
    pub timeout_secs: Option<u64>,
    pub normal_bg: Option<String>,
    pub normal_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub selected_fg: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    /// Display-only mode; only reachable from the command line.
    pub echo: bool,
    /// Skip reading stdin; the menu shows the prompt alone.
    pub prompt_only: bool,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxmenu").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_file_absent");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                ..Config::default()
            })
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Merge command line values over the file values.
    pub fn apply_overrides(&mut self, cli: CliOverrides) {
        let menu = &mut self.file.menu;
        menu.bottom |= cli.bottom;
        menu.case_insensitive |= cli.case_insensitive;
        menu.return_early |= cli.return_early;
        if let Some(lines) = cli.lines {
            menu.lines = lines;
        }
        if cli.prompt.is_some() {
            menu.prompt = cli.prompt;
        }

        if let Some(align) = cli.echo {
            self.echo = true;
            self.file.message.align = align;
        }
        if let Some(secs) = cli.timeout_secs {
            self.file.message.timeout_secs = secs;
        }
        self.prompt_only |= cli.prompt_only;

        let colors = &mut self.file.colors;
        for (slot, value) in [
            (&mut colors.normal_bg, cli.normal_bg),
            (&mut colors.normal_fg, cli.normal_fg),
            (&mut colors.selected_bg, cli.selected_bg),
            (&mut colors.selected_fg, cli.selected_fg),
        ] {
            if let Some(v) = value {
                *slot = v;
            }
        }

        info!(
            target: "config",
            lines = self.file.menu.lines,
            bottom = self.file.menu.bottom,
            return_early = self.file.menu.return_early,
            echo = self.echo,
            "config_effective"
        );
    }

    pub fn case_mode(&self) -> CaseMode {
        if self.file.menu.case_insensitive {
            CaseMode::Insensitive
        } else {
            CaseMode::Sensitive
        }
    }

    /// Rows in list mode, `None` for the horizontal bar.
    pub fn list_rows(&self) -> Option<usize> {
        (self.file.menu.lines > 0).then_some(self.file.menu.lines)
    }

    pub fn prompt(&self) -> &str {
        self.file.menu.prompt.as_deref().unwrap_or("")
    }

    /// Delay before a message is dismissed; `None` for a zero timeout, which
    /// keeps the message up until it is cancelled.
    pub fn message_timeout(&self) -> Option<Duration> {
        (self.file.message.timeout_secs > 0)
            .then(|| Duration::from_secs(self.file.message.timeout_secs))
    }

    /// Session options for the core. The capacity comes from the renderer,
    /// which knows the terminal size.
    pub fn session_settings(&self, capacity: Capacity) -> SessionConfig {
        SessionConfig {
            case: self.case_mode(),
            return_early: self.file.menu.return_early,
            capacity,
            message: self.echo,
        }
    }
}
