//! Terminal backend abstraction and crossterm implementation.
//!
//! The menu is drawn on stderr so that stdout carries nothing but the
//! selected item. Keyboard input is read by crossterm from the controlling
//! terminal, which keeps working when stdin is the item pipe.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, stderr};
use std::thread;
use std::time::Duration;

pub mod capabilities;
pub use capabilities::TerminalCapabilities;

/// Attempts made to put the terminal into raw mode before giving up.
pub const RAW_MODE_ATTEMPTS: u32 = 1000;
pub const RAW_MODE_RETRY_DELAY: Duration = Duration::from_millis(1);

#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("cannot grab keyboard: raw mode unavailable after {attempts} attempts")]
    InputUnavailable {
        attempts: u32,
        #[source]
        source: io::Error,
    },
}

/// Run `acquire` until it succeeds or `attempts` is exhausted, sleeping
/// `delay` between tries. Returns the attempt number that succeeded.
pub fn acquire_with_retry<F>(
    attempts: u32,
    delay: Duration,
    mut acquire: F,
) -> Result<u32, TerminalError>
where
    F: FnMut() -> io::Result<()>,
{
    let mut last_err = None;
    for attempt in 1..=attempts.max(1) {
        match acquire() {
            Ok(()) => {
                if attempt > 1 {
                    tracing::debug!(target: "terminal", attempt, "raw_mode_acquired_after_retry");
                }
                return Ok(attempt);
            }
            Err(e) => {
                last_err = Some(e);
                if attempt < attempts {
                    thread::sleep(delay);
                }
            }
        }
    }
    let source = last_err.unwrap_or_else(|| io::Error::other("raw mode unavailable"));
    tracing::warn!(target: "terminal", attempts, error = %source, "raw_mode_unavailable");
    Err(TerminalError::InputUnavailable { attempts, source })
}

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    /// Current size as (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;
}

pub struct CrosstermBackend {
    entered: bool,
    capabilities: TerminalCapabilities,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            entered: false,
            capabilities: TerminalCapabilities::default(),
        }
    }

    /// Capabilities probed on `enter`; defaults before that.
    pub fn capabilities(&self) -> TerminalCapabilities {
        self.capabilities
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalGuard<'_> {
    pub fn backend(&self) -> &CrosstermBackend {
        self.backend
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if self.entered {
            return Ok(());
        }
        acquire_with_retry(RAW_MODE_ATTEMPTS, RAW_MODE_RETRY_DELAY, enable_raw_mode)?;
        self.capabilities = TerminalCapabilities::detect();
        let setup = execute!(stderr(), EnterAlternateScreen, Hide, EnableBracketedPaste);
        if let Err(e) = setup {
            let _ = disable_raw_mode();
            return Err(e).context("terminal setup on stderr");
        }
        if self.capabilities.keyboard_enhancement {
            execute!(
                stderr(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )
            .context("enable keyboard enhancement")?;
        }
        self.entered = true;
        tracing::info!(
            target: "terminal",
            keyboard_enhancement = self.capabilities.keyboard_enhancement,
            truecolor = self.capabilities.truecolor,
            "terminal_entered"
        );
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        if self.capabilities.keyboard_enhancement {
            execute!(stderr(), PopKeyboardEnhancementFlags)?;
        }
        execute!(stderr(), DisableBracketedPaste, LeaveAlternateScreen, Show)?;
        disable_raw_mode()?;
        tracing::info!(target: "terminal", "terminal_left");
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        crossterm::terminal::size().context("query terminal size")
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}
