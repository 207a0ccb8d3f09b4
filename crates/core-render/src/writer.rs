//! Terminal writer abstraction.
//!
//! A frame is a flat list of commands built without touching the terminal,
//! then flushed in order with a single `flush` of the underlying writer.
//! Keeping the commands inspectable is what lets frame tests run without a
//! terminal.
//!
//! Design invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * All positions are absolute (0,0) origin; caller ensures bounds.
//! * Colours are sticky until the next `Colors` command; the flush ends with
//!   a colour reset.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Colors, Print, ResetColor, SetColors},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    /// Clear the current line with the active background colour.
    ClearLine,
    Colors(Colors),
    Print(String),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }

    pub fn colors(&mut self, colors: Colors) {
        self.cmds.push(Command::Colors(colors));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Concatenated printed text, for diagnostics and tests.
    pub fn printed(&self) -> String {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                Command::Print(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Colors(colors) => queue!(out, SetColors(colors))?,
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(())
    }
}
