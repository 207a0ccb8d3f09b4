//! Core event types and async event sources for oxmenu.
//!
//! The binary owns one bounded mpsc channel. The input task and any
//! registered `AsyncEventSource` push `Event`s into it; the single event loop
//! drains it and feeds the menu session one event at a time.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::AtomicU64;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Capacity of the runtime event channel. Producers use `send().await`, so a
/// full channel parks the producer instead of dropping keystrokes.
pub const EVENT_CHANNEL_CAP: usize = 1024;

// Relaxed counters, inspected by tests and logged at shutdown.
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0);
pub static PASTE_EVENTS: AtomicU64 = AtomicU64::new(0);
pub static PASTE_BYTES: AtomicU64 = AtomicU64::new(0);

/// Top-level event enum consumed by the central event loop.
#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    /// The display-only timeout expired.
    Dismiss,
    /// The process was asked to terminate (SIGTERM, SIGHUP).
    Shutdown,
}

/// Normalized input events.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Complete bracketed paste payload. Never logged verbatim.
    Paste(String),
    /// Interrupt surfaced distinctly so it cancels even in display-only mode.
    CtrlC,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }
}

/// Logical keys the menu understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

/// Async event producer. Implementors spawn one background task that pushes
/// `Event`s into the shared channel and stops once the channel is closed.
pub trait AsyncEventSource: Send + 'static {
    /// Stable identifier used for logging.
    fn name(&self) -> &'static str;
    /// Consume self and spawn the background task.
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Registered event sources, spawned together at startup.
pub struct EventSourceRegistry {
    sources: Vec<Box<dyn AsyncEventSource>>,
}

impl Default for EventSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn register<S: AsyncEventSource>(&mut self, src: S) {
        self.sources.push(Box::new(src));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Spawn all registered sources, each with its own `Sender` clone. The
    /// registry is drained so a second call spawns nothing.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        let mut out = Vec::with_capacity(self.sources.len());
        for src in self.sources.drain(..) {
            let name = src.name();
            tracing::info!(target: "runtime.events", source = name, "spawning event source");
            out.push(src.spawn(tx.clone()));
        }
        out
    }
}

/// Emits a single `Event::Dismiss` after `timeout`. Backs the display-only
/// mode's auto-dismiss.
pub struct DismissTimerSource {
    timeout: Duration,
}

impl DismissTimerSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl AsyncEventSource for DismissTimerSource {
    fn name(&self) -> &'static str {
        "dismiss_timer"
    }

    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        let timeout = self.timeout;
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => {
                    if tx.send(Event::Dismiss).await.is_err() {
                        tracing::trace!(target: "runtime.events", "dismiss_channel_closed");
                    }
                }
                _ = tx.closed() => {}
            }
        })
    }
}

type Trigger = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Emits `Event::Shutdown` when the process receives a termination signal,
/// so the runtime can leave raw mode before exiting.
pub struct ShutdownSignalSource {
    trigger: Trigger,
}

impl Default for ShutdownSignalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignalSource {
    pub fn new() -> Self {
        Self::with_trigger(termination_signal())
    }

    /// Fire on `trigger` instead of an OS signal.
    pub fn with_trigger<F>(trigger: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            trigger: Box::pin(trigger),
        }
    }
}

impl AsyncEventSource for ShutdownSignalSource {
    fn name(&self) -> &'static str {
        "shutdown_signal"
    }

    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        let trigger = self.trigger;
        tokio::spawn(async move {
            tokio::select! {
                _ = trigger => {
                    tracing::info!(target: "runtime.events", "termination_signal");
                    if tx.send(Event::Shutdown).await.is_err() {
                        tracing::trace!(target: "runtime.events", "shutdown_channel_closed");
                    }
                }
                _ = tx.closed() => {}
            }
        })
    }
}

#[cfg(unix)]
async fn termination_signal() {
    use tokio::signal::unix::{SignalKind, signal};
    match (signal(SignalKind::terminate()), signal(SignalKind::hangup())) {
        (Ok(mut term), Ok(mut hup)) => {
            tokio::select! {
                _ = term.recv() => {}
                _ = hup.recv() => {}
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(target: "runtime.events", error = %e, "signal_handler_unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn termination_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(target: "runtime.events", error = %e, "signal_handler_unavailable");
        std::future::pending::<()>().await;
    }
}
