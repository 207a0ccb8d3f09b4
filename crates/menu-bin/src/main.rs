//! oxmenu: read items from stdin, let the user narrow and pick one, print it.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{Action, KeyTranslator, Outcome, dispatch};
use core_config::{CliOverrides, Config, MessageAlign, load_from};
use core_events::{
    CHANNEL_SEND_FAILURES, DismissTimerSource, EVENT_CHANNEL_CAP, Event, EventSourceRegistry,
    InputEvent, KEYPRESS_TOTAL, PASTE_BYTES, PASTE_EVENTS, ShutdownSignalSource,
};
use core_match::MasterList;
use core_render::{CellMeasure, RenderEngine, RenderOptions, Theme};
use core_state::Session;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalGuard};
use crossterm::{
    queue,
    terminal::{Clear, ClearType},
};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Once;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "oxmenu.log";

#[derive(Parser, Debug)]
#[command(
    name = "oxmenu",
    version,
    about = "Pick one line from stdin and print it to stdout"
)]
struct Args {
    /// Draw the menu at the bottom of the screen.
    #[arg(short = 'b', long)]
    bottom: bool,
    /// Display stdin as a left aligned message until the timeout.
    #[arg(short = 'e', long)]
    echo: bool,
    /// Like --echo, centred.
    #[arg(long = "echo-centre", visible_alias = "echo-center")]
    echo_centre: bool,
    /// Like --echo, right aligned.
    #[arg(long = "echo-right")]
    echo_right: bool,
    /// Seconds before a message is dismissed; 0 keeps it up.
    #[arg(long = "echo-timeout", value_name = "SECS")]
    echo_timeout: Option<u64>,
    /// Match case-insensitively.
    #[arg(short = 'i', long = "ignore-case", visible_alias = "insensitive")]
    ignore_case: bool,
    /// List items vertically in N rows; 0 keeps the horizontal bar.
    #[arg(short = 'l', long, value_name = "N")]
    lines: Option<usize>,
    #[arg(short = 'p', long)]
    prompt: Option<String>,
    /// Do not read stdin; show only PROMPT and the input.
    #[arg(long = "prompt-only", value_name = "PROMPT")]
    prompt_only: Option<String>,
    /// Accept as soon as a single match remains.
    #[arg(short = 'r', long = "return-early")]
    return_early: bool,
    #[arg(long = "nb", value_name = "COLOR")]
    normal_bg: Option<String>,
    #[arg(long = "nf", value_name = "COLOR")]
    normal_fg: Option<String>,
    #[arg(long = "sb", value_name = "COLOR")]
    selected_bg: Option<String>,
    #[arg(long = "sf", value_name = "COLOR")]
    selected_fg: Option<String>,
    /// Configuration file path (overrides discovery of `oxmenu.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

impl Args {
    fn echo_align(&self) -> Option<MessageAlign> {
        if self.echo_right {
            Some(MessageAlign::Right)
        } else if self.echo_centre {
            Some(MessageAlign::Centre)
        } else if self.echo {
            Some(MessageAlign::Left)
        } else {
            None
        }
    }

    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bottom: self.bottom,
            case_insensitive: self.ignore_case,
            return_early: self.return_early,
            lines: self.lines,
            prompt: self.prompt_only.clone().or_else(|| self.prompt.clone()),
            prompt_only: self.prompt_only.is_some(),
            echo: self.echo_align(),
            timeout_secs: self.echo_timeout,
            normal_bg: self.normal_bg.clone(),
            normal_fg: self.normal_fg.clone(),
            selected_bg: self.selected_bg.clone(),
            selected_fg: self.selected_fg.clone(),
        }
    }
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

struct RuntimeContext<'a> {
    menu: MenuLoop,
    config: Config,
    terminal_guard: TerminalGuard<'a>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn run<'a>(&'a mut self, args: &Args) -> Result<RuntimeContext<'a>> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let mut config = load_from(args.config.clone())?;
        config.apply_overrides(args.overrides());

        // Items are read before the keyboard is grabbed so a slow producer
        // never leaves the terminal in raw mode.
        let master = read_master(&config)?;

        let guard = self.backend.enter_guard()?;
        let caps = guard.backend().capabilities();
        let size = guard.backend().size()?;

        let theme = Theme::from_config(&config.file.colors, caps.truecolor);
        let engine = RenderEngine::new(RenderOptions::from_config(&config), theme, &master);
        let item_count = master.len();
        let settings = config.session_settings(engine.capacity(size, config.echo));
        let session = Session::new(master, settings, Box::new(CellMeasure));

        info!(
            target: "runtime.startup",
            items = item_count,
            echo = config.echo,
            prompt_only = config.prompt_only,
            list_rows = config.list_rows(),
            cols = size.0,
            rows = size.1,
            config_override = args.config.is_some(),
            "bootstrap_complete"
        );

        Ok(RuntimeContext {
            menu: MenuLoop::new(session, engine, size),
            config,
            terminal_guard: guard,
        })
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = log_dir();
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Subscriber already installed; dropping the guard stops the writer.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// `<cache>/oxmenu`, or the temp dir when that cannot be created.
fn log_dir() -> PathBuf {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("oxmenu")) else {
        return std::env::temp_dir();
    };
    match std::fs::create_dir_all(&dir) {
        Ok(()) => dir,
        Err(_) => std::env::temp_dir(),
    }
}

fn read_master(config: &Config) -> Result<MasterList> {
    if config.prompt_only {
        return Ok(MasterList::default());
    }
    let stdin = io::stdin();
    MasterList::read_from(stdin.lock()).context("read items from stdin")
}

/// Write the accepted payload, without a trailing newline.
fn emit<W: Write>(outcome: &Outcome, out: &mut W) -> Result<()> {
    if let Outcome::Accepted(payload) = outcome {
        out.write_all(payload.as_bytes())
            .and_then(|()| out.flush())
            .context("write selection to stdout")?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Redraw {
    None,
    Frame,
    /// Clear the whole screen first; the menu may have moved.
    Full,
}

#[derive(Debug, PartialEq, Eq)]
enum LoopControl {
    Continue { redraw: Redraw },
    Break { reason: ShutdownReason, outcome: Outcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    Accepted,
    Cancelled,
    CtrlC,
    Dismissed,
    Signal,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Accepted => "accepted",
            ShutdownReason::Cancelled => "cancelled",
            ShutdownReason::CtrlC => "ctrl_c",
            ShutdownReason::Dismissed => "dismissed",
            ShutdownReason::Signal => "signal",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

/// Session plus renderer, driven one event at a time. Holds no terminal
/// state so it can be exercised directly.
struct MenuLoop {
    session: Session,
    engine: RenderEngine,
    translator: KeyTranslator,
    size: (u16, u16),
}

impl MenuLoop {
    fn new(session: Session, engine: RenderEngine, size: (u16, u16)) -> Self {
        Self {
            session,
            engine,
            translator: KeyTranslator::new(),
            size,
        }
    }

    fn handle(&mut self, event: &Event) -> LoopControl {
        match event {
            Event::Input(InputEvent::Key(key)) => {
                match self.translator.translate(&self.session, key) {
                    Some(action) => self.apply(action),
                    None => LoopControl::Continue {
                        redraw: Redraw::None,
                    },
                }
            }
            Event::Input(InputEvent::Paste(text)) => self.apply(Action::PasteText(text.clone())),
            Event::Input(InputEvent::CtrlC) => match self.apply(Action::Cancel) {
                LoopControl::Break { outcome, .. } => LoopControl::Break {
                    reason: ShutdownReason::CtrlC,
                    outcome,
                },
                other => other,
            },
            Event::Input(InputEvent::Resize(cols, rows)) => self.resize(*cols, *rows),
            Event::Dismiss => match self.apply(Action::Dismiss) {
                LoopControl::Break { outcome, .. } => LoopControl::Break {
                    reason: ShutdownReason::Dismissed,
                    outcome,
                },
                other => other,
            },
            Event::Shutdown => LoopControl::Break {
                reason: ShutdownReason::Signal,
                outcome: Outcome::Cancelled,
            },
        }
    }

    fn apply(&mut self, action: Action) -> LoopControl {
        let span = tracing::trace_span!(target: "actions", "dispatch", action = action.label());
        let result = span.in_scope(|| dispatch(action, &mut self.session));
        trace!(
            target: "actions",
            dirty = result.dirty,
            finished = result.outcome.is_some(),
            "dispatch_outcome"
        );
        match result.outcome {
            Some(outcome) => LoopControl::Break {
                reason: match outcome {
                    Outcome::Accepted(_) => ShutdownReason::Accepted,
                    Outcome::Cancelled => ShutdownReason::Cancelled,
                },
                outcome,
            },
            None if result.dirty => LoopControl::Continue {
                redraw: Redraw::Frame,
            },
            None => LoopControl::Continue {
                redraw: Redraw::None,
            },
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) -> LoopControl {
        self.size = (cols, rows);
        let message = self.session.config().message;
        self.session.set_capacity(self.engine.capacity((cols, rows), message));
        trace!(target: "runtime", cols, rows, "resize");
        LoopControl::Continue {
            redraw: Redraw::Full,
        }
    }

    fn draw<W: Write>(&self, redraw: Redraw, out: &mut W) -> Result<()> {
        if redraw == Redraw::None {
            return Ok(());
        }
        if redraw == Redraw::Full {
            queue!(out, Clear(ClearType::All))?;
        }
        self.engine.draw(&self.session, self.size, out)
    }
}

struct MenuRuntime<'a> {
    menu: MenuLoop,
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    source_handles: Vec<tokio::task::JoinHandle<()>>,
    input_task: Option<tokio::task::JoinHandle<()>>,
    input_shutdown: Option<core_input::AsyncInputShutdown>,
    _terminal_guard: TerminalGuard<'a>,
}

impl<'a> MenuRuntime<'a> {
    fn new(
        context: RuntimeContext<'a>,
        tx: mpsc::Sender<Event>,
        rx: mpsc::Receiver<Event>,
        input_task: tokio::task::JoinHandle<()>,
        input_shutdown: core_input::AsyncInputShutdown,
        source_handles: Vec<tokio::task::JoinHandle<()>>,
    ) -> Self {
        Self {
            menu: context.menu,
            rx,
            tx: Some(tx),
            source_handles,
            input_task: Some(input_task),
            input_shutdown: Some(input_shutdown),
            _terminal_guard: context.terminal_guard,
        }
    }

    async fn run(&mut self) -> Outcome {
        self.redraw(Redraw::Full);

        let mut shutdown = (ShutdownReason::ChannelClosed, Outcome::Cancelled);
        while let Some(event) = self.rx.recv().await {
            match self.menu.handle(&event) {
                LoopControl::Continue { redraw } => self.redraw(redraw),
                LoopControl::Break { reason, outcome } => {
                    shutdown = (reason, outcome);
                    break;
                }
            }
        }

        self.rx.close();
        let (reason, outcome) = shutdown;
        self.finalize_shutdown(reason).await;
        outcome
    }

    fn redraw(&self, redraw: Redraw) {
        let mut err = io::stderr().lock();
        if let Err(e) = self.menu.draw(redraw, &mut err) {
            error!(target: "render", ?e, "render_error");
        }
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        if let Some(tx) = self.tx.take() {
            trace!(target: "runtime.shutdown", reason = reason.as_str(), "dropping_runtime_sender");
            drop(tx);
        }

        while let Some(handle) = self.source_handles.pop() {
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(_)) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_stopped"
                ),
                Ok(Err(err)) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_cancelled"
                ),
                Ok(Err(err)) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "event_source_task_error"
                ),
                Err(_) => warn!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_timeout"
                ),
            }
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            trace!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                "input_task_shutdown_signal"
            );
            shutdown.signal();
        }

        if let Some(handle) = self.input_task.take() {
            match handle.await {
                Ok(_) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_joined"
                ),
                Err(err) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_cancelled"
                ),
                Err(err) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "input_task_join_failed"
                ),
            }
        }

        info!(
            target: "runtime.shutdown",
            keypresses = KEYPRESS_TOTAL.load(Ordering::Relaxed),
            paste_events = PASTE_EVENTS.load(Ordering::Relaxed),
            paste_bytes = PASTE_BYTES.load(Ordering::Relaxed),
            send_failures = CHANNEL_SEND_FAILURES.load(Ordering::Relaxed),
            "input_counters"
        );
        log_shutdown_stage(reason, "complete");
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    let outcome = {
        let context = startup.run(&args)?;
        let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
        let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
        let mut registry = EventSourceRegistry::new();
        registry.register(ShutdownSignalSource::new());
        if context.config.echo
            && let Some(timeout) = context.config.message_timeout()
        {
            registry.register(DismissTimerSource::new(timeout));
        }
        let source_handles = registry.spawn_all(&tx);

        let mut runtime =
            MenuRuntime::new(context, tx, rx, input_task, input_shutdown, source_handles);
        runtime.run().await
        // Dropping the runtime releases the terminal before anything is printed.
    };

    emit(&outcome, &mut io::stdout().lock())?;
    let code = outcome.exit_code();
    info!(target: "runtime", exit_code = code, "exit");
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{KeyCode, KeyEvent};
    use core_state::Capacity;
    use pretty_assertions::assert_eq;

    fn menu(items: &[&str], cli: CliOverrides, cols: u16) -> MenuLoop {
        let mut config = Config::default();
        config.apply_overrides(cli);
        let master = MasterList::new(items.iter().copied());
        let options = RenderOptions::from_config(&config);
        let engine = RenderEngine::new(options, Theme::default(), &master);
        let size = (cols, 24);
        let settings = config.session_settings(engine.capacity(size, config.echo));
        let session = Session::new(master, settings, Box::new(CellMeasure));
        MenuLoop::new(session, engine, size)
    }

    fn key(code: KeyCode) -> Event {
        Event::Input(InputEvent::Key(KeyEvent::plain(code)))
    }

    fn type_str(m: &mut MenuLoop, s: &str) {
        for c in s.chars() {
            m.handle(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn flags_map_onto_overrides() {
        let args = Args::try_parse_from([
            "oxmenu", "-b", "-i", "-l", "5", "-p", "run:", "-r", "--nb", "#000", "--sf", "red",
        ])
        .expect("valid flags");
        let o = args.overrides();
        assert!(o.bottom && o.case_insensitive && o.return_early);
        assert_eq!(o.lines, Some(5));
        assert_eq!(o.prompt.as_deref(), Some("run:"));
        assert_eq!(o.normal_bg.as_deref(), Some("#000"));
        assert_eq!(o.selected_fg.as_deref(), Some("red"));
        assert_eq!(o.echo, None);
    }

    #[test]
    fn dmenu_spellings_are_accepted() {
        let args = Args::try_parse_from(["oxmenu", "--insensitive", "--prompt-only", "Password:"])
            .expect("valid flags");
        let o = args.overrides();
        assert!(o.case_insensitive);
        assert!(o.prompt_only);
        assert_eq!(o.prompt.as_deref(), Some("Password:"));

        let args = Args::try_parse_from(["oxmenu", "-p", "run:"]).expect("valid flags");
        assert!(!args.overrides().prompt_only);
    }

    #[test]
    fn most_specific_echo_alignment_wins() {
        let args = Args::try_parse_from(["oxmenu", "-e", "--echo-center", "--echo-timeout", "7"])
            .expect("valid flags");
        assert_eq!(args.echo_align(), Some(MessageAlign::Centre));
        assert_eq!(args.overrides().timeout_secs, Some(7));
        let args =
            Args::try_parse_from(["oxmenu", "--echo-centre", "--echo-right"]).expect("valid flags");
        assert_eq!(args.echo_align(), Some(MessageAlign::Right));
    }

    #[test]
    fn typing_then_enter_accepts_selection() {
        let mut m = menu(&["alpha", "beta", "gamma"], CliOverrides::default(), 80);
        type_str(&mut m, "ga");
        assert_eq!(m.session.query(), "ga");
        let control = m.handle(&key(KeyCode::Enter));
        assert_eq!(
            control,
            LoopControl::Break {
                reason: ShutdownReason::Accepted,
                outcome: Outcome::Accepted("gamma".into()),
            }
        );
    }

    #[test]
    fn escape_and_ctrl_c_cancel() {
        let mut m = menu(&["alpha"], CliOverrides::default(), 80);
        assert_eq!(
            m.handle(&key(KeyCode::Esc)),
            LoopControl::Break {
                reason: ShutdownReason::Cancelled,
                outcome: Outcome::Cancelled,
            }
        );
        let mut m = menu(&["alpha"], CliOverrides::default(), 80);
        assert_eq!(
            m.handle(&Event::Input(InputEvent::CtrlC)),
            LoopControl::Break {
                reason: ShutdownReason::CtrlC,
                outcome: Outcome::Cancelled,
            }
        );
    }

    #[test]
    fn return_early_finishes_while_typing() {
        let cli = CliOverrides {
            return_early: true,
            ..CliOverrides::default()
        };
        let mut m = menu(&["only", "other"], cli, 80);
        assert_eq!(
            m.handle(&key(KeyCode::Char('n'))),
            LoopControl::Break {
                reason: ShutdownReason::Accepted,
                outcome: Outcome::Accepted("only".into()),
            }
        );
    }

    #[test]
    fn message_mode_ignores_keys_until_dismissed() {
        let cli = CliOverrides {
            echo: Some(MessageAlign::Right),
            ..CliOverrides::default()
        };
        let mut m = menu(&["hello"], cli, 80);
        assert_eq!(
            m.handle(&key(KeyCode::Char('x'))),
            LoopControl::Continue {
                redraw: Redraw::None
            }
        );
        assert_eq!(
            m.handle(&Event::Dismiss),
            LoopControl::Break {
                reason: ShutdownReason::Dismissed,
                outcome: Outcome::Accepted(String::new()),
            }
        );
    }

    #[test]
    fn paste_inserts_first_line() {
        let mut m = menu(&["alpha", "beta"], CliOverrides::default(), 80);
        let control = m.handle(&Event::Input(InputEvent::Paste("be\nignored".into())));
        assert_eq!(
            control,
            LoopControl::Continue {
                redraw: Redraw::Frame
            }
        );
        assert_eq!(m.session.query(), "be");
        assert_eq!(m.session.selected_text(), Some("beta"));
    }

    #[test]
    fn resize_recomputes_capacity_and_requests_full_redraw() {
        let mut m = menu(&["one", "two", "three"], CliOverrides::default(), 80);
        let before = m.session.config().capacity;
        let control = m.handle(&Event::Input(InputEvent::Resize(40, 10)));
        assert_eq!(
            control,
            LoopControl::Continue {
                redraw: Redraw::Full
            }
        );
        assert_eq!(m.size, (40, 10));
        assert_ne!(m.session.config().capacity, before);
        assert_eq!(m.session.config().capacity, m.engine.capacity((40, 10), false));
    }

    #[test]
    fn resize_clamps_list_to_terminal_height() {
        let cli = CliOverrides {
            lines: Some(10),
            ..CliOverrides::default()
        };
        let items: Vec<String> = (0..20).map(|i| format!("item{i}")).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let mut m = menu(&refs, cli, 80);
        assert_eq!(m.session.config().capacity, Capacity::Rows(10));

        m.handle(&Event::Input(InputEvent::Resize(80, 5)));
        assert_eq!(m.session.config().capacity, Capacity::Rows(4));
        for _ in 0..6 {
            m.handle(&key(KeyCode::Down));
        }
        let selected = m.session.selected().expect("selection");
        assert_eq!(selected, 6);
        assert!(m.session.window().visible(20).len() <= 4);
        assert!(m.session.window().contains(selected));
    }

    #[test]
    fn shutdown_event_cancels() {
        let mut m = menu(&["one"], CliOverrides::default(), 80);
        assert_eq!(
            m.handle(&Event::Shutdown),
            LoopControl::Break {
                reason: ShutdownReason::Signal,
                outcome: Outcome::Cancelled,
            }
        );
    }

    #[test]
    fn full_redraw_clears_screen_first() {
        let m = menu(&["one"], CliOverrides::default(), 40);
        let mut out = Vec::new();
        m.draw(Redraw::None, &mut out).expect("noop draw");
        assert!(out.is_empty());
        m.draw(Redraw::Full, &mut out).expect("draw");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("\x1b[2J"), "{text:?}");
        assert!(text.contains(" one "));
    }

    #[test]
    fn emit_writes_payload_without_newline() {
        let mut out = Vec::new();
        emit(&Outcome::Accepted("pick".into()), &mut out).expect("emit");
        assert_eq!(out, b"pick");
        let mut out = Vec::new();
        emit(&Outcome::Cancelled, &mut out).expect("emit");
        assert!(out.is_empty());
    }

    #[test]
    fn shutdown_reason_display() {
        assert_eq!(ShutdownReason::CtrlC.to_string(), "ctrl_c");
        assert_eq!(ShutdownReason::Dismissed.to_string(), "dismissed");
    }
}
