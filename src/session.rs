//! The REPL session
//!
//! One [`Session`] per terminal widget. It turns keystrokes into statements,
//! runs them one at a time, and services the interpreter's `input()` calls
//! without blocking keystroke handling.
//!
//! ## Modes
//!
//! - `Normal`: typing a statement. Enter submits it, or starts a
//!   multi-line statement when the line is incomplete.
//! - `Multiline`: collecting continuation lines. A blank line ends the
//!   statement and submits the joined text.
//! - `AwaitingInput`: the running program asked for a line. Enter answers
//!   the request and the session returns to the mode it was in.
//!
//! ## Concurrency
//!
//! Everything runs on one task. [`Session::run`] selects over host events,
//! input requests and the in-flight statement. A statement that waits on
//! `input()` simply stays parked in the select while keystrokes keep flowing.
//! Keystrokes that arrive while a statement runs and no input is requested
//! are queued and replayed afterwards.

use futures::future::{LocalBoxFuture, OptionFuture};
use futures::FutureExt;
use std::collections::VecDeque;
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

use crate::analyzer::is_incomplete;
use crate::ansi::Color;
use crate::bridge::{InputBridge, InputRequest};
use crate::config::ReplConfig;
use crate::error::{Error, Result};
use crate::execution::{ExecutionCoordinator, ExecutionOutcome};
use crate::history::{HistoryLog, Recall};
use crate::interpreter::Interpreter;
use crate::terminal::{parse_keys, Key, LineEditor, MultilineBuffer, TerminalDisplay};

/// Input mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Multiline,
    AwaitingInput,
}

/// Events a host feeds into [`Session::run`]
pub enum SessionEvent<I> {
    /// Raw data from one keystroke (or a paste)
    Keystroke(String),
    /// Code sent from an editor pane, executed as one statement
    RunSource(String),
    /// Clear the terminal
    Clear,
    /// The interpreter finished loading
    Attach(I),
    /// Tear the session down immediately
    Shutdown,
}

/// Sending half of a session's event channel
pub struct SessionHandle<I> {
    sender: mpsc::UnboundedSender<SessionEvent<I>>,
}

impl<I> Clone for SessionHandle<I> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<I> SessionHandle<I> {
    /// Create a handle and the receiver to pass to [`Session::run`]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionEvent<I>>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn send(&self, event: SessionEvent<I>) -> Result<()> {
        self.sender.send(event).map_err(|_| Error::SessionClosed)
    }

    pub fn keystroke(&self, data: impl Into<String>) -> Result<()> {
        self.send(SessionEvent::Keystroke(data.into()))
    }

    pub fn run_source(&self, source: impl Into<String>) -> Result<()> {
        self.send(SessionEvent::RunSource(source.into()))
    }

    pub fn clear(&self) -> Result<()> {
        self.send(SessionEvent::Clear)
    }

    pub fn attach(&self, interpreter: I) -> Result<()> {
        self.send(SessionEvent::Attach(interpreter))
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(SessionEvent::Shutdown)
    }
}

/// Where the interpreter currently is
enum Slot<I> {
    /// Not loaded yet
    Detached,
    /// Ready for the next statement
    Idle(I),
    /// Owned by the in-flight statement
    Busy,
}

/// A running statement; yields the interpreter back when done
type InFlight<I> = LocalBoxFuture<'static, (I, ExecutionOutcome)>;

/// What woke the event loop
enum Wake<I> {
    Input(InputRequest),
    Finished(I, ExecutionOutcome),
    Event(Option<SessionEvent<I>>),
}

/// The REPL state owned by one terminal widget
pub struct Session<I, D> {
    id: Uuid,
    mode: Mode,
    /// Mode to return to once a pending input request is answered
    resume_mode: Mode,
    editor: LineEditor,
    history: HistoryLog,
    multiline: MultilineBuffer,
    pending_input: Option<InputRequest>,
    interpreter: Slot<I>,
    in_flight: Option<InFlight<I>>,
    /// Keys received while a statement runs without asking for input
    typeahead: VecDeque<Key>,
    bridge: InputBridge,
    coordinator: ExecutionCoordinator,
    display: D,
    config: ReplConfig,
}

impl<I, D> Session<I, D>
where
    I: Interpreter + 'static,
    D: TerminalDisplay,
{
    /// Open a session whose interpreter is still loading
    pub fn new(display: D, config: ReplConfig) -> Self {
        let mut session = Self::build(display, config);
        session.write_banner(true);
        let loading = session.config.colors.pending.paint(&session.config.messages.loading);
        session.display.write_line(&loading);
        session.display.write_line("");
        session.write_prompt();
        session
    }

    /// Open a session with its interpreter already available
    pub fn with_interpreter(interpreter: I, display: D, config: ReplConfig) -> Self {
        let mut session = Self::build(display, config);
        session.install(interpreter);
        session.write_banner(true);
        session.write_prompt();
        session
    }

    fn build(display: D, config: ReplConfig) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "REPL session opened");
        Self {
            id,
            mode: Mode::Normal,
            resume_mode: Mode::Normal,
            editor: LineEditor::new(),
            history: HistoryLog::with_limit(config.history.max_entries),
            multiline: MultilineBuffer::new(),
            pending_input: None,
            interpreter: Slot::Detached,
            in_flight: None,
            typeahead: VecDeque::new(),
            bridge: InputBridge::new(),
            coordinator: ExecutionCoordinator::new(config.colors.clone()),
            display,
            config,
        }
    }

    /// Attach the interpreter once it has loaded.
    ///
    /// Registers the input callback and announces readiness. Fails if an
    /// interpreter is already attached.
    pub fn attach_interpreter(&mut self, interpreter: I) -> Result<()> {
        if !matches!(self.interpreter, Slot::Detached) {
            return Err(Error::InterpreterAlreadyAttached);
        }
        self.install(interpreter);

        let ready = self.config.colors.notice.paint(&self.config.messages.ready);
        self.display.write_line("");
        self.display.write_line(&ready);
        self.display.write_line("");
        self.redraw_input();
        Ok(())
    }

    fn install(&mut self, mut interpreter: I) {
        interpreter.register_input_callback(self.bridge.requester());
        self.interpreter = Slot::Idle(interpreter);
        info!(session = %self.id, "Interpreter attached");
    }

    /// Drive the session until the event channel closes or `Shutdown` arrives.
    ///
    /// When the channel closes, a statement still running is allowed to
    /// finish; if it waits on input, the request is answered with an empty
    /// line since no more keystrokes can come.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<SessionEvent<I>>) {
        let mut events_open = true;

        loop {
            if !events_open {
                if self.in_flight.is_none() {
                    break;
                }
                if let Some(request) = self.pending_input.take() {
                    debug!(session = %self.id, "Event channel closed; dropping pending input request");
                    drop(request);
                    self.editor.clear();
                    self.mode = self.resume_mode;
                }
            }

            let wake = tokio::select! {
                biased;
                Some(request) = self.bridge.next_request() => Wake::Input(request),
                Some((interpreter, outcome)) = OptionFuture::from(self.in_flight.as_mut()) => {
                    Wake::Finished(interpreter, outcome)
                }
                event = events.recv(), if events_open => Wake::Event(event),
                else => break,
            };

            match wake {
                Wake::Input(request) => self.begin_input(request),
                Wake::Finished(interpreter, outcome) => self.finish_execution(interpreter, outcome),
                Wake::Event(None) => {
                    debug!(session = %self.id, "Event channel closed");
                    events_open = false;
                }
                Wake::Event(Some(SessionEvent::Shutdown)) => {
                    self.teardown();
                    break;
                }
                Wake::Event(Some(event)) => self.dispatch(event),
            }
        }
    }

    fn dispatch(&mut self, event: SessionEvent<I>) {
        match event {
            SessionEvent::Keystroke(data) => self.handle_keystroke(&data),
            SessionEvent::RunSource(source) => self.run_source(&source),
            SessionEvent::Clear => self.clear(),
            SessionEvent::Attach(interpreter) => {
                if let Err(e) = self.attach_interpreter(interpreter) {
                    warn!(session = %self.id, "Ignoring interpreter: {}", e);
                }
            }
            SessionEvent::Shutdown => self.teardown(),
        }
    }

    /// Feed raw keystroke data.
    ///
    /// A submitted statement starts running but is only driven by
    /// [`run`](Self::run).
    pub fn handle_keystroke(&mut self, data: &str) {
        self.typeahead.extend(parse_keys(data));
        self.drain_typeahead();
    }

    /// Execute code sent from an editor pane as one statement
    pub fn run_source(&mut self, source: &str) {
        if self.in_flight.is_some() {
            warn!(session = %self.id, "A statement is already running; editor code ignored");
            return;
        }
        if source.trim().is_empty() {
            return;
        }

        // abandon whatever was being typed
        let typed = self.editor.cursor_offset();
        self.editor.clear();
        self.display.erase(typed);
        self.multiline.clear();
        self.mode = Mode::Normal;

        let header = self.config.colors.info.paint(&self.config.messages.editor_header);
        self.display.write_line(&header);
        let prompt = self.config.colors.info.paint(&self.config.prompt.primary);
        for line in source.lines() {
            self.display.write_line(&format!("{}{}", prompt, line));
        }
        self.submit(source.to_string(), false);
    }

    /// Clear the terminal and redraw the banner and prompt.
    ///
    /// History is kept; the line being typed and any open multi-line
    /// statement are dropped.
    pub fn clear(&mut self) {
        self.display.clear();
        self.write_banner(false);
        self.editor.clear();
        self.multiline.clear();
        self.history.reset_cursor();

        match self.mode {
            Mode::AwaitingInput => {
                if let Some(prompt) = self.pending_input.as_ref().map(|r| r.prompt().to_string()) {
                    self.display.write(&prompt);
                }
            }
            Mode::Multiline | Mode::Normal => {
                self.mode = Mode::Normal;
                if self.in_flight.is_none() {
                    self.write_prompt();
                }
            }
        }
    }

    /// Drop the pending input request and the running statement
    fn teardown(&mut self) {
        if self.pending_input.take().is_some() {
            debug!(session = %self.id, "Pending input request dropped on teardown");
        }
        if self.in_flight.take().is_some() {
            debug!(session = %self.id, "Running statement dropped on teardown");
        }
        self.typeahead.clear();
        self.mode = Mode::Normal;
        info!(session = %self.id, "REPL session closed");
    }

    fn accepts_keys(&self) -> bool {
        self.in_flight.is_none() || self.mode == Mode::AwaitingInput
    }

    fn drain_typeahead(&mut self) {
        // a request may already be queued by the statement's last poll
        if self.in_flight.is_some() && self.pending_input.is_none() {
            if let Some(request) = self.bridge.try_next_request() {
                self.begin_input(request);
                return;
            }
        }
        while self.accepts_keys() {
            match self.typeahead.pop_front() {
                Some(key) => self.apply_key(key),
                None => break,
            }
        }
    }

    fn apply_key(&mut self, key: Key) {
        match key {
            Key::Text(text) => {
                let echoed = self.editor.insert(&text);
                self.display.write(&echoed);
            }
            Key::Backspace => {
                if let Some(width) = self.editor.backspace() {
                    self.display.erase(width);
                }
            }
            Key::Enter => self.enter(),
            Key::ArrowUp => self.history_older(),
            Key::ArrowDown => self.history_newer(),
            Key::ArrowLeft | Key::ArrowRight | Key::Ignored => {
                trace!(session = %self.id, "Ignored key {:?}", key);
            }
        }
    }

    fn enter(&mut self) {
        let line = self.editor.take();
        self.display.write_line("");

        match self.mode {
            Mode::AwaitingInput => {
                self.mode = self.resume_mode;
                match self.pending_input.take() {
                    Some(request) => request.resolve(line),
                    None => warn!(session = %self.id, "Awaiting input with no pending request"),
                }
                debug!(session = %self.id, "Input request resolved; back to {:?}", self.mode);
            }
            Mode::Multiline => {
                let terminator = line.trim().is_empty();
                self.multiline.push(line);
                if terminator {
                    let statement = self.multiline.finish();
                    self.mode = Mode::Normal;
                    self.submit(statement, true);
                } else {
                    self.write_prompt();
                }
            }
            Mode::Normal => {
                if line.trim().is_empty() {
                    self.write_prompt();
                } else if is_incomplete(&line) {
                    self.multiline.push(line);
                    self.mode = Mode::Multiline;
                    debug!(session = %self.id, "Entering multi-line mode");
                    self.write_prompt();
                } else {
                    self.submit(line.trim().to_string(), true);
                }
            }
        }
    }

    fn history_older(&mut self) {
        if self.mode != Mode::Normal {
            return;
        }
        if let Some(entry) = self.history.older() {
            self.replace_line(&entry);
        }
    }

    fn history_newer(&mut self) {
        if self.mode != Mode::Normal {
            return;
        }
        match self.history.newer() {
            Some(Recall::Entry(entry)) => self.replace_line(&entry),
            Some(Recall::Cleared) => self.replace_line(""),
            None => {}
        }
    }

    fn replace_line(&mut self, text: &str) {
        let erased = self.editor.replace(text);
        self.display.erase(erased);
        self.display.write(text);
    }

    /// Start running a complete statement
    fn submit(&mut self, statement: String, record: bool) {
        let interpreter = match std::mem::replace(&mut self.interpreter, Slot::Busy) {
            Slot::Idle(interpreter) => interpreter,
            Slot::Detached => {
                self.interpreter = Slot::Detached;
                let message = self.config.colors.error.paint(&self.config.messages.not_ready);
                self.display.write_line(&message);
                self.write_prompt();
                return;
            }
            Slot::Busy => {
                warn!(session = %self.id, "Statement submitted while another is running");
                return;
            }
        };

        // recorded before the outcome is known: failing statements are kept too
        if record {
            self.history.record(statement.clone());
        }
        debug!(session = %self.id, "Executing statement ({} bytes)", statement.len());

        let future = async move {
            let mut interpreter = interpreter;
            let outcome = ExecutionCoordinator::execute(&mut interpreter, &statement).await;
            (interpreter, outcome)
        };
        self.in_flight = Some(future.boxed_local());
    }

    fn begin_input(&mut self, request: InputRequest) {
        if request.is_abandoned() {
            debug!(session = %self.id, "Skipping abandoned input request");
            return;
        }
        if self.pending_input.is_some() {
            // the requester's guard makes this unreachable; answer without disturbing the first
            warn!(session = %self.id, "Second input request while one is pending");
            request.resolve(String::new());
            return;
        }

        self.display.write(request.prompt());
        self.resume_mode = self.mode;
        self.mode = Mode::AwaitingInput;
        self.pending_input = Some(request);
        debug!(session = %self.id, "Awaiting input");
        self.drain_typeahead();
    }

    fn finish_execution(&mut self, interpreter: I, outcome: ExecutionOutcome) {
        self.in_flight = None;
        self.interpreter = Slot::Idle(interpreter);

        // a program that stopped waiting leaves its request behind
        if self.pending_input.take().is_some() || self.mode == Mode::AwaitingInput {
            self.editor.clear();
        }

        self.coordinator.report(&outcome, &mut self.display);
        self.mode = Mode::Normal;
        self.write_prompt();
        self.drain_typeahead();
    }

    fn write_banner(&mut self, full: bool) {
        let banner = &self.config.banner;
        if !banner.enabled {
            return;
        }
        let colors = &self.config.colors;
        let mut rows: Vec<(String, Color)> = vec![(banner.title.clone(), colors.banner_title)];
        if full {
            rows.extend(banner.lines.iter().map(|l| (l.clone(), colors.pending)));
        }

        let inner = rows.iter().map(|(t, _)| t.width()).max().unwrap_or(0) + 4;
        let border = colors.banner_border;
        let edge = "═".repeat(inner);

        let mut out = Vec::with_capacity(rows.len() + 2);
        out.push(border.paint(&format!("╔{}╗", edge)));
        for (text, color) in &rows {
            let pad = " ".repeat(inner - 2 - text.width());
            out.push(format!(
                "{}  {}{}{}",
                border.paint("║"),
                color.paint(text),
                pad,
                border.paint("║")
            ));
        }
        out.push(border.paint(&format!("╚{}╝", edge)));

        for line in out {
            self.display.write_line(&line);
        }
        self.display.write_line("");
    }

    fn current_prompt(&self) -> &str {
        match self.mode {
            Mode::Multiline => &self.config.prompt.continuation,
            _ => &self.config.prompt.primary,
        }
    }

    fn write_prompt(&mut self) {
        let prompt = self.config.colors.prompt.paint(self.current_prompt());
        self.display.write(&prompt);
    }

    /// Prompt plus whatever is typed so far, after something interrupted the line
    fn redraw_input(&mut self) {
        match self.mode {
            Mode::AwaitingInput => {
                if let Some(prompt) = self.pending_input.as_ref().map(|r| r.prompt().to_string()) {
                    self.display.write(&prompt);
                }
            }
            _ if self.in_flight.is_some() => return,
            _ => self.write_prompt(),
        }
        let typed = self.editor.line().to_string();
        self.display.write(&typed);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_line(&self) -> &str {
        self.editor.line()
    }

    pub fn cursor_offset(&self) -> usize {
        self.editor.cursor_offset()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn multiline(&self) -> &MultilineBuffer {
        &self.multiline
    }

    /// Prompt of the pending input request, if any
    pub fn pending_prompt(&self) -> Option<&str> {
        self.pending_input.as_ref().map(InputRequest::prompt)
    }

    /// Whether a statement is running
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether an interpreter is attached
    pub fn is_ready(&self) -> bool {
        !matches!(self.interpreter, Slot::Detached)
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn config(&self) -> &ReplConfig {
        &self.config
    }
}
