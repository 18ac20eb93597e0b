//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values, and carries out the
//! `Effect`s that `update()` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the pending question's border can pulse.
//! - **Idle**: sleeps up to 500ms, only redraws on events or answers.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Session;
use crate::service::{AnswerService, HttpAnswerService, QuestionRequest, ask_with_timeout};
use crate::tui::component::EventHandler;
use crate::tui::components::{MessageListState, UrlBarState, UrlEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Website,
    Question,
}

impl Focus {
    fn toggled(self) -> Self {
        match self {
            Focus::Website => Focus::Question,
            Focus::Question => Focus::Website,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub url_bar: UrlBarState,
    pub focus: Focus,
    pub pulse_value: f32,
    last_log_len: usize,
}

impl TuiState {
    pub fn new(session: &Session) -> Self {
        Self {
            message_list: MessageListState::new(),
            url_bar: UrlBarState::new(&session.target_ref),
            focus: Focus::Question,
            pulse_value: 0.0,
            last_log_len: session.log.len(),
        }
    }

    /// Jump back to the newest turn whenever the log grew since last frame.
    fn follow_log(&mut self, session: &Session) {
        let len = session.log.len();
        if len != self.last_log_len {
            self.last_log_len = len;
            self.message_list.handle_event(&TuiEvent::ScrollToBottom);
        }
    }

    /// Route one terminal event. Returns the action for the core, if any.
    fn dispatch(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Quit => Some(Action::Quit),
            TuiEvent::Resize => None,
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::ScrollToBottom => {
                self.message_list.handle_event(event);
                None
            }
            TuiEvent::SwitchFocus => {
                self.focus = self.focus.toggled();
                None
            }
            _ => match self.focus {
                Focus::Question => event.as_key().map(Action::Key),
                Focus::Website => match self.url_bar.handle_event(event)? {
                    UrlEvent::Changed(target) => Some(Action::SetTarget(target)),
                    UrlEvent::Confirm => {
                        self.focus = Focus::Question;
                        None
                    }
                },
            },
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals that don't support it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the answer service for a resolved config.
pub fn build_service(config: &ResolvedConfig) -> Arc<dyn AnswerService> {
    Arc::new(HttpAnswerService::new(
        config.base_url.clone(),
        config.api_token.clone(),
    ))
}

/// Owns the one request that may be in flight.
struct Runtime {
    service: Arc<dyn AnswerService>,
    timeout: Duration,
    tx: mpsc::Sender<Action>,
    in_flight: Option<AbortHandle>,
}

impl Runtime {
    /// Carry out an effect. Returns true when the app should exit.
    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::SpawnRequest(request) => {
                if let Some(stale) = self.in_flight.take() {
                    stale.abort();
                }
                self.in_flight = Some(spawn_request(
                    self.service.clone(),
                    request,
                    self.timeout,
                    self.tx.clone(),
                ));
                false
            }
            Effect::Quit => true,
        }
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            info!("Aborting in-flight request on exit");
            handle.abort();
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut session = Session::from_config(&config);
    let mut tui = TuiState::new(&session);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runtime = Runtime {
        service: build_service(&config),
        timeout: config.timeout,
        tx,
        in_flight: None,
    };
    info!(
        "Using {} service, timeout {}s",
        runtime.service.name(),
        runtime.timeout.as_secs()
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = session.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            tui.follow_log(&session);
            terminal.draw(|f| ui::draw_ui(f, &session, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = tui.dispatch(&event) {
                let effect = update(&mut session, action);
                should_quit |= runtime.apply(effect);
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }

        // Answers from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut session, action);
            if !session.is_loading {
                runtime.in_flight = None;
            }
            if runtime.apply(effect) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    runtime.shutdown();
    ratatui::restore();
    Ok(())
}

fn spawn_request(
    service: Arc<dyn AnswerService>,
    request: QuestionRequest,
    timeout: Duration,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning request to {} (generation={})",
        service.name(),
        request.generation
    );

    let handle = tokio::spawn(async move {
        let generation = request.generation;
        let outcome = ask_with_timeout(service.as_ref(), &request, timeout).await;
        if tx
            .send(Action::ResponseReceived {
                generation,
                outcome,
            })
            .is_err()
        {
            warn!("Failed to deliver response (generation={generation}): receiver dropped");
        }
    });

    handle.abort_handle()
}
