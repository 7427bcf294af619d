// Terminal front end: roster form, results view, input handling.
//
// The TUI owns a `ViewState` that holds the roster draft being edited and
// mirrors what the app orchestrator reports. The orchestrator pushes
// `UiUpdate` messages over an mpsc channel; the TUI applies them and
// re-renders on a fixed tick.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use teammatch_app::protocol::{RequestStatus, UiUpdate, UserCommand};
use teammatch_core::report::BalanceReport;
use teammatch_core::roster::{RosterDraft, ROSTER_SIZE};
use tokio::sync::mpsc;
use tracing::{debug, info};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the form being edited plus the latest result or error.
pub struct ViewState {
    pub draft: RosterDraft,
    /// Index of the input slot receiving keystrokes.
    pub focused: usize,
    pub status: RequestStatus,
    /// Validation, service or transport error for the last submission.
    pub error: Option<String>,
    pub report: Option<BalanceReport>,
    pub completed_at: Option<DateTime<Local>>,
    /// When the outstanding request started; drives the loading animation.
    pub request_started: Option<Instant>,
    /// Vertical scroll of the team cards.
    pub scroll_offset: usize,
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            draft: RosterDraft::new(),
            focused: 0,
            status: RequestStatus::Idle,
            error: None,
            report: None,
            completed_at: None,
            request_started: None,
            scroll_offset: 0,
            confirm_quit: false,
        }
    }
}

impl ViewState {
    /// Whether a request is outstanding (submit is disabled).
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::InFlight
    }

    pub fn is_last_slot_focused(&self) -> bool {
        self.focused + 1 == ROSTER_SIZE
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::ValidationFailed(message) => {
            state.error = Some(message);
        }
        UiUpdate::RequestStarted => {
            state.status = RequestStatus::InFlight;
            state.error = None;
            state.report = None;
            state.scroll_offset = 0;
            state.request_started = Some(Instant::now());
        }
        UiUpdate::BalanceReady {
            report,
            completed_at,
        } => {
            state.status = RequestStatus::Succeeded;
            state.report = Some(*report);
            state.completed_at = Some(completed_at);
            state.request_started = None;
        }
        UiUpdate::RequestFailed(message) => {
            state.status = RequestStatus::Failed;
            state.error = Some(message);
            state.request_started = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::roster_form::render(frame, layout.roster, state);
    widgets::roster_form::render_message(frame, layout.message, state);
    render_results(frame, &layout, state);
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_results(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    if let Some(started) = state.request_started {
        widgets::loading::render(frame, layout.results(), started.elapsed());
        return;
    }

    match &state.report {
        Some(report) => {
            widgets::score_compare::render(frame, layout.compare, report);
            widgets::team_card::render(frame, layout.team_a, &report.team_a, state.scroll_offset);
            widgets::team_card::render(frame, layout.team_b, &report.team_b, state.scroll_offset);
        }
        None => widgets::team_card::render_placeholder(frame, layout.results()),
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.is_loading() {
        " Balancing... | ↑↓/Tab:Move | Esc:Quit"
    } else {
        " Enter:Next/Submit | F5:Balance | ↑↓/Tab:Move | Ctrl+U:Clear | PgUp/PgDn:Scroll | Esc:Quit"
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the app shuts down.
///
/// 1. Initializes the terminal (raw mode, alternate screen, bracketed paste).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over UI updates, keyboard input, and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    tick: Duration,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableBracketedPaste)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(tick);
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            debug!(?cmd, "forwarding user command");
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(Event::Paste(text))) => {
                        input::handle_paste(&text, &mut view_state);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
