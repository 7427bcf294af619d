// Status bar widget: title, roster fill count, request state, last result time.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use teammatch_app::protocol::RequestStatus;
use teammatch_core::roster::ROSTER_SIZE;

use crate::ViewState;

const TITLE: &str = "CS2 Team Matcher";

/// Render the status bar into the given area.
///
/// Layout: [title] [fill counter] | [request indicator] [last result time]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            format!(" {TITLE} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        fill_counter(state.draft.filled_count()),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
    ];

    let (label, color) = status_indicator(state.status);
    spans.push(Span::styled(format!("● {label}"), Style::default().fg(color)));

    if let Some(at) = state.completed_at {
        spans.push(Span::styled(
            format!("  last result {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// `N/10` counter, green once every slot is filled.
pub fn fill_counter(filled: usize) -> Span<'static> {
    let style = if filled == ROSTER_SIZE {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Span::styled(format!("{filled}/{ROSTER_SIZE}"), style)
}

/// Label and dot color for the request lifecycle.
pub fn status_indicator(status: RequestStatus) -> (&'static str, Color) {
    match status {
        RequestStatus::Idle => ("Ready", Color::Gray),
        RequestStatus::InFlight => ("Balancing", Color::Yellow),
        RequestStatus::Succeeded => ("Balanced", Color::Green),
        RequestStatus::Failed => ("Failed", Color::Red),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
