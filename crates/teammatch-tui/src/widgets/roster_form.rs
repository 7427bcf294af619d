// Roster form widget: ten numbered vanity URL inputs plus the message line.
//
// " 01 ✓ s1mple_"     filled + focused
// " 02   Player 2 vanity URL"   empty placeholder

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use teammatch_core::roster::ROSTER_SIZE;

use crate::ViewState;

/// Columns used by the row prefix: " 01 ✓ ".
const PREFIX_WIDTH: usize = 6;

/// Render the ten input rows into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let inner_width = (area.width as usize).saturating_sub(2);
    let lines: Vec<Line> = (0..ROSTER_SIZE)
        .map(|index| {
            build_row(
                index,
                state.draft.slot(index).unwrap_or_default(),
                index == state.focused,
                inner_width,
            )
        })
        .collect();

    let border_color = if state.is_loading() {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Roster "),
    );
    frame.render_widget(paragraph, area);
}

/// Render the error line under the form, or a hint when there is none.
pub fn render_message(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = match &state.error {
        Some(message) => Line::from(Span::styled(
            format!(" ✗ {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None if state.draft.is_complete() && !state.is_loading() => Line::from(Span::styled(
            " Roster complete. Press F5 to balance.",
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            " Enter ten Steam vanity URLs.",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

/// Build one input row. `width` is the inner width available for the row.
pub fn build_row(index: usize, value: &str, focused: bool, width: usize) -> Line<'static> {
    let filled = !value.trim().is_empty();
    let number_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", slot_label(index)), number_style),
        Span::styled(
            if filled { "✓ " } else { "  " },
            Style::default().fg(Color::Green),
        ),
    ];

    let room = width.saturating_sub(PREFIX_WIDTH + 1);
    if value.is_empty() && !focused {
        spans.push(Span::styled(
            placeholder(index),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let style = if focused {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(visible_tail(value, room), style));
        if focused {
            spans.push(Span::styled(
                "_",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
    }

    Line::from(spans)
}

/// Two-digit row number: `01`..`10`.
pub fn slot_label(index: usize) -> String {
    format!("{:02}", index + 1)
}

pub fn placeholder(index: usize) -> String {
    format!("Player {} vanity URL", index + 1)
}

/// Last `room` characters of `value`, so the cursor end stays visible.
pub fn visible_tail(value: &str, room: usize) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(room)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
