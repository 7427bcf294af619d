// Loading indicator shown over the results panel while a request is in flight.
//
// The phase text only reflects elapsed time; the service reports no progress.

use std::time::Duration;

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::quit_confirm::centered_rect;

const PHASES: &[&str] = &[
    "Fetching player profiles",
    "Analyzing stats",
    "Balancing teams",
    "Almost there",
];

const PHASE_MS: u128 = 1800;
const DOT_MS: u128 = 400;
const MAX_DOTS: usize = 3;

/// Phase text and dot count (0..=3) for the given elapsed time.
pub fn loading_frame(elapsed: Duration) -> (&'static str, usize) {
    let ms = elapsed.as_millis();
    let phase = PHASES[((ms / PHASE_MS) % PHASES.len() as u128) as usize];
    let dots = ((ms / DOT_MS) % (MAX_DOTS as u128 + 1)) as usize;
    (phase, dots)
}

pub fn render(frame: &mut Frame, area: Rect, elapsed: Duration) {
    let (phase, dots) = loading_frame(elapsed);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Balancing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Pad the dots so the text does not jitter.
    let text = vec![
        Line::from(Span::styled(
            format!("{phase}{:<width$}", ".".repeat(dots), width = MAX_DOTS),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}s", elapsed.as_secs()),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let body = centered_rect(inner.width, text.len() as u16, inner);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), body);
}
