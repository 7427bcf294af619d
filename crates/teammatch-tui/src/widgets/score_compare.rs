// Score comparison widget: both team averages and their gap on one line,
// then a bar split by Team A's share of the combined average.
//
// 50.5% ███████████████████│█████████████████ 49.5%

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use teammatch_core::aggregate::Comparison;
use teammatch_core::report::{BalanceReport, TeamSide};
use teammatch_core::stats::format_fixed;

use super::team_card::team_color;

pub fn render(frame: &mut Frame, area: Rect, report: &BalanceReport) {
    let block = Block::default().borders(Borders::ALL).title(" Balance ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        header_line(report, inner.width as usize),
        bar_line(&report.comparison, inner.width as usize),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

fn header_line(report: &BalanceReport, width: usize) -> Line<'static> {
    let left = format!("{} — {}", TeamSide::A.label(), report.team_a.average_text());
    let middle = format!("Δ {}", report.delta_text());
    let right = format!("{} — {}", report.team_b.average_text(), TeamSide::B.label());

    let used = left.chars().count() + middle.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used) / 2;
    let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled(left, bold(team_color(TeamSide::A))),
        Span::raw(" ".repeat(gap.max(1))),
        Span::styled(middle, Style::default().fg(Color::White)),
        Span::raw(" ".repeat(gap.max(1))),
        Span::styled(right, bold(team_color(TeamSide::B))),
    ])
}

fn bar_line(comparison: &Comparison, width: usize) -> Line<'static> {
    let left = format!("{}% ", format_fixed(comparison.share_a, 1));
    let right = format!(" {}%", format_fixed(comparison.share_b(), 1));
    // One column is the divider.
    let labels = left.chars().count() + right.chars().count() + 1;
    let (a, b) = split_widths(comparison.share_a, width.saturating_sub(labels));
    Line::from(vec![
        Span::styled(left, Style::default().fg(team_color(TeamSide::A))),
        Span::styled("█".repeat(a), Style::default().fg(team_color(TeamSide::A))),
        Span::styled("│", Style::default().fg(Color::White)),
        Span::styled("█".repeat(b), Style::default().fg(team_color(TeamSide::B))),
        Span::styled(right, Style::default().fg(team_color(TeamSide::B))),
    ])
}

/// Split `width` columns by Team A's percentage share. The two parts always
/// sum to `width`.
pub fn split_widths(share_a: f64, width: usize) -> (usize, usize) {
    let fraction = if share_a.is_finite() {
        (share_a / 100.0).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let a = ((width as f64) * fraction).round() as usize;
    let a = a.min(width);
    (a, width - a)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
