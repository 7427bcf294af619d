// Team card widget: one team's aggregate scores and per-player breakdown.
//
// Header: "Team A  5 players" and "AVG 1.10  TOTAL 5.50".
// Per player:
//   #1 s1mple ★★★ Elite                 1.80
//   ██████████████████░░░░░░░░░░░░░░░░░░
//   3200 HRS  1.42 K/D  51.0% HS%  55.0% WIN
//   18.0% ACC  91.3 ADR  2.7 MVP
//   steamcommunity.com/id/s1mple
//
// Scrollable with PageUp/PageDown.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use teammatch_core::rank::Tier;
use teammatch_core::report::{PlayerRow, StatCell, TeamReport, TeamSide};
use teammatch_core::stats::IntensityBand;

/// Stat cells per line; seven stats fit in two rows.
const STATS_PER_LINE: usize = 4;

pub fn render(frame: &mut Frame, area: Rect, team: &TeamReport, scroll_offset: usize) {
    let inner_width = (area.width as usize).saturating_sub(2);
    let lines = build_card_lines(team, inner_width);

    let visible_rows = (area.height as usize).saturating_sub(2);
    let max_offset = lines.len().saturating_sub(visible_rows);
    let scroll = scroll_offset.min(max_offset) as u16;

    let color = team_color(team.side);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", team.label()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
        )
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Empty results panel shown before the first successful balance.
pub fn render_placeholder(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  No teams yet.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  Fill all ten slots and press F5 to balance.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Teams "));
    frame.render_widget(paragraph, area);
}

pub fn build_card_lines(team: &TeamReport, width: usize) -> Vec<Line<'static>> {
    let color = team_color(team.side);
    let value_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let micro = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {}", team.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {} players", team.player_count()), micro),
        ]),
        Line::from(vec![
            Span::styled(" AVG ", micro),
            Span::styled(team.average_text(), value_style),
            Span::styled("  TOTAL ", micro),
            Span::styled(team.total_text(), value_style),
        ]),
        Line::from(""),
    ];

    for row in &team.players {
        lines.extend(player_lines(row, color, width));
        lines.push(Line::from(""));
    }
    lines
}

fn player_lines(row: &PlayerRow, color: Color, width: usize) -> Vec<Line<'static>> {
    let identity = format!(" #{} {} ", row.position, row.vanity_url);
    let badge = row.rank.display;
    let title = format!(" {}", row.rank.tier.title());
    let used = identity.chars().count()
        + badge.chars().count()
        + title.chars().count()
        + row.score_text.chars().count();
    let pad = width.saturating_sub(used + 1).max(1);

    let mut lines = vec![Line::from(vec![
        Span::styled(identity, Style::default().fg(color)),
        Span::styled(badge, Style::default().fg(tier_color(row.rank.tier))),
        Span::styled(title, Style::default().fg(Color::DarkGray)),
        Span::raw(" ".repeat(pad)),
        Span::styled(
            row.score_text.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    let gauge_width = width.saturating_sub(2);
    let (fill, track) = bar_parts(row.bar, gauge_width);
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(fill, Style::default().fg(color)),
        Span::styled(track, Style::default().fg(Color::DarkGray)),
    ]));

    for chunk in row.stats.chunks(STATS_PER_LINE) {
        let mut spans = vec![Span::raw(" ")];
        for cell in chunk {
            spans.extend(stat_spans(cell));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format!(" {}", row.profile_url),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::UNDERLINED),
    )));
    lines
}

fn stat_spans(cell: &StatCell) -> [Span<'static>; 2] {
    [
        Span::styled(
            cell.display.clone(),
            Style::default().fg(band_color(cell.band)),
        ),
        Span::styled(format!(" {}  ", cell.label), Style::default().fg(Color::DarkGray)),
    ]
}

/// Filled and empty parts of a gauge for a fraction in [0, 1].
pub fn bar_parts(fraction: f64, width: usize) -> (String, String) {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((width as f64) * fraction).round() as usize;
    let filled = filled.min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}

pub fn team_color(side: TeamSide) -> Color {
    match side {
        TeamSide::A => Color::Cyan,
        TeamSide::B => Color::LightRed,
    }
}

pub fn band_color(band: IntensityBand) -> Color {
    match band {
        IntensityBand::Hot => Color::Green,
        IntensityBand::Warm => Color::Yellow,
        IntensityBand::Cold => Color::Gray,
    }
}

pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Elite => Color::Magenta,
        Tier::High => Color::Yellow,
        Tier::Average => Color::White,
        Tier::BelowAverage => Color::DarkGray,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
