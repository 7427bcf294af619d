// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------------------+
// | Status Bar (1 row)                                           |
// +--------------------+-----------------------------------------+
// | Roster form (12)   | Score comparison (4 rows)               |
// |                    +--------------------+--------------------+
// +--------------------+ Team A card        | Team B card        |
// | Message area       |                    |                    |
// +--------------------+--------------------+--------------------+
// | Help Bar (1 row)                                             |
// +--------------------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the roster column, including borders.
const ROSTER_WIDTH: u16 = 44;

/// Ten input rows plus the border.
const ROSTER_HEIGHT: u16 = 12;

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: title, fill count, request status.
    pub status_bar: Rect,
    /// Ten numbered identifier inputs.
    pub roster: Rect,
    /// Validation and request error messages.
    pub message: Rect,
    /// Average comparison bar between the teams.
    pub compare: Rect,
    pub team_a: Rect,
    pub team_b: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

impl AppLayout {
    /// Area covered by the results view (comparison plus both cards).
    pub fn results(&self) -> Rect {
        self.compare.union(self.team_a).union(self.team_b)
    }
}

pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(ROSTER_HEIGHT + 3),
            Constraint::Length(1),
        ])
        .split(area);

    let status_bar = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    // Horizontal: roster column | results
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(ROSTER_WIDTH), Constraint::Min(20)])
        .split(middle);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(ROSTER_HEIGHT), Constraint::Min(3)])
        .split(horizontal[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(horizontal[1]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(right[1]);

    AppLayout {
        status_bar,
        roster: left[0],
        message: left[1],
        compare: right[0],
        team_a: cards[0],
        team_b: cards[1],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    fn all_rects(layout: &AppLayout) -> [(&'static str, Rect); 7] {
        [
            ("status_bar", layout.status_bar),
            ("roster", layout.roster),
            ("message", layout.message),
            ("compare", layout.compare),
            ("team_a", layout.team_a),
            ("team_b", layout.team_b),
            ("help_bar", layout.help_bar),
        ]
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{name} has zero area: {rect:?}"
            );
        }
    }

    #[test]
    fn bars_are_one_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
    }

    #[test]
    fn roster_fits_ten_rows() {
        let layout = build_layout(test_area());
        assert_eq!(layout.roster.height, ROSTER_HEIGHT);
        assert_eq!(layout.roster.width, ROSTER_WIDTH);
        assert!(layout.message.y > layout.roster.y);
    }

    #[test]
    fn team_cards_side_by_side_below_compare() {
        let layout = build_layout(test_area());
        assert_eq!(layout.team_a.y, layout.team_b.y);
        assert!(layout.team_a.x < layout.team_b.x);
        assert!(layout.compare.y < layout.team_a.y);
        assert!(layout.team_a.width.abs_diff(layout.team_b.width) <= 1);
    }

    #[test]
    fn results_area_covers_cards() {
        let layout = build_layout(test_area());
        let results = layout.results();
        assert!(results.contains(layout.team_b.as_position()));
        assert_eq!(results.y, layout.compare.y);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = test_area();
        let layout = build_layout(area);
        for (name, rect) in all_rects(&layout) {
            assert!(rect.right() <= area.width, "{name} exceeds width");
            assert!(rect.bottom() <= area.height, "{name} exceeds height");
        }
    }

    #[test]
    fn layout_small_terminal_still_valid() {
        let layout = build_layout(Rect::new(0, 0, 80, 24));
        for (name, rect) in all_rects(&layout) {
            assert!(rect.width > 0 && rect.height > 0, "{name} collapsed: {rect:?}");
        }
    }
}
