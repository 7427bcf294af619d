// Team-level aggregates and the cross-team comparison used to judge balance.

use crate::model::Team;

/// Per-team score summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamAggregate {
    pub average: f64,
    pub total: f64,
}

/// Cross-team comparison driving the "which team is stronger" bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub avg_a: f64,
    pub avg_b: f64,
    /// Absolute difference of the two averages.
    pub delta: f64,
    /// Team A's share of the combined average, as a percentage (0..100 for
    /// non-negative scores).
    pub share_a: f64,
}

impl Comparison {
    pub fn share_b(&self) -> f64 {
        100.0 - self.share_a
    }
}

/// Share reported when both averages sum to zero.
pub const NEUTRAL_SHARE: f64 = 50.0;

/// Total and average score of a team. An empty team averages 0.
pub fn aggregate(team: &Team) -> TeamAggregate {
    let total: f64 = team.players.iter().map(|p| p.score).sum();
    let count = if team.is_empty() { 1 } else { team.len() };
    TeamAggregate {
        average: total / count as f64,
        total,
    }
}

pub fn compare(team_a: &Team, team_b: &Team) -> Comparison {
    let avg_a = aggregate(team_a).average;
    let avg_b = aggregate(team_b).average;
    let sum = avg_a + avg_b;
    let share_a = if sum == 0.0 {
        NEUTRAL_SHARE
    } else {
        avg_a / sum * 100.0
    };
    Comparison {
        avg_a,
        avg_b,
        delta: (avg_a - avg_b).abs(),
        share_a,
    }
}

/// Highest score in the team, floored at 1. Only used to scale bar widths.
pub fn max_score(team: &Team) -> f64 {
    team.players.iter().map(|p| p.score).fold(1.0, f64::max)
}

/// Bar width of a score relative to the team maximum, clamped to [0, 1].
pub fn relative_bar(score: f64, max: f64) -> f64 {
    if max <= 0.0 || score.is_nan() {
        return 0.0;
    }
    (score / max).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
