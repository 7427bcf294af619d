// Render-ready view of a balance result.
//
// Combines the aggregator, ranker and normalizer into plain data so the
// presentation layer only has to lay out strings and fractions.

use crate::aggregate::{aggregate, compare, max_score, relative_bar, Comparison, TeamAggregate};
use crate::model::{BalanceResult, Player, Team};
use crate::rank::{rank, Rank};
use crate::stats::{format_fixed, intensity_band, normalize_all, IntensityBand};

/// Default base for player profile links.
pub const DEFAULT_PROFILE_URL_BASE: &str = "https://steamcommunity.com/id/";

/// Which side of the split a team is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn label(self) -> &'static str {
        match self {
            TeamSide::A => "Team A",
            TeamSide::B => "Team B",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCell {
    pub label: &'static str,
    pub full_name: &'static str,
    pub display: String,
    pub intensity: f64,
    pub band: IntensityBand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    /// 1-based position within the team, in balancer order.
    pub position: usize,
    pub vanity_url: String,
    pub steam_id: String,
    pub profile_url: String,
    pub score: f64,
    pub score_text: String,
    pub rank: Rank,
    /// Score relative to the team maximum (floored at 1), in [0, 1].
    pub bar: f64,
    pub stats: Vec<StatCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamReport {
    pub side: TeamSide,
    pub aggregate: TeamAggregate,
    pub players: Vec<PlayerRow>,
}

impl TeamReport {
    pub fn build(side: TeamSide, team: &Team, profile_url_base: &str) -> Self {
        let max = max_score(team);
        let players = team
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| build_row(i + 1, p, max, profile_url_base))
            .collect();
        TeamReport {
            side,
            aggregate: aggregate(team),
            players,
        }
    }

    pub fn label(&self) -> &'static str {
        self.side.label()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn average_text(&self) -> String {
        format_fixed(self.aggregate.average, 2)
    }

    pub fn total_text(&self) -> String {
        format_fixed(self.aggregate.total, 2)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    pub team_a: TeamReport,
    pub team_b: TeamReport,
    pub comparison: Comparison,
}

impl BalanceReport {
    pub fn build(result: &BalanceResult, profile_url_base: &str) -> Self {
        BalanceReport {
            team_a: TeamReport::build(TeamSide::A, &result.team_a, profile_url_base),
            team_b: TeamReport::build(TeamSide::B, &result.team_b, profile_url_base),
            comparison: compare(&result.team_a, &result.team_b),
        }
    }

    pub fn delta_text(&self) -> String {
        format_fixed(self.comparison.delta, 2)
    }
}

fn build_row(position: usize, player: &Player, max: f64, profile_url_base: &str) -> PlayerRow {
    let stats = normalize_all(&player.stats)
        .into_iter()
        .map(|(key, n)| {
            let spec = key.spec();
            StatCell {
                label: spec.label,
                full_name: spec.full_name,
                band: intensity_band(n.intensity),
                intensity: n.intensity,
                display: n.display,
            }
        })
        .collect();

    PlayerRow {
        position,
        vanity_url: player.vanity_url.clone(),
        steam_id: player.steam_id.clone(),
        profile_url: player.profile_url(profile_url_base),
        score: player.score,
        score_text: format_fixed(player.score, 2),
        rank: rank(player.score),
        bar: relative_bar(player.score, max),
        stats,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
