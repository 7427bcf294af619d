// Wire-level data model shared with the remote balancer.
//
// Request:  { "vanity_urls": [string; 10] }
// Response: { "team_a": Player[], "team_b": Player[] }

use serde::{Deserialize, Serialize};

use crate::roster::Roster;
use crate::stats::{StatKey, STAT_TABLE};

// ---------------------------------------------------------------------------
// Player data
// ---------------------------------------------------------------------------

/// Raw per-player statistics as delivered by the balancer.
///
/// Fractions (`headshot_pct`, `winrate`, `accuracy`) are stored as 0..1.
/// Unrecognized fields in the payload are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hours: f64,
    pub kd: f64,
    pub headshot_pct: f64,
    pub winrate: f64,
    pub accuracy: f64,
    pub damage_per_round: f64,
    pub mvps_per_match: f64,
}

impl PlayerStats {
    /// Look up the raw value for a recognized statistic.
    pub fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Hours => self.hours,
            StatKey::KillDeath => self.kd,
            StatKey::HeadshotPct => self.headshot_pct,
            StatKey::WinRate => self.winrate,
            StatKey::Accuracy => self.accuracy,
            StatKey::DamagePerRound => self.damage_per_round,
            StatKey::MvpsPerMatch => self.mvps_per_match,
        }
    }

    /// `(wire_key, value)` pairs in display order, the input shape of
    /// `stats::normalize_entries`. Payload fields outside the table never get
    /// this far: serde drops them when the response is parsed.
    pub fn wire_entries(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        STAT_TABLE
            .iter()
            .map(|spec| (spec.wire_key, self.get(spec.key)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Public vanity handle the user typed in.
    pub vanity_url: String,
    /// Stable platform account id.
    pub steam_id: String,
    /// Backend fitness score. Unbounded above; only used for ranking.
    pub score: f64,
    pub stats: PlayerStats,
}

impl Player {
    /// Profile link for this player, e.g. `https://steamcommunity.com/id/<vanity>`.
    pub fn profile_url(&self, base: &str) -> String {
        format!("{base}{}", self.vanity_url)
    }
}

/// A team as returned by the balancer. Player order is the backend's
/// ranking order and is never re-sorted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(players: Vec<Player>) -> Self {
        Team { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// The two-team split produced by one balance request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResult {
    pub team_a: Team,
    pub team_b: Team,
}

impl BalanceResult {
    /// Parse a response body, rejecting anything that does not match the
    /// expected shape (missing teams, malformed player records).
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

/// JSON body of the balance request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceRequest<'a> {
    pub vanity_urls: &'a [String],
}

impl<'a> BalanceRequest<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        BalanceRequest {
            vanity_urls: roster.identifiers(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
