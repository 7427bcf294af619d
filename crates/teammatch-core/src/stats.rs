// Statistic normalization: raw per-player stats to [0,1] intensities and
// display strings, driven by a fixed per-statistic scale table.

use tracing::trace;

use crate::model::PlayerStats;

// ---------------------------------------------------------------------------
// Stat table
// ---------------------------------------------------------------------------

/// Recognized statistic keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    Hours,
    KillDeath,
    HeadshotPct,
    WinRate,
    Accuracy,
    DamagePerRound,
    MvpsPerMatch,
}

/// How a raw value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFormat {
    /// Rounded to a whole number.
    Integer,
    /// Fixed-point with the given number of decimals.
    Fixed(usize),
    /// Fraction shown as a percentage with one decimal.
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSpec {
    pub key: StatKey,
    /// Field name on the wire.
    pub wire_key: &'static str,
    /// Short column label.
    pub label: &'static str,
    pub full_name: &'static str,
    /// Value that maps to full intensity.
    pub nominal_max: f64,
    pub format: StatFormat,
}

/// Every recognized statistic, in display order.
pub static STAT_TABLE: [StatSpec; 7] = [
    StatSpec {
        key: StatKey::Hours,
        wire_key: "hours",
        label: "HRS",
        full_name: "Hours Played",
        nominal_max: 5000.0,
        format: StatFormat::Integer,
    },
    StatSpec {
        key: StatKey::KillDeath,
        wire_key: "kd",
        label: "K/D",
        full_name: "Kill/Death Ratio",
        nominal_max: 2.0,
        format: StatFormat::Fixed(2),
    },
    StatSpec {
        key: StatKey::HeadshotPct,
        wire_key: "headshot_pct",
        label: "HS%",
        full_name: "Headshot Percentage",
        nominal_max: 1.0,
        format: StatFormat::Percent,
    },
    StatSpec {
        key: StatKey::WinRate,
        wire_key: "winrate",
        label: "WIN",
        full_name: "Win Rate",
        nominal_max: 1.0,
        format: StatFormat::Percent,
    },
    StatSpec {
        key: StatKey::Accuracy,
        wire_key: "accuracy",
        label: "ACC",
        full_name: "Accuracy",
        nominal_max: 0.5,
        format: StatFormat::Percent,
    },
    StatSpec {
        key: StatKey::DamagePerRound,
        wire_key: "damage_per_round",
        label: "ADR",
        full_name: "Avg Damage/Round",
        nominal_max: 200.0,
        format: StatFormat::Fixed(1),
    },
    StatSpec {
        key: StatKey::MvpsPerMatch,
        wire_key: "mvps_per_match",
        label: "MVP",
        full_name: "MVPs per Match",
        nominal_max: 5.0,
        format: StatFormat::Fixed(1),
    },
];

impl StatKey {
    /// Resolve a wire key. Unknown keys return `None`.
    pub fn from_wire(key: &str) -> Option<StatKey> {
        STAT_TABLE
            .iter()
            .find(|spec| spec.wire_key == key)
            .map(|spec| spec.key)
    }

    pub fn spec(self) -> &'static StatSpec {
        let row = match self {
            StatKey::Hours => 0,
            StatKey::KillDeath => 1,
            StatKey::HeadshotPct => 2,
            StatKey::WinRate => 3,
            StatKey::Accuracy => 4,
            StatKey::DamagePerRound => 5,
            StatKey::MvpsPerMatch => 6,
        };
        &STAT_TABLE[row]
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStat {
    /// Value relative to the nominal max, clamped to [0, 1].
    pub intensity: f64,
    pub display: String,
}

/// Normalize one recognized statistic.
pub fn normalize(key: StatKey, value: f64) -> NormalizedStat {
    let spec = key.spec();
    let intensity = if value.is_nan() {
        0.0
    } else {
        (value / spec.nominal_max).clamp(0.0, 1.0)
    };
    NormalizedStat {
        intensity,
        display: format_value(spec.format, value),
    }
}

/// Normalize a statistic given by its wire key. Unknown keys yield `None`.
pub fn normalize_raw(key: &str, value: f64) -> Option<NormalizedStat> {
    normalize_entries([(key, value)]).pop().map(|(_, stat)| stat)
}

/// Normalize a loose set of `(wire_key, value)` pairs, dropping unknown keys.
/// Input order is preserved.
pub fn normalize_entries<'a, I>(entries: I) -> Vec<(StatKey, NormalizedStat)>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    entries
        .into_iter()
        .filter_map(|(key, value)| match StatKey::from_wire(key) {
            Some(stat) => Some((stat, normalize(stat, value))),
            None => {
                trace!(key, "skipping unrecognized statistic");
                None
            }
        })
        .collect()
}

/// Normalize every statistic of a player, in table order.
pub fn normalize_all(stats: &PlayerStats) -> Vec<(StatKey, NormalizedStat)> {
    normalize_entries(stats.wire_entries())
}

/// Render a raw value according to its format rule.
pub fn format_value(format: StatFormat, value: f64) -> String {
    match format {
        StatFormat::Integer => format_fixed(value, 0),
        StatFormat::Fixed(decimals) => format_fixed(value, decimals),
        StatFormat::Percent => format!("{}%", format_fixed(value * 100.0, 1)),
    }
}

/// Fixed-point formatting with `Number.prototype.toFixed` semantics.
///
/// Rounding works on the exact binary value, so `1.345` (stored as
/// 1.34499...) gives `"1.34"`. Only values sitting exactly halfway between
/// two outputs round away from zero (`2.5 -> "3"`, `0.125 -> "0.13"`).
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    let digits = if is_exact_tie(magnitude, decimals) {
        let factor = 10f64.powi(decimals as i32);
        let rounded = (magnitude * factor).round() / factor;
        format!("{rounded:.decimals$}")
    } else {
        // std formatting is exact outside of ties.
        format!("{magnitude:.decimals$}")
    };
    if value < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Whether `magnitude` lies exactly halfway between two multiples of
/// `10^-decimals`. That holds iff `magnitude * 2^(decimals + 1)` is an odd
/// integer; scaling by a power of two is exact.
fn is_exact_tie(magnitude: f64, decimals: usize) -> bool {
    let scaled = magnitude * 2f64.powi(decimals as i32 + 1);
    scaled.fract() == 0.0 && scaled % 2.0 == 1.0
}

// ---------------------------------------------------------------------------
// Intensity bands
// ---------------------------------------------------------------------------

/// Presentation emphasis derived from intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityBand {
    Hot,
    Warm,
    Cold,
}

const BAND_THRESHOLDS: &[(f64, IntensityBand)] =
    &[(0.7, IntensityBand::Hot), (0.4, IntensityBand::Warm)];

pub fn intensity_band(intensity: f64) -> IntensityBand {
    BAND_THRESHOLDS
        .iter()
        .find(|(lower, _)| intensity >= *lower)
        .map(|&(_, band)| band)
        .unwrap_or(IntensityBand::Cold)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
