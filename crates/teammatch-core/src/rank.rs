// Score tiers: maps a player's fitness score to a qualitative bucket.

/// Qualitative tier, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    BelowAverage,
    Average,
    High,
    Elite,
}

impl Tier {
    /// Star badge shown next to the player.
    pub fn display(self) -> &'static str {
        match self {
            Tier::Elite => "★★★",
            Tier::High => "★★",
            Tier::Average => "★",
            Tier::BelowAverage => "—",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tier::Elite => "Elite",
            Tier::High => "High",
            Tier::Average => "Average",
            Tier::BelowAverage => "Below Average",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub tier: Tier,
    pub display: &'static str,
}

/// Inclusive lower bounds, highest first. The first bound the score reaches
/// wins; anything below the last bound is `BelowAverage`.
const TIER_THRESHOLDS: &[(f64, Tier)] = &[
    (1.5, Tier::Elite),
    (1.0, Tier::High),
    (0.5, Tier::Average),
];

/// Rank a score. Total over every `f64`; NaN ranks as `BelowAverage`.
pub fn rank(score: f64) -> Rank {
    let tier = TIER_THRESHOLDS
        .iter()
        .find(|(lower, _)| score >= *lower)
        .map(|&(_, tier)| tier)
        .unwrap_or(Tier::BelowAverage);
    Rank {
        tier,
        display: tier.display(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_higher_tier() {
        assert_eq!(rank(1.5).tier, Tier::Elite);
        assert_eq!(rank(1.499999).tier, Tier::High);
        assert_eq!(rank(1.0).tier, Tier::High);
        assert_eq!(rank(0.5).tier, Tier::Average);
        assert_eq!(rank(0.4999).tier, Tier::BelowAverage);
    }

    #[test]
    fn extreme_values_rank() {
        assert_eq!(rank(-3.0).tier, Tier::BelowAverage);
        assert_eq!(rank(0.0).tier, Tier::BelowAverage);
        assert_eq!(rank(1e12).tier, Tier::Elite);
        assert_eq!(rank(f64::INFINITY).tier, Tier::Elite);
        assert_eq!(rank(f64::NEG_INFINITY).tier, Tier::BelowAverage);
        assert_eq!(rank(f64::NAN).tier, Tier::BelowAverage);
    }

    #[test]
    fn display_matches_tier_badge() {
        assert_eq!(rank(2.0).display, "★★★");
        assert_eq!(rank(1.2).display, "★★");
        assert_eq!(rank(0.7).display, "★");
        assert_eq!(rank(0.1).display, "—");
    }

    #[test]
    fn tier_titles() {
        assert_eq!(Tier::Elite.title(), "Elite");
        assert_eq!(Tier::BelowAverage.title(), "Below Average");
    }

    #[test]
    fn rank_is_monotonic_over_a_sweep() {
        let mut previous = rank(-1.0).tier;
        for step in 0..=400 {
            let score = -1.0 + f64::from(step) * 0.01;
            let tier = rank(score).tier;
            assert!(tier >= previous, "tier dropped at score {score}");
            previous = tier;
        }
        assert_eq!(previous, Tier::Elite);
    }
}
