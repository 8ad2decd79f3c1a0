//! Capital tier and maturity classification.
//!
//! Pure, total functions over (legal capital, years active). The
//! maturity decision table is an explicit ordered rule list with a
//! mandatory default clause, so precedence is visible and each rule is
//! unit-testable on its own.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Capital tier
// ---------------------------------------------------------------------------

/// Tier breakpoints in R$. Ranges are lower-inclusive: capital exactly
/// at a breakpoint belongs to the upper tier.
const TIER_2_FLOOR: f64 = 10_000.0;
const TIER_3_FLOOR: f64 = 50_000.0;
const TIER_4_FLOOR: f64 = 200_000.0;
const TIER_5_FLOOR: f64 = 1_000_000.0;
const TIER_6_FLOOR: f64 = 5_000_000.0;

/// Capital classification: a monotonic step function of legal capital.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CapitalTier {
    /// 1 (micro informal) through 6 (corporation).
    pub tier: u8,
    pub label: &'static str,
}

/// Bucket a legal-capital amount into one of six fixed tiers.
///
/// Total over all inputs; negative or zero capital lands in tier 1.
pub fn capital_tier(capital: f64) -> CapitalTier {
    let (tier, label) = if capital >= TIER_6_FLOOR {
        (6, "corporation")
    } else if capital >= TIER_5_FLOOR {
        (5, "large company")
    } else if capital >= TIER_4_FLOOR {
        (4, "medium company")
    } else if capital >= TIER_3_FLOOR {
        (3, "small company")
    } else if capital >= TIER_2_FLOOR {
        (2, "micro company")
    } else {
        (1, "micro informal")
    };
    CapitalTier { tier, label }
}

// ---------------------------------------------------------------------------
// Maturity signal
// ---------------------------------------------------------------------------

/// Named maturity signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Maturity {
    Nascent,
    AcceleratedGrowth,
    StructuralStagnation,
    ConsolidatedMaturity,
    Consolidating,
}

/// Maturity classification with its qualitative insight text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MaturitySignal {
    pub signal: Maturity,
    pub label: &'static str,
    pub insight: &'static str,
}

/// One row of the maturity decision table.
struct MaturityRule {
    matches: fn(years: i64, tier: u8) -> bool,
    result: MaturitySignal,
}

/// Ordered rule list. Earlier rows win; younger-age conditions come
/// first so they take priority when several could apply.
const MATURITY_RULES: &[MaturityRule] = &[
    MaturityRule {
        matches: |years, _| years < 2,
        result: MaturitySignal {
            signal: Maturity::Nascent,
            label: "nascent",
            insight: "Company has under two years of registry history; any financial read is provisional.",
        },
    },
    MaturityRule {
        matches: |years, tier| years < 5 && tier >= 4,
        result: MaturitySignal {
            signal: Maturity::AcceleratedGrowth,
            label: "accelerated growth",
            insight: "Substantial capital base built in under five years; expansion is outpacing the sector norm.",
        },
    },
    MaturityRule {
        matches: |years, tier| years >= 10 && tier <= 2,
        result: MaturitySignal {
            signal: Maturity::StructuralStagnation,
            label: "structural stagnation",
            insight: "A decade or more of activity without capital accumulation; operating margins are likely compressed.",
        },
    },
    MaturityRule {
        matches: |years, tier| years >= 10 && tier >= 4,
        result: MaturitySignal {
            signal: Maturity::ConsolidatedMaturity,
            label: "consolidated maturity",
            insight: "Established capital position sustained over ten-plus years; the business model is proven.",
        },
    },
];

const MATURITY_DEFAULT: MaturitySignal = MaturitySignal {
    signal: Maturity::Consolidating,
    label: "consolidating",
    insight: "Mid-life company with an ordinary capital trajectory; no strong maturity signal either way.",
};

/// Classify company maturity from age and capital tier.
///
/// Total function: every (years, tier) combination, including zero or
/// negative age, resolves to a signal via the ordered rules or the
/// default clause.
pub fn maturity_signal(years_active: i64, tier: &CapitalTier) -> MaturitySignal {
    MATURITY_RULES
        .iter()
        .find(|rule| (rule.matches)(years_active, tier.tier))
        .map(|rule| rule.result)
        .unwrap_or(MATURITY_DEFAULT)
}
