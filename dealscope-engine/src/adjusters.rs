//! Regime and location adjustment factors.
//!
//! Two total, side-effect-free lookups: the declared size/tax-regime
//! bucket maps to a multiplicative factor plus the regime's revenue
//! ceiling (reused by the estimator for capital-ratio capping), and the
//! region code maps to a three-tier premium/neutral/discount factor.

use serde::Serialize;

use crate::types::RegimeBucket;

// ---------------------------------------------------------------------------
// Regime factor
// ---------------------------------------------------------------------------

/// Multiplicative adjustment for a size/tax-regime bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RegimeFactor {
    pub factor: f64,
    pub label: &'static str,
    /// Annual revenue ceiling for the regime (R$).
    pub ceiling: f64,
}

/// Map a size/regime bucket to its adjustment factor and ceiling.
///
/// Simplified regimes sit below 1.0, mid-size at 1.0, the full regime
/// above it. A missing bucket takes the highest-complexity default:
/// absent registry data should not understate a large company.
pub fn regime_factor(bucket: Option<RegimeBucket>) -> RegimeFactor {
    match bucket {
        Some(RegimeBucket::Mei) => RegimeFactor {
            factor: 0.6,
            label: "MEI simplified regime",
            ceiling: 81_000.0,
        },
        Some(RegimeBucket::Micro) => RegimeFactor {
            factor: 0.8,
            label: "microempresa",
            ceiling: 360_000.0,
        },
        Some(RegimeBucket::Small) => RegimeFactor {
            factor: 1.0,
            label: "small company (EPP)",
            ceiling: 4_800_000.0,
        },
        Some(RegimeBucket::Medium) => RegimeFactor {
            factor: 1.0,
            label: "mid-size, normal regime",
            ceiling: 78_000_000.0,
        },
        Some(RegimeBucket::Large) | None => RegimeFactor {
            factor: 1.25,
            label: "full regime",
            ceiling: 300_000_000.0,
        },
    }
}

// ---------------------------------------------------------------------------
// Location factor
// ---------------------------------------------------------------------------

/// Multiplicative adjustment for the company's region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LocationFactor {
    pub factor: f64,
    pub label: &'static str,
}

/// Major-metro federative units: premium factor.
const PREMIUM_REGIONS: &[&str] = &["SP", "RJ"];
/// Mid-tier units: neutral factor.
const NEUTRAL_REGIONS: &[&str] = &["MG", "PR", "RS", "SC", "DF"];

/// Three-tier location classification over the fixed region lists.
/// Anything outside both lists, including a missing region, takes the
/// discount tier.
pub fn location_factor(region_code: Option<&str>) -> LocationFactor {
    let normalized = region_code.map(|r| r.trim().to_ascii_uppercase());
    match normalized.as_deref() {
        Some(uf) if PREMIUM_REGIONS.contains(&uf) => LocationFactor {
            factor: 1.2,
            label: "major metro premium",
        },
        Some(uf) if NEUTRAL_REGIONS.contains(&uf) => LocationFactor {
            factor: 1.0,
            label: "mid-tier region",
        },
        _ => LocationFactor {
            factor: 0.85,
            label: "interior discount",
        },
    }
}
