//! Alert synthesizer.
//!
//! A fixed-order rule list evaluated against the estimation output and
//! the source record. Every rule runs (no early exit) and appends zero
//! or one alert; the rules are independent, so order only affects
//! presentation. Alerts are always derived deterministically here —
//! never from narrative generation.

use serde::Serialize;

use crate::capital::Maturity;
use crate::estimator::EstimationResult;
use crate::types::CompanyRecord;

/// Convergence below this percentage flags an insufficient-data alert.
const LOW_CONVERGENCE_THRESHOLD: u8 = 50;
/// Tier at or above which young companies get a source-of-funds check.
const HIGH_CAPITAL_TIER: u8 = 5;
/// Years below which a high-capital company counts as very young.
const YOUNG_COMPANY_YEARS: i64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A single qualitative risk alert.
#[derive(Clone, Debug, Serialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

/// Evaluate the full rule list for one estimation.
pub fn synthesize_alerts(
    record: &CompanyRecord,
    result: &EstimationResult,
    years_active: i64,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if record
        .registration_status
        .is_some_and(|s| !s.is_active())
    {
        alerts.push(Alert {
            severity: Severity::High,
            message: "Irregular registration status: the company is not active in the registry."
                .into(),
        });
    }

    if result.capital_tier.tier == 1 {
        alerts.push(Alert {
            severity: Severity::Medium,
            message: "Declared capital at the informal floor; possible shell or informal operation."
                .into(),
        });
    }

    if result.maturity.signal == Maturity::StructuralStagnation {
        alerts.push(Alert {
            severity: Severity::Medium,
            message: "Structural stagnation signal; negative EBITDA risk over the holding period."
                .into(),
        });
    }

    if result.maturity.signal == Maturity::Nascent {
        alerts.push(Alert {
            severity: Severity::Low,
            message: "Insufficient track record: under two years of registry history.".into(),
        });
    }

    if result.convergence_pct < LOW_CONVERGENCE_THRESHOLD {
        alerts.push(Alert {
            severity: Severity::Low,
            message: "Estimation methods diverge; insufficient data for high confidence.".into(),
        });
    }

    if result.capital_tier.tier >= HIGH_CAPITAL_TIER && years_active < YOUNG_COMPANY_YEARS {
        alerts.push(Alert {
            severity: Severity::Low,
            message: "Large capital base on a very young company; verify source of funds.".into(),
        });
    }

    alerts
}
