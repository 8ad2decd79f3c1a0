//! Revenue/EBITDA estimator.
//!
//! Given one company record with at minimum an identity and an
//! industry code, derives two independent revenue estimates, reconciles
//! them into a convergence percentage, and scores confidence with a
//! deterministic additive scorecard. No statistics, no hidden state:
//! the same record always produces the same result.
//!
//! Method 1 (benchmark-driven) scales the sector benchmark by the
//! regime factor, the capped capital/ceiling ratio, and the location
//! factor. Method 2 (payroll-inversion) derives a worker count from
//! method 1, prices it at the sector wage, and inverts through the
//! sector payroll ratio.

use chrono::NaiveDate;
use serde::Serialize;

use crate::adjusters::{location_factor, regime_factor};
use crate::alerts::{synthesize_alerts, Alert};
use crate::capital::{capital_tier, maturity_signal, CapitalTier, MaturitySignal};
use crate::error::EngineResult;
use crate::taxonomy::{Sector, Taxonomy};
use crate::types::CompanyRecord;

/// Cap on the capital/ceiling ratio in method 1. Prevents unbounded
/// extrapolation from unusually large legal-capital declarations.
const CAPITAL_RATIO_CAP: f64 = 3.0;

/// Tunable scorecard values. The defaults are the production
/// calibration; downstream report reproducibility depends on them, so
/// tests pin every value.
#[derive(Clone, Copy, Debug)]
pub struct EstimatorConfig {
    pub base_confidence: u8,
    pub capital_bonus: u8,
    pub active_status_bonus: u8,
    pub industry_code_bonus: u8,
    pub region_bonus: u8,
    /// Bonus when convergence reaches `convergence_mid_threshold`.
    pub convergence_mid_bonus: u8,
    /// Bonus when convergence reaches `convergence_high_threshold`
    /// (replaces, not stacks with, the mid bonus).
    pub convergence_high_bonus: u8,
    pub age_bonus: u8,
    pub convergence_mid_threshold: u8,
    pub convergence_high_threshold: u8,
    /// Minimum whole years of activity for the age bonus.
    pub min_age_years: i64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_confidence: 20,
            capital_bonus: 15,
            active_status_bonus: 15,
            industry_code_bonus: 10,
            region_bonus: 10,
            convergence_mid_bonus: 10,
            convergence_high_bonus: 20,
            age_bonus: 10,
            convergence_mid_threshold: 70,
            convergence_high_threshold: 85,
            min_age_years: 3,
        }
    }
}

/// Estimated-headcount bucket derived from the worker count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WorkerBucket {
    /// 1–9 workers.
    Micro,
    /// 10–49 workers.
    Small,
    /// 50–249 workers.
    Medium,
    /// 250 or more workers.
    Large,
}

impl WorkerBucket {
    fn from_count(workers: u64) -> Self {
        match workers {
            0..=9 => WorkerBucket::Micro,
            10..=49 => WorkerBucket::Small,
            50..=249 => WorkerBucket::Medium,
            _ => WorkerBucket::Large,
        }
    }
}

/// Full output of one estimation call. Read-only once returned.
#[derive(Clone, Debug, Serialize)]
pub struct EstimationResult {
    pub company_id: String,
    pub sector: Sector,
    /// Method 1: benchmark-driven annual revenue estimate (R$).
    pub revenue_benchmark: f64,
    /// Method 2: payroll-inversion annual revenue estimate (R$).
    pub revenue_payroll: f64,
    /// Agreement between the two methods, 0–100.
    pub convergence_pct: u8,
    /// Additive scorecard result, 0–100.
    pub confidence: u8,
    pub estimated_workers: u64,
    pub worker_bucket: WorkerBucket,
    /// EBITDA proxy from the blended revenue and the sector's margin
    /// profile. A screening figure, not a financial statement.
    pub ebitda_estimate: f64,
    pub capital_tier: CapitalTier,
    pub maturity: MaturitySignal,
    pub alerts: Vec<Alert>,
}

/// The estimation engine: taxonomy tables plus scorecard calibration,
/// both immutable after construction.
pub struct Estimator {
    taxonomy: Taxonomy,
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(taxonomy: Taxonomy, config: EstimatorConfig) -> Self {
        Self { taxonomy, config }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Estimate one company as of the given date.
    ///
    /// Fails only on malformed mandatory input (missing id or industry
    /// code); every optional gap degrades the result instead.
    pub fn estimate(&self, record: &CompanyRecord, as_of: NaiveDate) -> EngineResult<EstimationResult> {
        record.validate()?;

        let sector = self.taxonomy.sector_for(&record.industry_code);
        let profile = self.taxonomy.profile_for(sector);
        let regime = regime_factor(record.size_bucket);
        let location = location_factor(record.region_code.as_deref());

        let capital = record.legal_capital.unwrap_or(0.0).max(0.0);
        let tier = capital_tier(capital);
        let years = record.years_active(as_of);
        let maturity = maturity_signal(years, &tier);

        // Method 1: benchmark x regime x capped capital ratio x location.
        let capital_ratio = if regime.ceiling > 0.0 {
            (capital / regime.ceiling).min(CAPITAL_RATIO_CAP)
        } else {
            1.0
        };
        let revenue_benchmark =
            profile.benchmark_revenue * regime.factor * capital_ratio * location.factor;

        // Method 2: invert the implied payroll through the sector's
        // payroll-to-revenue ratio. Worker count floors at 1.
        let workers = if profile.revenue_per_worker > 0.0 {
            ((revenue_benchmark / profile.revenue_per_worker).floor() as u64).max(1)
        } else {
            1
        };
        let annual_payroll = workers as f64 * profile.monthly_wage * 12.0;
        let payroll_ratio = if profile.payroll_ratio > 0.0 {
            profile.payroll_ratio
        } else {
            0.30
        };
        let revenue_payroll = annual_payroll / payroll_ratio;

        let convergence_pct = convergence(revenue_benchmark, revenue_payroll);
        let confidence = self.confidence(record, convergence_pct, years);

        let blended = (revenue_benchmark + revenue_payroll) / 2.0;
        let ebitda_estimate = blended * margin_rate(profile.margin_profile);

        let mut result = EstimationResult {
            company_id: record.id.clone(),
            sector,
            revenue_benchmark,
            revenue_payroll,
            convergence_pct,
            confidence,
            estimated_workers: workers,
            worker_bucket: WorkerBucket::from_count(workers),
            ebitda_estimate,
            capital_tier: tier,
            maturity,
            alerts: Vec::new(),
        };
        result.alerts = synthesize_alerts(record, &result, years);
        Ok(result)
    }

    /// Additive confidence scorecard, capped at 100. More corroborating
    /// registry signals always mean a higher score, monotonically.
    fn confidence(&self, record: &CompanyRecord, convergence_pct: u8, years: i64) -> u8 {
        let c = &self.config;
        let mut score: u32 = c.base_confidence as u32;

        if record.legal_capital.unwrap_or(0.0) > 0.0 {
            score += c.capital_bonus as u32;
        }
        if record.registration_status.is_some_and(|s| s.is_active()) {
            score += c.active_status_bonus as u32;
        }
        if !record.industry_code.trim().is_empty() {
            score += c.industry_code_bonus as u32;
        }
        if record.region_code.as_deref().is_some_and(|r| !r.trim().is_empty()) {
            score += c.region_bonus as u32;
        }
        if convergence_pct >= c.convergence_high_threshold {
            score += c.convergence_high_bonus as u32;
        } else if convergence_pct >= c.convergence_mid_threshold {
            score += c.convergence_mid_bonus as u32;
        }
        if years >= c.min_age_years {
            score += c.age_bonus as u32;
        }

        score.min(100) as u8
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(Taxonomy::default(), EstimatorConfig::default())
    }
}

/// Agreement between two revenue estimates as a 0–100 percentage.
///
/// Divergence is |r1 − r2| / max(r1, r2); a non-positive max means
/// there is nothing to agree on and counts as maximal divergence.
pub fn convergence(r1: f64, r2: f64) -> u8 {
    let max = r1.max(r2);
    if max <= 0.0 {
        return 0;
    }
    let divergence = (r1 - r2).abs() / max;
    (((1.0 - divergence) * 100.0).round()).clamp(0.0, 100.0) as u8
}

/// Screening EBITDA margin implied by a qualitative margin profile.
fn margin_rate(margin_profile: &str) -> f64 {
    match margin_profile {
        "high margin" => 0.20,
        "mid margin" => 0.12,
        "thin margin" => 0.06,
        _ => 0.10,
    }
}
