//! The pre-scoring rubric.
//!
//! Pure, additive, explainable: each term is independent, missing
//! criteria fields contribute zero, and the same (criteria, record)
//! pair always produces the same breakdown. Maximum attainable score
//! is 40+15+20+20+10+10 = 125; nothing caps it artificially beyond
//! what the rubric produces.

use serde::Serialize;

use dealscope_engine::{AcquisitionCriteria, CompanyRecord, Taxonomy};

/// Exact sector match with the buyer's target.
const SECTOR_EXACT: f64 = 40.0;
/// Target sector lists the candidate's sector as adjacent.
const SECTOR_ADJACENT: f64 = 20.0;
/// Candidate's industry code matches an allow-listed prefix.
/// Cumulative with the sector term, not mutually exclusive.
const CODE_PREFIX: f64 = 15.0;
/// Exact size-bucket match.
const SIZE_EXACT: f64 = 20.0;
/// One step away in the fixed bucket order.
const SIZE_ADJACENT: f64 = 10.0;
/// Exact region match.
const REGION_EXACT: f64 = 20.0;
/// Any known revenue or legal-capital figure present.
const DATA_AVAILABLE: f64 = 10.0;
/// Well-formed national identifier present.
const IDENTITY_VALID: f64 = 10.0;

/// Per-term contributions of one candidate's pre-score.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ScoreBreakdown {
    pub sector: f64,
    pub code_prefix: f64,
    pub size: f64,
    pub region: f64,
    pub data_availability: f64,
    pub identity: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.sector
            + self.code_prefix
            + self.size
            + self.region
            + self.data_availability
            + self.identity
    }
}

/// Score one candidate against the buyer's criteria.
pub fn pre_score(
    taxonomy: &Taxonomy,
    criteria: &AcquisitionCriteria,
    record: &CompanyRecord,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    if let Some(target) = criteria.target_sector {
        let candidate_sector = taxonomy.sector_for(&record.industry_code);
        if candidate_sector == target {
            breakdown.sector = SECTOR_EXACT;
        } else if taxonomy.adjacent_sectors(target).contains(&candidate_sector) {
            breakdown.sector = SECTOR_ADJACENT;
        }
    }

    if let Some(allow_list) = &criteria.code_allow_list {
        let code_digits = digits_of(&record.industry_code);
        if allow_list
            .iter()
            .map(|p| digits_of(p))
            .any(|prefix| !prefix.is_empty() && code_digits.starts_with(&prefix))
        {
            breakdown.code_prefix = CODE_PREFIX;
        }
    }

    if let (Some(target), Some(actual)) = (criteria.target_size, record.size_bucket) {
        if target == actual {
            breakdown.size = SIZE_EXACT;
        } else if target.ordinal().abs_diff(actual.ordinal()) == 1 {
            breakdown.size = SIZE_ADJACENT;
        }
    }

    if let (Some(target), Some(actual)) = (&criteria.target_region, &record.region_code) {
        if target.trim().eq_ignore_ascii_case(actual.trim()) {
            breakdown.region = REGION_EXACT;
        }
    }

    if record.known_revenue.is_some() || record.legal_capital.is_some() {
        breakdown.data_availability = DATA_AVAILABLE;
    }

    if record
        .national_id
        .as_deref()
        .is_some_and(cnpj_is_valid)
    {
        breakdown.identity = IDENTITY_VALID;
    }

    breakdown
}

/// Digits-only normalization for code/prefix comparison.
fn digits_of(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Standard CNPJ well-formedness check: 14 digits, not a repeated
/// digit, and both mod-11 verification digits correct.
pub fn cnpj_is_valid(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 14 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    const WEIGHTS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const WEIGHTS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    check_digit(&digits[..12], &WEIGHTS_1) == digits[12]
        && check_digit(&digits[..13], &WEIGHTS_2) == digits[13]
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealscope_engine::{RegimeBucket, Sector};

    fn taxonomy() -> Taxonomy {
        Taxonomy::brazil()
    }

    fn record(code: &str) -> CompanyRecord {
        CompanyRecord {
            id: "cmp-1".into(),
            name: "Alvo Ltda".into(),
            industry_code: code.into(),
            national_id: None,
            legal_capital: None,
            size_bucket: None,
            registration_status: None,
            region_code: None,
            registration_date: None,
            known_revenue: None,
            known_ebitda: None,
        }
    }

    #[test]
    fn documented_example_scores_exactly_eighty() {
        // Exact sector (+40), exact size (+20), no region match, known
        // revenue (+10), valid id (+10) = 80.
        let criteria = AcquisitionCriteria {
            target_sector: Some(Sector::Technology),
            target_size: Some(RegimeBucket::Small),
            target_region: Some("SP".into()),
            ..Default::default()
        };
        let mut r = record("6201-5/01");
        r.size_bucket = Some(RegimeBucket::Small);
        r.region_code = Some("MG".into());
        r.known_revenue = Some(2_500_000.0);
        r.national_id = Some("12.345.678/0001-95".into());

        let b = pre_score(&taxonomy(), &criteria, &r);
        assert_eq!(b.sector, 40.0);
        assert_eq!(b.size, 20.0);
        assert_eq!(b.region, 0.0);
        assert_eq!(b.data_availability, 10.0);
        assert_eq!(b.identity, 10.0);
        assert_eq!(b.total(), 80.0);
    }

    #[test]
    fn adjacent_sector_earns_partial_credit() {
        // Technology -> Services is a configured directed edge.
        let criteria = AcquisitionCriteria {
            target_sector: Some(Sector::Technology),
            ..Default::default()
        };
        let b = pre_score(&taxonomy(), &criteria, &record("6920-6/01")); // Services
        assert_eq!(b.sector, 20.0);

        // No edge from Technology to Construction.
        let b = pre_score(&taxonomy(), &criteria, &record("4120-4/00"));
        assert_eq!(b.sector, 0.0);
    }

    #[test]
    fn code_prefix_bonus_is_cumulative_with_sector_term() {
        let criteria = AcquisitionCriteria {
            target_sector: Some(Sector::Technology),
            code_allow_list: Some(vec!["62".into()]),
            ..Default::default()
        };
        let b = pre_score(&taxonomy(), &criteria, &record("6201-5/01"));
        assert_eq!(b.sector, 40.0);
        assert_eq!(b.code_prefix, 15.0);
        assert_eq!(b.total(), 55.0);
    }

    #[test]
    fn prefix_matching_ignores_code_punctuation() {
        let criteria = AcquisitionCriteria {
            code_allow_list: Some(vec!["62-01".into()]),
            ..Default::default()
        };
        let b = pre_score(&taxonomy(), &criteria, &record("6201-5/01"));
        assert_eq!(b.code_prefix, 15.0);
    }

    #[test]
    fn size_one_step_away_earns_half_credit() {
        let criteria = AcquisitionCriteria {
            target_size: Some(RegimeBucket::Medium),
            ..Default::default()
        };
        let mut r = record("6201-5/01");

        r.size_bucket = Some(RegimeBucket::Medium);
        assert_eq!(pre_score(&taxonomy(), &criteria, &r).size, 20.0);

        r.size_bucket = Some(RegimeBucket::Small);
        assert_eq!(pre_score(&taxonomy(), &criteria, &r).size, 10.0);

        r.size_bucket = Some(RegimeBucket::Mei);
        assert_eq!(pre_score(&taxonomy(), &criteria, &r).size, 0.0);
    }

    #[test]
    fn missing_criteria_fields_contribute_zero() {
        // Only a region target: every other term must stay zero even for
        // a rich candidate.
        let criteria = AcquisitionCriteria {
            target_region: Some("SP".into()),
            ..Default::default()
        };
        let mut r = record("6201-5/01");
        r.size_bucket = Some(RegimeBucket::Small);
        r.region_code = Some("SP".into());

        let b = pre_score(&taxonomy(), &criteria, &r);
        assert_eq!(b.sector, 0.0);
        assert_eq!(b.size, 0.0);
        assert_eq!(b.region, 20.0);
        assert_eq!(b.total(), 20.0);
    }

    #[test]
    fn maximum_attainable_score_is_125() {
        let criteria = AcquisitionCriteria {
            target_sector: Some(Sector::Technology),
            target_size: Some(RegimeBucket::Small),
            target_region: Some("SP".into()),
            code_allow_list: Some(vec!["62".into()]),
            ..Default::default()
        };
        let mut r = record("6201-5/01");
        r.size_bucket = Some(RegimeBucket::Small);
        r.region_code = Some("SP".into());
        r.legal_capital = Some(500_000.0);
        r.national_id = Some("12.345.678/0001-95".into());

        assert_eq!(pre_score(&taxonomy(), &criteria, &r).total(), 125.0);
    }

    #[test]
    fn scoring_is_idempotent() {
        let criteria = AcquisitionCriteria {
            target_sector: Some(Sector::Commerce),
            target_region: Some("RJ".into()),
            ..Default::default()
        };
        let r = record("4711-3/02");
        let a = pre_score(&taxonomy(), &criteria, &r).total();
        let b = pre_score(&taxonomy(), &criteria, &r).total();
        assert_eq!(a, b);
    }

    #[test]
    fn cnpj_validation_accepts_valid_and_rejects_malformed() {
        assert!(cnpj_is_valid("12.345.678/0001-95"));
        assert!(cnpj_is_valid("12345678000195"));

        assert!(!cnpj_is_valid("12.345.678/0001-00")); // wrong check digits
        assert!(!cnpj_is_valid("11.111.111/1111-11")); // repeated digit
        assert!(!cnpj_is_valid("1234567800019")); // 13 digits
        assert!(!cnpj_is_valid(""));
    }
}
