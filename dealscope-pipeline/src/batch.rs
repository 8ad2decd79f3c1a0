//! Parallel deep-dive estimation over a shortlist.
//!
//! Each company's estimation is independent, so the batch fans out
//! across the rayon pool. Results come back in input order, and a
//! malformed record yields its own error slot instead of poisoning the
//! batch.

use chrono::NaiveDate;
use rayon::prelude::*;

use dealscope_engine::{CompanyRecord, EngineError, EstimationResult, Estimator};

/// Estimate every record, preserving input order.
pub fn deep_dive(
    estimator: &Estimator,
    records: &[CompanyRecord],
    as_of: NaiveDate,
) -> Vec<Result<EstimationResult, EngineError>> {
    records
        .par_iter()
        .map(|record| estimator.estimate(record, as_of))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealscope_engine::{EstimatorConfig, Taxonomy};

    fn record(id: &str, code: &str, capital: f64) -> CompanyRecord {
        CompanyRecord {
            id: id.into(),
            name: format!("Empresa {id}"),
            industry_code: code.into(),
            national_id: None,
            legal_capital: Some(capital),
            size_bucket: None,
            registration_status: None,
            region_code: None,
            registration_date: None,
            known_revenue: None,
            known_ebitda: None,
        }
    }

    #[test]
    fn results_preserve_input_order() {
        let estimator = Estimator::new(Taxonomy::brazil(), EstimatorConfig::default());
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let records = vec![
            record("cmp-a", "6201-5/01", 100_000.0),
            record("cmp-b", "4711-3/02", 50_000.0),
            record("cmp-c", "4120-4/00", 900_000.0),
        ];

        let results = deep_dive(&estimator, &records, as_of);
        assert_eq!(results.len(), 3);
        let ids: Vec<&str> = results
            .iter()
            .map(|r| r.as_ref().unwrap().company_id.as_str())
            .collect();
        assert_eq!(ids, vec!["cmp-a", "cmp-b", "cmp-c"]);
    }

    #[test]
    fn malformed_record_fails_alone() {
        let estimator = Estimator::new(Taxonomy::brazil(), EstimatorConfig::default());
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let records = vec![
            record("cmp-a", "6201-5/01", 100_000.0),
            record("cmp-bad", "", 0.0),
            record("cmp-c", "4711-3/02", 10_000.0),
        ];

        let results = deep_dive(&estimator, &records, as_of);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
