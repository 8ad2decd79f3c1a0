use std::sync::Arc;

use chrono::NaiveDate;

use dealscope_engine::{
    AcquisitionCriteria, CompanyRecord, Estimator, EstimatorConfig, RegimeBucket,
    RegistrationStatus, Sector, Taxonomy,
};
use dealscope_pipeline::batch::deep_dive;
use dealscope_pipeline::pipelines::buyer_match::run_funnel;
use dealscope_pipeline::types::FunnelConfig;

// ---------------------------------------------------------------------------
// Test data fixtures
// ---------------------------------------------------------------------------

fn company(
    id: &str,
    industry_code: &str,
    bucket: Option<RegimeBucket>,
    region: Option<&str>,
    capital: Option<f64>,
    national_id: Option<&str>,
) -> CompanyRecord {
    CompanyRecord {
        id: id.into(),
        name: format!("Empresa {id}"),
        industry_code: industry_code.into(),
        national_id: national_id.map(Into::into),
        legal_capital: capital,
        size_bucket: bucket,
        registration_status: Some(RegistrationStatus::Active),
        region_code: region.map(Into::into),
        registration_date: NaiveDate::from_ymd_opt(2018, 1, 15),
        known_revenue: None,
        known_ebitda: None,
    }
}

/// A realistic mixed pool: software targets, adjacent-sector services,
/// off-target retail and construction, and a junk row.
fn sample_pool() -> Vec<CompanyRecord> {
    vec![
        // Exact sector + size + region + capital + valid id: top candidate.
        company(
            "tech-sp",
            "6201-5/01",
            Some(RegimeBucket::Small),
            Some("SP"),
            Some(300_000.0),
            Some("12.345.678/0001-95"),
        ),
        // Exact sector, adjacent size, wrong region.
        company(
            "tech-mg",
            "6202-3/00",
            Some(RegimeBucket::Medium),
            Some("MG"),
            Some(500_000.0),
            None,
        ),
        // Adjacent sector (Technology -> Services).
        company(
            "servicos-sp",
            "6920-6/01",
            Some(RegimeBucket::Small),
            Some("SP"),
            Some(120_000.0),
            None,
        ),
        // Off-target retail: sector 0, region 0, only data availability.
        company(
            "varejo-am",
            "4711-3/02",
            Some(RegimeBucket::Mei),
            Some("AM"),
            Some(5_000.0),
            None,
        ),
        // Off-target construction with nothing else going for it.
        company("obras-ba", "4120-4/00", None, Some("BA"), None, None),
        // Malformed: no industry code; must be skipped, not fatal.
        company("junk", "", None, None, None, None),
    ]
}

fn buyer_criteria() -> AcquisitionCriteria {
    AcquisitionCriteria {
        target_sector: Some(Sector::Technology),
        target_size: Some(RegimeBucket::Small),
        target_region: Some("SP".into()),
        code_allow_list: Some(vec!["62".into()]),
        ..Default::default()
    }
}

fn taxonomy() -> Arc<Taxonomy> {
    Arc::new(Taxonomy::brazil())
}

// ---------------------------------------------------------------------------
// Funnel behavior
// ---------------------------------------------------------------------------

#[tokio::test]
async fn funnel_ranks_exact_match_first() {
    let outcome = run_funnel(
        sample_pool(),
        buyer_criteria(),
        taxonomy(),
        FunnelConfig::default(),
        "req-1",
    )
    .await
    .unwrap();

    assert_eq!(outcome.shortlist[0].record.id, "tech-sp");
    // 40 sector + 15 prefix + 20 size + 20 region + 10 data + 10 id
    assert_eq!(outcome.shortlist[0].pre_score, Some(115.0));
    assert_eq!(outcome.shortlist[0].rank, Some(1));
}

#[tokio::test]
async fn adjacency_credited_candidates_survive_the_threshold() {
    let outcome = run_funnel(
        sample_pool(),
        buyer_criteria(),
        taxonomy(),
        FunnelConfig::default(),
        "req-2",
    )
    .await
    .unwrap();

    // Services is adjacent to Technology: 20 sector + 20 size exact
    // + 20 region + 10 data = 70, comfortably above the threshold.
    let servicos = outcome
        .shortlist
        .iter()
        .find(|c| c.record.id == "servicos-sp")
        .expect("adjacent-sector candidate should survive");
    assert_eq!(servicos.pre_score, Some(70.0));
}

#[tokio::test]
async fn low_scoring_candidates_are_filtered_out() {
    let outcome = run_funnel(
        sample_pool(),
        buyer_criteria(),
        taxonomy(),
        FunnelConfig::default(),
        "req-3",
    )
    .await
    .unwrap();

    // obras-ba scores 0 and must be gone; every survivor meets the bar.
    assert!(outcome.shortlist.iter().all(|c| c.record.id != "obras-ba"));
    assert!(outcome
        .shortlist
        .iter()
        .all(|c| c.pre_score.unwrap() >= 30.0));
    assert!(outcome.filtered_out >= 1);
}

#[tokio::test]
async fn malformed_records_are_skipped_before_scoring() {
    let outcome = run_funnel(
        sample_pool(),
        buyer_criteria(),
        taxonomy(),
        FunnelConfig::default(),
        "req-4",
    )
    .await
    .unwrap();

    // 6 raw rows, 1 malformed: 5 entered scoring.
    assert_eq!(outcome.pool_size, 5);
    assert!(outcome.shortlist.iter().all(|c| c.record.id != "junk"));
}

#[tokio::test]
async fn shortlist_never_exceeds_configured_size() {
    let config = FunnelConfig {
        min_score: 0.0,
        shortlist_size: 2,
    };
    let outcome = run_funnel(sample_pool(), buyer_criteria(), taxonomy(), config, "req-5")
        .await
        .unwrap();

    assert!(outcome.shortlist.len() <= 2);
    assert_eq!(outcome.shortlist[0].record.id, "tech-sp");
}

#[tokio::test]
async fn funnel_is_idempotent() {
    let a = run_funnel(
        sample_pool(),
        buyer_criteria(),
        taxonomy(),
        FunnelConfig::default(),
        "req-6a",
    )
    .await
    .unwrap();
    let b = run_funnel(
        sample_pool(),
        buyer_criteria(),
        taxonomy(),
        FunnelConfig::default(),
        "req-6b",
    )
    .await
    .unwrap();

    let scores_a: Vec<(String, f64)> = a
        .shortlist
        .iter()
        .map(|c| (c.record.id.clone(), c.pre_score.unwrap()))
        .collect();
    let scores_b: Vec<(String, f64)> = b
        .shortlist
        .iter()
        .map(|c| (c.record.id.clone(), c.pre_score.unwrap()))
        .collect();
    assert_eq!(scores_a, scores_b);
}

#[tokio::test]
async fn empty_pool_yields_empty_shortlist_not_error() {
    let outcome = run_funnel(
        Vec::new(),
        buyer_criteria(),
        taxonomy(),
        FunnelConfig::default(),
        "req-7",
    )
    .await
    .unwrap();

    assert!(outcome.shortlist.is_empty());
    assert_eq!(outcome.pool_size, 0);
}

#[tokio::test]
async fn empty_criteria_is_rejected_up_front() {
    let err = run_funnel(
        sample_pool(),
        AcquisitionCriteria::default(),
        taxonomy(),
        FunnelConfig::default(),
        "req-8",
    )
    .await
    .unwrap_err();

    assert!(err.contains("criteria"), "unexpected error: {err}");
}

#[tokio::test]
async fn missing_criteria_fields_zero_their_terms_without_failing() {
    // Region-only criteria: sector and size terms stay zero everywhere.
    let criteria = AcquisitionCriteria {
        target_region: Some("SP".into()),
        ..Default::default()
    };
    let config = FunnelConfig {
        min_score: 0.0,
        shortlist_size: 50,
    };
    let outcome = run_funnel(sample_pool(), criteria, taxonomy(), config, "req-9")
        .await
        .unwrap();

    for candidate in &outcome.shortlist {
        let b = candidate.breakdown.unwrap();
        assert_eq!(b.sector, 0.0);
        assert_eq!(b.size, 0.0);
    }
}

// ---------------------------------------------------------------------------
// Funnel -> deep dive handoff
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shortlist_deep_dive_preserves_order_and_bounds() {
    let outcome = run_funnel(
        sample_pool(),
        buyer_criteria(),
        taxonomy(),
        FunnelConfig::default(),
        "req-10",
    )
    .await
    .unwrap();

    let records: Vec<CompanyRecord> = outcome
        .shortlist
        .iter()
        .map(|c| c.record.clone())
        .collect();
    let estimator = Estimator::new(Taxonomy::brazil(), EstimatorConfig::default());
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let estimates = deep_dive(&estimator, &records, as_of);
    assert_eq!(estimates.len(), records.len());

    for (record, estimate) in records.iter().zip(&estimates) {
        let estimate = estimate.as_ref().unwrap();
        assert_eq!(estimate.company_id, record.id);
        assert!(estimate.confidence <= 100);
        assert!(estimate.convergence_pct <= 100);
    }
}
