use std::env;
use std::fs;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use dealscope_engine::{AcquisitionCriteria, Estimator, EstimatorConfig, Taxonomy};
use dealscope_pipeline::batch::deep_dive;
use dealscope_pipeline::company_loader::load_companies_file;
use dealscope_pipeline::prescore::ScoreBreakdown;
use dealscope_pipeline::{run_funnel, CompanyCandidate, FunnelConfig, FunnelOutcome};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DigestJson {
    generated_at: String,
    request_id: String,
    load_ms: u128,
    pipeline_ms: u128,
    shortlist: Vec<ShortlistJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    estimates: Vec<dealscope_engine::EstimationResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    estimate_errors: Vec<EstimateErrorJson>,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct ShortlistJson {
    rank: usize,
    company_id: String,
    name: String,
    industry_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    region_code: Option<String>,
    pre_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<ScoreBreakdown>,
}

#[derive(Serialize)]
struct EstimateErrorJson {
    company_id: String,
    error: String,
}

#[derive(Serialize)]
struct SummaryJson {
    pool_size: usize,
    shortlist_size: usize,
    filtered_out: usize,
    estimates_run: usize,
    estimate_failures: usize,
}

fn shortlist_json(candidate: &CompanyCandidate) -> ShortlistJson {
    ShortlistJson {
        rank: candidate.rank.unwrap_or(0),
        company_id: candidate.record.id.clone(),
        name: candidate.record.name.clone(),
        industry_code: candidate.record.industry_code.clone(),
        region_code: candidate.record.region_code.clone(),
        pre_score: candidate.score_or_zero(),
        breakdown: candidate.breakdown,
    }
}

fn build_json(
    outcome: &FunnelOutcome,
    estimates: Vec<dealscope_engine::EstimationResult>,
    estimate_errors: Vec<EstimateErrorJson>,
    request_id: &str,
    load_ms: u128,
    pipeline_ms: u128,
) -> DigestJson {
    let summary = SummaryJson {
        pool_size: outcome.pool_size,
        shortlist_size: outcome.shortlist.len(),
        filtered_out: outcome.filtered_out,
        estimates_run: estimates.len(),
        estimate_failures: estimate_errors.len(),
    };
    DigestJson {
        generated_at: Utc::now().to_rfc3339(),
        request_id: request_id.to_string(),
        load_ms,
        pipeline_ms,
        shortlist: outcome.shortlist.iter().map(shortlist_json).collect(),
        estimates,
        estimate_errors,
        summary,
    }
}

fn load_criteria(path: &str) -> Result<AcquisitionCriteria, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid criteria JSON in {}: {}", path, e))
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: dealscope-server <companies.csv> <criteria.json> [--deep-dive N] [--top N] [--min-score X]");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --deep-dive  Run financial estimation on the top N shortlisted companies");
        eprintln!("  --top        Shortlist size (default: 50)");
        eprintln!("  --min-score  Inclusion threshold for the pre-score filter (default: 30)");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  dealscope-server fixtures/companies.csv fixtures/criteria.json");
        eprintln!("  dealscope-server fixtures/companies.csv fixtures/criteria.json --deep-dive 10");
        process::exit(1);
    }

    let csv_path = &args[1];
    let criteria_path = &args[2];

    let mut config = FunnelConfig::default();
    let mut deep_dive_n: Option<usize> = None;
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--deep-dive" => {
                if i + 1 < args.len() {
                    deep_dive_n = Some(args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: --deep-dive requires a positive integer");
                        process::exit(1);
                    }));
                    i += 2;
                } else {
                    eprintln!("Error: --deep-dive requires a number");
                    process::exit(1);
                }
            }
            "--top" => {
                if i + 1 < args.len() {
                    config.shortlist_size = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: --top requires a positive integer");
                        process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --top requires a number");
                    process::exit(1);
                }
            }
            "--min-score" => {
                if i + 1 < args.len() {
                    config.min_score = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: --min-score requires a number");
                        process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --min-score requires a number");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    // Load the company pool and the buyer's criteria
    let load_start = Instant::now();
    let pool = match load_companies_file(csv_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading CSV: {}", e);
            process::exit(1);
        }
    };
    let criteria = match load_criteria(criteria_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading criteria: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();

    log::info!(
        "loaded {} companies from {}, running funnel (threshold {}, shortlist {})",
        pool.len(),
        csv_path,
        config.min_score,
        config.shortlist_size
    );

    let taxonomy = Arc::new(Taxonomy::brazil());
    let request_id = format!("funnel-{}", Utc::now().format("%Y%m%d%H%M%S"));

    // Run the funnel
    let pipeline_start = Instant::now();
    let outcome = match run_funnel(
        pool,
        criteria,
        Arc::clone(&taxonomy),
        config,
        request_id.clone(),
    )
    .await
    {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Funnel failed: {}", e);
            process::exit(1);
        }
    };

    // Optional deep dive over the head of the shortlist
    let mut estimates = Vec::new();
    let mut estimate_errors = Vec::new();
    if let Some(n) = deep_dive_n {
        let estimator = Estimator::new(Taxonomy::brazil(), EstimatorConfig::default());
        let head: Vec<_> = outcome
            .shortlist
            .iter()
            .take(n)
            .map(|c| c.record.clone())
            .collect();
        let as_of = Utc::now().date_naive();
        for (record, result) in head.iter().zip(deep_dive(&estimator, &head, as_of)) {
            match result {
                Ok(estimate) => estimates.push(estimate),
                Err(e) => estimate_errors.push(EstimateErrorJson {
                    company_id: record.id.clone(),
                    error: e.to_string(),
                }),
            }
        }
    }
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    let digest = build_json(
        &outcome,
        estimates,
        estimate_errors,
        &request_id,
        load_ms,
        pipeline_ms,
    );
    match serde_json::to_string_pretty(&digest) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing digest: {}", e);
            process::exit(1);
        }
    }
}
