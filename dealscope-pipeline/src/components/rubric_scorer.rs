use async_trait::async_trait;
use std::sync::Arc;

use dealscope_engine::Taxonomy;

use crate::prescore::pre_score;
use crate::scorer::Scorer;
use crate::types::{CompanyCandidate, MatchQuery};

/// Applies the additive pre-scoring rubric to every candidate.
///
/// All scoring data comes from the shared taxonomy tables and the
/// candidate record itself — one linear pass, no external calls.
pub struct RubricScorer {
    taxonomy: Arc<Taxonomy>,
}

impl RubricScorer {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }
}

#[async_trait]
impl Scorer<MatchQuery, CompanyCandidate> for RubricScorer {
    async fn score(
        &self,
        query: &MatchQuery,
        candidates: &[CompanyCandidate],
    ) -> Result<Vec<CompanyCandidate>, String> {
        let scored = candidates
            .iter()
            .map(|c| {
                let breakdown = pre_score(&self.taxonomy, &query.criteria, &c.record);
                CompanyCandidate {
                    pre_score: Some(breakdown.total()),
                    breakdown: Some(breakdown),
                    ..c.clone()
                }
            })
            .collect();
        Ok(scored)
    }

    fn update(&self, candidate: &mut CompanyCandidate, scored: CompanyCandidate) {
        candidate.pre_score = scored.pre_score;
        candidate.breakdown = scored.breakdown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealscope_engine::{AcquisitionCriteria, CompanyRecord, Sector};

    #[tokio::test]
    async fn scorer_populates_score_and_breakdown() {
        let scorer = RubricScorer::new(Arc::new(Taxonomy::brazil()));
        let query = MatchQuery::new(
            "req-1",
            AcquisitionCriteria {
                target_sector: Some(Sector::Technology),
                ..Default::default()
            },
        );
        let record = CompanyRecord {
            id: "cmp-1".into(),
            name: "Vetor".into(),
            industry_code: "6201-5/01".into(),
            national_id: None,
            legal_capital: None,
            size_bucket: None,
            registration_status: None,
            region_code: None,
            registration_date: None,
            known_revenue: None,
            known_ebitda: None,
        };
        let candidates = vec![CompanyCandidate::new(record)];

        let scored = scorer.score(&query, &candidates).await.unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].pre_score, Some(40.0));
        assert_eq!(scored[0].breakdown.unwrap().sector, 40.0);
    }
}
