use crate::selector::Selector;
use crate::types::{CompanyCandidate, MatchQuery};

/// Ranks survivors by pre-score, descending, and truncates to the
/// shortlist size. Ties keep input order (stable sort).
pub struct ShortlistSelector {
    pub k: usize,
}

impl Default for ShortlistSelector {
    fn default() -> Self {
        Self { k: 50 }
    }
}

impl Selector<MatchQuery, CompanyCandidate> for ShortlistSelector {
    fn score(&self, candidate: &CompanyCandidate) -> f64 {
        candidate.pre_score.unwrap_or(f64::NEG_INFINITY)
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealscope_engine::{AcquisitionCriteria, CompanyRecord};

    fn candidate(id: &str, score: f64) -> CompanyCandidate {
        let mut c = CompanyCandidate::new(CompanyRecord {
            id: id.into(),
            name: "Empresa".into(),
            industry_code: "6201-5/01".into(),
            national_id: None,
            legal_capital: None,
            size_bucket: None,
            registration_status: None,
            region_code: None,
            registration_date: None,
            known_revenue: None,
            known_ebitda: None,
        });
        c.pre_score = Some(score);
        c
    }

    fn query() -> MatchQuery {
        MatchQuery::new(
            "req-1",
            AcquisitionCriteria {
                target_region: Some("SP".into()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn sorts_descending_and_truncates() {
        let selector = ShortlistSelector { k: 2 };
        let selected = selector.select(
            &query(),
            vec![candidate("low", 30.0), candidate("high", 90.0), candidate("mid", 60.0)],
        );
        let ids: Vec<&str> = selected.iter().map(|c| c.record.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid"]);
    }

    #[test]
    fn ties_preserve_input_order() {
        let selector = ShortlistSelector { k: 3 };
        let selected = selector.select(
            &query(),
            vec![candidate("first", 50.0), candidate("second", 50.0), candidate("third", 50.0)],
        );
        let ids: Vec<&str> = selected.iter().map(|c| c.record.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}
