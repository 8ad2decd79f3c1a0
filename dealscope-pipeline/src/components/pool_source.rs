use async_trait::async_trait;

use dealscope_engine::CompanyRecord;

use crate::source::Source;
use crate::types::{CompanyCandidate, MatchQuery};

/// Source backed by an in-memory candidate pool.
///
/// Records that fail mandatory-field validation are skipped with a
/// warning rather than aborting the whole pool: one malformed registry
/// row must never sink a funnel run over thousands of candidates.
pub struct PoolSource {
    records: Vec<CompanyRecord>,
}

impl PoolSource {
    pub fn new(records: Vec<CompanyRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl Source<MatchQuery, CompanyCandidate> for PoolSource {
    async fn get_candidates(&self, query: &MatchQuery) -> Result<Vec<CompanyCandidate>, String> {
        let mut candidates = Vec::with_capacity(self.records.len());
        for record in &self.records {
            match record.validate() {
                Ok(()) => candidates.push(CompanyCandidate::new(record.clone())),
                Err(e) => {
                    log::warn!(
                        "request_id={} skipping malformed record: {}",
                        query.request_id,
                        e
                    );
                }
            }
        }
        Ok(candidates)
    }
}
