use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::taxonomy::Sector;

// ---------------------------------------------------------------------------
// Registry enums
// ---------------------------------------------------------------------------

/// Registry-assigned size/tax-regime bucket.
///
/// Ordered from smallest/simplest regime to largest/most complex; the
/// funnel's size-adjacency term relies on this declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegimeBucket {
    /// Individual micro-entrepreneur (MEI).
    Mei,
    /// Microempresa (ME).
    Micro,
    /// Empresa de pequeno porte (EPP).
    Small,
    /// Mid-size, normal tax regime.
    Medium,
    /// Large / "demais" regime, full apuração.
    Large,
}

impl RegimeBucket {
    /// Fixed ordering used for one-step size adjacency in the funnel.
    pub const ORDERED: [RegimeBucket; 5] = [
        RegimeBucket::Mei,
        RegimeBucket::Micro,
        RegimeBucket::Small,
        RegimeBucket::Medium,
        RegimeBucket::Large,
    ];

    /// Position in the fixed bucket order.
    pub fn ordinal(self) -> usize {
        Self::ORDERED.iter().position(|b| *b == self).unwrap_or(0)
    }
}

/// Registry situation of the company.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Active,
    Suspended,
    Inactive,
    Cancelled,
}

impl RegistrationStatus {
    pub fn is_active(self) -> bool {
        matches!(self, RegistrationStatus::Active)
    }
}

// ---------------------------------------------------------------------------
// Company record
// ---------------------------------------------------------------------------

/// Immutable snapshot of a company as read from the public registry.
///
/// Identity and industry code are mandatory; everything else is
/// optional and degrades scoring when absent. The engine never mutates
/// a record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    /// National activity-classification code, e.g. "6201-5/01".
    pub industry_code: String,
    /// National identifier (CNPJ), punctuation tolerated.
    pub national_id: Option<String>,
    /// Declared legal capital (registry filing), size proxy only.
    pub legal_capital: Option<f64>,
    pub size_bucket: Option<RegimeBucket>,
    pub registration_status: Option<RegistrationStatus>,
    /// Two-letter federative-unit code, e.g. "SP".
    pub region_code: Option<String>,
    pub registration_date: Option<NaiveDate>,
    pub known_revenue: Option<f64>,
    pub known_ebitda: Option<f64>,
}

impl CompanyRecord {
    /// Validate the mandatory fields the estimator and funnel rely on.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::MissingField {
                company_id: self.name.clone(),
                field: "id",
            });
        }
        if self.industry_code.trim().is_empty() {
            return Err(EngineError::MissingField {
                company_id: self.id.clone(),
                field: "industry_code",
            });
        }
        Ok(())
    }

    /// Whole years between registration and `as_of`. Zero when the
    /// registration date is missing or in the future.
    pub fn years_active(&self, as_of: NaiveDate) -> i64 {
        match self.registration_date {
            Some(date) if date <= as_of => {
                let days = (as_of - date).num_days();
                days / 365
            }
            _ => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Acquisition criteria
// ---------------------------------------------------------------------------

/// Buyer's appetite for risk in the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskPreference {
    Conservative,
    Balanced,
    Aggressive,
}

/// Buyer-supplied acquisition criteria. Read-only input to the funnel.
///
/// Every field is optional; an absent field contributes zero to each
/// rubric term that depends on it. Entirely-empty criteria is the one
/// malformed-input case and is rejected up front.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AcquisitionCriteria {
    pub target_sector: Option<Sector>,
    pub target_size: Option<RegimeBucket>,
    pub target_region: Option<String>,
    /// Industry-code prefixes the buyer explicitly wants, e.g. ["62", "63"].
    pub code_allow_list: Option<Vec<String>>,
    pub risk_preference: Option<RiskPreference>,
    pub notes: Option<String>,
}

impl AcquisitionCriteria {
    /// Reject criteria with no targeting signal at all. Notes alone do
    /// not count: the funnel cannot score free text.
    pub fn validate(&self) -> EngineResult<()> {
        let has_allow_list = self
            .code_allow_list
            .as_ref()
            .is_some_and(|l| !l.is_empty());
        if self.target_sector.is_none()
            && self.target_size.is_none()
            && self.target_region.is_none()
            && !has_allow_list
        {
            return Err(EngineError::EmptyCriteria);
        }
        Ok(())
    }
}
