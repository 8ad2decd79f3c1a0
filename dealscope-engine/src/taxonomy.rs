//! Sector taxonomy — static classification tables.
//!
//! Maps national activity-classification (CNAE) codes to sector
//! labels, carries the hand-curated directed adjacency graph, and the
//! per-sector business-model benchmarks the estimator reads. All of it
//! is configuration data, not computed: the tables live in one
//! injectable [`Taxonomy`] value so they stay independently testable
//! and swappable per market.
//!
//! Adjacency is directed by construction. Edges are authored exactly
//! as configured — no symmetry inference, no self-edges.

use serde::{Deserialize, Serialize};

/// Fixed enumeration of sector labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Agribusiness,
    Energy,
    Food,
    Manufacturing,
    Construction,
    Commerce,
    Logistics,
    Technology,
    Finance,
    Services,
    Education,
    Health,
    /// Catch-all for codes outside every tabulated band.
    Other,
}

impl Sector {
    pub fn label(self) -> &'static str {
        match self {
            Sector::Agribusiness => "Agribusiness",
            Sector::Energy => "Energy",
            Sector::Food => "Food & Beverage",
            Sector::Manufacturing => "Manufacturing",
            Sector::Construction => "Construction",
            Sector::Commerce => "Commerce",
            Sector::Logistics => "Logistics",
            Sector::Technology => "Technology",
            Sector::Finance => "Financial Services",
            Sector::Services => "Professional Services",
            Sector::Education => "Education",
            Sector::Health => "Health",
            Sector::Other => "Other",
        }
    }
}

/// Business-model benchmark constants for one sector.
#[derive(Clone, Debug, Serialize)]
pub struct SectorProfile {
    pub sector: Sector,
    /// Baseline annual revenue for a reference company in the sector (R$).
    pub benchmark_revenue: f64,
    /// Annual revenue generated per worker (R$).
    pub revenue_per_worker: f64,
    /// Share of revenue consumed by payroll, in (0, 1).
    pub payroll_ratio: f64,
    /// Average monthly wage in the sector (R$).
    pub monthly_wage: f64,
    /// Qualitative margin profile label.
    pub margin_profile: &'static str,
}

/// One contiguous CNAE-division band mapping to a sector.
struct CodeRange {
    lo: u32,
    hi: u32,
    sector: Sector,
}

/// Immutable, versioned classification tables, loaded once and shared.
pub struct Taxonomy {
    ranges: Vec<CodeRange>,
    adjacency: Vec<(Sector, Vec<Sector>)>,
    profiles: Vec<SectorProfile>,
    default_profile: SectorProfile,
}

impl Taxonomy {
    /// Brazilian registry encoding: CNAE divisions, curated adjacency,
    /// and benchmark constants. This is the production table set; tests
    /// pin the values so recalibration stays a deliberate change.
    pub fn brazil() -> Self {
        let ranges = vec![
            CodeRange { lo: 1, hi: 3, sector: Sector::Agribusiness },
            CodeRange { lo: 5, hi: 9, sector: Sector::Energy },
            CodeRange { lo: 10, hi: 12, sector: Sector::Food },
            CodeRange { lo: 13, hi: 33, sector: Sector::Manufacturing },
            CodeRange { lo: 35, hi: 39, sector: Sector::Energy },
            CodeRange { lo: 41, hi: 43, sector: Sector::Construction },
            CodeRange { lo: 45, hi: 47, sector: Sector::Commerce },
            CodeRange { lo: 49, hi: 53, sector: Sector::Logistics },
            CodeRange { lo: 55, hi: 56, sector: Sector::Food },
            CodeRange { lo: 58, hi: 63, sector: Sector::Technology },
            CodeRange { lo: 64, hi: 66, sector: Sector::Finance },
            CodeRange { lo: 68, hi: 82, sector: Sector::Services },
            CodeRange { lo: 85, hi: 85, sector: Sector::Education },
            CodeRange { lo: 86, hi: 88, sector: Sector::Health },
        ];

        // Directed: origin sector -> sectors a buyer there plausibly
        // expands into. Authored edge-for-edge; not symmetric.
        let adjacency = vec![
            (Sector::Agribusiness, vec![Sector::Food, Sector::Manufacturing]),
            (Sector::Energy, vec![Sector::Construction, Sector::Manufacturing]),
            (Sector::Food, vec![Sector::Commerce, Sector::Agribusiness]),
            (Sector::Manufacturing, vec![Sector::Logistics, Sector::Commerce, Sector::Agribusiness]),
            (Sector::Construction, vec![Sector::Manufacturing, Sector::Services]),
            (Sector::Commerce, vec![Sector::Logistics, Sector::Food]),
            (Sector::Logistics, vec![Sector::Commerce, Sector::Manufacturing]),
            (Sector::Technology, vec![Sector::Services, Sector::Finance, Sector::Education]),
            (Sector::Finance, vec![Sector::Technology, Sector::Services]),
            (Sector::Services, vec![Sector::Technology, Sector::Finance]),
            (Sector::Education, vec![Sector::Technology, Sector::Services]),
            (Sector::Health, vec![Sector::Services, Sector::Technology]),
            (Sector::Other, vec![]),
        ];

        let profiles = vec![
            profile(Sector::Agribusiness, 2_600_000.0, 210_000.0, 0.15, 2_200.0, "thin margin"),
            profile(Sector::Energy, 3_500_000.0, 320_000.0, 0.20, 5_900.0, "mid margin"),
            profile(Sector::Food, 950_000.0, 70_000.0, 0.22, 2_000.0, "thin margin"),
            profile(Sector::Manufacturing, 2_400_000.0, 150_000.0, 0.28, 3_200.0, "mid margin"),
            profile(Sector::Construction, 2_000_000.0, 130_000.0, 0.30, 2_800.0, "mid margin"),
            profile(Sector::Commerce, 1_200_000.0, 95_000.0, 0.18, 2_400.0, "thin margin"),
            profile(Sector::Logistics, 1_700_000.0, 140_000.0, 0.25, 2_600.0, "mid margin"),
            profile(Sector::Technology, 1_800_000.0, 180_000.0, 0.42, 6_500.0, "high margin"),
            profile(Sector::Finance, 2_200_000.0, 260_000.0, 0.33, 7_800.0, "high margin"),
            profile(Sector::Services, 900_000.0, 110_000.0, 0.38, 3_000.0, "high margin"),
            profile(Sector::Education, 800_000.0, 85_000.0, 0.48, 3_400.0, "mid margin"),
            profile(Sector::Health, 1_500_000.0, 125_000.0, 0.35, 4_100.0, "mid margin"),
        ];

        let default_profile =
            profile(Sector::Other, 1_000_000.0, 100_000.0, 0.30, 2_800.0, "unknown margin");

        Self { ranges, adjacency, profiles, default_profile }
    }

    /// Map an industry code to its sector label.
    ///
    /// Only the leading division (first two digits) matters; codes
    /// outside every band, and codes that do not start with digits,
    /// fall back to [`Sector::Other`].
    pub fn sector_for(&self, industry_code: &str) -> Sector {
        match division_of(industry_code) {
            Some(div) => self
                .ranges
                .iter()
                .find(|r| div >= r.lo && div <= r.hi)
                .map(|r| r.sector)
                .unwrap_or(Sector::Other),
            None => Sector::Other,
        }
    }

    /// Directed adjacency set for a sector, exactly as configured.
    pub fn adjacent_sectors(&self, sector: Sector) -> &[Sector] {
        self.adjacency
            .iter()
            .find(|(s, _)| *s == sector)
            .map(|(_, adj)| adj.as_slice())
            .unwrap_or(&[])
    }

    /// Benchmark profile for a sector, or the generic default when the
    /// sector is not explicitly tabulated.
    pub fn profile_for(&self, sector: Sector) -> &SectorProfile {
        self.profiles
            .iter()
            .find(|p| p.sector == sector)
            .unwrap_or(&self.default_profile)
    }

    /// Average monthly wage for a sector (default profile fallback).
    pub fn monthly_wage_for(&self, sector: Sector) -> f64 {
        self.profile_for(sector).monthly_wage
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::brazil()
    }
}

fn profile(
    sector: Sector,
    benchmark_revenue: f64,
    revenue_per_worker: f64,
    payroll_ratio: f64,
    monthly_wage: f64,
    margin_profile: &'static str,
) -> SectorProfile {
    SectorProfile {
        sector,
        benchmark_revenue,
        revenue_per_worker,
        payroll_ratio,
        monthly_wage,
        margin_profile,
    }
}

/// Leading two-digit CNAE division of a code like "6201-5/01".
fn division_of(code: &str) -> Option<u32> {
    let digits: String = code.chars().filter(|c| c.is_ascii_digit()).take(2).collect();
    if digits.is_empty() {
        return None;
    }
    // A single leading digit is a division below 10 only when the raw
    // code itself is that short ("1"), otherwise it is parsed as-is.
    digits.parse::<u32>().ok()
}
