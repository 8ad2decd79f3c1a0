//! CSV company pool loader.
//!
//! Parses registry exports into `CompanyRecord` values. Expected CSV
//! columns:
//!   id, name, industry_code, national_id, legal_capital, size_bucket,
//!   registration_status, region_code, registration_date,
//!   known_revenue, known_ebitda
//!
//! Registry exports are messy: numeric fields may be blank, enums come
//! as registry strings ("MEI", "ATIVA"), dates as ISO days. The
//! deserializers here absorb that; anything truly unreadable is a
//! per-line error naming the line.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use dealscope_engine::{CompanyRecord, RegimeBucket, RegistrationStatus};

/// A raw CSV row; converted to `CompanyRecord` after parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyCsvRow {
    pub id: String,
    pub name: String,
    pub industry_code: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub national_id: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    pub legal_capital: Option<f64>,
    #[serde(default, deserialize_with = "optional_bucket")]
    pub size_bucket: Option<RegimeBucket>,
    #[serde(default, deserialize_with = "optional_status")]
    pub registration_status: Option<RegistrationStatus>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub region_code: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub registration_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_number")]
    pub known_revenue: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub known_ebitda: Option<f64>,
}

impl CompanyCsvRow {
    pub fn into_record(self) -> CompanyRecord {
        CompanyRecord {
            id: self.id,
            name: self.name,
            industry_code: self.industry_code,
            national_id: self.national_id,
            legal_capital: self.legal_capital,
            size_bucket: self.size_bucket,
            registration_status: self.registration_status,
            region_code: self.region_code,
            registration_date: self.registration_date,
            known_revenue: self.known_revenue,
            known_ebitda: self.known_ebitda,
        }
    }
}

/// Load company records from a CSV reader.
pub fn load_companies<R: Read>(reader: R) -> Result<Vec<CompanyRecord>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: CompanyCsvRow = result
            .map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        records.push(row.into_record());
    }
    Ok(records)
}

/// Load company records from a CSV file path.
pub fn load_companies_file(path: &str) -> Result<Vec<CompanyRecord>, String> {
    let file =
        std::fs::File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_companies(file)
}

/// Group records by region code; records with no region land under "".
pub fn group_by_region(records: &[CompanyRecord]) -> Vec<(String, Vec<CompanyRecord>)> {
    let mut groups: std::collections::HashMap<String, Vec<CompanyRecord>> =
        std::collections::HashMap::new();
    for record in records {
        let region = record.region_code.clone().unwrap_or_default();
        groups.entry(region).or_default().push(record.clone());
    }
    let mut result: Vec<_> = groups.into_iter().collect();
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

// ---------------------------------------------------------------------------
// Field deserializers
// ---------------------------------------------------------------------------

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// Blank → None; accepts both "1234.56" and "1234,56" decimal commas.
fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("expected number, got '{}'", trimmed)))
}

/// Registry size/regime strings: MEI, ME, EPP, MEDIA/MEDIUM, DEMAIS/LARGE.
fn optional_bucket<'de, D>(deserializer: D) -> Result<Option<RegimeBucket>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.trim().to_ascii_uppercase().as_str() {
        "" => Ok(None),
        "MEI" => Ok(Some(RegimeBucket::Mei)),
        "ME" | "MICRO" => Ok(Some(RegimeBucket::Micro)),
        "EPP" | "SMALL" => Ok(Some(RegimeBucket::Small)),
        "MEDIA" | "MEDIUM" => Ok(Some(RegimeBucket::Medium)),
        "DEMAIS" | "LARGE" | "GRANDE" => Ok(Some(RegimeBucket::Large)),
        other => Err(serde::de::Error::custom(format!(
            "unknown size bucket '{}'",
            other
        ))),
    }
}

/// Registry status strings: ATIVA, SUSPENSA, INAPTA, BAIXADA.
fn optional_status<'de, D>(deserializer: D) -> Result<Option<RegistrationStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.trim().to_ascii_uppercase().as_str() {
        "" => Ok(None),
        "ATIVA" | "ACTIVE" => Ok(Some(RegistrationStatus::Active)),
        "SUSPENSA" | "SUSPENDED" => Ok(Some(RegistrationStatus::Suspended)),
        "INAPTA" | "INACTIVE" => Ok(Some(RegistrationStatus::Inactive)),
        "BAIXADA" | "CANCELLED" => Ok(Some(RegistrationStatus::Cancelled)),
        other => Err(serde::de::Error::custom(format!(
            "unknown registration status '{}'",
            other
        ))),
    }
}

/// ISO dates (YYYY-MM-DD); blank → None.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("expected YYYY-MM-DD date, got '{}'", trimmed)))
}
