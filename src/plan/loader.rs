//! Load plan versions from CSV exports

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use csv::ReaderBuilder;
use log::info;

use super::PlanVersion;
use crate::error::LoadError;

/// Raw CSV row matching the plan-version export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PlanVersionID", default)]
    id: u32,
    #[serde(rename = "PlanID", default)]
    plan_id: u32,
    #[serde(rename = "MonthlyInvestment")]
    monthly_investment: f64,
    #[serde(rename = "RiskScore")]
    risk_score: i32,
    #[serde(rename = "StartDate")]
    start_date: String,
    #[serde(rename = "EndDate")]
    end_date: String,
    #[serde(rename = "Age", default)]
    age: Option<u32>,
    #[serde(rename = "Income", default)]
    income: Option<f64>,
    #[serde(rename = "Notes", default)]
    notes: Option<String>,
}

impl CsvRow {
    fn into_version(self, row: usize) -> Result<PlanVersion, LoadError> {
        let start_date = parse_date(&self.start_date, row, "StartDate")?;
        let end_date = parse_date(&self.end_date, row, "EndDate")?;

        Ok(PlanVersion {
            id: self.id,
            plan_id: self.plan_id,
            monthly_investment: self.monthly_investment,
            risk_score: self.risk_score,
            start_date,
            end_date,
            age: self.age,
            income: self.income,
            notes: self.notes.filter(|n| !n.is_empty()),
        })
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (date part is kept)
fn parse_date(value: &str, row: usize, field: &'static str) -> Result<NaiveDate, LoadError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| LoadError::InvalidField {
            row,
            field,
            value: value.to_string(),
        })
}

/// Load all plan versions from a CSV file
pub fn load_versions<P: AsRef<Path>>(path: P) -> Result<Vec<PlanVersion>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let versions = load_versions_from_reader(file)?;
    info!("loaded {} plan versions from {}", versions.len(), path.display());
    Ok(versions)
}

/// Load plan versions from any reader (e.g., string buffer, network stream)
pub fn load_versions_from_reader<R: Read>(reader: R) -> Result<Vec<PlanVersion>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut versions = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        versions.push(row.into_version(idx + 1)?);
    }

    Ok(versions)
}

/// Group versions by plan id, keeping file order within each plan
pub fn group_by_plan(versions: Vec<PlanVersion>) -> BTreeMap<u32, Vec<PlanVersion>> {
    let mut plans: BTreeMap<u32, Vec<PlanVersion>> = BTreeMap::new();
    for version in versions {
        plans.entry(version.plan_id).or_default().push(version);
    }
    plans
}
