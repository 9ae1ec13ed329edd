//! Output structures for trajectory projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::state::Corpus;
use crate::assumptions::{MonthlySplit, RiskBand};

/// What happened to the corpus while one version was in force
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionStep {
    /// Position in processing order (sorted by start date)
    pub sorted_index: usize,

    /// Position of the version in the caller's input
    pub input_index: usize,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Whole calendar months in force (may be zero or negative)
    pub months: i32,

    pub risk_score: i32,
    pub risk_band: RiskBand,

    /// Monthly contribution per asset under this version
    pub contribution: MonthlySplit,

    /// True when `months <= 0` and the version was not applied
    pub skipped: bool,

    /// Corpus carried in from earlier versions
    pub opening: Corpus,

    /// Opening corpus after lump-sum growth over this window
    pub after_growth: Corpus,

    /// After adding this version's contribution growth
    pub closing: Corpus,

    /// Running total invested including this version
    pub total_invested: f64,
}

/// Final projected state after every version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryResult {
    /// Per-asset balances (unrounded unless configured otherwise)
    pub breakdown: Corpus,

    pub total_value: i64,
    pub total_invested: i64,
    pub gain: i64,

    /// Per-version ledger, filled only with detailed output
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<VersionStep>,
}

impl TrajectoryResult {
    /// Result for a plan with nothing to project
    pub fn empty() -> Self {
        Self {
            breakdown: Corpus::zero(),
            total_value: 0,
            total_invested: 0,
            gain: 0,
            steps: Vec::new(),
        }
    }

    /// Number of versions that contributed to the projection
    pub fn applied_versions(&self) -> usize {
        self.steps.iter().filter(|s| !s.skipped).count()
    }

    /// Gain as a fraction of money invested (0 when nothing was invested)
    pub fn return_on_investment(&self) -> f64 {
        if self.total_invested == 0 {
            0.0
        } else {
            self.gain as f64 / self.total_invested as f64
        }
    }
}

impl Default for TrajectoryResult {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::plan::PlanVersion;
    use crate::projection::{ProjectionConfig, TrajectoryEngine};
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(config: ProjectionConfig) -> TrajectoryResult {
        let versions = [
            PlanVersion::new(5000.0, 5, date(2024, 1, 1), date(2025, 1, 1)),
            PlanVersion::new(8000.0, 8, date(2025, 1, 1), date(2026, 1, 1)),
        ];
        TrajectoryEngine::new(Assumptions::default_market(), config).project(&versions)
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(project(ProjectionConfig::default())).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object["totalValue"], 170_891);
        assert_eq!(object["totalInvested"], 156_000);
        assert_eq!(object["gain"], 14_891);
        assert!(object["breakdown"]["equity"].is_number());
        assert!(!object.contains_key("steps"));
        assert!(!object.contains_key("total_value"));
    }

    #[test]
    fn test_json_shape_with_steps() {
        let json = serde_json::to_value(project(ProjectionConfig::detailed())).unwrap();

        let steps = json["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0]["inputIndex"], 0);
        assert_eq!(steps[1]["sortedIndex"], 1);
        assert_eq!(steps[1]["totalInvested"], 156_000.0);
    }

    #[test]
    fn test_return_on_investment() {
        let result = project(ProjectionConfig::default());
        assert_relative_eq!(result.return_on_investment(), 14_891.0 / 156_000.0);

        assert_eq!(TrajectoryResult::empty().return_on_investment(), 0.0);
    }
}
