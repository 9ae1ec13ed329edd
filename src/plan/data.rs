//! Plan and plan-version records

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::ValidationError;
use crate::assumptions::{allocation_for, MonthlySplit};
use crate::projection::months_between;

/// Days per plan year when computing a plan's end date from its horizon
pub const DAYS_PER_PLAN_YEAR: u64 = 365;

/// Terms of a plan for one contribution regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanVersion {
    /// Version identifier (0 when not persisted)
    #[serde(default)]
    pub id: u32,

    /// Owning plan (0 when not persisted)
    #[serde(default)]
    pub plan_id: u32,

    /// Amount contributed each month while this version is in force
    pub monthly_investment: f64,

    /// Risk tolerance 1-10, selects the asset split
    pub risk_score: i32,

    /// First day of the active window
    pub start_date: NaiveDate,

    /// Last day of the active window
    pub end_date: NaiveDate,

    /// Investor age when the version was created
    #[serde(default)]
    pub age: Option<u32>,

    /// Annual income when the version was created
    #[serde(default)]
    pub income: Option<f64>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl PlanVersion {
    pub fn new(
        monthly_investment: f64,
        risk_score: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            plan_id: 0,
            monthly_investment,
            risk_score,
            start_date,
            end_date,
            age: None,
            income: None,
            notes: None,
        }
    }

    /// Whole calendar months this version is in force (day of month ignored)
    pub fn months(&self) -> i32 {
        months_between(self.start_date, self.end_date)
    }

    /// Per-asset monthly contribution under this version's risk score
    pub fn monthly_split(&self) -> MonthlySplit {
        allocation_for(self.risk_score).monthly_split(self.monthly_investment)
    }
}

/// Request to open a new plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub monthly_investment: f64,

    /// Horizon in years
    pub period_years: u32,

    pub risk_score: i32,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub age: Option<u32>,

    #[serde(default)]
    pub annual_income: Option<f64>,

    #[serde(default)]
    pub goal_description: Option<String>,
}

impl PlanRequest {
    pub fn new(monthly_investment: f64, period_years: u32, risk_score: i32) -> Self {
        Self {
            monthly_investment,
            period_years,
            risk_score,
            label: None,
            age: None,
            annual_income: None,
            goal_description: None,
        }
    }
}

/// New terms for an existing plan from some date onward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRevision {
    pub monthly_investment: f64,
    pub risk_score: i32,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PlanRevision {
    pub fn new(monthly_investment: f64, risk_score: i32) -> Self {
        Self {
            monthly_investment,
            risk_score,
            age: None,
            income: None,
            notes: None,
        }
    }
}

/// Most recent of `versions`: latest start date, later entries winning ties
pub fn latest_version(versions: &[PlanVersion]) -> Option<&PlanVersion> {
    versions.iter().max_by_key(|v| v.start_date)
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("plan has no versions")]
    NoVersions,

    #[error("revision date {effective} must be after the latest version start {latest_start}")]
    RevisionBeforeLatestVersion {
        effective: NaiveDate,
        latest_start: NaiveDate,
    },

    #[error("revision date {effective} must be before the plan end {plan_end}")]
    RevisionAfterPlanEnd {
        effective: NaiveDate,
        plan_end: NaiveDate,
    },

    #[error("a {years}-year horizon from {start} is outside the supported calendar")]
    HorizonOverflow { start: NaiveDate, years: u32 },

    #[error("version id {last} is already the largest allowed")]
    VersionIdOverflow { last: u32 },
}

/// An investment plan and every version of its terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: u32,
    pub user_id: u32,
    #[serde(default)]
    pub label: Option<String>,
    pub created_at: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub last_plan_version_id: u32,
    pub versions: Vec<PlanVersion>,
}

impl Plan {
    /// Open a plan from a validated request, with one initial version
    /// running from `start` for `period_years * 365` days.
    pub fn create(
        id: u32,
        user_id: u32,
        request: &PlanRequest,
        start: NaiveDate,
    ) -> Result<Self, PlanError> {
        request.validate()?;

        let end = start
            .checked_add_days(Days::new(u64::from(request.period_years) * DAYS_PER_PLAN_YEAR))
            .ok_or(PlanError::HorizonOverflow {
                start,
                years: request.period_years,
            })?;

        let version = PlanVersion {
            id: 1,
            plan_id: id,
            monthly_investment: request.monthly_investment,
            risk_score: request.risk_score,
            start_date: start,
            end_date: end,
            age: request.age,
            income: request.annual_income,
            notes: request.goal_description.clone(),
        };

        Ok(Self {
            id,
            user_id,
            label: request.label.clone(),
            created_at: start,
            start_date: start,
            end_date: end,
            last_plan_version_id: version.id,
            versions: vec![version],
        })
    }

    pub fn latest_version(&self) -> Option<&PlanVersion> {
        latest_version(&self.versions)
    }

    /// How the current monthly contribution is divided across assets
    pub fn current_monthly_split(&self) -> Option<MonthlySplit> {
        self.latest_version().map(PlanVersion::monthly_split)
    }

    /// Horizon as shown to the user: difference of calendar years
    pub fn duration_years(&self) -> i32 {
        self.end_date.year() - self.start_date.year()
    }

    /// Change the plan's terms from `effective` onward.
    ///
    /// The latest version is closed at `effective` and a new version runs
    /// from `effective` to the plan end. Balances built under earlier
    /// versions are not reallocated.
    pub fn revise(
        &mut self,
        revision: &PlanRevision,
        effective: NaiveDate,
    ) -> Result<&PlanVersion, PlanError> {
        revision.validate()?;

        let plan_end = self.end_date;
        let last_id = self.versions.iter().map(|v| v.id).max().unwrap_or(0);
        let next_id = last_id
            .checked_add(1)
            .ok_or(PlanError::VersionIdOverflow { last: last_id })?;

        let latest = self
            .versions
            .iter_mut()
            .max_by_key(|v| v.start_date)
            .ok_or(PlanError::NoVersions)?;

        if effective <= latest.start_date {
            return Err(PlanError::RevisionBeforeLatestVersion {
                effective,
                latest_start: latest.start_date,
            });
        }
        if effective >= plan_end {
            return Err(PlanError::RevisionAfterPlanEnd { effective, plan_end });
        }

        latest.end_date = effective;

        self.versions.push(PlanVersion {
            id: next_id,
            plan_id: self.id,
            monthly_investment: revision.monthly_investment,
            risk_score: revision.risk_score,
            start_date: effective,
            end_date: plan_end,
            age: revision.age,
            income: revision.income,
            notes: revision.notes.clone(),
        });
        self.last_plan_version_id = next_id;

        let added = self.versions.len() - 1;
        Ok(&self.versions[added])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::validation::Violation;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_plan() -> Plan {
        let request = PlanRequest::new(5000.0, 10, 5);
        Plan::create(7, 42, &request, date(2024, 1, 15)).unwrap()
    }

    #[test]
    fn test_create_plan() {
        let plan = test_plan();

        assert_eq!(plan.versions.len(), 1);
        assert_eq!(plan.last_plan_version_id, 1);
        assert_eq!(plan.start_date, date(2024, 1, 15));
        // 3650 days spans three leap days, so it lands short of the anniversary
        assert_eq!(plan.end_date, date(2034, 1, 12));
        assert_eq!(plan.duration_years(), 10);

        let version = &plan.versions[0];
        assert_eq!(version.plan_id, 7);
        assert_eq!(version.start_date, plan.start_date);
        assert_eq!(version.end_date, plan.end_date);
        assert_eq!(version.months(), 120);
    }

    #[test]
    fn test_create_rejects_invalid_request() {
        let request = PlanRequest::new(100.0, 10, 5);
        let err = Plan::create(1, 1, &request, date(2024, 1, 1)).unwrap_err();
        match err {
            PlanError::Invalid(e) => {
                assert_eq!(e.violations(), &[Violation::InvestmentOutOfBounds { amount: 100.0 }])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_revise_closes_latest_version() {
        let mut plan = test_plan();
        let effective = date(2026, 3, 1);

        let added = plan.revise(&PlanRevision::new(8000.0, 8), effective).unwrap();
        assert_eq!(added.id, 2);
        assert_eq!(added.start_date, effective);
        assert_eq!(added.end_date, date(2034, 1, 12));

        assert_eq!(plan.versions.len(), 2);
        assert_eq!(plan.versions[0].end_date, effective);
        assert_eq!(plan.last_plan_version_id, 2);
        assert_eq!(plan.latest_version().unwrap().risk_score, 8);
    }

    #[test]
    fn test_revise_rejects_bad_dates() {
        let mut plan = test_plan();
        let revision = PlanRevision::new(8000.0, 8);

        assert!(matches!(
            plan.revise(&revision, date(2024, 1, 15)),
            Err(PlanError::RevisionBeforeLatestVersion { .. })
        ));
        assert!(matches!(
            plan.revise(&revision, date(2034, 1, 12)),
            Err(PlanError::RevisionAfterPlanEnd { .. })
        ));
        assert_eq!(plan.versions.len(), 1);
    }

    #[test]
    fn test_current_monthly_split_uses_latest_version() {
        let mut plan = test_plan();
        plan.revise(&PlanRevision::new(10_000.0, 2), date(2025, 1, 15)).unwrap();

        let split = plan.current_monthly_split().unwrap();
        assert_eq!(split.monthly_investment, 10_000.0);
        assert!((split.equity - 3000.0).abs() < 1e-9);
        assert!((split.debt - 6000.0).abs() < 1e-9);
        assert!((split.gold - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_revise_rejects_exhausted_version_ids() {
        let mut plan = test_plan();
        plan.versions[0].id = u32::MAX;

        let err = plan.revise(&PlanRevision::new(8000.0, 8), date(2026, 3, 1)).unwrap_err();
        assert!(matches!(err, PlanError::VersionIdOverflow { last: u32::MAX }));
        assert_eq!(plan.versions.len(), 1);
        assert_eq!(plan.versions[0].end_date, date(2034, 1, 12));
    }

    #[test]
    fn test_latest_version_prefers_later_entry_on_tie() {
        let versions = [
            PlanVersion::new(1000.0, 2, date(2025, 1, 1), date(2026, 1, 1)),
            PlanVersion::new(2000.0, 9, date(2025, 1, 1), date(2027, 1, 1)),
            PlanVersion::new(3000.0, 5, date(2024, 1, 1), date(2025, 1, 1)),
        ];
        assert_eq!(latest_version(&versions).unwrap().monthly_investment, 2000.0);
        assert!(latest_version(&[]).is_none());
    }

    #[test]
    fn test_months_ignores_day_of_month() {
        let version = PlanVersion::new(1000.0, 5, date(2024, 1, 15), date(2024, 3, 1));
        assert_eq!(version.months(), 2);
    }
}
