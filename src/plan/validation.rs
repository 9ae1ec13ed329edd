//! Input validation for plan versions and new-plan requests
//!
//! The projection engine itself accepts any numbers. This is the opt-in
//! boundary that rejects them up front, reporting every violated rule at
//! once instead of stopping at the first.

use std::fmt::Write;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use thiserror::Error;

use super::data::{PlanRequest, PlanRevision, PlanVersion};

/// Allowed risk scores
pub const RISK_SCORE_RANGE: RangeInclusive<i32> = 1..=10;

/// Allowed monthly contribution for new plans and revisions
pub const MIN_MONTHLY_INVESTMENT: f64 = 500.0;
pub const MAX_MONTHLY_INVESTMENT: f64 = 100_000.0;

/// Allowed plan horizon in years
pub const PERIOD_YEARS_RANGE: RangeInclusive<u32> = 1..=50;

/// Allowed investor age
pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;

/// Minimum length of a goal description
pub const MIN_GOAL_DESCRIPTION_LEN: usize = 3;

/// A single broken rule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("version {index}: monthly investment {amount} is negative")]
    NegativeInvestment { index: usize, amount: f64 },

    #[error("version {index}: monthly investment is not a finite number")]
    NonFiniteInvestment { index: usize },

    #[error("version {index}: end date {end} is before start date {start}")]
    InvertedDateRange {
        index: usize,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("version {index}: risk score {score} is outside 1..=10")]
    RiskScoreOutOfRange { index: usize, score: i32 },

    #[error("monthly investment {amount} must be between 500 and 100000")]
    InvestmentOutOfBounds { amount: f64 },

    #[error("period of {years} years must be between 1 and 50")]
    PeriodOutOfBounds { years: u32 },

    #[error("risk score {score} must be between 1 and 10")]
    InvalidRiskScore { score: i32 },

    #[error("age {age} must be between 18 and 100")]
    AgeOutOfBounds { age: u32 },

    #[error("annual income {income} cannot be negative")]
    NegativeIncome { income: f64 },

    #[error("goal description must be at least 3 characters")]
    GoalDescriptionTooShort,
}

/// One or more violations, in the order they were found
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", describe(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn from_violations(violations: Vec<Violation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }
}

fn describe(violations: &[Violation]) -> String {
    let mut out = format!("{} invalid input(s)", violations.len());
    for (i, v) in violations.iter().enumerate() {
        let sep = if i == 0 { ": " } else { "; " };
        let _ = write!(out, "{sep}{v}");
    }
    out
}

/// Check a single version. `index` is its position in the caller's slice.
pub fn validate_version(index: usize, version: &PlanVersion) -> Vec<Violation> {
    let mut violations = Vec::new();

    let amount = version.monthly_investment;
    if !amount.is_finite() {
        violations.push(Violation::NonFiniteInvestment { index });
    } else if amount < 0.0 {
        violations.push(Violation::NegativeInvestment { index, amount });
    }

    if version.end_date < version.start_date {
        violations.push(Violation::InvertedDateRange {
            index,
            start: version.start_date,
            end: version.end_date,
        });
    }

    if !RISK_SCORE_RANGE.contains(&version.risk_score) {
        violations.push(Violation::RiskScoreOutOfRange {
            index,
            score: version.risk_score,
        });
    }

    violations
}

/// Check every version, collecting all violations
pub fn validate_versions(versions: &[PlanVersion]) -> Result<(), ValidationError> {
    let violations = versions
        .iter()
        .enumerate()
        .flat_map(|(i, v)| validate_version(i, v))
        .collect();
    ValidationError::from_violations(violations)
}

fn check_contribution(amount: f64, risk_score: i32, violations: &mut Vec<Violation>) {
    // NaN fails the range check too
    if !(MIN_MONTHLY_INVESTMENT..=MAX_MONTHLY_INVESTMENT).contains(&amount) {
        violations.push(Violation::InvestmentOutOfBounds { amount });
    }
    if !RISK_SCORE_RANGE.contains(&risk_score) {
        violations.push(Violation::InvalidRiskScore { score: risk_score });
    }
}

impl PlanRequest {
    /// Validate a new-plan request against the creation rules
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        check_contribution(self.monthly_investment, self.risk_score, &mut violations);

        if !PERIOD_YEARS_RANGE.contains(&self.period_years) {
            violations.push(Violation::PeriodOutOfBounds {
                years: self.period_years,
            });
        }
        if let Some(age) = self.age {
            if !AGE_RANGE.contains(&age) {
                violations.push(Violation::AgeOutOfBounds { age });
            }
        }
        if let Some(income) = self.annual_income {
            if income.is_nan() || income < 0.0 {
                violations.push(Violation::NegativeIncome { income });
            }
        }
        if let Some(goal) = &self.goal_description {
            if goal.trim().chars().count() < MIN_GOAL_DESCRIPTION_LEN {
                violations.push(Violation::GoalDescriptionTooShort);
            }
        }

        ValidationError::from_violations(violations)
    }
}

impl PlanRevision {
    /// Revisions obey the same contribution and risk rules as new plans
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        check_contribution(self.monthly_investment, self.risk_score, &mut violations);
        ValidationError::from_violations(violations)
    }
}
