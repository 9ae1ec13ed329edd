//! Plan data structures, validation, and plan-version loading

mod data;
mod validation;
pub mod loader;

pub use data::{latest_version, Plan, PlanError, PlanRequest, PlanRevision, PlanVersion, DAYS_PER_PLAN_YEAR};
pub use validation::{
    validate_version, validate_versions, ValidationError, Violation, AGE_RANGE,
    MAX_MONTHLY_INVESTMENT, MIN_MONTHLY_INVESTMENT, PERIOD_YEARS_RANGE, RISK_SCORE_RANGE,
};
pub use loader::{group_by_plan, load_versions, load_versions_from_reader};
