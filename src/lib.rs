//! SIP Trajectory - chained growth projections for versioned investment plans
//!
//! This library provides:
//! - Risk-score driven equity/debt/gold allocation
//! - Lump-sum and annuity-due growth formulas
//! - A trajectory engine that chains plan versions into one forecast
//! - Plan creation, revision, and validation
//! - Batch and rate-scenario runs

pub mod error;
pub mod plan;
pub mod assumptions;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::LoadError;
pub use plan::{Plan, PlanError, PlanRequest, PlanRevision, PlanVersion, ValidationError};
pub use assumptions::{allocation_for, AllocationSplit, Asset, AssetRates, Assumptions};
pub use projection::{Corpus, ProjectionConfig, TrajectoryEngine, TrajectoryResult};
pub use scenario::ScenarioRunner;
