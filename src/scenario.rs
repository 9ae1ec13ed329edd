//! Scenario runner for batch projections
//!
//! Loads assumptions once, then projects many plans or many rate regimes
//! without re-reading the assumption files.

use std::path::Path;

use log::info;
use rayon::prelude::*;

use crate::assumptions::{AssetRates, Assumptions};
use crate::error::LoadError;
use crate::plan::{Plan, PlanVersion};
use crate::projection::{ProjectionConfig, TrajectoryEngine, TrajectoryResult};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for rates in [AssetRates::flat(6.0), AssetRates::default_market()] {
///     let result = runner.run_rate_scenarios(&versions, &[rates]);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_market(),
        }
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> Result<Self, LoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    fn engine(&self, config: ProjectionConfig) -> TrajectoryEngine {
        TrajectoryEngine::new(self.base_assumptions, config)
    }

    /// Project one set of versions
    pub fn run(&self, versions: &[PlanVersion], config: ProjectionConfig) -> TrajectoryResult {
        self.engine(config).project(versions)
    }

    /// Project one plan
    pub fn run_plan(&self, plan: &Plan, config: ProjectionConfig) -> TrajectoryResult {
        self.engine(config).project_plan(plan)
    }

    /// Project many plans in parallel. Results are in input order.
    pub fn run_batch(&self, plans: &[Plan], config: ProjectionConfig) -> Vec<TrajectoryResult> {
        info!("projecting {} plans", plans.len());
        let engine = self.engine(config);
        plans.par_iter().map(|plan| engine.project_plan(plan)).collect()
    }

    /// Project the same versions under each rate regime
    pub fn run_rate_scenarios(
        &self,
        versions: &[PlanVersion],
        scenarios: &[AssetRates],
    ) -> Vec<TrajectoryResult> {
        scenarios
            .iter()
            .map(|&rates| {
                TrajectoryEngine::new(Assumptions::with_rates(rates), ProjectionConfig::default())
                    .project(versions)
            })
            .collect()
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
