//! Chained trajectory engine for versioned plans

use log::{debug, trace};

use super::cashflows::{TrajectoryResult, VersionStep};
use super::growth::round_half_up;
use super::state::Corpus;
use crate::assumptions::{Assumptions, RiskBand};
use crate::plan::{validate_versions, Plan, PlanVersion, ValidationError};

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Whether to record a step per version
    pub detailed_output: bool,

    /// Round breakdown balances to cents. Summary figures are always
    /// whole currency units.
    pub round_breakdown: bool,
}

impl ProjectionConfig {
    pub fn detailed() -> Self {
        Self {
            detailed_output: true,
            ..Default::default()
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct TrajectoryEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl TrajectoryEngine {
    /// Create a new engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project a set of plan versions, in any order.
    ///
    /// Accepts any input: degenerate versions are skipped and out-of-range
    /// numbers flow through the arithmetic. Use [`Self::try_project`] to
    /// reject bad input instead.
    pub fn project(&self, versions: &[PlanVersion]) -> TrajectoryResult {
        let rates = &self.assumptions.rates;

        // Stable: versions sharing a start date keep input order
        let mut ordered: Vec<(usize, &PlanVersion)> = versions.iter().enumerate().collect();
        ordered.sort_by_key(|(_, v)| v.start_date);

        let mut corpus = Corpus::zero();
        let mut total_invested = 0.0;
        let mut steps = Vec::new();

        for (sorted_index, (input_index, version)) in ordered.into_iter().enumerate() {
            let months = version.months();
            let band = RiskBand::from_score(version.risk_score);
            let contribution = band.split().monthly_split(version.monthly_investment);
            let opening = corpus;
            let skipped = months <= 0;
            let after_growth;

            if skipped {
                trace!(
                    "skipping version {} ({} to {}): {} months",
                    input_index,
                    version.start_date,
                    version.end_date,
                    months
                );
                after_growth = corpus;
            } else {
                total_invested += version.monthly_investment * f64::from(months);

                // Existing money grows first, then this window's contributions join
                corpus.grow_lump_sum(rates, months);
                after_growth = corpus;
                corpus.add_contributions(&contribution, rates, months);

                debug!(
                    "version {}: {} months at {:.2}/month ({}), corpus {:.2}",
                    input_index,
                    months,
                    version.monthly_investment,
                    band.as_str(),
                    corpus.total()
                );
            }

            if self.config.detailed_output {
                steps.push(VersionStep {
                    sorted_index,
                    input_index,
                    start_date: version.start_date,
                    end_date: version.end_date,
                    months,
                    risk_score: version.risk_score,
                    risk_band: band,
                    contribution,
                    skipped,
                    opening,
                    after_growth,
                    closing: corpus,
                    total_invested,
                });
            }
        }

        let grand_total = corpus.total();
        let breakdown = if self.config.round_breakdown {
            corpus.rounded_to_cents()
        } else {
            corpus
        };

        TrajectoryResult {
            breakdown,
            total_value: round_half_up(grand_total),
            total_invested: round_half_up(total_invested),
            gain: round_half_up(grand_total - total_invested),
            steps,
        }
    }

    /// Validate every version first, then project.
    ///
    /// For valid input the result is identical to [`Self::project`].
    pub fn try_project(&self, versions: &[PlanVersion]) -> Result<TrajectoryResult, ValidationError> {
        validate_versions(versions)?;
        Ok(self.project(versions))
    }

    /// Project all versions of a plan
    pub fn project_plan(&self, plan: &Plan) -> TrajectoryResult {
        self.project(&plan.versions)
    }
}
