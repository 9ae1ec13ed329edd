//! Trajectory projection: growth formulas, running corpus, and the chained engine

mod state;
mod engine;
mod cashflows;
pub mod growth;

pub use state::Corpus;
pub use engine::{TrajectoryEngine, ProjectionConfig};
pub use cashflows::{TrajectoryResult, VersionStep};
pub use growth::{annuity_due_fv, lump_sum_fv, months_between};
