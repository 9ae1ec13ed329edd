//! SIP Trajectory CLI
//!
//! Command-line interface for projecting plan-version exports and
//! previewing new plans

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use serde::Serialize;

use sip_trajectory::assumptions::MonthlySplit;
use sip_trajectory::plan::{group_by_plan, latest_version, load_versions};
use sip_trajectory::{
    Asset, Assumptions, Plan, PlanRequest, PlanVersion, ProjectionConfig, TrajectoryEngine,
    TrajectoryResult,
};

#[derive(Debug, Parser)]
#[command(name = "sip-trajectory", version, about = "Project versioned SIP plans across equity, debt and gold")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project plans from a plan-version CSV export
    Project {
        /// CSV file of plan versions
        versions: PathBuf,

        /// Only project this plan
        #[arg(long)]
        plan_id: Option<u32>,

        /// Directory holding asset_rates.csv (built-in rates when omitted)
        #[arg(long)]
        assumptions: Option<PathBuf>,

        /// Reject invalid versions instead of projecting them as-is
        #[arg(long)]
        strict: bool,

        /// Include a per-version ledger
        #[arg(long)]
        detailed: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate a new plan request and show its projection from today
    Preview {
        #[arg(long)]
        monthly_investment: f64,

        #[arg(long)]
        period_years: u32,

        #[arg(long, allow_negative_numbers = true)]
        risk_score: i32,

        #[arg(long)]
        json: bool,
    },
}

/// One plan's output, as printed in JSON mode
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanReport {
    plan_id: u32,
    current_monthly_split: Option<MonthlySplit>,
    #[serde(flatten)]
    result: TrajectoryResult,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Project {
            versions,
            plan_id,
            assumptions,
            strict,
            detailed,
            json,
        } => {
            let assumptions = match assumptions {
                Some(dir) => Assumptions::from_csv_path(&dir)
                    .with_context(|| format!("loading assumptions from {}", dir.display()))?,
                None => Assumptions::default_market(),
            };
            let config = ProjectionConfig {
                detailed_output: detailed,
                ..Default::default()
            };
            let engine = TrajectoryEngine::new(assumptions, config);

            let all = load_versions(&versions)
                .with_context(|| format!("loading plan versions from {}", versions.display()))?;
            let mut plans = group_by_plan(all);
            if let Some(id) = plan_id {
                plans.retain(|&pid, _| pid == id);
            }
            if plans.is_empty() {
                bail!("no plan versions to project");
            }

            let mut reports = Vec::with_capacity(plans.len());
            for (pid, versions) in &plans {
                let result = if strict {
                    engine
                        .try_project(versions)
                        .with_context(|| format!("plan {pid} has invalid versions"))?
                } else {
                    engine.project(versions)
                };
                reports.push(PlanReport {
                    plan_id: *pid,
                    current_monthly_split: latest_version(versions).map(PlanVersion::monthly_split),
                    result,
                });
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    print_report(report);
                }
            }
        }
        Command::Preview {
            monthly_investment,
            period_years,
            risk_score,
            json,
        } => {
            let request = PlanRequest::new(monthly_investment, period_years, risk_score);
            let plan = Plan::create(0, 0, &request, Local::now().date_naive())
                .context("invalid plan request")?;
            let result = TrajectoryEngine::default().project_plan(&plan);
            let report = PlanReport {
                plan_id: plan.id,
                current_monthly_split: plan.current_monthly_split(),
                result,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Plan runs {} to {} ({} years)", plan.start_date, plan.end_date, plan.duration_years());
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn print_report(report: &PlanReport) {
    let result = &report.result;

    println!("Plan {}", report.plan_id);
    println!("{}", "-".repeat(40));
    println!("  Projected Corpus: {:>14}", result.total_value);
    println!("  Total Invested:   {:>14}", result.total_invested);
    println!("  Gain:             {:>14}", result.gain);
    println!("  Return:           {:>13.2}%", result.return_on_investment() * 100.0);
    println!("  Final Asset Split:");
    for asset in Asset::ALL {
        println!("    {:<8} {:>14.2}", asset.as_str(), result.breakdown.get(asset));
    }

    if let Some(split) = &report.current_monthly_split {
        println!("  Monthly Investment Split ({:.2}/month):", split.monthly_investment);
        for asset in Asset::ALL {
            println!("    {:<8} {:>14.2}", asset.as_str(), split.amount(asset));
        }
    }

    if !result.steps.is_empty() {
        println!("  {:>3} {:>10} {:>10} {:>6} {:>5} {:>14} {:>14}",
            "#", "Start", "End", "Months", "Risk", "Invested", "Corpus");
        for step in &result.steps {
            println!("  {:>3} {:>10} {:>10} {:>6} {:>5} {:>14.2} {:>14.2}{}",
                step.sorted_index + 1,
                step.start_date,
                step.end_date,
                step.months,
                step.risk_score,
                step.total_invested,
                step.closing.total(),
                if step.skipped { "  (skipped)" } else { "" },
            );
        }
    }
    println!();
}
