//! Orchestrates the full stage sequence: Normalizer, Feasibility Expander,
//! Historical/Synchrolift Aggregators, Continuity Detector, Daily Billing
//! Computer, Model Builder, Solver Adapter, Result Consolidator.

use crate::adapter::{submit, SolverAdapter, TerminationStatus};
use crate::{billing, build, continuity, feasibility, historical, normalizer, synchrolift};
use astican_core::{CoreError, ResultRow};
use astican_ingest::IngestedData;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("the solver proved the problem has no feasible assignment")]
    Infeasible,
    #[error("the solver did not prove optimality within the configured timeout")]
    TimeLimit,
    #[error("the solver reported an internal error")]
    Error,
    #[error("the solver reported an unbounded objective, which should be unreachable for a binary model")]
    Unbounded,
}

impl From<SolverError> for CoreError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Infeasible => CoreError::SolverInfeasible(e.to_string()),
            SolverError::TimeLimit => CoreError::SolverTimeout,
            SolverError::Error | SolverError::Unbounded => CoreError::SolverError(e.to_string()),
        }
    }
}

pub struct PipelineOutput {
    pub results: Vec<ResultRow>,
    pub objective_value_cents: i64,
}

/// Runs the full pipeline against any [`SolverAdapter`], returning
/// consolidated results on `OPTIMAL` and a typed error otherwise.
pub fn run<S: SolverAdapter>(ingested: IngestedData, adapter: &mut S, timeout: Duration) -> Result<PipelineOutput, SolverError> {
    let periods = normalizer::normalize(ingested.periods, &ingested.projects);
    let feas = feasibility::expand(&periods, &ingested.projects, &ingested.locations, &ingested.synchrolift);
    let committed_lengths = historical::committed_lengths(&periods, &ingested.projects, &ingested.locations, &feas);
    let committed_uses = synchrolift::committed_uses(&periods, &ingested.projects, ingested.configuration.max_synchrolift_uses_per_day);
    let previous_locations = continuity::previous_locations(&periods, &ingested.projects);
    let prior_movements = continuity::prior_movement_counts(&periods, &ingested.projects, ingested.configuration.max_movements_per_project);
    let daily_rates = billing::daily_rates(&periods, &ingested.projects, ingested.configuration.min_daily_billing);

    let built = build::build(
        &periods,
        &ingested.projects,
        &ingested.locations,
        &ingested.configuration,
        &feas,
        &committed_lengths,
        &committed_uses,
        &previous_locations,
        &prior_movements,
        &daily_rates,
    );

    let solution = submit(&built.model, adapter, timeout);

    match solution.status {
        TerminationStatus::Optimal => Ok(PipelineOutput {
            results: crate::consolidate::consolidate(&built, &solution, &periods, ingested.epoch),
            objective_value_cents: solution.objective_value,
        }),
        TerminationStatus::Infeasible => Err(SolverError::Infeasible),
        TerminationStatus::TimeLimit => Err(SolverError::TimeLimit),
        TerminationStatus::Unbounded => Err(SolverError::Unbounded),
        TerminationStatus::Error => Err(SolverError::Error),
    }
}

#[cfg(feature = "pumpkin-backend")]
pub fn run_with_pumpkin(ingested: IngestedData, timeout: Duration) -> Result<PipelineOutput, SolverError> {
    let mut adapter = crate::pumpkin_adapter::PumpkinAdapter::new();
    run(ingested, &mut adapter, timeout)
}
