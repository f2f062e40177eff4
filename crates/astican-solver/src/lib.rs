//! # astican-solver
//!
//! Normalizes project periods, expands feasible berths/streets, aggregates
//! what's already committed by confirmed projects, builds the assignment
//! MILP, hands it to a [`SolverAdapter`], and consolidates the result back
//! into calendar-dated rows.
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let job = astican_ingest::load_job("job.json").unwrap();
//! let defaults = astican_ingest::load_defaults("defaults.json").unwrap();
//! let ingested = astican_ingest::ingest(job, defaults).unwrap();
//! let output = astican_solver::pipeline::run_with_pumpkin(ingested, Duration::from_secs(60)).unwrap();
//! println!("{} rows", output.results.len());
//! ```

pub mod adapter;
pub mod billing;
pub mod build;
pub mod consolidate;
pub mod continuity;
pub mod feasibility;
pub mod historical;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod synchrolift;

#[cfg(feature = "pumpkin-backend")]
pub mod pumpkin_adapter;

pub use adapter::{Solution, SolverAdapter, TerminationStatus};
pub use build::BuiltModel;
pub use pipeline::{PipelineOutput, SolverError};
