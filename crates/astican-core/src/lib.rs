//! # astican-core
//!
//! Core domain model and error taxonomy for the astican berth and hardstand
//! assignment optimizer.
//!
//! This crate provides:
//! - Domain types: `Project`, `Period`, `Location`, `Synchrolift`, `Configuration`
//! - The `Area` tagged sentinel used in place of an "UNASSIGNED" magic string
//! - `ResultRow`, the shape emitted by the result consolidator
//! - `CoreError` and the `CoreResult` alias
//!
//! ## Example
//!
//! ```rust
//! use astican_core::{Area, Period, PeriodType};
//!
//! let p = Period::new("HULL-18", 0, PeriodType::Afloat, 0, 4, Area::Unassigned);
//! assert_eq!(p.duration_days(), 5);
//! assert!(p.declared_area.is_unassigned());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a repair project, as supplied by the caller.
pub type ProjectId = String;

/// Signed day offset relative to the planning epoch (`query_info.from_date`).
/// Negative values are pre-epoch history; `0` is the epoch day itself.
pub type Day = i64;

// ============================================================================
// Area
// ============================================================================

/// A period's declared location: either a concrete, named location, or the
/// "not yet placed" sentinel. Kept as a tagged variant rather than a magic
/// string so the solver and the ingestion layer cannot silently disagree on
/// what counts as unassigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name")]
pub enum Area {
    Concrete(String),
    Unassigned,
}

impl Area {
    pub fn is_unassigned(&self) -> bool {
        matches!(self, Area::Unassigned)
    }

    pub fn as_concrete(&self) -> Option<&str> {
        match self {
            Area::Concrete(name) => Some(name),
            Area::Unassigned => None,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::Concrete(name) => write!(f, "{name}"),
            Area::Unassigned => write!(f, "SIN UBICACION ASIGNADA"),
        }
    }
}

// ============================================================================
// Period
// ============================================================================

/// Whether a period has the vessel in the water (at a quay) or on land (at a
/// hardstand street, reachable only via the synchrolift).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodType {
    Afloat,
    Ashore,
}

/// One consecutive span of a project's repair timeline, after normalization
/// (merge of consecutive same-type/same-area periods, split across the
/// epoch). Identified by `(project_id, sequence_index)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub project_id: ProjectId,
    pub sequence_index: u32,
    pub period_type: PeriodType,
    pub first_day: Day,
    pub last_day: Day,
    pub declared_area: Area,
}

impl Period {
    pub fn new(
        project_id: impl Into<ProjectId>,
        sequence_index: u32,
        period_type: PeriodType,
        first_day: Day,
        last_day: Day,
        declared_area: Area,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            sequence_index,
            period_type,
            first_day,
            last_day,
            declared_area,
        }
    }

    /// Number of calendar days the period spans, inclusive of both endpoints.
    pub fn duration_days(&self) -> i64 {
        self.last_day - self.first_day + 1
    }

    /// A period entirely before the epoch; contributes only to historical
    /// aggregates, never to the solved model.
    pub fn is_past(&self) -> bool {
        self.last_day < 0
    }

    /// A period that starts on or after the epoch; eligible for the model
    /// when its project is marked to-optimize.
    pub fn is_future(&self) -> bool {
        self.first_day >= 0
    }

    pub fn id(&self) -> PeriodId {
        PeriodId {
            project_id: self.project_id.clone(),
            sequence_index: self.sequence_index,
        }
    }
}

/// Stable identifier for a period: `{project_id}_{sequence_index}`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodId {
    pub project_id: ProjectId,
    pub sequence_index: u32,
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.project_id, self.sequence_index)
    }
}

// ============================================================================
// Project
// ============================================================================

/// A repair project: physical dimensions of the vessel plus whether this run
/// should decide its future placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// Vessel length overall (eslora).
    pub length: Decimal,
    /// Vessel beam (manga).
    pub beam: Decimal,
    /// Total contracted billing for the project. Required when `to_optimize`.
    pub billing: Option<Decimal>,
    pub to_optimize: bool,
}

// ============================================================================
// Location
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    Quay,
    Street,
}

/// A physical berth (quay, one-dimensional) or hardstand (street,
/// two-dimensional). Quays constrain only length; streets constrain length
/// and width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub kind: LocationKind,
    pub length: Decimal,
    /// `None` for quays; always `Some` for streets.
    pub width: Option<Decimal>,
}

impl Location {
    pub fn quay(name: impl Into<String>, length: Decimal) -> Self {
        Self {
            name: name.into(),
            kind: LocationKind::Quay,
            length,
            width: None,
        }
    }

    pub fn street(name: impl Into<String>, length: Decimal, width: Decimal) -> Self {
        Self {
            name: name.into(),
            kind: LocationKind::Street,
            length,
            width: Some(width),
        }
    }
}

/// The synchrolift: the single shared resource that moves vessels between
/// water and land. Not a `Location` itself — it gates which streets are
/// reachable and how many transfers can happen per day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Synchrolift {
    pub max_length: Decimal,
    pub max_width: Decimal,
    pub max_uses_per_day: u32,
}

// ============================================================================
// Configuration
// ============================================================================

/// Solver-tunable parameters, loaded from the defaults file and reconciled
/// against a job's overrides before the model is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub movement_penalty: Decimal,
    pub max_movements_per_project: u32,
    pub max_synchrolift_uses_per_day: u32,
    pub min_daily_billing: Decimal,
}

// ============================================================================
// Result row
// ============================================================================

/// One row of the final, consolidated assignment table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub project_id: ProjectId,
    pub period_id: u32,
    pub repair_project_id: String,
    pub location: Area,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub result_id: String,
}

impl ResultRow {
    pub fn result_id(
        project_id: &str,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
        location: &Area,
    ) -> String {
        format!("{project_id}_{start_date}_{end_date}_{location}")
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error taxonomy shared across ingestion, the solver core, and the CLI.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("solver reported the problem is infeasible: {0}")]
    SolverInfeasible(String),

    #[error("solver did not prove optimality within the configured timeout")]
    SolverTimeout,

    #[error("solver error: {0}")]
    SolverError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_display_matches_sentinel_for_unassigned() {
        assert_eq!(Area::Unassigned.to_string(), "SIN UBICACION ASIGNADA");
        assert_eq!(Area::Concrete("MUELLE-1".into()).to_string(), "MUELLE-1");
    }

    #[test]
    fn period_duration_is_inclusive() {
        let p = Period::new("P1", 0, PeriodType::Afloat, 3, 7, Area::Unassigned);
        assert_eq!(p.duration_days(), 5);
    }

    #[test]
    fn period_past_future_classification() {
        let past = Period::new("P1", 0, PeriodType::Afloat, -10, -1, Area::Unassigned);
        let future = Period::new("P1", 1, PeriodType::Afloat, 0, 5, Area::Unassigned);
        assert!(past.is_past());
        assert!(!past.is_future());
        assert!(future.is_future());
        assert!(!future.is_past());
    }

    #[test]
    fn period_id_formats_as_project_underscore_sequence() {
        let p = Period::new("HULL-18", 3, PeriodType::Ashore, 0, 1, Area::Unassigned);
        assert_eq!(p.id().to_string(), "HULL-18_3");
    }

    #[test]
    fn result_id_matches_expected_format() {
        use chrono::NaiveDate;
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let id = ResultRow::result_id("HULL-18", start, end, &Area::Concrete("MUELLE-1".into()));
        assert_eq!(id, "HULL-18_2026-01-01_2026-01-05_MUELLE-1");
    }
}
