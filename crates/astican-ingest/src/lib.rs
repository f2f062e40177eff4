//! # astican-ingest
//!
//! JSON ingestion for the astican berth assignment optimizer: reads the job
//! file and the solver-parameter defaults file, reconciles overrides, and
//! produces the `astican-core` domain values the solver pipeline consumes.
//!
//! This crate is deliberately thin — it is the external-collaborator layer
//! the optimization core never has to know about. It does no scheduling
//! logic of its own; it only validates shape and converts units (calendar
//! dates to epoch-relative day offsets).
//!
//! ## Example
//!
//! ```no_run
//! let job = astican_ingest::load_job("job.json").unwrap();
//! let defaults = astican_ingest::load_defaults("defaults.json").unwrap();
//! let ingested = astican_ingest::ingest(job, defaults).unwrap();
//! println!("{} periods ingested", ingested.periods.len());
//! ```

mod config;
mod raw;

use astican_core::{Area, Location, Period, PeriodType, Project, Synchrolift};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use thiserror::Error;

pub use raw::{RawDefaults, RawJob};

const MANIOBRA_PREFIX: &str = "MANIOBRA";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<IngestError> for astican_core::CoreError {
    fn from(e: IngestError) -> Self {
        astican_core::CoreError::InvalidInput(e.to_string())
    }
}

/// Everything the solver pipeline needs, ready for the Normalizer.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub epoch: NaiveDate,
    pub projects: Vec<Project>,
    pub periods: Vec<Period>,
    pub locations: Vec<Location>,
    pub synchrolift: Synchrolift,
    pub configuration: astican_core::Configuration,
}

pub fn load_job(path: impl AsRef<Path>) -> Result<RawJob, IngestError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_defaults(path: impl AsRef<Path>) -> Result<RawDefaults, IngestError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Converts the raw job and defaults into the domain values the solver
/// pipeline operates on. Dates are converted to epoch-relative day offsets
/// here, once, so nothing downstream needs a calendar.
pub fn ingest(job: RawJob, defaults: RawDefaults) -> Result<IngestedData, IngestError> {
    let epoch = job.query_info.from_date;

    let locations = build_locations(&job.astican_info);
    let synchrolift = Synchrolift {
        max_length: f64_to_decimal(job.astican_info.syncrolift.longitud)?,
        max_width: f64_to_decimal(job.astican_info.syncrolift.ancho)?,
        max_uses_per_day: defaults.max_uses_syncrolift_per_day,
    };

    let configuration = config::reconcile(defaults, &job.config)?;

    let known_locations: std::collections::HashSet<&str> = locations.iter().map(|l| l.name.as_str()).collect();

    let to_optimize: std::collections::HashSet<&str> = job
        .projects_to_optimize
        .iter()
        .map(String::as_str)
        .collect();

    for id in &job.projects_to_optimize {
        if !job.projects_info.contains_key(id) {
            return Err(IngestError::InvalidInput(format!(
                "project '{id}' listed in projects_to_optimize but missing from projects_info"
            )));
        }
    }

    let mut projects = Vec::new();
    let mut periods = Vec::new();

    for (project_id, entry) in &job.projects_info {
        let is_optimize = to_optimize.contains(project_id.as_str());
        let has_committed_area = entry
            .periodos
            .iter()
            .any(|p| p.nombre_area.as_deref().is_some_and(|a| !a.is_empty()));

        if !is_optimize && !has_committed_area {
            continue;
        }

        if is_optimize && entry.info.facturacion.is_none() {
            return Err(IngestError::InvalidInput(format!(
                "project '{project_id}' is marked to-optimize but has no facturacion"
            )));
        }

        projects.push(Project {
            id: project_id.clone(),
            length: f64_to_decimal(entry.info.eslora)?,
            beam: f64_to_decimal(entry.info.manga)?,
            billing: entry.info.facturacion.map(f64_to_decimal).transpose()?,
            to_optimize: is_optimize,
        });

        for (idx, raw_period) in entry.periodos.iter().enumerate() {
            let first_day = (raw_period.fecha_inicio - epoch).num_days();
            let last_day = (raw_period.fecha_fin - epoch).num_days();
            if last_day < first_day {
                return Err(IngestError::InvalidInput(format!(
                    "project '{project_id}' period {idx}: fecha_fin precedes fecha_inicio"
                )));
            }
            let period_type = match raw_period.tipo_desc.as_str() {
                "FLOTE" => PeriodType::Afloat,
                "VARADA" => PeriodType::Ashore,
                other => {
                    return Err(IngestError::InvalidInput(format!(
                        "project '{project_id}' period {idx}: unknown tipo_desc '{other}'"
                    )))
                }
            };
            let declared_area = match raw_period.nombre_area.as_deref() {
                Some(name) if !name.is_empty() => Area::Concrete(name.to_string()),
                _ => Area::Unassigned,
            };
            if !is_optimize {
                if let Area::Concrete(name) = &declared_area {
                    if !known_locations.contains(name.as_str()) {
                        return Err(IngestError::InvalidInput(format!(
                            "project '{project_id}' period {idx}: declared area '{name}' is not a known location"
                        )));
                    }
                }
            }
            periods.push(Period::new(
                project_id.clone(),
                idx as u32,
                period_type,
                first_day,
                last_day,
                declared_area,
            ));
        }
    }

    Ok(IngestedData {
        epoch,
        projects,
        periods,
        locations,
        synchrolift,
        configuration,
    })
}

fn build_locations(info: &raw::RawAsticanInfo) -> Vec<Location> {
    let mut locations: Vec<Location> = info
        .muelles
        .iter()
        .filter(|q| !q.nombre.starts_with(MANIOBRA_PREFIX))
        .filter_map(|q| {
            f64_to_decimal(q.longitud)
                .ok()
                .map(|length| Location::quay(q.nombre.clone(), length))
        })
        .collect();

    for street in &info.calles {
        if let (Ok(length), Ok(width)) = (
            f64_to_decimal(street.longitud),
            f64_to_decimal(street.ancho),
        ) {
            locations.push(Location::street(street.nombre.clone(), length, width));
        }
    }

    locations
}

fn f64_to_decimal(value: f64) -> Result<Decimal, IngestError> {
    Decimal::try_from(value)
        .map_err(|_| IngestError::InvalidInput(format!("value {value} is not a valid decimal")))
}
