//! Wire-format structs mirroring the job and defaults JSON files verbatim.
//! Kept separate from the domain model so a field rename upstream only
//! touches this module.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct RawJob {
    pub astican_info: RawAsticanInfo,
    pub query_info: RawQueryInfo,
    #[serde(default)]
    pub config: HashMap<String, f64>,
    pub projects_to_optimize: Vec<String>,
    pub projects_info: HashMap<String, RawProjectEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RawAsticanInfo {
    pub calles: Vec<RawStreet>,
    pub muelles: Vec<RawQuay>,
    pub syncrolift: RawSynchrolift,
}

#[derive(Debug, Deserialize)]
pub struct RawStreet {
    pub nombre: String,
    pub longitud: f64,
    pub ancho: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawQuay {
    pub nombre: String,
    pub longitud: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawSynchrolift {
    pub longitud: f64,
    pub ancho: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawQueryInfo {
    pub from_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct RawProjectEntry {
    pub info: RawProjectInfo,
    pub periodos: Vec<RawPeriod>,
}

#[derive(Debug, Deserialize)]
pub struct RawProjectInfo {
    pub eslora: f64,
    pub manga: f64,
    #[serde(default)]
    pub facturacion: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RawPeriod {
    pub tipo_desc: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    #[serde(default)]
    pub nombre_area: Option<String>,
}

/// The separately-loaded solver parameter defaults file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDefaults {
    #[serde(rename = "MOVED_PROJECTS_PENALTY_PER_MOVEMENT")]
    pub moved_projects_penalty_per_movement: f64,
    #[serde(rename = "MAX_MOVEMENTS_PER_PROJECT")]
    pub max_movements_per_project: u32,
    #[serde(rename = "MAX_USES_SYNCROLIFT_PER_DAY")]
    pub max_uses_syncrolift_per_day: u32,
    #[serde(rename = "MIN_FACTURACION_DIARIA")]
    pub min_facturacion_diaria: f64,
}
