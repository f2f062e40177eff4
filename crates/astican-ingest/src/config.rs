//! Parameter-override reconciliation: defaults file values are reconciled
//! against a job's `config` overrides, with every effective override logged
//! at WARN so operators can see what changed a given run's result.

use crate::raw::RawDefaults;
use crate::IngestError;
use astican_core::Configuration;
use rust_decimal::Decimal;
use std::collections::HashMap;

const KEY_MOVEMENT_PENALTY: &str = "MOVED_PROJECTS_PENALTY_PER_MOVEMENT";
const KEY_MAX_MOVEMENTS: &str = "MAX_MOVEMENTS_PER_PROJECT";
const KEY_MAX_SYNCROLIFT_USES: &str = "MAX_USES_SYNCROLIFT_PER_DAY";
const KEY_MIN_DAILY_BILLING: &str = "MIN_FACTURACION_DIARIA";

pub fn reconcile(
    defaults: RawDefaults,
    overrides: &HashMap<String, f64>,
) -> Result<Configuration, IngestError> {
    let movement_penalty = apply_override(
        KEY_MOVEMENT_PENALTY,
        defaults.moved_projects_penalty_per_movement,
        overrides,
    );
    let max_movements_per_project = apply_override(
        KEY_MAX_MOVEMENTS,
        f64::from(defaults.max_movements_per_project),
        overrides,
    ) as u32;
    let max_synchrolift_uses_per_day = apply_override(
        KEY_MAX_SYNCROLIFT_USES,
        f64::from(defaults.max_uses_syncrolift_per_day),
        overrides,
    ) as u32;
    let min_daily_billing = apply_override(
        KEY_MIN_DAILY_BILLING,
        defaults.min_facturacion_diaria,
        overrides,
    );

    Ok(Configuration {
        movement_penalty: to_decimal(KEY_MOVEMENT_PENALTY, movement_penalty)?,
        max_movements_per_project,
        max_synchrolift_uses_per_day,
        min_daily_billing: to_decimal(KEY_MIN_DAILY_BILLING, min_daily_billing)?,
    })
}

/// Returns the overriding value if present and different from the default,
/// logging the change; otherwise returns the default unchanged.
fn apply_override(param: &str, default: f64, overrides: &HashMap<String, f64>) -> f64 {
    match overrides.get(param) {
        Some(&new) if (new - default).abs() > f64::EPSILON => {
            tracing::warn!(
                param,
                before = default,
                now = new,
                "solver parameter overridden by job config"
            );
            new
        }
        _ => default,
    }
}

fn to_decimal(param: &str, value: f64) -> Result<Decimal, IngestError> {
    Decimal::try_from(value).map_err(|_| IngestError::InvalidInput(format!(
        "parameter '{param}' value {value} is not representable as a decimal"
    )))
}
