//! Continuity Detector: bridges the epoch boundary for projects being
//! optimized — what location they are coming from at day 0, and how many
//! times they already moved before the epoch.

use astican_core::{Area, PeriodId, PeriodType, Project};
use std::collections::HashMap;

/// For each to-optimize period that starts exactly at day 0 and continues
/// the same period type as the historical period that ended the day
/// before, maps it to that historical period's location. Used to detect a
/// day-0 movement if the period isn't assigned to that same location.
pub fn previous_locations(periods: &[astican_core::Period], projects: &[Project]) -> HashMap<PeriodId, Area> {
    let to_optimize: HashMap<&str, bool> = projects.iter().map(|p| (p.id.as_str(), p.to_optimize)).collect();

    let mut by_project: HashMap<&str, Vec<&astican_core::Period>> = HashMap::new();
    for period in periods {
        if to_optimize.get(period.project_id.as_str()).copied().unwrap_or(false) {
            by_project.entry(period.project_id.as_str()).or_default().push(period);
        }
    }

    let mut result = HashMap::new();
    for group in by_project.values_mut() {
        group.sort_by_key(|p| p.first_day);
        for idx in 1..group.len() {
            let current = group[idx];
            let previous = group[idx - 1];
            if current.first_day == 0 && current.period_type == previous.period_type && previous.last_day == -1 {
                result.insert(current.id(), previous.declared_area.clone());
            }
        }
    }

    result
}

/// Counts, per to-optimize project, how many location changes already
/// happened among its historical (pre-epoch) periods, capped at
/// `max_movements_per_project` — these count against the project's
/// movement budget alongside whatever the solver schedules in the future.
pub fn prior_movement_counts(periods: &[astican_core::Period], projects: &[Project], max_movements_per_project: u32) -> HashMap<String, u32> {
    let to_optimize: HashMap<&str, bool> = projects.iter().map(|p| (p.id.as_str(), p.to_optimize)).collect();

    let mut by_project: HashMap<&str, Vec<&astican_core::Period>> = HashMap::new();
    for period in periods {
        if period.first_day >= 0 {
            continue;
        }
        if to_optimize.get(period.project_id.as_str()).copied().unwrap_or(false) {
            by_project.entry(period.project_id.as_str()).or_default().push(period);
        }
    }

    let mut result = HashMap::new();
    for (project_id, group) in &mut by_project {
        group.sort_by_key(|p| p.first_day);
        let mut moves = 0u32;
        for idx in 1..group.len() {
            let current = group[idx];
            let previous = group[idx - 1];
            let contiguous = current.first_day == previous.last_day + 1;
            let same_type = current.period_type == previous.period_type;
            let different_area = current.declared_area != previous.declared_area;
            if contiguous && same_type && different_area {
                moves += 1;
            }
        }
        result.insert(project_id.to_string(), moves.min(max_movements_per_project));
    }

    result
}

#[allow(dead_code)]
fn afloat_or_ashore(period_type: PeriodType) -> &'static str {
    match period_type {
        PeriodType::Afloat => "afloat",
        PeriodType::Ashore => "ashore",
    }
}
