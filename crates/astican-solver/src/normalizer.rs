//! Normalizer: merges consecutive same-type/same-area periods, splits any
//! period straddling the epoch into a past half and a future half, and
//! re-numbers `sequence_index` per project.

use astican_core::{Area, Day, Period, Project, ProjectId};
use std::collections::HashMap;

/// Runs the full normalization pipeline: merge, split, renumber, and force
/// future periods of to-optimize projects to `Area::Unassigned` regardless
/// of what was declared in the source data — those are exactly the periods
/// the solver must decide.
pub fn normalize(periods: Vec<Period>, projects: &[Project]) -> Vec<Period> {
    let to_optimize: HashMap<&str, bool> = projects.iter().map(|p| (p.id.as_str(), p.to_optimize)).collect();

    let merged = merge_consecutive(periods);
    let split = split_crossing_epoch(merged);
    let mut renumbered = renumber(split);

    for period in &mut renumbered {
        if period.first_day >= 0 && to_optimize.get(period.project_id.as_str()).copied().unwrap_or(false) {
            period.declared_area = Area::Unassigned;
        }
    }

    renumbered
}

fn merge_consecutive(periods: Vec<Period>) -> Vec<Period> {
    let mut by_project: HashMap<ProjectId, Vec<Period>> = HashMap::new();
    for period in periods {
        by_project.entry(period.project_id.clone()).or_default().push(period);
    }

    let mut result = Vec::new();
    for (_, mut group) in by_project {
        group.sort_by_key(|p| p.first_day);
        let mut merged: Vec<Period> = Vec::new();
        for period in group {
            if let Some(last) = merged.last_mut() {
                let contiguous = period.first_day == last.last_day + 1;
                let same_kind = period.period_type == last.period_type && period.declared_area == last.declared_area;
                if contiguous && same_kind {
                    last.last_day = period.last_day;
                    continue;
                }
            }
            merged.push(period);
        }
        result.extend(merged);
    }
    result
}

fn split_crossing_epoch(periods: Vec<Period>) -> Vec<Period> {
    let mut result = Vec::with_capacity(periods.len());
    for period in periods {
        if period.first_day < 0 && period.last_day >= 0 {
            let mut past = period.clone();
            past.last_day = -1;
            let mut future = period;
            future.first_day = 0;
            result.push(past);
            result.push(future);
        } else {
            result.push(period);
        }
    }
    result
}

fn renumber(mut periods: Vec<Period>) -> Vec<Period> {
    periods.sort_by(|a, b| (a.project_id.as_str(), a.first_day).cmp(&(b.project_id.as_str(), b.first_day)));
    let mut next_index: HashMap<ProjectId, u32> = HashMap::new();
    for period in &mut periods {
        let index = next_index.entry(period.project_id.clone()).or_insert(0);
        period.sequence_index = *index;
        *index += 1;
    }
    periods
}

#[allow(dead_code)]
fn duration(period: &Period) -> Day {
    period.last_day - period.first_day + 1
}
