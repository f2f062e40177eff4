//! Synchrolift Aggregator: how many times projects not being optimized
//! already occupy the synchrolift on a given day — entering or leaving an
//! ashore period each costs one use.

use astican_core::{Day, Period, PeriodType, Project};
use std::collections::HashMap;

/// Maps day to the number of synchrolift uses already committed by
/// projects not marked to-optimize, capped at `max_uses_per_day`.
pub fn committed_uses(periods: &[Period], projects: &[Project], max_uses_per_day: u32) -> HashMap<Day, u32> {
    let to_optimize: HashMap<&str, bool> = projects.iter().map(|p| (p.id.as_str(), p.to_optimize)).collect();

    let mut by_project: HashMap<&str, Vec<&Period>> = HashMap::new();
    for period in periods {
        if to_optimize.get(period.project_id.as_str()).copied().unwrap_or(false) {
            continue;
        }
        by_project.entry(period.project_id.as_str()).or_default().push(period);
    }

    let mut counts: HashMap<Day, u32> = HashMap::new();
    for group in by_project.values_mut() {
        group.sort_by_key(|p| p.first_day);
        for (idx, period) in group.iter().enumerate() {
            if period.period_type != PeriodType::Ashore {
                continue;
            }
            let prev_is_ashore = idx > 0 && group[idx - 1].period_type == PeriodType::Ashore;
            if !prev_is_ashore {
                *counts.entry(period.first_day).or_insert(0) += 1;
            }
            let next_is_ashore = idx + 1 < group.len() && group[idx + 1].period_type == PeriodType::Ashore;
            if !next_is_ashore {
                *counts.entry(period.last_day).or_insert(0) += 1;
            }
        }
    }

    for count in counts.values_mut() {
        *count = (*count).min(max_uses_per_day);
    }

    counts
}
