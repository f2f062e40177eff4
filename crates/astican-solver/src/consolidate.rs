//! Result Consolidator: turns the solver's raw variable assignment back
//! into calendar-dated, human-readable rows.
//!
//! For each optimizable period, every day/location pair assigned `x == 1`
//! is grouped by location and collapsed to that location's earliest/latest
//! assigned day — this intentionally merges non-contiguous assigned days at
//! the same location into a single span. Periods the solver left unassigned
//! (dropped project, `y == 0`) fall back to their own declared span, which
//! the Normalizer already forced to `Area::Unassigned`. Periods belonging to
//! non-optimizable (already-committed) projects are never part of the model
//! at all; their row is emitted verbatim from the declared area and span.

use crate::adapter::Solution;
use crate::build::BuiltModel;
use astican_core::{Area, Day, Period, ResultRow};
use chrono::NaiveDate;
use std::collections::HashMap;

pub fn consolidate(built: &BuiltModel, solution: &Solution, periods: &[Period], epoch: NaiveDate) -> Vec<ResultRow> {
    let mut assigned: HashMap<(String, u32, String), (Day, Day)> = HashMap::new();

    for ((period_id, day, loc), &var) in &built.x {
        if !solution.value(var) {
            continue;
        }
        let key = (period_id.project_id.clone(), period_id.sequence_index, loc.clone());
        assigned
            .entry(key)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(*day);
                *hi = (*hi).max(*day);
            })
            .or_insert((*day, *day));
    }

    let mut rows = Vec::new();
    for period in periods {
        if !built.y.contains_key(&period.project_id) {
            // Not an optimizable project: its period was never part of the
            // model. Emit its committed placement verbatim if it overlaps
            // the planning horizon.
            if period.last_day >= 0 && period.first_day <= built.horizon {
                rows.push(row(
                    &period.project_id,
                    period.sequence_index,
                    period.declared_area.clone(),
                    period.first_day,
                    period.last_day,
                    epoch,
                ));
            }
            continue;
        }

        if period.first_day < 0 {
            continue;
        }

        let mut period_rows: Vec<ResultRow> = assigned
            .iter()
            .filter(|((project_id, seq, _), _)| *project_id == period.project_id && *seq == period.sequence_index)
            .map(|((project_id, seq, loc), &(first, last))| {
                row(project_id, *seq, Area::Concrete(loc.clone()), first, last, epoch)
            })
            .collect();

        if period_rows.is_empty() {
            period_rows.push(row(
                &period.project_id,
                period.sequence_index,
                period.declared_area.clone(),
                period.first_day,
                period.last_day,
                epoch,
            ));
        }

        rows.extend(period_rows);
    }

    rows.sort_by(|a, b| (a.project_id.clone(), a.period_id).cmp(&(b.project_id.clone(), b.period_id)));
    rows
}

fn row(project_id: &str, sequence_index: u32, location: Area, first_day: Day, last_day: Day, epoch: NaiveDate) -> ResultRow {
    let start_date = epoch + chrono::Duration::days(first_day);
    let end_date = epoch + chrono::Duration::days(last_day);
    let repair_project_id = format!("{project_id}_{sequence_index}");
    ResultRow {
        project_id: project_id.to_string(),
        period_id: sequence_index,
        repair_project_id: repair_project_id.clone(),
        location: location.clone(),
        start_date,
        end_date,
        result_id: ResultRow::result_id(project_id, start_date, end_date, &location),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::TerminationStatus;
    use crate::model::VarId;
    use astican_core::{Area, PeriodType};

    #[test]
    fn assigned_days_at_same_location_collapse_to_one_span() {
        let mut built = BuiltModel {
            model: crate::model::Model::new(),
            x: HashMap::new(),
            y: HashMap::new(),
            m: HashMap::new(),
            s: HashMap::new(),
            horizon: 2,
        };
        let period = Period::new("P1", 0, PeriodType::Afloat, 0, 2, Area::Unassigned);
        built.y.insert("P1".to_string(), VarId(0));
        built.x.insert((period.id(), 0, "MUELLE-1".to_string()), VarId(1));
        built.x.insert((period.id(), 2, "MUELLE-1".to_string()), VarId(2));

        let mut values = HashMap::new();
        values.insert(VarId(1), true);
        values.insert(VarId(2), true);
        let solution = Solution {
            status: TerminationStatus::Optimal,
            objective_value: 0,
            values,
        };

        let epoch = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let rows = consolidate(&built, &solution, &[period], epoch);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start_date, epoch);
        assert_eq!(rows[0].end_date, epoch + chrono::Duration::days(2));
    }

    #[test]
    fn dropped_project_falls_back_to_declared_span() {
        let built = BuiltModel {
            model: crate::model::Model::new(),
            x: HashMap::new(),
            y: HashMap::from([("P1".to_string(), VarId(0))]),
            m: HashMap::new(),
            s: HashMap::new(),
            horizon: 2,
        };
        let period = Period::new("P1", 0, PeriodType::Afloat, 0, 2, Area::Unassigned);
        let solution = Solution {
            status: TerminationStatus::Optimal,
            objective_value: 0,
            values: HashMap::new(),
        };
        let epoch = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let rows = consolidate(&built, &solution, &[period], epoch);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location, Area::Unassigned);
    }

    #[test]
    fn committed_row_emitted_for_non_optimizable_project_overlapping_horizon() {
        let built = BuiltModel {
            model: crate::model::Model::new(),
            x: HashMap::new(),
            y: HashMap::new(),
            m: HashMap::new(),
            s: HashMap::new(),
            horizon: 5,
        };
        let period = Period::new("PRO3", 0, PeriodType::Afloat, 1, 3, Area::Concrete("MUELLE-1".into()));
        let solution = Solution {
            status: TerminationStatus::Optimal,
            objective_value: 0,
            values: HashMap::new(),
        };
        let epoch = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let rows = consolidate(&built, &solution, &[period], epoch);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project_id, "PRO3");
        assert_eq!(rows[0].location, Area::Concrete("MUELLE-1".into()));
        assert_eq!(rows[0].start_date, epoch + chrono::Duration::days(1));
        assert_eq!(rows[0].end_date, epoch + chrono::Duration::days(3));
    }

    #[test]
    fn committed_row_outside_horizon_is_not_emitted() {
        let built = BuiltModel {
            model: crate::model::Model::new(),
            x: HashMap::new(),
            y: HashMap::new(),
            m: HashMap::new(),
            s: HashMap::new(),
            horizon: 2,
        };
        let period = Period::new("PRO3", 0, PeriodType::Afloat, 10, 12, Area::Concrete("MUELLE-1".into()));
        let solution = Solution {
            status: TerminationStatus::Optimal,
            objective_value: 0,
            values: HashMap::new(),
        };
        let epoch = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let rows = consolidate(&built, &solution, &[period], epoch);
        assert!(rows.is_empty());
    }
}
