//! Historical Aggregator: the committed-ship footprint that projects not
//! being optimized place on each (day, location) pair — capacity the
//! optimizer must leave room for.

use crate::feasibility::PeriodFeasibility;
use astican_core::{Location, Period, Project};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Maps `(day, location name)` to the total length already occupied there
/// by projects not marked to-optimize, capped at the location's own
/// length (a period can never occupy more of a berth than exists).
pub fn committed_lengths(
    periods: &[Period],
    projects: &[Project],
    locations: &[Location],
    feasibility: &HashMap<(String, u32), PeriodFeasibility>,
) -> HashMap<(i64, String), Decimal> {
    let projects_by_id: HashMap<&str, &Project> = projects.iter().map(|p| (p.id.as_str(), p)).collect();
    let max_length: HashMap<&str, Decimal> = locations.iter().map(|l| (l.name.as_str(), l.length)).collect();

    let mut totals: HashMap<(i64, String), Decimal> = HashMap::new();
    for period in periods {
        let Some(project) = projects_by_id.get(period.project_id.as_str()) else {
            continue;
        };
        if project.to_optimize {
            continue;
        }
        let Some(feas) = feasibility.get(&(period.project_id.clone(), period.sequence_index)) else {
            continue;
        };
        // A confirmed period always has exactly one candidate: its declared area.
        let Some(location) = feas.candidate_locations.first() else {
            continue;
        };
        for &day in &feas.days {
            *totals.entry((day, location.clone())).or_insert(Decimal::ZERO) += project.length;
        }
    }

    for (key, total) in &mut totals {
        if let Some(&cap) = max_length.get(key.1.as_str()) {
            if *total > cap {
                *total = cap;
            }
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasibility;
    use astican_core::{Area, PeriodType, Synchrolift};

    fn synchrolift() -> Synchrolift {
        Synchrolift {
            max_length: Decimal::from(100),
            max_width: Decimal::from(20),
            max_uses_per_day: 2,
        }
    }

    #[test]
    fn confirmed_projects_accumulate_length_per_day_and_location() {
        let periods = vec![Period::new("P1", 0, PeriodType::Afloat, 0, 2, Area::Concrete("MUELLE-1".into()))];
        let projects = vec![Project {
            id: "P1".into(),
            length: Decimal::from(60),
            beam: Decimal::from(10),
            billing: None,
            to_optimize: false,
        }];
        let locations = vec![Location::quay("MUELLE-1", Decimal::from(150))];
        let feas = feasibility::expand(&periods, &projects, &locations, &synchrolift());

        let lengths = committed_lengths(&periods, &projects, &locations, &feas);
        assert_eq!(lengths[&(0, "MUELLE-1".to_string())], Decimal::from(60));
        assert_eq!(lengths[&(2, "MUELLE-1".to_string())], Decimal::from(60));
        assert!(!lengths.contains_key(&(3, "MUELLE-1".to_string())));
    }

    #[test]
    fn to_optimize_projects_are_excluded() {
        let periods = vec![Period::new("P1", 0, PeriodType::Afloat, 0, 2, Area::Concrete("MUELLE-1".into()))];
        let projects = vec![Project {
            id: "P1".into(),
            length: Decimal::from(60),
            beam: Decimal::from(10),
            billing: Some(Decimal::from(1)),
            to_optimize: true,
        }];
        let locations = vec![Location::quay("MUELLE-1", Decimal::from(150))];
        let feas = feasibility::expand(&periods, &projects, &locations, &synchrolift());
        let lengths = committed_lengths(&periods, &projects, &locations, &feas);
        assert!(lengths.is_empty());
    }

    #[test]
    fn total_is_capped_at_location_length() {
        let periods = vec![
            Period::new("P1", 0, PeriodType::Afloat, 0, 0, Area::Concrete("MUELLE-1".into())),
            Period::new("P2", 0, PeriodType::Afloat, 0, 0, Area::Concrete("MUELLE-1".into())),
        ];
        let projects = vec![
            Project {
                id: "P1".into(),
                length: Decimal::from(100),
                beam: Decimal::from(10),
                billing: None,
                to_optimize: false,
            },
            Project {
                id: "P2".into(),
                length: Decimal::from(100),
                beam: Decimal::from(10),
                billing: None,
                to_optimize: false,
            },
        ];
        let locations = vec![Location::quay("MUELLE-1", Decimal::from(150))];
        let feas = feasibility::expand(&periods, &projects, &locations, &synchrolift());
        let lengths = committed_lengths(&periods, &projects, &locations, &feas);
        assert_eq!(lengths[&(0, "MUELLE-1".to_string())], Decimal::from(150));
    }
}
