//! Feasibility Expander: derives, for each period, the set of candidate
//! locations it could occupy and the list of days it spans.

use astican_core::{Area, Day, Location, LocationKind, Period, PeriodType, Project, Synchrolift};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct PeriodFeasibility {
    pub candidate_locations: Vec<String>,
    pub days: Vec<Day>,
}

/// Computes candidate locations and the day list for every period.
///
/// Candidate locations:
/// - a period with a concrete declared area has that single area as its
///   only candidate;
/// - an unassigned afloat period may use any quay at least as long as the
///   project;
/// - an unassigned ashore period may use any street at least as long and
///   wide as the project, but only if the project also fits the
///   synchrolift envelope (it must pass through the synchrolift to reach
///   a street); otherwise it has no candidates and is infeasible.
///
/// The day list is empty for past periods (`first_day < 0`) — those are
/// historical record, not decision points.
pub fn expand(periods: &[Period], projects: &[Project], locations: &[Location], synchrolift: &Synchrolift) -> HashMap<(String, u32), PeriodFeasibility> {
    let projects_by_id: HashMap<&str, &Project> = projects.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut result = HashMap::new();
    for period in periods {
        let Some(project) = projects_by_id.get(period.project_id.as_str()) else {
            continue;
        };

        let candidate_locations = match &period.declared_area {
            Area::Concrete(name) => vec![name.clone()],
            Area::Unassigned => match period.period_type {
                PeriodType::Afloat => locations
                    .iter()
                    .filter(|l| l.kind == LocationKind::Quay && l.length >= project.length)
                    .map(|l| l.name.clone())
                    .collect(),
                PeriodType::Ashore => {
                    if project.length <= synchrolift.max_length && project.beam <= synchrolift.max_width {
                        locations
                            .iter()
                            .filter(|l| {
                                l.kind == LocationKind::Street
                                    && l.length >= project.length
                                    && l.width.is_some_and(|w| w >= project.beam)
                            })
                            .map(|l| l.name.clone())
                            .collect()
                    } else {
                        Vec::new()
                    }
                }
            },
        };

        let days = if period.first_day >= 0 {
            (period.first_day..=period.last_day).collect()
        } else {
            Vec::new()
        };

        result.insert((period.project_id.clone(), period.sequence_index), PeriodFeasibility { candidate_locations, days });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn synchrolift() -> Synchrolift {
        Synchrolift {
            max_length: Decimal::from(100),
            max_width: Decimal::from(20),
            max_uses_per_day: 2,
        }
    }

    fn project(length: i64, beam: i64) -> Project {
        Project {
            id: "P1".to_string(),
            length: Decimal::from(length),
            beam: Decimal::from(beam),
            billing: Some(Decimal::from(1000)),
            to_optimize: true,
        }
    }

    #[test]
    fn concrete_area_yields_singleton_candidate() {
        let periods = vec![Period::new("P1", 0, PeriodType::Afloat, 0, 3, Area::Concrete("MUELLE-1".into()))];
        let result = expand(&periods, &[project(50, 10)], &[], &synchrolift());
        let feas = &result[&("P1".to_string(), 0)];
        assert_eq!(feas.candidate_locations, vec!["MUELLE-1".to_string()]);
    }

    #[test]
    fn unassigned_afloat_picks_quays_long_enough() {
        let periods = vec![Period::new("P1", 0, PeriodType::Afloat, 0, 3, Area::Unassigned)];
        let locations = vec![Location::quay("SHORT", Decimal::from(40)), Location::quay("LONG", Decimal::from(80))];
        let result = expand(&periods, &[project(50, 10)], &locations, &synchrolift());
        let feas = &result[&("P1".to_string(), 0)];
        assert_eq!(feas.candidate_locations, vec!["LONG".to_string()]);
    }

    #[test]
    fn ashore_project_too_big_for_synchrolift_has_no_candidates() {
        let periods = vec![Period::new("P1", 0, PeriodType::Ashore, 0, 3, Area::Unassigned)];
        let locations = vec![Location::street("CALLE-1", Decimal::from(200), Decimal::from(50))];
        let result = expand(&periods, &[project(150, 30)], &locations, &synchrolift());
        let feas = &result[&("P1".to_string(), 0)];
        assert!(feas.candidate_locations.is_empty());
    }

    #[test]
    fn past_periods_have_no_day_list() {
        let periods = vec![Period::new("P1", 0, PeriodType::Afloat, -5, -1, Area::Concrete("MUELLE-1".into()))];
        let result = expand(&periods, &[project(50, 10)], &[], &synchrolift());
        assert!(result[&("P1".to_string(), 0)].days.is_empty());
    }
}
