//! Model Builder: assembles the decision variables, objective, and C1-C8
//! constraint families into a solver-independent [`crate::model::Model`].
//! Monetary and length quantities are converted to integer cents/centimeters
//! here, at the one boundary where the decimal domain model meets the
//! integer-only solver.

use crate::feasibility::PeriodFeasibility;
use crate::model::{ConstraintOp, LinearExpr, Model, ObjectiveDirection, VarId};
use astican_core::{Area, Configuration, Day, Location, Period, PeriodId, PeriodType, Project, ProjectId};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

const CENTS_PER_UNIT: i64 = 100;

fn to_cents(value: Decimal) -> i64 {
    (value * Decimal::from(CENTS_PER_UNIT)).round().to_i64().unwrap_or(0)
}

pub struct BuiltModel {
    pub model: Model,
    pub x: HashMap<(PeriodId, Day, String), VarId>,
    pub y: HashMap<ProjectId, VarId>,
    pub m: HashMap<(PeriodId, Day), VarId>,
    pub s: HashMap<(ProjectId, Day), VarId>,
    /// Last day covered by any optimized period; the planning horizon is `[0..=horizon]`.
    pub horizon: Day,
}

#[allow(clippy::too_many_arguments)]
pub fn build(
    periods: &[Period],
    projects: &[Project],
    locations: &[Location],
    configuration: &Configuration,
    feasibility: &HashMap<(ProjectId, u32), PeriodFeasibility>,
    committed_lengths: &HashMap<(Day, String), Decimal>,
    committed_uses: &HashMap<Day, u32>,
    previous_locations: &HashMap<PeriodId, Area>,
    prior_movements: &HashMap<ProjectId, u32>,
    daily_rates: &HashMap<ProjectId, Decimal>,
) -> BuiltModel {
    let mut model = Model::new();
    let to_optimize: HashMap<&str, &Project> = projects.iter().filter(|p| p.to_optimize).map(|p| (p.id.as_str(), p)).collect();

    let mut y = HashMap::new();
    for project in to_optimize.values() {
        y.insert(project.id.clone(), model.new_binary_variable(format!("y_{}", project.id)));
    }

    let mut x: HashMap<(PeriodId, Day, String), VarId> = HashMap::new();
    let mut m: HashMap<(PeriodId, Day), VarId> = HashMap::new();
    let mut s: HashMap<(ProjectId, Day), VarId> = HashMap::new();

    let future_optimized_periods: Vec<&Period> = periods
        .iter()
        .filter(|p| p.first_day >= 0 && to_optimize.contains_key(p.project_id.as_str()))
        .collect();

    for period in &future_optimized_periods {
        let key = (period.project_id.clone(), period.sequence_index);
        let Some(feas) = feasibility.get(&key) else { continue };
        let period_id = period.id();

        for &day in &feas.days {
            for loc in &feas.candidate_locations {
                x.insert(
                    (period_id.clone(), day, loc.clone()),
                    model.new_binary_variable(format!("x_{period_id}_{day}_{loc}")),
                );
            }
        }

        if feas.candidate_locations.len() > 1 {
            for &day in &feas.days {
                m.insert((period_id.clone(), day), model.new_binary_variable(format!("m_{period_id}_{day}")));
            }
        }

        if period.period_type == PeriodType::Ashore {
            for &day in &[period.first_day, period.last_day] {
                s.entry((period.project_id.clone(), day))
                    .or_insert_with(|| model.new_binary_variable(format!("s_{}_{day}", period.project_id)));
            }
        }
    }

    let horizon: Day = future_optimized_periods.iter().map(|p| p.last_day).max().unwrap_or(0);
    let all_days: Vec<Day> = (0..=horizon).collect();

    // C1: each day of an optimized period is assigned to exactly one of its
    // candidate locations if the project is taken on, none if it isn't.
    for period in &future_optimized_periods {
        let key = (period.project_id.clone(), period.sequence_index);
        let Some(feas) = feasibility.get(&key) else { continue };
        let Some(&y_var) = y.get(&period.project_id) else { continue };
        let period_id = period.id();
        for &day in &feas.days {
            let mut lhs = LinearExpr::new();
            for loc in &feas.candidate_locations {
                if let Some(&var) = x.get(&(period_id.clone(), day, loc.clone())) {
                    lhs.add_term(var, 1);
                }
            }
            lhs.add_term(y_var, -1);
            model.add_constraint(format!("assign_{period_id}_{day}"), lhs, ConstraintOp::Eq, 0);
        }
    }

    // C2: occupied length at each location/day, optimized plus committed,
    // cannot exceed the location's own length.
    for location in locations {
        let cap_cents = to_cents(location.length);
        for &day in &all_days {
            let mut lhs = LinearExpr::new();
            for period in &future_optimized_periods {
                if !feasibility
                    .get(&(period.project_id.clone(), period.sequence_index))
                    .is_some_and(|f| f.days.contains(&day))
                {
                    continue;
                }
                let Some(project) = to_optimize.get(period.project_id.as_str()) else { continue };
                if let Some(&var) = x.get(&(period.id(), day, location.name.clone())) {
                    lhs.add_term(var, to_cents(project.length));
                }
            }
            let committed = committed_lengths.get(&(day, location.name.clone())).copied().unwrap_or(Decimal::ZERO);
            lhs.constant += to_cents(committed);
            model.add_constraint(format!("capacity_{day}_{}", location.name), lhs, ConstraintOp::Le, cap_cents);
        }
    }

    // C3/C4: m tracks whether a period's location changed from the day before.
    for period in &future_optimized_periods {
        let key = (period.project_id.clone(), period.sequence_index);
        let Some(feas) = feasibility.get(&key) else { continue };
        if feas.candidate_locations.len() <= 1 {
            continue;
        }
        let period_id = period.id();
        for &day in feas.days.iter().skip(1) {
            let Some(&m_var) = m.get(&(period_id.clone(), day)) else { continue };
            for loc in &feas.candidate_locations {
                let Some(&x_today) = x.get(&(period_id.clone(), day, loc.clone())) else { continue };
                let Some(&x_yesterday) = x.get(&(period_id.clone(), day - 1, loc.clone())) else { continue };

                let mut ge = LinearExpr::new();
                ge.add_term(m_var, 1);
                ge.add_term(x_today, -1);
                ge.add_term(x_yesterday, 1);
                model.add_constraint(format!("move_lb_{period_id}_{day}_{loc}"), ge, ConstraintOp::Ge, 0);

                let mut le = LinearExpr::new();
                le.add_term(m_var, 1);
                le.add_term(x_today, 1);
                le.add_term(x_yesterday, 1);
                model.add_constraint(format!("move_ub_{period_id}_{day}_{loc}"), le, ConstraintOp::Le, 2);
            }
        }
    }

    // C5: a period picking up at day 0 right after a same-type historical
    // period counts as a movement unless it keeps the same location.
    for (period_id, previous_area) in previous_locations {
        let Some(&m_var) = m.get(&(period_id.clone(), 0)) else { continue };
        let mut lhs = LinearExpr::new();
        lhs.add_term(m_var, 1);
        let mut rhs = 1;
        if let Area::Concrete(name) = previous_area {
            if let Some(&x_var) = x.get(&(period_id.clone(), 0, name.clone())) {
                lhs.add_term(x_var, 1);
                rhs = 1;
            }
        }
        model.add_constraint(format!("continuity_{period_id}"), lhs, ConstraintOp::Ge, rhs);
    }

    // C6: total movements per project, including whatever already happened
    // before the epoch, is capped.
    for project in to_optimize.values() {
        let mut lhs = LinearExpr::new();
        for period in &future_optimized_periods {
            if period.project_id != project.id {
                continue;
            }
            let key = (period.project_id.clone(), period.sequence_index);
            let Some(feas) = feasibility.get(&key) else { continue };
            if feas.candidate_locations.len() <= 1 {
                continue;
            }
            for &day in &feas.days {
                if let Some(&var) = m.get(&(period.id(), day)) {
                    lhs.add_term(var, 1);
                }
            }
        }
        let prior = prior_movements.get(&project.id).copied().unwrap_or(0) as i64;
        lhs.constant += prior;
        model.add_constraint(
            format!("max_movements_{}", project.id),
            lhs,
            ConstraintOp::Le,
            i64::from(configuration.max_movements_per_project),
        );
    }

    // C7: synchrolift use tracks whether the project was taken on at all.
    for ((project_id, &day), &s_var) in &s {
        let Some(&y_var) = y.get(project_id) else { continue };
        let mut lhs = LinearExpr::new();
        lhs.add_term(s_var, 1);
        lhs.add_term(y_var, -1);
        model.add_constraint(format!("synchrolift_def_{project_id}_{day}"), lhs, ConstraintOp::Eq, 0);
    }

    // C8: synchrolift has a daily capacity, optimized uses plus committed.
    for &day in &all_days {
        let mut lhs = LinearExpr::new();
        for project in to_optimize.values() {
            if let Some(&var) = s.get(&(project.id.clone(), day)) {
                lhs.add_term(var, 1);
            }
        }
        let committed = committed_uses.get(&day).copied().unwrap_or(0);
        lhs.constant += i64::from(committed);
        model.add_constraint(
            format!("synchrolift_cap_{day}"),
            lhs,
            ConstraintOp::Le,
            i64::from(configuration.max_synchrolift_uses_per_day),
        );
    }

    // Objective: maximize billing of every assigned day minus the
    // per-movement penalty.
    let mut objective = LinearExpr::new();
    for ((period_id, _day, _loc), &var) in &x {
        if let Some(rate) = daily_rates.get(&period_id.project_id) {
            objective.add_term(var, to_cents(*rate));
        }
    }
    let penalty_cents = to_cents(configuration.movement_penalty);
    for &var in m.values() {
        objective.add_term(var, -penalty_cents);
    }
    model.set_objective(ObjectiveDirection::Maximize, objective);

    BuiltModel { model, x, y, m, s, horizon }
}
