//! The Solver Adapter: the single seam between the assignment model and
//! whatever external MILP/CP engine actually executes it.

use crate::model::{ConstraintOp, Model, VarId};
use std::collections::HashMap;
use std::time::Duration;

/// Outcome of a solve attempt. Only `Optimal` carries a usable assignment;
/// every other variant propagates as a typed error one level up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminationStatus {
    Optimal,
    Infeasible,
    Unbounded,
    TimeLimit,
    Error,
}

#[derive(Clone, Debug)]
pub struct Solution {
    pub status: TerminationStatus,
    /// The objective value, in the same integer units as the model
    /// (cents), valid only when `status == Optimal`.
    pub objective_value: i64,
    pub values: HashMap<VarId, bool>,
}

impl Solution {
    pub fn value(&self, var: VarId) -> bool {
        self.values.get(&var).copied().unwrap_or(false)
    }
}

/// A binding to a concrete external solver. Implementations build their own
/// native variables/constraints as `add_binary_variable`/`add_linear_constraint`
/// are called, then resolve a `TerminationStatus` and per-variable values
/// from `solve`.
pub trait SolverAdapter {
    type Var: Copy;

    fn add_binary_variable(&mut self, label: &str) -> Self::Var;

    fn add_linear_constraint(
        &mut self,
        lhs: &[(Self::Var, i64)],
        constant: i64,
        op: ConstraintOp,
        rhs: i64,
    );

    fn set_objective(&mut self, direction: crate::model::ObjectiveDirection, expr: &[(Self::Var, i64)], constant: i64);

    fn solve(&mut self, timeout: Duration) -> TerminationStatus;

    fn value_of(&self, var: Self::Var) -> i64;
}

/// Translates an abstract [`Model`] onto any [`SolverAdapter`] and runs it.
pub fn submit<S: SolverAdapter>(model: &Model, adapter: &mut S, timeout: Duration) -> Solution {
    let mut native: Vec<S::Var> = Vec::with_capacity(model.variables.len());
    for def in &model.variables {
        native.push(adapter.add_binary_variable(&def.label));
    }

    for constraint in &model.constraints {
        let lhs: Vec<(S::Var, i64)> = constraint
            .lhs
            .terms
            .iter()
            .map(|&(var, coeff)| (native[var.0], coeff))
            .collect();
        adapter.add_linear_constraint(&lhs, constraint.lhs.constant, constraint.op, constraint.rhs);
    }

    if let Some(objective) = &model.objective {
        let expr: Vec<(S::Var, i64)> = objective
            .expr
            .terms
            .iter()
            .map(|&(var, coeff)| (native[var.0], coeff))
            .collect();
        adapter.set_objective(objective.direction, &expr, objective.expr.constant);
    }

    let status = adapter.solve(timeout);

    let mut values = HashMap::new();
    let mut objective_value = 0;
    if status == TerminationStatus::Optimal {
        for (id, &var) in native.iter().enumerate() {
            values.insert(VarId(id), adapter.value_of(var) != 0);
        }
        if let Some(objective) = &model.objective {
            objective_value = objective.expr.constant
                + objective
                    .expr
                    .terms
                    .iter()
                    .map(|&(var, coeff)| coeff * i64::from(values[&var]))
                    .sum::<i64>();
        }
    }

    Solution {
        status,
        objective_value,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinearExpr, ObjectiveDirection};
    use std::collections::HashMap as StdHashMap;

    /// A trivial in-memory adapter used only to exercise `submit`'s wiring;
    /// it evaluates the model directly rather than delegating to a real
    /// solver, which is enough to test the translation layer.
    struct BruteForceAdapter {
        labels: Vec<String>,
        constraints: Vec<(Vec<(usize, i64)>, i64, ConstraintOp, i64)>,
        objective: Option<(ObjectiveDirection, Vec<(usize, i64)>, i64)>,
        assignment: StdHashMap<usize, i64>,
    }

    impl BruteForceAdapter {
        fn new() -> Self {
            Self {
                labels: Vec::new(),
                constraints: Vec::new(),
                objective: None,
                assignment: StdHashMap::new(),
            }
        }
    }

    impl SolverAdapter for BruteForceAdapter {
        type Var = usize;

        fn add_binary_variable(&mut self, label: &str) -> usize {
            self.labels.push(label.to_string());
            self.labels.len() - 1
        }

        fn add_linear_constraint(&mut self, lhs: &[(usize, i64)], constant: i64, op: ConstraintOp, rhs: i64) {
            self.constraints.push((lhs.to_vec(), constant, op, rhs));
        }

        fn set_objective(&mut self, direction: ObjectiveDirection, expr: &[(usize, i64)], constant: i64) {
            self.objective = Some((direction, expr.to_vec(), constant));
        }

        fn solve(&mut self, _timeout: Duration) -> TerminationStatus {
            let n = self.labels.len();
            let mut best: Option<(i64, Vec<bool>)> = None;
            for mask in 0..(1u32 << n) {
                let assignment: Vec<bool> = (0..n).map(|i| (mask >> i) & 1 == 1).collect();
                let feasible = self.constraints.iter().all(|(lhs, constant, op, rhs)| {
                    let value: i64 = constant
                        + lhs
                            .iter()
                            .map(|&(v, c)| c * i64::from(assignment[v]))
                            .sum::<i64>();
                    match op {
                        ConstraintOp::Le => value <= *rhs,
                        ConstraintOp::Ge => value >= *rhs,
                        ConstraintOp::Eq => value == *rhs,
                    }
                });
                if !feasible {
                    continue;
                }
                let obj_value = self.objective.as_ref().map_or(0, |(_, expr, constant)| {
                    constant + expr.iter().map(|&(v, c)| c * i64::from(assignment[v])).sum::<i64>()
                });
                let maximize = self
                    .objective
                    .as_ref()
                    .map_or(true, |(dir, _, _)| *dir == ObjectiveDirection::Maximize);
                let better = match &best {
                    None => true,
                    Some((best_value, _)) => {
                        if maximize {
                            obj_value > *best_value
                        } else {
                            obj_value < *best_value
                        }
                    }
                };
                if better {
                    best = Some((obj_value, assignment));
                }
            }

            match best {
                Some((_, assignment)) => {
                    for (i, v) in assignment.iter().enumerate() {
                        self.assignment.insert(i, i64::from(*v));
                    }
                    TerminationStatus::Optimal
                }
                None => TerminationStatus::Infeasible,
            }
        }

        fn value_of(&self, var: usize) -> i64 {
            *self.assignment.get(&var).unwrap_or(&0)
        }
    }

    #[test]
    fn submit_finds_optimal_assignment_satisfying_constraints() {
        let mut model = Model::new();
        let a = model.new_binary_variable("a");
        let b = model.new_binary_variable("b");
        // a + b <= 1, maximize 3*a + 2*b -> a=1, b=0
        model.add_constraint(
            "cap",
            LinearExpr::new().with_term(a, 1).with_term(b, 1),
            ConstraintOp::Le,
            1,
        );
        model.set_objective(
            ObjectiveDirection::Maximize,
            LinearExpr::new().with_term(a, 3).with_term(b, 2),
        );

        let mut adapter = BruteForceAdapter::new();
        let solution = submit(&model, &mut adapter, Duration::from_secs(1));

        assert_eq!(solution.status, TerminationStatus::Optimal);
        assert!(solution.value(a));
        assert!(!solution.value(b));
        assert_eq!(solution.objective_value, 3);
    }

    #[test]
    fn submit_reports_infeasible_when_no_assignment_satisfies_constraints() {
        let mut model = Model::new();
        let a = model.new_binary_variable("a");
        model.add_constraint("impossible", LinearExpr::new().with_term(a, 1), ConstraintOp::Ge, 2);
        let mut adapter = BruteForceAdapter::new();
        let solution = submit(&model, &mut adapter, Duration::from_secs(1));
        assert_eq!(solution.status, TerminationStatus::Infeasible);
    }
}
