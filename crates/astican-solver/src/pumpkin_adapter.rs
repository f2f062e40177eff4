//! [`SolverAdapter`] binding onto the `pumpkin-solver` constraint solver.
//!
//! `pumpkin-solver`'s `optimise` call only minimizes a single variable, not
//! an arbitrary linear expression, so this adapter introduces one auxiliary
//! variable tied to the real objective via an equality constraint and
//! minimizes that instead.

use crate::adapter::{SolverAdapter, TerminationStatus};
use crate::model::{ConstraintOp, ObjectiveDirection};
use pumpkin_solver::constraints as cp;
use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::results::{OptimisationResult, ProblemSolution};
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::variables::{DomainId, TransformableVariable};
use pumpkin_solver::Solver;
use std::time::Duration;

const BINARY_LO: i32 = 0;
const BINARY_HI: i32 = 1;

pub struct PumpkinAdapter {
    solver: Solver,
    constraint_tag: pumpkin_solver::ConstraintTag,
    objective_var: Option<DomainId>,
    solution: Option<Vec<i32>>,
    variables: Vec<DomainId>,
}

impl Default for PumpkinAdapter {
    fn default() -> Self {
        let mut solver = Solver::default();
        let constraint_tag = solver.new_constraint_tag();
        Self {
            solver,
            constraint_tag,
            objective_var: None,
            solution: None,
            variables: Vec::new(),
        }
    }
}

impl PumpkinAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn noop_callback<B>(_: &Solver, _: pumpkin_solver::results::SolutionReference, _: &B) {}

impl SolverAdapter for PumpkinAdapter {
    type Var = DomainId;

    fn add_binary_variable(&mut self, _label: &str) -> DomainId {
        let var = self.solver.new_bounded_integer(BINARY_LO, BINARY_HI);
        self.variables.push(var);
        var
    }

    fn add_linear_constraint(&mut self, lhs: &[(DomainId, i64)], constant: i64, op: ConstraintOp, rhs: i64) {
        let adjusted_rhs = (rhs - constant) as i32;
        let scaled: Vec<_> = lhs.iter().map(|&(var, coeff)| var.scaled(coeff as i32)).collect();
        match op {
            ConstraintOp::Ge => {
                let _ = self
                    .solver
                    .add_constraint(cp::greater_than_or_equals(scaled, adjusted_rhs, self.constraint_tag))
                    .post();
            }
            ConstraintOp::Le => {
                let negated: Vec<_> = lhs.iter().map(|&(var, coeff)| var.scaled(-coeff as i32)).collect();
                let _ = self
                    .solver
                    .add_constraint(cp::greater_than_or_equals(negated, -adjusted_rhs, self.constraint_tag))
                    .post();
            }
            ConstraintOp::Eq => {
                let _ = self
                    .solver
                    .add_constraint(cp::greater_than_or_equals(scaled.clone(), adjusted_rhs, self.constraint_tag))
                    .post();
                let negated: Vec<_> = lhs.iter().map(|&(var, coeff)| var.scaled(-coeff as i32)).collect();
                let _ = self
                    .solver
                    .add_constraint(cp::greater_than_or_equals(negated, -adjusted_rhs, self.constraint_tag))
                    .post();
            }
        }
    }

    fn set_objective(&mut self, direction: ObjectiveDirection, expr: &[(DomainId, i64)], constant: i64) {
        let (lo, hi) = {
            let mut lo = constant;
            let mut hi = constant;
            for &(_, coeff) in expr {
                if coeff > 0 {
                    hi += coeff;
                } else {
                    lo += coeff;
                }
            }
            (lo, hi)
        };

        // pumpkin only minimizes, so on Maximize the auxiliary tracks the
        // negated expression and minimizing it maximizes the real one.
        let (aux_lo, aux_hi, sign): (i32, i32, i64) = match direction {
            ObjectiveDirection::Minimize => (lo as i32, hi as i32, 1),
            ObjectiveDirection::Maximize => (-hi as i32, -lo as i32, -1),
        };
        let aux = self.solver.new_bounded_integer(aux_lo, aux_hi);

        // aux == sign * (sum(coeff * var) + constant)
        // <=> sum(sign * coeff * var) - aux == -sign * constant
        let mut scaled: Vec<_> = expr
            .iter()
            .map(|&(var, coeff)| var.scaled((sign * coeff) as i32))
            .collect();
        scaled.push(aux.scaled(-1));
        let rhs = (-sign * constant) as i32;
        let _ = self
            .solver
            .add_constraint(cp::greater_than_or_equals(scaled.clone(), rhs, self.constraint_tag))
            .post();
        let negated: Vec<_> = scaled.iter().map(|v| v.scaled(-1)).collect();
        let _ = self
            .solver
            .add_constraint(cp::greater_than_or_equals(negated, -rhs, self.constraint_tag))
            .post();

        self.objective_var = Some(aux);
    }

    fn solve(&mut self, timeout: Duration) -> TerminationStatus {
        let Some(objective_var) = self.objective_var else {
            return TerminationStatus::Error;
        };

        let mut brancher = self.solver.default_brancher();
        let mut termination = TimeBudget::starting_now(timeout);

        let result = self.solver.optimise(
            &mut brancher,
            &mut termination,
            LinearSatUnsat::new(OptimisationDirection::Minimise, objective_var, noop_callback),
        );

        match result {
            OptimisationResult::Optimal(solution) => {
                self.solution = Some(
                    self.variables
                        .iter()
                        .map(|&var| solution.get_integer_value(var))
                        .collect(),
                );
                TerminationStatus::Optimal
            }
            OptimisationResult::Satisfiable(_) => TerminationStatus::TimeLimit,
            OptimisationResult::Unsatisfiable => TerminationStatus::Infeasible,
            OptimisationResult::Unknown => TerminationStatus::TimeLimit,
        }
    }

    fn value_of(&self, var: DomainId) -> i64 {
        let Some(solution) = &self.solution else {
            return 0;
        };
        let Some(idx) = self.variables.iter().position(|&v| v == var) else {
            return 0;
        };
        i64::from(solution[idx])
    }
}
