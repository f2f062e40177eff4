//! A solver-independent representation of the assignment MILP.
//!
//! The Model Builder (`crate::build`) only ever touches this module: it
//! declares variables and constraints here, in plain integer arithmetic, with
//! no dependency on whichever concrete solver ends up executing it. A
//! [`crate::adapter::SolverAdapter`] translates a [`Model`] into its own
//! native representation.

use std::fmt;

/// Opaque handle to a declared variable. Indexes into `Model::variables`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

#[derive(Clone, Debug)]
pub struct VariableDef {
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintOp {
    Le,
    Ge,
    Eq,
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintOp::Le => "<=",
            ConstraintOp::Ge => ">=",
            ConstraintOp::Eq => "==",
        };
        write!(f, "{s}")
    }
}

/// A linear combination of binary variables plus a constant, all in integer
/// units (cents for monetary terms).
#[derive(Clone, Debug, Default)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, i64)>,
    pub constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_term(mut self, var: VarId, coeff: i64) -> Self {
        self.terms.push((var, coeff));
        self
    }

    pub fn add_term(&mut self, var: VarId, coeff: i64) {
        self.terms.push((var, coeff));
    }

    /// Lower/upper bounds this expression can take given every variable is
    /// in `{0,1}`.
    pub fn bounds(&self) -> (i64, i64) {
        let mut lo = self.constant;
        let mut hi = self.constant;
        for &(_, coeff) in &self.terms {
            if coeff > 0 {
                hi += coeff;
            } else {
                lo += coeff;
            }
        }
        (lo, hi)
    }
}

#[derive(Clone, Debug)]
pub struct Constraint {
    pub label: String,
    pub lhs: LinearExpr,
    pub op: ConstraintOp,
    pub rhs: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectiveDirection {
    Maximize,
    Minimize,
}

#[derive(Clone, Debug)]
pub struct Objective {
    pub direction: ObjectiveDirection,
    pub expr: LinearExpr,
}

/// A fully-built, solver-independent MILP: every variable is binary.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub variables: Vec<VariableDef>,
    pub constraints: Vec<Constraint>,
    pub objective: Option<Objective>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_binary_variable(&mut self, label: impl Into<String>) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(VariableDef { label: label.into() });
        id
    }

    pub fn add_constraint(&mut self, label: impl Into<String>, lhs: LinearExpr, op: ConstraintOp, rhs: i64) {
        self.constraints.push(Constraint {
            label: label.into(),
            lhs,
            op,
            rhs,
        });
    }

    pub fn set_objective(&mut self, direction: ObjectiveDirection, expr: LinearExpr) {
        self.objective = Some(Objective { direction, expr });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_account_for_sign_of_coefficients() {
        let mut model = Model::new();
        let a = model.new_binary_variable("a");
        let b = model.new_binary_variable("b");
        let expr = LinearExpr::new().with_term(a, 100).with_term(b, -50);
        assert_eq!(expr.bounds(), (-50, 100));
    }

    #[test]
    fn new_binary_variable_assigns_sequential_ids() {
        let mut model = Model::new();
        let a = model.new_binary_variable("a");
        let b = model.new_binary_variable("b");
        assert_eq!(a.0, 0);
        assert_eq!(b.0, 1);
    }
}
