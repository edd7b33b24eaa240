//! Varisat-backed implementation of the solving capability.
//!
//! Integer variables are direct-encoded: every variable owns one selector
//! literal per value of the shared universe `[0, num_values)`, tied together
//! by exactly-one structural clauses. Comparison atoms lower to selector
//! literals or short implication clauses, nested disjuncts get a definition
//! literal, and `AllDistinct` becomes per-value at-most-one clauses. Scopes
//! are activation literals: clauses added inside a scope carry the negated
//! activation literal, checks assume every open activation literal, and `pop`
//! retires its literal with a permanent unit clause.

use itertools::Itertools;
use varisat::{ExtendFormula, Lit, Solver};

use super::{BoolExpr, CheckOutcome, ConstraintSolver, Model, SolveError, Term, VarId};

pub struct SatSolver {
    solver: Solver<'static>,
    universe: u16,
    vars: Vec<IntVar>,
    scopes: Vec<Lit>,
    assignment: Option<Vec<u16>>,
}

struct IntVar {
    selectors: Vec<Lit>,
}

enum Lowered {
    /// The atom is a truth constant under the universe bounds.
    Const(bool),
    /// The atom is equivalent to the disjunction of these literals.
    Lits(Vec<Lit>),
}

impl SatSolver {
    /// Creates a backend whose every variable ranges over `[0, num_values)`.
    pub fn new(num_values: u16) -> Self {
        Self {
            solver: Solver::new(),
            universe: num_values,
            vars: Vec::new(),
            scopes: Vec::new(),
            assignment: None,
        }
    }

    pub fn num_values(&self) -> u16 {
        self.universe
    }

    fn selectors_of(&self, var: VarId) -> Vec<Lit> {
        self.vars[var.index()].selectors.clone()
    }

    fn selector(&self, var: VarId, value: u16) -> Lit {
        self.vars[var.index()].selectors[value as usize]
    }

    fn scope_guard(&self) -> Vec<Lit> {
        // only the innermost scope matters: scopes close strictly inner-first
        match self.scopes.last() {
            Some(activation) => vec![!*activation],
            None => Vec::new(),
        }
    }

    fn add_clause_with(&mut self, guard: &[Lit], lits: &[Lit]) {
        let mut clause = guard.to_vec();
        clause.extend_from_slice(lits);
        self.solver.add_clause(&clause);
    }

    /// Adds `expr` in conjunction context: every emitted clause carries `guard`.
    fn encode(&mut self, expr: &BoolExpr, guard: &[Lit]) {
        match expr {
            BoolExpr::And(children) => {
                for child in children {
                    self.encode(child, guard);
                }
            }
            BoolExpr::Or(children) => self.encode_or(children, guard),
            BoolExpr::Not(inner) => {
                let negation = negated(inner);
                self.encode(&negation, guard);
            }
            BoolExpr::AllDistinct(vars) => self.encode_all_distinct(vars, guard),
            BoolExpr::Eq(Term::Var(x), Term::Var(y)) => self.encode_eq_vars(*x, *y, guard),
            BoolExpr::Ne(Term::Var(x), Term::Var(y)) => self.encode_ne_vars(*x, *y, guard),
            BoolExpr::Lt(Term::Var(x), Term::Var(y)) => {
                self.encode_ord_vars(*x, *y, false, guard)
            }
            BoolExpr::Le(Term::Var(x), Term::Var(y)) => self.encode_ord_vars(*x, *y, true, guard),
            atom => match self.lower_atom(atom) {
                Lowered::Const(true) => {}
                Lowered::Const(false) => self.add_clause_with(guard, &[]),
                Lowered::Lits(lits) => self.add_clause_with(guard, &lits),
            },
        }
    }

    fn encode_or(&mut self, children: &[BoolExpr], guard: &[Lit]) {
        let mut clause = guard.to_vec();
        for child in children {
            if self.or_child(child, guard, &mut clause) {
                return;
            }
        }
        self.solver.add_clause(&clause);
    }

    /// Folds one disjunct into `clause`; returns true if it is trivially true.
    fn or_child(&mut self, child: &BoolExpr, guard: &[Lit], clause: &mut Vec<Lit>) -> bool {
        match child {
            BoolExpr::Or(nested) => {
                for inner in nested {
                    if self.or_child(inner, guard, clause) {
                        return true;
                    }
                }
                false
            }
            BoolExpr::Not(inner) => {
                let negation = negated(inner);
                self.or_child(&negation, guard, clause)
            }
            BoolExpr::And(_)
            | BoolExpr::AllDistinct(_)
            | BoolExpr::Eq(Term::Var(_), Term::Var(_))
            | BoolExpr::Ne(Term::Var(_), Term::Var(_))
            | BoolExpr::Lt(Term::Var(_), Term::Var(_))
            | BoolExpr::Le(Term::Var(_), Term::Var(_)) => {
                // no single-literal form: a definition literal implies the subtree
                let definition = Lit::from_var(self.solver.new_var(), true);
                clause.push(definition);
                let mut inner_guard = guard.to_vec();
                inner_guard.push(!definition);
                self.encode(child, &inner_guard);
                false
            }
            atom => match self.lower_atom(atom) {
                Lowered::Const(truth) => truth,
                Lowered::Lits(lits) => {
                    clause.extend(lits);
                    false
                }
            },
        }
    }

    /// Lowers an atom with at least one constant operand.
    fn lower_atom(&self, atom: &BoolExpr) -> Lowered {
        let n = self.universe;
        match *atom {
            BoolExpr::Eq(Term::Value(a), Term::Value(b)) => Lowered::Const(a == b),
            BoolExpr::Ne(Term::Value(a), Term::Value(b)) => Lowered::Const(a != b),
            BoolExpr::Lt(Term::Value(a), Term::Value(b)) => Lowered::Const(a < b),
            BoolExpr::Le(Term::Value(a), Term::Value(b)) => Lowered::Const(a <= b),
            BoolExpr::Eq(Term::Var(x), Term::Value(k))
            | BoolExpr::Eq(Term::Value(k), Term::Var(x)) => {
                if k < n {
                    Lowered::Lits(vec![self.selector(x, k)])
                } else {
                    Lowered::Const(false)
                }
            }
            BoolExpr::Ne(Term::Var(x), Term::Value(k))
            | BoolExpr::Ne(Term::Value(k), Term::Var(x)) => {
                if k < n {
                    Lowered::Lits(vec![!self.selector(x, k)])
                } else {
                    Lowered::Const(true)
                }
            }
            BoolExpr::Lt(Term::Var(x), Term::Value(k)) => {
                if k == 0 {
                    Lowered::Const(false)
                } else if k >= n {
                    Lowered::Const(true)
                } else {
                    Lowered::Lits(self.selectors_of(x)[..k as usize].to_vec())
                }
            }
            BoolExpr::Le(Term::Var(x), Term::Value(k)) => {
                if k >= n.saturating_sub(1) {
                    Lowered::Const(true)
                } else {
                    Lowered::Lits(self.selectors_of(x)[..=k as usize].to_vec())
                }
            }
            BoolExpr::Lt(Term::Value(k), Term::Var(x)) => {
                if k >= n.saturating_sub(1) {
                    Lowered::Const(false)
                } else {
                    Lowered::Lits(self.selectors_of(x)[k as usize + 1..].to_vec())
                }
            }
            BoolExpr::Le(Term::Value(k), Term::Var(x)) => {
                if k == 0 {
                    Lowered::Const(true)
                } else if k >= n {
                    Lowered::Const(false)
                } else {
                    Lowered::Lits(self.selectors_of(x)[k as usize..].to_vec())
                }
            }
            _ => unreachable!("non-atomic expression reached atom lowering"),
        }
    }

    fn encode_eq_vars(&mut self, x: VarId, y: VarId, guard: &[Lit]) {
        let xs = self.selectors_of(x);
        let ys = self.selectors_of(y);
        for (&sx, &sy) in xs.iter().zip(&ys) {
            self.add_clause_with(guard, &[!sx, sy]);
            self.add_clause_with(guard, &[sx, !sy]);
        }
    }

    fn encode_ne_vars(&mut self, x: VarId, y: VarId, guard: &[Lit]) {
        let xs = self.selectors_of(x);
        let ys = self.selectors_of(y);
        for (&sx, &sy) in xs.iter().zip(&ys) {
            self.add_clause_with(guard, &[!sx, !sy]);
        }
    }

    /// `x < y` (or `x <= y` when `inclusive`): picking a value for `x`
    /// restricts `y` to the values above it.
    fn encode_ord_vars(&mut self, x: VarId, y: VarId, inclusive: bool, guard: &[Lit]) {
        let xs = self.selectors_of(x);
        let ys = self.selectors_of(y);
        for (value, &sx) in xs.iter().enumerate() {
            let start = if inclusive { value } else { value + 1 };
            let mut clause = Vec::with_capacity(1 + ys.len().saturating_sub(start));
            clause.push(!sx);
            clause.extend_from_slice(&ys[start.min(ys.len())..]);
            self.add_clause_with(guard, &clause);
        }
    }

    fn encode_all_distinct(&mut self, vars: &[VarId], guard: &[Lit]) {
        for value in 0..self.universe {
            let holders: Vec<Lit> = vars.iter().map(|&v| self.selector(v, value)).collect();
            for (a, b) in holders.iter().copied().tuple_combinations::<(_, _)>() {
                self.add_clause_with(guard, &[!a, !b]);
            }
        }
    }
}

impl ConstraintSolver for SatSolver {
    fn declare_int(&mut self, name: &str) -> VarId {
        let selectors: Vec<Lit> = (0..self.universe)
            .map(|_| Lit::from_var(self.solver.new_var(), true))
            .collect();
        // structural exactly-one clauses persist across scopes
        self.solver.add_clause(&selectors);
        for (a, b) in selectors.iter().copied().tuple_combinations::<(_, _)>() {
            self.solver.add_clause(&[!a, !b]);
        }
        let id = VarId(self.vars.len());
        tracing::debug!(name, id = id.index(), "declared integer variable");
        self.vars.push(IntVar { selectors });
        id
    }

    fn add(&mut self, constraint: BoolExpr) {
        let guard = self.scope_guard();
        self.encode(&constraint, &guard);
    }

    fn push(&mut self) {
        let activation = Lit::from_var(self.solver.new_var(), true);
        self.scopes.push(activation);
    }

    fn pop(&mut self) {
        if let Some(activation) = self.scopes.pop() {
            // retire the scope: its guarded clauses are satisfied forever
            self.solver.add_clause(&[!activation]);
        }
    }

    fn check(&mut self) -> Result<CheckOutcome, SolveError> {
        let assumptions = self.scopes.clone();
        self.solver.assume(&assumptions);
        match self.solver.solve() {
            Ok(true) => {
                let model = self.solver.model().ok_or(SolveError::NoModel)?;
                let mut truth = vec![false; model.len()];
                for lit in &model {
                    let index = lit.var().index();
                    if index >= truth.len() {
                        truth.resize(index + 1, false);
                    }
                    truth[index] = lit.is_positive();
                }
                let mut values = Vec::with_capacity(self.vars.len());
                for var in &self.vars {
                    let selected = var
                        .selectors
                        .iter()
                        .position(|lit| truth.get(lit.var().index()).copied().unwrap_or(false));
                    match selected {
                        Some(value) => values.push(value as u16),
                        None => return Err(SolveError::NoModel),
                    }
                }
                self.assignment = Some(values);
                Ok(CheckOutcome::Sat)
            }
            Ok(false) => {
                self.assignment = None;
                Ok(CheckOutcome::Unsat)
            }
            Err(err) => Err(SolveError::Backend(err.to_string())),
        }
    }

    fn model(&self) -> Result<Model, SolveError> {
        self.assignment
            .clone()
            .map(Model::new)
            .ok_or(SolveError::NoModel)
    }
}

fn negated(expr: &BoolExpr) -> BoolExpr {
    match expr {
        BoolExpr::Eq(a, b) => BoolExpr::Ne(*a, *b),
        BoolExpr::Ne(a, b) => BoolExpr::Eq(*a, *b),
        BoolExpr::Lt(a, b) => BoolExpr::Le(*b, *a),
        BoolExpr::Le(a, b) => BoolExpr::Lt(*b, *a),
        BoolExpr::And(children) => BoolExpr::Or(children.iter().map(negated).collect()),
        BoolExpr::Or(children) => BoolExpr::And(children.iter().map(negated).collect()),
        BoolExpr::Not(inner) => (**inner).clone(),
        BoolExpr::AllDistinct(vars) => BoolExpr::Or(
            vars.iter()
                .copied()
                .tuple_combinations::<(_, _)>()
                .map(|(a, b)| BoolExpr::Eq(Term::Var(a), Term::Var(b)))
                .collect(),
        ),
    }
}
