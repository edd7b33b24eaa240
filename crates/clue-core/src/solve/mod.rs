//! Capability boundary over the constraint-solving engine.
//!
//! The deduction core only ever declares integer variables, adds boolean
//! constraints, opens and closes exploration scopes, and asks for
//! satisfiability plus one concrete model. Everything behind that interface
//! is replaceable; `SatSolver` is the shipped backend.

mod sat;

pub use sat::SatSolver;

use core::fmt;

use crate::model::card::CardId;

/// Handle to a declared integer variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Operand of a comparison atom: a declared variable or a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Var(VarId),
    Value(u16),
}

impl From<VarId> for Term {
    fn from(var: VarId) -> Self {
        Term::Var(var)
    }
}

impl From<u16> for Term {
    fn from(value: u16) -> Self {
        Term::Value(value)
    }
}

impl From<CardId> for Term {
    fn from(card: CardId) -> Self {
        Term::Value(card.raw())
    }
}

/// Boolean constraint over integer terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolExpr {
    Eq(Term, Term),
    Ne(Term, Term),
    Lt(Term, Term),
    Le(Term, Term),
    And(Vec<BoolExpr>),
    Or(Vec<BoolExpr>),
    Not(Box<BoolExpr>),
    AllDistinct(Vec<VarId>),
}

impl BoolExpr {
    pub fn eq(a: impl Into<Term>, b: impl Into<Term>) -> Self {
        BoolExpr::Eq(a.into(), b.into())
    }

    pub fn ne(a: impl Into<Term>, b: impl Into<Term>) -> Self {
        BoolExpr::Ne(a.into(), b.into())
    }

    pub fn lt(a: impl Into<Term>, b: impl Into<Term>) -> Self {
        BoolExpr::Lt(a.into(), b.into())
    }

    pub fn le(a: impl Into<Term>, b: impl Into<Term>) -> Self {
        BoolExpr::Le(a.into(), b.into())
    }

    pub fn and(clauses: Vec<BoolExpr>) -> Self {
        BoolExpr::And(clauses)
    }

    pub fn or(clauses: Vec<BoolExpr>) -> Self {
        BoolExpr::Or(clauses)
    }

    pub fn not(expr: BoolExpr) -> Self {
        BoolExpr::Not(Box::new(expr))
    }

    pub fn all_distinct(vars: Vec<VarId>) -> Self {
        BoolExpr::AllDistinct(vars)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Sat,
    Unsat,
}

/// Concrete satisfying assignment captured after a `Sat` check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    values: Vec<u16>,
}

impl Model {
    pub(crate) fn new(values: Vec<u16>) -> Self {
        Self { values }
    }

    /// Value assigned to a declared variable. Panics on a foreign handle.
    pub fn value(&self, var: VarId) -> u16 {
        self.values[var.index()]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The backend failed internally; the message is backend-specific.
    Backend(String),
    /// `model` was called without a preceding satisfiable check.
    NoModel,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Backend(message) => write!(f, "solver backend error: {message}"),
            SolveError::NoModel => f.write_str("no model available; run a satisfiable check first"),
        }
    }
}

impl std::error::Error for SolveError {}

/// The consumed solving capability: declare, constrain, scope, check, model.
///
/// Constraints added inside a `push`/`pop` scope are discarded at `pop`;
/// everything added outside a scope is permanent.
pub trait ConstraintSolver {
    fn declare_int(&mut self, name: &str) -> VarId;
    fn add(&mut self, constraint: BoolExpr);
    fn push(&mut self);
    fn pop(&mut self);
    fn check(&mut self) -> Result<CheckOutcome, SolveError>;
    fn model(&self) -> Result<Model, SolveError>;
}
