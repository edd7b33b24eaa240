use serde::Serialize;

use crate::model::card::{CardId, Trio};
use crate::model::player::Seat;
use crate::solve::{BoolExpr, CheckOutcome, ConstraintSolver, Model, SolveError};

use super::model::AssignmentModel;

/// One fully resolved assignment: every seat's hand plus the hidden case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    hands: Vec<Vec<CardId>>,
    hidden: Trio,
}

impl Solution {
    fn from_model(model: &AssignmentModel, assignment: &Model) -> Self {
        let hands = model
            .hands()
            .iter()
            .map(|slots| {
                slots
                    .iter()
                    .map(|&slot| CardId::new(assignment.value(slot)))
                    .collect()
            })
            .collect();
        let hidden = Trio::new(
            CardId::new(assignment.value(model.hidden_suspect())),
            CardId::new(assignment.value(model.hidden_weapon())),
            CardId::new(assignment.value(model.hidden_room())),
        );
        Self { hands, hidden }
    }

    /// Cards of one seat, in ascending id order.
    pub fn hand(&self, seat: Seat) -> &[CardId] {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Vec<CardId>] {
        &self.hands
    }

    pub fn hidden(&self) -> Trio {
        self.hidden
    }
}

/// Enumerates every assignment consistent with the accumulated constraints.
///
/// The search runs inside its own scope, so the blocking clauses it adds are
/// discarded on return and repeated calls see the same persistent store. An
/// empty result is a valid outcome: the evidence log contradicts itself.
pub fn solutions(
    model: &AssignmentModel,
    solver: &mut dyn ConstraintSolver,
) -> Result<Vec<Solution>, SolveError> {
    solver.push();
    let result = enumerate(model, solver);
    solver.pop();
    result
}

fn enumerate(
    model: &AssignmentModel,
    solver: &mut dyn ConstraintSolver,
) -> Result<Vec<Solution>, SolveError> {
    let variables = model.variables();
    let hidden = model.hidden();
    let mut found = Vec::new();
    while solver.check()? == CheckOutcome::Sat {
        let assignment = solver.model()?;
        found.push(Solution::from_model(model, &assignment));
        // never return the same full assignment twice
        solver.add(BoolExpr::or(
            variables
                .iter()
                .map(|&var| BoolExpr::ne(var, assignment.value(var)))
                .collect(),
        ));
        // and insist on a fresh hidden case on top of that
        solver.add(BoolExpr::or(
            hidden
                .iter()
                .map(|&var| BoolExpr::ne(var, assignment.value(var)))
                .collect(),
        ));
    }
    tracing::debug!(count = found.len(), "enumeration complete");
    Ok(found)
}
