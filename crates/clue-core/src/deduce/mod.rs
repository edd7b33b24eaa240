//! The deduction core.
//!
//! This module is composed of:
//! - `model`: translation of the game description into card-slot and
//!   hidden-case variables with their startup constraints.
//! - `events`: translation of observed guesses and accusations into
//!   constraints, in log order.
//! - `enumerate`: scoped enumerate-and-block extraction of every consistent
//!   assignment.
//! - `investigation`: the single-owner facade tying the pieces to one
//!   constraint store.

mod enumerate;
mod events;
mod investigation;
mod model;

pub use enumerate::{Solution, solutions};
pub use events::EventProcessor;
pub use investigation::Investigation;
pub use model::AssignmentModel;
