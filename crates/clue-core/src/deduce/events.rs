use crate::model::card::{CardId, Trio};
use crate::model::event::Event;
use crate::model::player::Seat;
use crate::solve::{BoolExpr, ConstraintSolver};

use super::model::AssignmentModel;

/// Folds observed events into the constraint store, in log order.
///
/// Every transition only adds constraints; nothing is ever retracted.
#[derive(Debug)]
pub struct EventProcessor {
    num_seats: usize,
    processed: usize,
}

impl EventProcessor {
    pub fn new(num_seats: usize) -> Self {
        Self {
            num_seats,
            processed: 0,
        }
    }

    /// Number of events folded in so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn apply(
        &mut self,
        model: &AssignmentModel,
        event: &Event,
        solver: &mut dyn ConstraintSolver,
    ) {
        match *event {
            Event::Guess {
                guesser,
                trio,
                responder,
                shown,
            } => self.apply_guess(model, guesser, trio, responder, shown, solver),
            Event::Accusation { trio } => {
                // the log went on, so the claim missed on at least one card
                tracing::debug!(
                    suspect = trio.suspect.raw(),
                    weapon = trio.weapon.raw(),
                    room = trio.room.raw(),
                    "accusation excluded from the hidden case"
                );
                solver.add(BoolExpr::or(vec![
                    BoolExpr::ne(model.hidden_suspect(), trio.suspect),
                    BoolExpr::ne(model.hidden_weapon(), trio.weapon),
                    BoolExpr::ne(model.hidden_room(), trio.room),
                ]));
            }
        }
        self.processed += 1;
    }

    fn apply_guess(
        &self,
        model: &AssignmentModel,
        guesser: Seat,
        trio: Trio,
        responder: Option<Seat>,
        shown: Option<CardId>,
        solver: &mut dyn ConstraintSolver,
    ) {
        // seats between guesser and responder stayed silent: holding any of
        // the guessed cards would have forced them to answer
        let mut seat = guesser.next(self.num_seats);
        while Some(seat) != responder && seat != guesser {
            for &slot in model.seat_slots(seat) {
                solver.add(BoolExpr::and(
                    trio.cards()
                        .iter()
                        .map(|&card| BoolExpr::ne(slot, card))
                        .collect(),
                ));
            }
            tracing::debug!(seat = %seat, "passed-over seat holds none of the guessed cards");
            seat = seat.next(self.num_seats);
        }

        if let Some(responder) = responder {
            let slots = model.seat_slots(responder);
            let reveal = match shown {
                // the shown card is known
                Some(card) => BoolExpr::or(
                    slots
                        .iter()
                        .map(|&slot| BoolExpr::eq(slot, card))
                        .collect(),
                ),
                // only that something was shown: the hand meets the trio
                None => BoolExpr::or(
                    trio.cards()
                        .iter()
                        .flat_map(|&card| slots.iter().map(move |&slot| BoolExpr::eq(slot, card)))
                        .collect(),
                ),
            };
            tracing::debug!(responder = %responder, shown = ?shown, "responder reveal recorded");
            solver.add(reveal);
        }
    }
}
