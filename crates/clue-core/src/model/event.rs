use crate::model::card::{CardId, Trio};
use crate::model::player::Seat;

/// One observed table event, fully resolved to card ids and seats.
///
/// Events are consumed strictly in log order; each one permanently narrows
/// the space of consistent card assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A player proposed a trio; seats between the guesser and the responder
    /// stayed silent, and the responder (if any) showed one card.
    Guess {
        guesser: Seat,
        trio: Trio,
        /// Seat that refuted the guess, if anyone did. A seat-0 responder is
        /// a responder like any other.
        responder: Option<Seat>,
        /// The shown card, when the observer was allowed to see it.
        shown: Option<CardId>,
    },
    /// A full-solution claim. The log continuing past it proves it was wrong.
    Accusation { trio: Trio },
}
