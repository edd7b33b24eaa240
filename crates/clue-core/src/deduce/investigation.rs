use crate::model::card::CardId;
use crate::model::event::Event;
use crate::model::player::Roster;
use crate::model::registry::CardRegistry;
use crate::solve::{ConstraintSolver, SatSolver, SolveError};

use super::enumerate::{Solution, solutions};
use super::events::EventProcessor;
use super::model::AssignmentModel;

/// Single owner of the constraint store for one game.
///
/// Owns the registry, the roster, the assignment model, and the solving
/// backend, and sequences every access: events fold in through [`observe`],
/// and [`solutions`] runs its scoped enumeration against the same store.
///
/// [`observe`]: Investigation::observe
/// [`solutions`]: Investigation::solutions
pub struct Investigation {
    registry: CardRegistry,
    roster: Roster,
    model: AssignmentModel,
    processor: EventProcessor,
    solver: SatSolver,
}

impl Investigation {
    /// Builds the assignment model for the described game.
    ///
    /// Panics under the same conditions as [`AssignmentModel::build`]; a
    /// game description that fails them could never produce a sound model.
    pub fn new(registry: CardRegistry, roster: Roster, known_hand: &[CardId]) -> Self {
        let mut solver = SatSolver::new(registry.num_cards());
        let model = AssignmentModel::build(&registry, &roster, known_hand, &mut solver);
        let processor = EventProcessor::new(roster.len());
        Self {
            registry,
            roster,
            model,
            processor,
            solver,
        }
    }

    /// Folds one event into the persistent constraint store.
    pub fn observe(&mut self, event: &Event) {
        self.processor.apply(&self.model, event, &mut self.solver);
    }

    /// Every assignment consistent with the evidence so far.
    pub fn solutions(&mut self) -> Result<Vec<Solution>, SolveError> {
        solutions(&self.model, &mut self.solver)
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn events_observed(&self) -> usize {
        self.processor.processed()
    }

    /// The assignment model and the backend, for driving enumeration directly.
    pub fn parts_mut(&mut self) -> (&AssignmentModel, &mut dyn ConstraintSolver) {
        (&self.model, &mut self.solver)
    }
}

#[cfg(test)]
mod tests {
    use super::Investigation;
    use crate::model::card::{CardId, Trio};
    use crate::model::event::Event;
    use crate::model::player::{Player, Roster, Seat};
    use crate::model::registry::CardRegistry;

    fn investigation() -> Investigation {
        let registry = CardRegistry::from_names(&["Red", "Green", "Blue"], &["Knife"], &["Hall"])
            .expect("registry builds");
        let roster = Roster::new(vec![Player::new("a", 1), Player::new("b", 1)]);
        Investigation::new(registry, roster, &[CardId::new(0)])
    }

    #[test]
    fn observe_counts_events() {
        let mut investigation = investigation();
        assert_eq!(investigation.events_observed(), 0);
        investigation.observe(&Event::Accusation {
            trio: Trio::new(CardId::new(1), CardId::new(3), CardId::new(4)),
        });
        investigation.observe(&Event::Guess {
            guesser: Seat::new(0),
            trio: Trio::new(CardId::new(2), CardId::new(3), CardId::new(4)),
            responder: None,
            shown: None,
        });
        assert_eq!(investigation.events_observed(), 2);
    }

    #[test]
    fn registry_and_roster_stay_reachable_for_reporting() {
        let investigation = investigation();
        assert_eq!(investigation.registry().num_cards(), 5);
        assert_eq!(investigation.roster().len(), 2);
        assert_eq!(
            investigation.roster().player(Seat::new(1)).name,
            "b".to_string()
        );
    }
}
