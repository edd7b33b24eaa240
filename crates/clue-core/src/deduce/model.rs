use crate::model::card::{CardId, Category};
use crate::model::player::{Roster, Seat};
use crate::model::registry::CardRegistry;
use crate::solve::{BoolExpr, ConstraintSolver, VarId};

/// Integer variables standing for every card slot and the hidden case.
///
/// Built once at startup; the variables live for the whole run while the
/// constraint store around them grows monotonically.
#[derive(Debug, Clone)]
pub struct AssignmentModel {
    slots: Vec<Vec<VarId>>,
    true_suspect: VarId,
    true_weapon: VarId,
    true_room: VarId,
}

impl AssignmentModel {
    /// Declares all variables and adds the startup constraints.
    ///
    /// Panics if the roster is empty, if the known hand does not fill the
    /// first seat's slots, or if hand sizes plus the hidden case do not
    /// account for every registered card: each indicates malformed input
    /// that no derived model could make meaningful.
    pub fn build(
        registry: &CardRegistry,
        roster: &Roster,
        known_hand: &[CardId],
        solver: &mut dyn ConstraintSolver,
    ) -> Self {
        let num_cards = registry.num_cards();
        assert!(!roster.is_empty(), "at least one player is required");
        assert_eq!(
            roster.total_hand_cards() + 3,
            num_cards as usize,
            "hand sizes plus the hidden case must cover all {num_cards} cards"
        );

        let mut slots = Vec::with_capacity(roster.len());
        for player in roster.iter() {
            let list: Vec<VarId> = (0..player.hand_size)
                .map(|slot| solver.declare_int(&format!("{}_card_{}", player.name, slot)))
                .collect();
            // a hand is a set: canonicalize it as a strictly increasing sequence
            for (&lower, &upper) in list.iter().zip(list.iter().skip(1)) {
                solver.add(BoolExpr::lt(lower, upper));
            }
            slots.push(list);
        }

        let mut known = known_hand.to_vec();
        known.sort_unstable();
        assert_eq!(
            known.len(),
            slots[0].len(),
            "the known hand must fill the first player's slots"
        );
        for (&slot, &card) in slots[0].iter().zip(&known) {
            solver.add(BoolExpr::eq(slot, card));
        }

        let true_suspect = solver.declare_int("true_suspect");
        let true_weapon = solver.declare_int("true_weapon");
        let true_room = solver.declare_int("true_room");
        for (var, category) in [
            (true_suspect, Category::Suspect),
            (true_weapon, Category::Weapon),
            (true_room, Category::Room),
        ] {
            let band = registry.band(category);
            solver.add(BoolExpr::and(vec![
                BoolExpr::le(band.start, var),
                BoolExpr::lt(var, band.end),
            ]));
        }

        let model = Self {
            slots,
            true_suspect,
            true_weapon,
            true_room,
        };
        let variables = model.variables();
        for &var in &variables {
            solver.add(BoolExpr::and(vec![
                BoolExpr::le(0u16, var),
                BoolExpr::lt(var, num_cards),
            ]));
        }
        // every card sits in exactly one hand or in the hidden case
        solver.add(BoolExpr::all_distinct(variables));
        model
    }

    /// Slot variables of one seat, in ascending-value order.
    pub fn seat_slots(&self, seat: Seat) -> &[VarId] {
        &self.slots[seat.index()]
    }

    pub fn hands(&self) -> &[Vec<VarId>] {
        &self.slots
    }

    pub fn hidden_suspect(&self) -> VarId {
        self.true_suspect
    }

    pub fn hidden_weapon(&self) -> VarId {
        self.true_weapon
    }

    pub fn hidden_room(&self) -> VarId {
        self.true_room
    }

    pub fn hidden(&self) -> [VarId; 3] {
        [self.true_suspect, self.true_weapon, self.true_room]
    }

    /// Every variable in declaration order: all slots, then the hidden case.
    pub fn variables(&self) -> Vec<VarId> {
        let mut variables: Vec<VarId> = self.slots.iter().flatten().copied().collect();
        variables.extend(self.hidden());
        variables
    }
}
