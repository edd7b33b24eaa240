use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable identifier of a registered card.
///
/// Ids are assigned sequentially in registration order, so the suspect,
/// weapon, and room ids form three contiguous bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(u16);

impl CardId {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Suspect,
    Weapon,
    Room,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Suspect, Category::Weapon, Category::Room];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Suspect => "suspect",
            Category::Weapon => "weapon",
            Category::Room => "room",
        };
        f.write_str(label)
    }
}

/// One suspect/weapon/room combination, such as a guess or the hidden case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trio {
    pub suspect: CardId,
    pub weapon: CardId,
    pub room: CardId,
}

impl Trio {
    pub const fn new(suspect: CardId, weapon: CardId, room: CardId) -> Self {
        Self {
            suspect,
            weapon,
            room,
        }
    }

    pub const fn cards(self) -> [CardId; 3] {
        [self.suspect, self.weapon, self.room]
    }
}

#[cfg(test)]
mod tests {
    use super::{CardId, Category, Trio};

    #[test]
    fn ids_order_by_raw_value() {
        assert!(CardId::new(2) < CardId::new(5));
        assert_eq!(CardId::new(7).index(), 7);
    }

    #[test]
    fn category_labels_are_lowercase() {
        let labels: Vec<String> = Category::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, vec!["suspect", "weapon", "room"]);
    }

    #[test]
    fn trio_exposes_cards_in_declaration_order() {
        let trio = Trio::new(CardId::new(1), CardId::new(4), CardId::new(6));
        assert_eq!(
            trio.cards(),
            [CardId::new(1), CardId::new(4), CardId::new(6)]
        );
    }
}
