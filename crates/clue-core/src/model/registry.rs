use core::fmt;
use std::collections::HashMap;
use std::ops::Range;

use crate::model::card::{CardId, Category};

/// Immutable name-to-id table partitioned into suspect, weapon, and room bands.
///
/// Ids are handed out in read order; `suspects_max` and `weapons_max` mark the
/// band boundaries, so a card's category is fully determined by its id.
#[derive(Debug, Clone)]
pub struct CardRegistry {
    names: Vec<String>,
    by_name: HashMap<String, CardId>,
    suspects_max: u16,
    weapons_max: u16,
}

impl CardRegistry {
    /// Registers three name lists in read order.
    ///
    /// Duplicate names are rejected: a second registration could only shadow
    /// the earlier id and corrupt every later lookup.
    pub fn from_names(
        suspects: &[&str],
        weapons: &[&str],
        rooms: &[&str],
    ) -> Result<Self, RegistryError> {
        let mut names = Vec::with_capacity(suspects.len() + weapons.len() + rooms.len());
        let mut by_name = HashMap::new();
        for &name in suspects.iter().chain(weapons).chain(rooms) {
            let id = CardId::new(names.len() as u16);
            if by_name.insert(name.to_string(), id).is_some() {
                return Err(RegistryError::DuplicateCard(name.to_string()));
            }
            names.push(name.to_string());
        }
        Ok(Self {
            names,
            by_name,
            suspects_max: suspects.len() as u16,
            weapons_max: (suspects.len() + weapons.len()) as u16,
        })
    }

    pub fn lookup(&self, name: &str) -> Result<CardId, RegistryError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownCard(name.to_string()))
    }

    /// Display name of a registered card. Panics on an unregistered id.
    pub fn name(&self, id: CardId) -> &str {
        &self.names[id.index()]
    }

    pub fn category(&self, id: CardId) -> Category {
        if id.raw() < self.suspects_max {
            Category::Suspect
        } else if id.raw() < self.weapons_max {
            Category::Weapon
        } else {
            Category::Room
        }
    }

    /// Contiguous id range covered by one category.
    pub fn band(&self, category: Category) -> Range<u16> {
        match category {
            Category::Suspect => 0..self.suspects_max,
            Category::Weapon => self.suspects_max..self.weapons_max,
            Category::Room => self.weapons_max..self.num_cards(),
        }
    }

    pub fn num_cards(&self) -> u16 {
        self.names.len() as u16
    }

    pub fn suspects_max(&self) -> u16 {
        self.suspects_max
    }

    pub fn weapons_max(&self) -> u16 {
        self.weapons_max
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    UnknownCard(String),
    DuplicateCard(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownCard(name) => write!(f, "unknown card '{name}'"),
            RegistryError::DuplicateCard(name) => write!(f, "card '{name}' registered twice"),
        }
    }
}

impl std::error::Error for RegistryError {}

#[cfg(test)]
mod tests {
    use super::{CardRegistry, RegistryError};
    use crate::model::card::{CardId, Category};

    fn registry() -> CardRegistry {
        CardRegistry::from_names(
            &["Green", "Mustard", "Peacock"],
            &["Knife", "Rope"],
            &["Hall", "Study"],
        )
        .expect("registry builds")
    }

    #[test]
    fn ids_are_sequential_in_read_order() {
        let registry = registry();
        assert_eq!(registry.lookup("Green").expect("known"), CardId::new(0));
        assert_eq!(registry.lookup("Rope").expect("known"), CardId::new(4));
        assert_eq!(registry.lookup("Study").expect("known"), CardId::new(6));
        assert_eq!(registry.num_cards(), 7);
    }

    #[test]
    fn bands_partition_the_id_space() {
        let registry = registry();
        assert_eq!(registry.band(Category::Suspect), 0..3);
        assert_eq!(registry.band(Category::Weapon), 3..5);
        assert_eq!(registry.band(Category::Room), 5..7);
        assert_eq!(registry.category(CardId::new(1)), Category::Suspect);
        assert_eq!(registry.category(CardId::new(3)), Category::Weapon);
        assert_eq!(registry.category(CardId::new(6)), Category::Room);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = registry().lookup("Scarlett").expect_err("not registered");
        assert_eq!(err, RegistryError::UnknownCard("Scarlett".to_string()));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = CardRegistry::from_names(&["Green"], &["Green"], &[]).expect_err("duplicate");
        assert_eq!(err, RegistryError::DuplicateCard("Green".to_string()));
    }

    #[test]
    fn names_round_trip() {
        let registry = registry();
        let id = registry.lookup("Knife").expect("known");
        assert_eq!(registry.name(id), "Knife");
    }
}
