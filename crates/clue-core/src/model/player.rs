use core::fmt;
use serde::{Deserialize, Serialize};

/// Turn-order position of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat(u8);

impl Seat {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next seat in turn order, wrapping around the table.
    pub fn next(self, seats: usize) -> Seat {
        Seat(((self.index() + 1) % seats) as u8)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub hand_size: u8,
}

impl Player {
    pub fn new(name: impl Into<String>, hand_size: u8) -> Self {
        Self {
            name: name.into(),
            hand_size,
        }
    }
}

/// All players at the table, in turn order.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn seat_of(&self, name: &str) -> Result<Seat, RosterError> {
        self.players
            .iter()
            .position(|player| player.name == name)
            .map(|index| Seat::new(index as u8))
            .ok_or_else(|| RosterError::UnknownPlayer(name.to_string()))
    }

    /// Player at a seat. Panics on an out-of-range seat.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    pub fn total_hand_cards(&self) -> usize {
        self.players
            .iter()
            .map(|player| player.hand_size as usize)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    UnknownPlayer(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::UnknownPlayer(name) => write!(f, "unknown player '{name}'"),
        }
    }
}

impl std::error::Error for RosterError {}
