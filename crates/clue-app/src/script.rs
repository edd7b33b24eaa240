//! Line-oriented game-script parsing.
//!
//! The format is positional: suspect names, weapon names, room names, the
//! player count, one `name hand_size` line per player, the first player's
//! known hand, then any number of event lines. Parsing is pure; it produces
//! resolved core types and never touches solver state.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use clue_core::model::card::{CardId, Trio};
use clue_core::model::event::Event;
use clue_core::model::player::{Player, Roster, Seat};
use clue_core::model::registry::CardRegistry;

/// Token marking an absent responder or an unrevealed card in event lines.
/// Reserved: it can never collide with a registered player or card name
/// because any other unresolvable name is an error, not an absence.
pub const ABSENT: &str = "-";

/// A fully resolved game description plus its event log.
#[derive(Debug)]
pub struct GameScript {
    pub registry: CardRegistry,
    pub roster: Roster,
    pub known_hand: Vec<CardId>,
    pub events: Vec<Event>,
}

impl GameScript {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut cursor = Cursor::new(text);

        let suspects: Vec<&str> = cursor.next_line("suspect names")?.split_whitespace().collect();
        let weapons: Vec<&str> = cursor.next_line("weapon names")?.split_whitespace().collect();
        let rooms: Vec<&str> = cursor.next_line("room names")?.split_whitespace().collect();
        let registry =
            CardRegistry::from_names(&suspects, &weapons, &rooms).map_err(|err| {
                ScriptError::Malformed {
                    line: cursor.line(),
                    message: err.to_string(),
                }
            })?;

        let num_players: usize = cursor
            .next_line("player count")?
            .trim()
            .parse()
            .map_err(|_| ScriptError::Malformed {
                line: cursor.line(),
                message: "player count must be an integer".to_string(),
            })?;
        if num_players == 0 {
            return Err(ScriptError::Malformed {
                line: cursor.line(),
                message: "at least one player is required".to_string(),
            });
        }

        let mut players = Vec::with_capacity(num_players);
        for _ in 0..num_players {
            let line = cursor.next_line("player name and hand size")?;
            let mut tokens = line.split_whitespace();
            let (name, size) = match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(name), Some(size), None) => (name, size),
                _ => {
                    return Err(ScriptError::Malformed {
                        line: cursor.line(),
                        message: "expected a player name and a hand size".to_string(),
                    });
                }
            };
            let hand_size: u8 = size.parse().map_err(|_| ScriptError::Malformed {
                line: cursor.line(),
                message: format!("hand size for '{name}' must be an integer"),
            })?;
            players.push(Player::new(name, hand_size));
        }
        let roster = Roster::new(players);

        let hand_line = cursor.next_line("the first player's hand")?;
        let mut known_hand = Vec::new();
        for name in hand_line.split_whitespace() {
            let card = registry.lookup(name).map_err(|_| ScriptError::UnknownCard {
                line: cursor.line(),
                name: name.to_string(),
            })?;
            known_hand.push(card);
        }
        let first = roster.player(Seat::new(0));
        if known_hand.len() != first.hand_size as usize {
            return Err(ScriptError::Malformed {
                line: cursor.line(),
                message: format!(
                    "the known hand lists {} cards but {} holds {}",
                    known_hand.len(),
                    first.name,
                    first.hand_size
                ),
            });
        }

        let mut events = Vec::new();
        while let Some(line) = cursor.next_optional() {
            if line.trim().is_empty() {
                continue;
            }
            events.push(parse_event(line, cursor.line(), &registry, &roster)?);
        }

        Ok(Self {
            registry,
            roster,
            known_hand,
            events,
        })
    }
}

fn parse_event(
    line: &str,
    line_no: usize,
    registry: &CardRegistry,
    roster: &Roster,
) -> Result<Event, ScriptError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 7 {
        return Err(ScriptError::Malformed {
            line: line_no,
            message: format!("event lines carry seven fields, found {}", tokens.len()),
        });
    }

    let card = |name: &str| {
        registry.lookup(name).map_err(|_| ScriptError::UnknownCard {
            line: line_no,
            name: name.to_string(),
        })
    };
    let trio = Trio::new(card(tokens[2])?, card(tokens[3])?, card(tokens[4])?);

    match tokens[0] {
        "guess" => {
            let guesser =
                roster
                    .seat_of(tokens[1])
                    .map_err(|_| ScriptError::UnknownPlayer {
                        line: line_no,
                        name: tokens[1].to_string(),
                    })?;
            let responder = if tokens[5] == ABSENT {
                None
            } else {
                Some(
                    roster
                        .seat_of(tokens[5])
                        .map_err(|_| ScriptError::UnknownPlayer {
                            line: line_no,
                            name: tokens[5].to_string(),
                        })?,
                )
            };
            let shown = if tokens[6] == ABSENT {
                None
            } else {
                Some(card(tokens[6])?)
            };
            Ok(Event::Guess {
                guesser,
                trio,
                responder,
                shown,
            })
        }
        // only the tag and the trio are interpreted; the remaining fields
        // ride along for format compatibility
        "accusation" => Ok(Event::Accusation { trio }),
        other => Err(ScriptError::Malformed {
            line: line_no,
            message: format!("unknown event tag '{other}'"),
        }),
    }
}

struct Cursor<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self, expected: &str) -> Result<&'a str, ScriptError> {
        let missing = self.line + 1;
        self.next_optional().ok_or_else(|| ScriptError::Malformed {
            line: missing,
            message: format!("expected {expected}"),
        })
    }

    fn next_optional(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line += 1;
        Some(line)
    }

    fn line(&self) -> usize {
        self.line
    }
}

/// Errors surfaced while reading a game script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("line {line}: unknown card '{name}'")]
    UnknownCard { line: usize, name: String },
    #[error("line {line}: unknown player '{name}'")]
    UnknownPlayer { line: usize, name: String },
}

#[cfg(test)]
mod tests {
    use super::{GameScript, ScriptError};
    use clue_core::model::card::CardId;
    use clue_core::model::event::Event;
    use clue_core::model::player::Seat;

    const HEADER: &str = "Green Mustard Peacock\nKnife Rope\nHall Study\n2\nalice 2\nbob 2\nGreen Knife\n";

    #[test]
    fn parses_a_full_script() {
        let text = format!("{HEADER}guess alice Mustard Rope Hall bob -\naccusation bob Peacock Rope Study - -\n");
        let script = GameScript::parse(&text).expect("script parses");
        assert_eq!(script.registry.num_cards(), 7);
        assert_eq!(script.roster.len(), 2);
        assert_eq!(script.known_hand, vec![CardId::new(0), CardId::new(3)]);
        assert_eq!(script.events.len(), 2);
        match script.events[0] {
            Event::Guess {
                guesser,
                responder,
                shown,
                ..
            } => {
                assert_eq!(guesser, Seat::new(0));
                assert_eq!(responder, Some(Seat::new(1)));
                assert_eq!(shown, None);
            }
            Event::Accusation { .. } => panic!("first event is a guess"),
        }
        match script.events[1] {
            Event::Accusation { trio } => {
                assert_eq!(trio.suspect, CardId::new(2));
                assert_eq!(trio.weapon, CardId::new(4));
                assert_eq!(trio.room, CardId::new(6));
            }
            Event::Guess { .. } => panic!("second event is an accusation"),
        }
    }

    #[test]
    fn seat_zero_responder_resolves() {
        let text = format!("{HEADER}guess bob Mustard Rope Hall alice Knife\n");
        let script = GameScript::parse(&text).expect("script parses");
        match script.events[0] {
            Event::Guess {
                responder, shown, ..
            } => {
                assert_eq!(responder, Some(Seat::new(0)));
                assert_eq!(shown, Some(CardId::new(3)));
            }
            Event::Accusation { .. } => panic!("parsed a guess"),
        }
    }

    #[test]
    fn blank_trailing_lines_are_ignored() {
        let text = format!("{HEADER}\n\n");
        let script = GameScript::parse(&text).expect("script parses");
        assert!(script.events.is_empty());
    }

    #[test]
    fn missing_header_line_reports_its_position() {
        let err = GameScript::parse("Green\nKnife\n").expect_err("truncated script");
        match err {
            ScriptError::Malformed { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("room names"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_integer_hand_size_is_malformed() {
        let err = GameScript::parse("Green\nKnife\nHall\n1\nalice two\n")
            .expect_err("bad hand size");
        match err {
            ScriptError::Malformed { line, message } => {
                assert_eq!(line, 5);
                assert!(message.contains("hand size"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn wrong_event_arity_is_malformed() {
        let err = GameScript::parse(&format!("{HEADER}guess alice Mustard Rope Hall\n"))
            .expect_err("short event line");
        match err {
            ScriptError::Malformed { line, .. } => assert_eq!(line, 8),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unknown_event_card_is_reported_with_its_line() {
        let err = GameScript::parse(&format!("{HEADER}guess alice Scarlett Rope Hall - -\n"))
            .expect_err("unregistered card");
        match err {
            ScriptError::UnknownCard { line, name } => {
                assert_eq!(line, 8);
                assert_eq!(name, "Scarlett");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unknown_responder_is_an_error_not_an_absence() {
        let err = GameScript::parse(&format!("{HEADER}guess alice Mustard Rope Hall mallory -\n"))
            .expect_err("unregistered responder");
        match err {
            ScriptError::UnknownPlayer { line, name } => {
                assert_eq!(line, 8);
                assert_eq!(name, "mallory");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn known_hand_must_match_the_declared_size() {
        let err = GameScript::parse("Green Mustard Peacock\nKnife Rope\nHall Study\n2\nalice 2\nbob 2\nGreen\n")
            .expect_err("short hand");
        match err {
            ScriptError::Malformed { line, message } => {
                assert_eq!(line, 7);
                assert!(message.contains("known hand"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn duplicate_card_names_are_malformed() {
        let err = GameScript::parse("Green\nGreen\nHall\n1\nalice 0\n\n")
            .expect_err("duplicate name");
        match err {
            ScriptError::Malformed { message, .. } => assert!(message.contains("twice")),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
