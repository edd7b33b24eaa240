//! Console and JSON rendering of enumeration results.

use serde::Serialize;

use clue_core::deduce::Solution;
use clue_core::model::player::{Roster, Seat};
use clue_core::model::registry::CardRegistry;

/// Running count printed before each event is folded in.
pub fn progress_line(event_index: usize, count: usize) -> String {
    format!("Possible solutions before event {}: {count}", event_index + 1)
}

/// Human-readable rendering of the final solution set.
pub fn render_text(registry: &CardRegistry, roster: &Roster, solutions: &[Solution]) -> String {
    let plural = if solutions.len() == 1 { "" } else { "s" };
    let mut out = format!("Found {} possible solution{plural}\n", solutions.len());
    for (index, solution) in solutions.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("Solution {}\n", index + 1));
        for (seat, player) in roster.iter().enumerate() {
            let names: Vec<&str> = solution
                .hand(Seat::new(seat as u8))
                .iter()
                .map(|&card| registry.name(card))
                .collect();
            out.push_str(&format!("  {}: {}\n", player.name, names.join(" ")));
        }
        let hidden = solution.hidden();
        out.push_str(&format!(
            "  Hidden cards: {} {} {}\n",
            registry.name(hidden.suspect),
            registry.name(hidden.weapon),
            registry.name(hidden.room)
        ));
    }
    out
}

#[derive(Debug, Serialize)]
struct HandRow {
    player: String,
    cards: Vec<String>,
}

#[derive(Debug, Serialize)]
struct HiddenRow {
    suspect: String,
    weapon: String,
    room: String,
}

#[derive(Debug, Serialize)]
struct SolutionRow {
    hands: Vec<HandRow>,
    hidden: HiddenRow,
}

/// Machine-readable rendering of the final solution set.
pub fn render_json(
    registry: &CardRegistry,
    roster: &Roster,
    solutions: &[Solution],
) -> serde_json::Result<String> {
    let rows: Vec<SolutionRow> = solutions
        .iter()
        .map(|solution| {
            let hands = roster
                .iter()
                .enumerate()
                .map(|(seat, player)| HandRow {
                    player: player.name.clone(),
                    cards: solution
                        .hand(Seat::new(seat as u8))
                        .iter()
                        .map(|&card| registry.name(card).to_string())
                        .collect(),
                })
                .collect();
            let hidden = solution.hidden();
            SolutionRow {
                hands,
                hidden: HiddenRow {
                    suspect: registry.name(hidden.suspect).to_string(),
                    weapon: registry.name(hidden.weapon).to_string(),
                    room: registry.name(hidden.room).to_string(),
                },
            }
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

#[cfg(test)]
mod tests {
    use super::{progress_line, render_json, render_text};
    use clue_core::deduce::Investigation;
    use clue_core::model::card::CardId;
    use clue_core::model::player::{Player, Roster};
    use clue_core::model::registry::CardRegistry;

    fn investigation() -> Investigation {
        let registry = CardRegistry::from_names(&["Red", "Green", "Blue"], &["Knife"], &["Hall"])
            .expect("registry builds");
        let roster = Roster::new(vec![Player::new("a", 1), Player::new("b", 1)]);
        Investigation::new(registry, roster, &[CardId::new(0)])
    }

    #[test]
    fn progress_lines_are_one_based() {
        assert_eq!(progress_line(0, 24), "Possible solutions before event 1: 24");
    }

    #[test]
    fn text_report_names_every_hand_and_the_hidden_case() {
        let mut investigation = investigation();
        let solutions = investigation.solutions().expect("enumeration succeeds");
        let text = render_text(investigation.registry(), investigation.roster(), &solutions);
        assert!(text.starts_with("Found 2 possible solutions\n"));
        assert!(text.contains("  a: Red\n"));
        assert!(text.contains("  Hidden cards: Green Knife Hall\n"));
        assert!(text.contains("  Hidden cards: Blue Knife Hall\n"));
    }

    #[test]
    fn json_report_round_trips() {
        let mut investigation = investigation();
        let solutions = investigation.solutions().expect("enumeration succeeds");
        let json = render_json(investigation.registry(), investigation.roster(), &solutions)
            .expect("serializes");
        let rows: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let rows = rows.as_array().expect("array of solutions");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["hands"][0]["player"], "a");
        assert_eq!(rows[0]["hands"][0]["cards"][0], "Red");
        assert_eq!(rows[0]["hidden"]["weapon"], "Knife");
    }
}
