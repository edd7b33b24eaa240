use std::path::PathBuf;

use clap::Parser;

use clue_app::logging::init_logging;
use clue_app::report;
use clue_app::script::GameScript;
use clue_core::deduce::Investigation;

/// Deduction engine for Cluedo-style game logs.
#[derive(Debug, Parser)]
#[command(
    name = "mdclue",
    author,
    version,
    about = "Enumerates every card assignment consistent with a Cluedo-style game log"
)]
struct Cli {
    /// Path to the game script (cards, players, known hand, events).
    input: PathBuf,

    /// Emit the final solution set as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Parse the script and build the model, then exit without solving.
    #[arg(long)]
    validate_only: bool,

    /// Suppress the per-event progress counts.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let script = GameScript::from_path(&cli.input)?;
    let events = script.events;
    let mut investigation = Investigation::new(script.registry, script.roster, &script.known_hand);

    if cli.validate_only {
        println!(
            "Script validated: {} cards, {} players, {} events.",
            investigation.registry().num_cards(),
            investigation.roster().len(),
            events.len()
        );
        return Ok(());
    }

    for (index, event) in events.iter().enumerate() {
        if !cli.quiet {
            let count = investigation.solutions()?.len();
            println!("{}", report::progress_line(index, count));
        }
        investigation.observe(event);
    }

    let solutions = investigation.solutions()?;
    if cli.json {
        println!(
            "{}",
            report::render_json(investigation.registry(), investigation.roster(), &solutions)?
        );
    } else {
        print!(
            "{}",
            report::render_text(investigation.registry(), investigation.roster(), &solutions)
        );
    }

    Ok(())
}
