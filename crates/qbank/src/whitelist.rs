use std::path::PathBuf;

use qbank_core::summary::summarize;
use qbank_core::whitelist::rebuild_from_json;

use crate::output::{print_bank_report, write_bank};
use crate::prelude::{eprintln, *};

#[derive(Debug, clap::Parser)]
#[command(name = "whitelist")]
#[command(about = "Recompute the whitelist and memorization tags of a bank")]
pub struct App {
    /// JSON file holding a list of questions or a bank file
    input: PathBuf,

    /// Where to write the bank (defaults to overwriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let content = std::fs::read_to_string(&app.input)
        .with_context(|| f!("Failed to read {}", app.input.display()))?;

    let bank = rebuild_from_json(&content)
        .with_context(|| f!("Failed to load questions from {}", app.input.display()))?;

    let output = app.output.as_ref().unwrap_or(&app.input);
    write_bank(output, &bank)?;

    if global.verbose {
        eprintln!("Wrote {}", output.display());
    }
    print_bank_report(&summarize(&bank));

    Ok(())
}
