use std::path::{Path, PathBuf};

use colored::Colorize;
use qbank_core::bank::BankOutput;
use qbank_core::parse::{parse_bank_text, Alignment, ParsedBank, SplitKind};
use qbank_core::summary::{summarize, BankSummary};
use qbank_core::whitelist::build_bank_output;

use crate::output::{print_bank_report, write_bank};
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "parse")]
#[command(about = "Build a question bank from a local PDF")]
pub struct App {
    /// Path to the question bank PDF
    path: PathBuf,

    /// Write the bank JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the bank JSON to stdout instead of the report
    #[arg(long)]
    json: bool,
}

/// A bank ready to be written, with its counts.
#[derive(Debug, Clone)]
pub struct BuiltBank {
    pub bank: BankOutput,
    pub summary: BankSummary,
}

/// Extract, parse and whitelist one PDF held in memory.
pub fn build_bank(bytes: &[u8]) -> std::result::Result<BuiltBank, Error> {
    let extracted = pdf::extract_text(bytes)?;
    if !extracted.failed_pages.is_empty() {
        log::warn!(
            "could not extract text from pages {:?} of {}",
            extracted.failed_pages,
            extracted.page_count()
        );
    }

    let parsed = parse_bank_text(&extracted.full_text());
    report_parse(&parsed);

    let bank = build_bank_output(parsed.questions);
    let summary = summarize(&bank);

    Ok(BuiltBank { bank, summary })
}

/// Read a PDF from disk and build its bank.
pub fn build_bank_from_path(path: &Path) -> std::result::Result<BuiltBank, Error> {
    if !path.exists() {
        return Err(Error::MissingPdf(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    build_bank(&bytes)
}

/// Tell the user which fallbacks the parser had to take.
fn report_parse(parsed: &ParsedBank) {
    if parsed.split.is_fallback() {
        log::warn!(
            "no chapter answer heading found, split {:?} at byte {}",
            parsed.split.kind,
            parsed.split.index
        );
    }

    match &parsed.split.kind {
        SplitKind::ChapterAnswerHeading(heading) => {
            let heading = heading.split_whitespace().collect::<Vec<_>>().join(" ");
            eprintln!("  Answer key starts at: {heading}");
        }
        SplitKind::AnswerKeyword => eprintln!(
            "  {} no answer heading found, using the last 答案 keyword",
            "Warning:".yellow()
        ),
        SplitKind::NotFound => eprintln!(
            "  {} no answer key found, every answer will be 未找到",
            "Warning:".yellow()
        ),
    }

    eprintln!("  Chapters found: {}", parsed.chapters);
    eprintln!("  Questions parsed: {}", parsed.questions.len());
    eprintln!("  Answers parsed: {}", parsed.answers_parsed);

    if parsed.alignment == Alignment::IdMapped {
        log::info!(
            "{} questions vs {} answers, answers matched by question number",
            parsed.questions.len(),
            parsed.answers_parsed
        );
        eprintln!("  Question and answer counts differ a lot, matching answers by number");
    }

    for item in &parsed.skipped_items {
        log::warn!(
            "skipped item {} in {}: {}",
            item.id,
            item.chapter,
            item.preview
        );
    }
    if !parsed.skipped_items.is_empty() {
        eprintln!(
            "  {} {} numbered items did not match the question layout",
            "Warning:".yellow(),
            parsed.skipped_items.len()
        );
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Parsing {}", app.path.display());
    }

    let built = build_bank_from_path(&app.path)?;

    if let Some(output) = &app.output {
        write_bank(output, &built.bank)?;
        eprintln!("  Wrote {}", output.display());
    }

    if app.json {
        println!("{}", serde_json::to_string_pretty(&built.bank)?);
    } else {
        print_bank_report(&built.summary);
    }

    Ok(())
}
