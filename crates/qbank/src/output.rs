use std::path::{Path, PathBuf};

use colored::Colorize;
use qbank_core::bank::BankOutput;
use qbank_core::summary::BankSummary;

use crate::prelude::{println, *};

/// Temporary sibling a file is written to before being renamed into place.
pub fn temp_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.tmp", path.display()))
}

/// Serialize `bank` as pretty UTF-8 JSON and move it onto `path` in one
/// rename, so readers never see a half-written file.
pub fn write_bank(path: &Path, bank: &BankOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(bank).context("Failed to serialize question bank")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| f!("Failed to create {}", parent.display()))?;
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, json).with_context(|| f!("Failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| f!("Failed to move {} into place", tmp.display()))?;

    Ok(())
}

/// One row of the end-of-run table.
#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub id: String,
    pub label: String,
    pub summary: BankSummary,
}

pub fn print_summary_table(rows: &[SummaryRow]) {
    if rows.is_empty() {
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Bank".bold().cyan(),
        "Label".bold().cyan(),
        "Questions".bold().cyan(),
        "Chapters".bold().cyan(),
        "Not found".bold().cyan(),
        "Whitelist".bold().cyan(),
        "Memorizable".bold().cyan(),
        "以上皆是 traps".bold().cyan()
    ]);

    for row in rows {
        let s = &row.summary;
        let not_found = if s.answers_not_found > 0 {
            s.answers_not_found.to_string().yellow()
        } else {
            s.answers_not_found.to_string().bright_black()
        };
        table.add_row(prettytable::row![
            row.id.green(),
            row.label.bright_white(),
            s.total_questions,
            s.chapters,
            not_found,
            s.whitelist_size,
            f!("{} / {}", s.memorizable, s.total_questions),
            s.all_above.traps()
        ]);
    }

    table.printstd();
}

/// Human-readable counts for a single bank, printed after `parse` and
/// `whitelist`.
pub fn print_bank_report(summary: &BankSummary) {
    println!("  {} {}", "Questions:".bold(), summary.total_questions);
    println!("  {} {}", "Chapters:".bold(), summary.chapters);
    println!("  {} {}", "Answers not found:".bold(), summary.answers_not_found);
    println!("  {} {}", "Whitelist size:".bold(), summary.whitelist_size);
    println!(
        "  {} {} memorizable, {} need judgement",
        "Questions:".bold(),
        summary.memorizable,
        summary.needs_judgement
    );
    println!(
        "  {} {} with the option, {} correct, {} traps",
        "以上皆是:".bold(),
        summary.all_above.questions_with_option,
        summary.all_above.answer_is_all_above,
        summary.all_above.traps()
    );
}
