use std::path::{Path, PathBuf};

use colored::Colorize;
use qbank_core::config::BankConfig;
use qbank_core::links::{link_for, ResolvedLink};

use crate::fetch::{build_client, fetch_pdf, new_spinner, FetchOutcome};
use crate::links::fetch_links;
use crate::output::{print_summary_table, write_bank, SummaryRow};
use crate::parse::{build_bank_from_path, BuiltBank};
use crate::prelude::{eprintln, *};
use crate::SourceOptions;

#[derive(Debug, clap::Parser)]
#[command(name = "update")]
#[command(about = "Download every bank variant and regenerate its JSON file")]
pub struct App {
    #[clap(flatten)]
    source: SourceOptions,

    /// Directory the PDFs are cached in
    #[arg(long, env = "QBANK_CACHE_DIR", default_value = "ref")]
    cache_dir: PathBuf,

    /// Directory the bank JSON files are written to
    #[arg(long, env = "QBANK_OUTPUT_DIR", default_value = "public/data")]
    output_dir: PathBuf,

    /// Only update these bank ids (repeatable)
    #[arg(long = "only", value_name = "ID")]
    only: Vec<String>,
}

/// Keep the configs named in `only`, in config order. An empty filter keeps
/// everything; an unknown id is an error.
pub fn select_configs(configs: &[BankConfig], only: &[String]) -> Result<Vec<BankConfig>> {
    if let Some(unknown) = only
        .iter()
        .find(|id| !configs.iter().any(|c| &c.id == *id))
    {
        return Err(eyre!("Unknown bank id: {unknown}"));
    }

    Ok(configs
        .iter()
        .filter(|c| only.is_empty() || only.contains(&c.id))
        .cloned()
        .collect())
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let configs = select_configs(&app.source.bank_configs()?, &app.only)?;

    std::fs::create_dir_all(&app.output_dir)
        .with_context(|| f!("Failed to create {}", app.output_dir.display()))?;

    let client = build_client(app.source.timeout)?;

    let rows = update_banks(
        &client,
        &app.source.source_url,
        &configs,
        &app.cache_dir,
        &app.output_dir,
        &global,
    )
    .await?;

    print_summary_table(&rows);

    Ok(())
}

/// Resolve the links on `source_url` and rebuild every variant in order.
///
/// A variant that fails before its output write is logged and skipped; the
/// next one still runs. Fails if every variant was skipped, or on any
/// error that is not tied to a single variant.
pub async fn update_banks(
    client: &reqwest::Client,
    source_url: &str,
    configs: &[BankConfig],
    cache_dir: &Path,
    output_dir: &Path,
    global: &crate::Global,
) -> Result<Vec<SummaryRow>> {
    eprintln!("Fetching PDF links from {source_url} ...");
    let links = fetch_links(client, source_url, configs).await?;

    for config in configs {
        match link_for(&links, &config.id) {
            Some(link) => eprintln!("  [{}] found link: {}", config.label, link.link_text),
            None => eprintln!(
                "  {} no PDF link for [{}]",
                "Warning:".yellow(),
                config.label
            ),
        }
    }
    eprintln!();

    let mut rows = Vec::new();
    let mut failures = 0;

    for config in configs {
        eprintln!("[{}]", config.label.bold());

        let built = match prepare_variant(client, config, &links, cache_dir, global).await {
            Ok(built) => built,
            Err(err) => {
                failures += 1;
                log::warn!("skipping {}: {err}", config.id);
                eprintln!("  {} {err}\n", "Skipped:".yellow());
                continue;
            }
        };

        let output_path = output_dir.join(config.output_file_name());
        write_bank(&output_path, &built.bank)?;
        eprintln!(
            "  {} {} questions, whitelist of {} -> {}\n",
            "Done:".green(),
            built.summary.total_questions,
            built.summary.whitelist_size,
            output_path.display()
        );

        rows.push(SummaryRow {
            id: config.id.clone(),
            label: config.label.clone(),
            summary: built.summary,
        });
    }

    if !configs.is_empty() && failures == configs.len() {
        return Err(eyre!("No bank variant could be updated"));
    }

    Ok(rows)
}

/// Everything for one variant up to (not including) the output write.
/// Failures here skip the variant.
async fn prepare_variant(
    client: &reqwest::Client,
    config: &BankConfig,
    links: &[ResolvedLink],
    cache_dir: &Path,
    global: &crate::Global,
) -> std::result::Result<BuiltBank, Error> {
    let link =
        link_for(links, &config.id).ok_or_else(|| Error::MissingLink(config.label.clone()))?;
    let pdf_path = cache_dir.join(config.pdf_file_name());

    let spinner = new_spinner();
    let outcome = fetch_pdf(client, &link.url, &pdf_path, Some(&spinner)).await;
    spinner.finish_and_clear();
    report_fetch(&pdf_path, outcome, global)?;

    build_bank_from_path(&pdf_path)
}

fn report_fetch(
    pdf_path: &Path,
    outcome: std::result::Result<FetchOutcome, Error>,
    global: &crate::Global,
) -> std::result::Result<(), Error> {
    match outcome? {
        FetchOutcome::CacheHit => {
            eprintln!("  Up to date, skipping download: {}", pdf_path.display());
        }
        FetchOutcome::Downloaded { bytes } => {
            eprintln!("  Downloaded {} ({bytes} bytes)", pdf_path.display());
        }
    }
    if global.verbose {
        eprintln!("  Parsing {}", pdf_path.display());
    }
    Ok(())
}
