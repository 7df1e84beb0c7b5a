use colored::Colorize;
use qbank_core::config::BankConfig;
use qbank_core::links::{link_for, resolve_links, ResolvedLink};

use crate::fetch::{build_client, fetch_page};
use crate::prelude::{eprintln, println, *};
use crate::SourceOptions;

#[derive(Debug, clap::Parser)]
#[command(name = "links")]
#[command(about = "Show the download link each bank variant resolves to")]
pub struct App {
    #[clap(flatten)]
    source: SourceOptions,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Origin of the source page; relative download links resolve against it.
pub fn base_url(source_url: &str) -> Result<String> {
    let url = reqwest::Url::parse(source_url)
        .with_context(|| f!("Invalid source URL: {source_url}"))?;

    Ok(url.origin().ascii_serialization())
}

/// Fetch the source page and resolve a link for each config.
pub async fn fetch_links(
    client: &reqwest::Client,
    source_url: &str,
    configs: &[BankConfig],
) -> Result<Vec<ResolvedLink>> {
    let html = fetch_page(client, source_url).await?;
    let links = resolve_links(&html, configs, &base_url(source_url)?);
    log::debug!("resolved {} of {} links", links.len(), configs.len());
    Ok(links)
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let configs = app.source.bank_configs()?;
    let client = build_client(app.source.timeout)?;

    if global.verbose {
        eprintln!("Fetching {}", app.source.source_url);
    }

    let links = fetch_links(&client, &app.source.source_url, &configs).await?;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Bank".bold().cyan(),
        "Label".bold().cyan(),
        "Link text".bold().cyan(),
        "URL".bold().cyan()
    ]);
    for config in &configs {
        match link_for(&links, &config.id) {
            Some(link) => table.add_row(prettytable::row![
                config.id.green(),
                config.label.bright_white(),
                link.link_text,
                link.url.bright_black()
            ]),
            None => table.add_row(prettytable::row![
                config.id.green(),
                config.label.bright_white(),
                "not found".yellow(),
                "-".bright_black()
            ]),
        };
    }
    table.printstd();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbank_core::links::{DEFAULT_BASE_URL, DEFAULT_SOURCE_URL};

    #[test]
    fn test_base_url_default_page() {
        assert_eq!(base_url(DEFAULT_SOURCE_URL).unwrap(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_lookalike_host_keeps_its_own_origin() {
        assert_eq!(
            base_url("https://www.caa.gov.tw.example.net/Article.aspx?a=3833").unwrap(),
            "https://www.caa.gov.tw.example.net"
        );
    }

    #[test]
    fn test_base_url_other_origin() {
        assert_eq!(
            base_url("http://127.0.0.1:8080/mirror/page.html").unwrap(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_base_url_invalid() {
        assert!(base_url("not a url").is_err());
    }
}
