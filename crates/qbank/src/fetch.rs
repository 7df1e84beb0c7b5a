use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use qbank_core::cache::{is_cache_hit, parse_content_length};
use tokio::io::AsyncWriteExt;

use crate::prelude::*;

const USER_AGENT: &str = concat!("qbank/", env!("CARGO_PKG_VERSION"));

/// What happened when a PDF was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The cached file already has the size the server reports.
    CacheHit,
    Downloaded { bytes: u64 },
}

/// Build the HTTP client shared by every request of a run.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

/// Spinner shown on stderr while a long request runs.
pub fn new_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Helper to set spinner message if spinner is present
fn set_spinner_msg(spinner: Option<&ProgressBar>, msg: impl Into<String>) {
    if let Some(s) = spinner {
        s.set_message(msg.into());
    }
}

/// Fetch the HTML of the page listing the PDFs.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| f!("Failed to fetch {url}"))?;

    if !response.status().is_success() {
        return Err(eyre!("{url} returned status: {}", response.status()));
    }

    response
        .text()
        .await
        .with_context(|| f!("Failed to read the body of {url}"))
}

/// Size the server reports for `url`, if it reports one.
///
/// A failed HEAD request only means the cache cannot be trusted, so it is
/// logged and treated as an unknown size.
pub async fn remote_size(client: &reqwest::Client, url: &str) -> Option<u64> {
    let response = match client.head(url).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            log::debug!("HEAD {url} returned {}", response.status());
            return None;
        }
        Err(err) => {
            log::debug!("HEAD {url} failed: {err}");
            return None;
        }
    };

    response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_length)
}

/// Temporary path a download is streamed into before it replaces `dest`.
pub fn download_path(dest: &Path) -> PathBuf {
    PathBuf::from(format!("{}.download", dest.display()))
}

/// Download `url` to `dest` unless the cached copy is already current.
///
/// The body is streamed into [`download_path`] and renamed onto `dest` only
/// once complete, so `dest` never holds a truncated file.
pub async fn fetch_pdf(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    spinner: Option<&ProgressBar>,
) -> std::result::Result<FetchOutcome, Error> {
    set_spinner_msg(spinner, f!("Checking {}", dest.display()));

    let remote = remote_size(client, url).await;
    let local = tokio::fs::metadata(dest).await.ok().map(|meta| meta.len());

    if is_cache_hit(local, remote) {
        log::debug!("{} is current ({} bytes)", dest.display(), local.unwrap_or(0));
        return Ok(FetchOutcome::CacheHit);
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let partial = download_path(dest);
    match stream_to_file(client, url, &partial, spinner).await {
        Ok(bytes) => {
            tokio::fs::rename(&partial, dest).await?;
            Ok(FetchOutcome::Downloaded { bytes })
        }
        Err(err) => {
            let _ = tokio::fs::remove_file(&partial).await;
            Err(err)
        }
    }
}

async fn stream_to_file(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
    spinner: Option<&ProgressBar>,
) -> std::result::Result<u64, Error> {
    let mut response = client.get(url).send().await?.error_for_status()?;

    let mut file = tokio::fs::File::create(path).await?;
    let mut bytes: u64 = 0;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        bytes += chunk.len() as u64;
        set_spinner_msg(spinner, f!("Downloading {} ({bytes} bytes)", path.display()));
    }

    file.flush().await?;

    Ok(bytes)
}
