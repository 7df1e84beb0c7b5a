use scraper::{Html, Selector};
use serde::Serialize;

use crate::config::BankConfig;

/// Page listing the downloadable question banks.
pub const DEFAULT_SOURCE_URL: &str = "https://www.caa.gov.tw/Article.aspx?a=3833&lang=1";

/// Origin used to resolve relative download links.
pub const DEFAULT_BASE_URL: &str = "https://www.caa.gov.tw";

/// Substring identifying attachment download anchors.
pub const DOWNLOAD_MARKER: &str = "FileAtt.ashx";

/// A download anchor found on the source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadAnchor {
    pub href: String,
    pub text: String,
}

/// The link chosen for one bank variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub config_id: String,
    pub url: String,
    pub link_text: String,
}

/// Collect every anchor whose href points at the download endpoint, in
/// document order.
///
/// Anchor text is every text node trimmed and concatenated, so labels split
/// across inline elements still compare as one string.
pub fn collect_download_anchors(html: &str) -> Vec<DownloadAnchor> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|el| {
            let href = el.value().attr("href")?;
            if !href.contains(DOWNLOAD_MARKER) {
                return None;
            }
            Some(DownloadAnchor {
                href: href.to_string(),
                text: el.text().map(str::trim).collect::<String>(),
            })
        })
        .collect()
}

/// Turn a possibly relative href into an absolute URL.
pub fn absolutize(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

/// Pick the first matching anchor for each config, in config order.
///
/// A config with no matching anchor is left out of the result; callers skip
/// that variant.
pub fn resolve_links(html: &str, configs: &[BankConfig], base_url: &str) -> Vec<ResolvedLink> {
    let anchors = collect_download_anchors(html);

    configs
        .iter()
        .filter_map(|config| {
            anchors
                .iter()
                .find(|anchor| config.matches_label(&anchor.text))
                .map(|anchor| ResolvedLink {
                    config_id: config.id.clone(),
                    url: absolutize(&anchor.href, base_url),
                    link_text: anchor.text.clone(),
                })
        })
        .collect()
}

/// Find the resolved link of a config id.
pub fn link_for<'a>(links: &'a [ResolvedLink], config_id: &str) -> Option<&'a ResolvedLink> {
    links.iter().find(|link| link.config_id == config_id)
}
