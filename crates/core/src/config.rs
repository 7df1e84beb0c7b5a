//! Bank variant configuration
//!
//! Each [`BankConfig`] names one exam-bank variant and tells the link
//! resolver how to recognise its PDF on the source page. The list is built
//! once per run and passed explicitly to every stage that needs it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read bank config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse bank config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Bank config list is empty")]
    Empty,
    #[error("Invalid bank config {id:?}: {reason}")]
    Invalid { id: String, reason: String },
    #[error("Duplicate bank id: {0}")]
    DuplicateId(String),
}

/// Static description of one bank variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    pub id: String,
    pub label: String,
    #[serde(rename = "match")]
    pub match_text: String,
    #[serde(default)]
    pub require: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl BankConfig {
    pub fn new(id: &str, label: &str, match_text: &str) -> Self {
        BankConfig {
            id: id.to_string(),
            label: label.to_string(),
            match_text: match_text.to_string(),
            require: Vec::new(),
            exclude: Vec::new(),
        }
    }

    pub fn requiring(mut self, keywords: &[&str]) -> Self {
        self.require = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn excluding(mut self, keywords: &[&str]) -> Self {
        self.exclude = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    /// Whether a link label selects this variant.
    pub fn matches_label(&self, label: &str) -> bool {
        label.contains(&self.match_text)
            && self.require.iter().all(|kw| label.contains(kw.as_str()))
            && !self.exclude.iter().any(|kw| label.contains(kw.as_str()))
    }

    /// Name of the cached PDF for this variant.
    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.label)
    }

    /// Name of the bank JSON written for this variant.
    pub fn output_file_name(&self) -> String {
        format!("{}.json", self.id)
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    bank: Vec<BankConfig>,
}

/// The four drone-operator license banks published on the CAA page.
pub fn default_bank_configs() -> Vec<BankConfig> {
    vec![
        BankConfig::new("general", "普通操作證", "普通操作證學科測驗題庫"),
        BankConfig::new("professional", "專業操作證", "專業操作證學科測驗題庫")
            .excluding(&["屆期", "簡易"]),
        BankConfig::new("renewal", "屆期換證", "屆期換證學科測驗題庫").excluding(&["簡易"]),
        BankConfig::new("renewal_basic", "屆期換證（簡易）", "屆期換證學科測驗題庫")
            .requiring(&["簡易"]),
    ]
}

/// Parse a bank list from TOML (`[[bank]]` tables) and validate it.
pub fn parse_bank_configs(content: &str) -> Result<Vec<BankConfig>, ConfigError> {
    let file: ConfigFile = toml::from_str(content)?;
    validate_bank_configs(&file.bank)?;
    Ok(file.bank)
}

/// Read and validate a bank list from a TOML file.
pub fn load_bank_configs(path: &Path) -> Result<Vec<BankConfig>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_bank_configs(&content)
}

/// Check a bank list for the properties the pipeline relies on.
///
/// Ids end up in output file names, so they are restricted to
/// alphanumerics, hyphens and underscores.
pub fn validate_bank_configs(configs: &[BankConfig]) -> Result<(), ConfigError> {
    if configs.is_empty() {
        return Err(ConfigError::Empty);
    }

    let mut seen = HashSet::new();
    for config in configs {
        let invalid = |reason: &str| ConfigError::Invalid {
            id: config.id.clone(),
            reason: reason.to_string(),
        };

        if config.id.is_empty() {
            return Err(invalid("id cannot be empty"));
        }
        if !config
            .id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(
                "id can only contain alphanumeric characters, hyphens, and underscores",
            ));
        }
        if config.label.trim().is_empty() {
            return Err(invalid("label cannot be empty"));
        }
        if config.label.contains(['/', '\\']) {
            return Err(invalid("label cannot contain path separators"));
        }
        if config.match_text.is_empty() {
            return Err(invalid("match cannot be empty"));
        }
        if !seen.insert(config.id.as_str()) {
            return Err(ConfigError::DuplicateId(config.id.clone()));
        }
    }

    Ok(())
}
