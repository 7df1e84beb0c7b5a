use crate::prelude::*;
use clap::Parser;

mod error;
mod fetch;
mod links;
mod output;
mod parse;
mod prelude;
#[cfg(test)]
mod testing;
mod text;
mod update;
mod whitelist;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Builds the drone-license exam question banks from the CAA PDFs"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "QBANK_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

/// Where the source page is and which variants to look for on it.
#[derive(Debug, Clone, clap::Args)]
pub struct SourceOptions {
    /// Page listing the question bank PDFs
    #[arg(long, env = "QBANK_SOURCE_URL", default_value = qbank_core::links::DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// TOML file with `[[bank]]` entries (defaults to the built-in variants)
    #[arg(long, env = "QBANK_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, env = "QBANK_TIMEOUT", default_value = "60")]
    pub timeout: u64,
}

impl SourceOptions {
    /// Load and validate the bank variants.
    pub fn bank_configs(&self) -> Result<Vec<qbank_core::config::BankConfig>> {
        let configs = match &self.config {
            Some(path) => qbank_core::config::load_bank_configs(path)
                .with_context(|| f!("Failed to load bank config {}", path.display()))?,
            None => qbank_core::config::default_bank_configs(),
        };
        qbank_core::config::validate_bank_configs(&configs).context("Invalid bank config")?;
        Ok(configs)
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Download every variant and regenerate its question bank
    Update(crate::update::App),

    /// Build a question bank from a local PDF
    Parse(crate::parse::App),

    /// Recompute the whitelist of an existing question list or bank file
    Whitelist(crate::whitelist::App),

    /// Show the download link each variant resolves to
    Links(crate::links::App),

    /// Print the flattened text of a PDF
    Text(crate::text::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Update(sub_app) => crate::update::run(sub_app, app.global).await,
        SubCommands::Parse(sub_app) => crate::parse::run(sub_app, app.global).await,
        SubCommands::Whitelist(sub_app) => crate::whitelist::run(sub_app, app.global).await,
        SubCommands::Links(sub_app) => crate::links::run(sub_app, app.global).await,
        SubCommands::Text(sub_app) => crate::text::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
