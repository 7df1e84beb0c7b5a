use std::path::PathBuf;

use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "text")]
#[command(about = "Print the flattened text of a PDF")]
pub struct App {
    /// Path to the PDF file
    path: PathBuf,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let extracted = pdf::extract_text_from_path(&app.path)
        .with_context(|| f!("Failed to extract text from {}", app.path.display()))?;

    if global.verbose || !extracted.failed_pages.is_empty() {
        eprintln!(
            "{} pages, failed: {:?}",
            extracted.page_count(),
            extracted.failed_pages
        );
    }

    println!("{}", extracted.full_text());

    Ok(())
}
