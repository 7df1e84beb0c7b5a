use std::path::PathBuf;

/// Reasons a single bank variant is skipped. None of them stop the run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no download link found for {0}")]
    MissingLink(String),

    #[error("PDF file does not exist: {}", .0.display())]
    MissingPdf(PathBuf),

    #[error("Network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read PDF: {0}")]
    Pdf(#[from] pdf::PdfError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}
