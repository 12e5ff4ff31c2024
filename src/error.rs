use scrawl_compose::ComposeError;
use scrawl_lines::FormatError;
use thiserror::Error;

/// A comprehensive error type for the whole annotation pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stroke decoding failed: {0}")]
    Format(#[from] FormatError),

    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
