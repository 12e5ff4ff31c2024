//! # scrawl
//!
//! Renders reMarkable stylus annotations as vector overlays onto PDF
//! documents.
//!
//! The pipeline is strictly forward: stroke bytes are decoded
//! ([`scrawl_lines`]), styled and transformed into page space
//! ([`scrawl_render`]), and composed onto host or blank pages
//! ([`scrawl_compose`]). This crate is the integration layer: it finds
//! per-page stroke files, fans the pages out across a thread pool, and
//! reassembles the document in page order.

pub mod discover;
pub mod error;
pub mod pipeline;

// Re-export foundation and pipeline types
pub use error::PipelineError;
pub use pipeline::{
    annotate_pdf, render_document, render_notebook, render_page, render_stroke_bytes,
    render_stroke_file,
};
pub use scrawl_compose::{apply_overlay, blank_document, ComposeError};
pub use scrawl_lines::{FormatError, LinesFile, Tool};
pub use scrawl_render::{OverlayPage, PageGeometry, DEVICE_HEIGHT, DEVICE_WIDTH};
pub use scrawl_types::{Color, Rect, Size};
