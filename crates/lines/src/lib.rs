//! Decoder for the reMarkable `.lines` stroke format.
//!
//! A `.lines` file is a flat little-endian stream: a fixed ASCII header
//! tag selecting format version 3 or 5, a layer count, and per layer a
//! list of strokes, each carrying a tool id, color index, pen width and
//! its pressure/tilt-annotated segment points. This crate turns that
//! stream into [`LinesFile`] values and computes per-stroke styling;
//! it knows nothing about PDF pages or the filesystem.

mod cursor;
mod decode;
mod error;
mod header;
pub mod metadata;
mod style;
mod tool;

pub use cursor::Cursor;
pub use decode::{Layer, LinesFile, Segment, Stroke};
pub use error::FormatError;
pub use header::{Version, HEADER_LEN};
pub use style::{device_color, segment_width, stroke_style, StrokeStyle};
pub use tool::Tool;
