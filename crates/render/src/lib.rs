//! Stroke rendering: device space to page space, path assembly, and
//! overlay content-stream generation.
//!
//! The crate's output is an [`OverlayPage`]: ready-to-encode lopdf
//! operations plus the alpha resources they reference. Composition onto
//! actual PDF pages happens elsewhere.

mod overlay;
mod path;
mod transform;

pub use overlay::{render_overlay, AlphaState, OverlayPage};
pub use path::{build_paths, PathPoint, RenderedPath, SubPath, SUBPATH_POINTS};
pub use transform::{PageGeometry, PageTransform, DEVICE_HEIGHT, DEVICE_WIDTH};
