//! Locating per-page stroke files and their sidecar metadata.
//!
//! A stroke directory holds one file per page, named by page index
//! (`0.rm`, `1.rm`, …), with layer metadata in `<index>-metadata.json`
//! alongside. A missing file simply means the page has no annotations.

use scrawl_lines::metadata;
use scrawl_types::Color;
use std::path::{Path, PathBuf};

/// Path of the stroke file for a page, if one exists.
pub fn stroke_file(dir: &Path, page_index: usize) -> Option<PathBuf> {
    let path = dir.join(format!("{page_index}.rm"));
    path.is_file().then_some(path)
}

/// Resolve a page's layer color overrides from its sidecar metadata.
///
/// Absent or unreadable metadata yields no overrides; this is never an
/// error.
pub fn layer_overrides(dir: &Path, page_index: usize) -> Vec<Option<Color>> {
    let path = dir.join(format!("{page_index}-metadata.json"));
    match std::fs::read_to_string(&path) {
        Ok(json) => metadata::layer_overrides(&json),
        Err(_) => Vec::new(),
    }
}

/// Number of sequentially numbered pages in a notebook directory.
///
/// Counts `0.rm`, `1.rm`, … until the first gap, matching how the
/// device numbers notebook pages.
pub fn page_count(dir: &Path) -> usize {
    let mut count = 0;
    while stroke_file(dir, count).is_some() {
        count += 1;
    }
    count
}
