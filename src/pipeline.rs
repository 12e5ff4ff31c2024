//! The per-document rendering pipeline.
//!
//! Pages decode independently: each page's stroke file runs the full
//! decode → transform → overlay chain with no state shared across
//! pages, so the document fan-out is embarrassingly parallel. Results
//! are assembled in page-index order regardless of completion order. A
//! page whose decode fails is logged and left blank; it never affects
//! its neighbors.

use crate::discover;
use crate::error::PipelineError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use scrawl_compose::{apply_overlay, blank_document};
use scrawl_lines::{FormatError, LinesFile};
use scrawl_render::{
    build_paths, render_overlay, OverlayPage, PageGeometry, PageTransform, DEVICE_HEIGHT,
    DEVICE_WIDTH,
};
use scrawl_types::{Color, Rect, Size};
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Decode and render a single stroke file for the given target page.
///
/// The file handle is scoped to the initial whole-file read; decoding
/// runs over the in-memory buffer.
pub fn render_stroke_file(
    path: &Path,
    geometry: &PageGeometry,
    overrides: &[Option<Color>],
) -> Result<OverlayPage, PipelineError> {
    let data = std::fs::read(path)?;
    Ok(render_stroke_bytes(&data, geometry, overrides)?)
}

/// The in-memory core of [`render_stroke_file`].
pub fn render_stroke_bytes(
    data: &[u8],
    geometry: &PageGeometry,
    overrides: &[Option<Color>],
) -> Result<OverlayPage, FormatError> {
    let mut file = LinesFile::decode(data)?;
    file.apply_layer_overrides(overrides);
    let transform = PageTransform::new(geometry);
    let paths = build_paths(&file, &transform);
    Ok(render_overlay(&paths, &transform))
}

/// Render one page of a stroke directory, absorbing per-page failures.
///
/// `None` means "leave this page blank": either no stroke file exists
/// (no annotations) or its decode failed (logged).
pub fn render_page(dir: &Path, index: usize, geometry: &PageGeometry) -> Option<OverlayPage> {
    let path = discover::stroke_file(dir, index)?;
    let overrides = discover::layer_overrides(dir, index);
    match render_stroke_file(&path, geometry, &overrides) {
        Ok(overlay) => {
            log::debug!("page {index}: rendered {} ops", overlay.operations.len());
            Some(overlay)
        }
        Err(err) => {
            log::warn!("page {index}: {err}; leaving page blank");
            None
        }
    }
}

/// Render every page of a document, one entry per target geometry.
///
/// Pages are decoded concurrently when the `parallel` feature is on;
/// the output vector is always in page-index order.
pub fn render_document(dir: &Path, geometries: &[PageGeometry]) -> Vec<Option<OverlayPage>> {
    #[cfg(feature = "parallel")]
    {
        geometries
            .par_iter()
            .enumerate()
            .map(|(index, geometry)| render_page(dir, index, geometry))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        geometries
            .iter()
            .enumerate()
            .map(|(index, geometry)| render_page(dir, index, geometry))
            .collect()
    }
}

/// Overlay a stroke directory onto an existing PDF.
///
/// Page geometry is taken from each page's own boxes; pages without a
/// matching stroke file pass through untouched.
pub fn annotate_pdf(pdf_path: &Path, stroke_dir: &Path, out_path: &Path) -> Result<(), PipelineError> {
    let mut doc = Document::load(pdf_path)?;
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let geometries: Vec<PageGeometry> = pages.iter().map(|id| page_geometry(&doc, *id)).collect();

    let overlays = render_document(stroke_dir, &geometries);
    for (page_id, overlay) in pages.iter().zip(&overlays) {
        if let Some(overlay) = overlay {
            apply_overlay(&mut doc, *page_id, overlay)?;
        }
    }
    doc.save(out_path)?;
    Ok(())
}

/// Render a notebook (no host PDF) onto blank device-sized pages.
pub fn render_notebook(stroke_dir: &Path, out_path: &Path) -> Result<(), PipelineError> {
    let count = discover::page_count(stroke_dir);
    log::debug!("notebook has {count} pages");
    let sizes = vec![Size::new(DEVICE_WIDTH, DEVICE_HEIGHT); count];
    let geometries = vec![PageGeometry::device(); count];

    let mut doc = blank_document(&sizes);
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let overlays = render_document(stroke_dir, &geometries);
    for (page_id, overlay) in pages.iter().zip(&overlays) {
        if let Some(overlay) = overlay {
            apply_overlay(&mut doc, *page_id, overlay)?;
        }
    }
    doc.save(out_path)?;
    Ok(())
}

/// Target geometry of a host page from its MediaBox/CropBox, walking the
/// page-tree parents for inherited boxes. Pages with no media box at all
/// fall back to the device canvas.
fn page_geometry(doc: &Document, page_id: ObjectId) -> PageGeometry {
    let media = page_rect(doc, page_id, b"MediaBox");
    let crop = page_rect(doc, page_id, b"CropBox");
    let mut geometry = match media {
        Some(rect) => PageGeometry::new(rect.width, rect.height),
        None => PageGeometry::device(),
    };
    if let Some(crop) = crop {
        geometry = geometry.with_crop(crop);
    }
    geometry
}

fn page_rect(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Rect> {
    let mut dict = doc.get_object(page_id).ok()?.as_dict().ok()?;
    for _ in 0..8 {
        if let Some(rect) = rect_entry(doc, dict, key) {
            return Some(rect);
        }
        let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
        dict = doc.get_object(parent).ok()?.as_dict().ok()?;
    }
    None
}

fn rect_entry(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<Rect> {
    let mut obj = dict.get(key).ok()?;
    if let Object::Reference(id) = obj {
        obj = doc.get_object(*id).ok()?;
    }
    let arr = obj.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let n: Vec<f32> = arr.iter().map(number).collect::<Option<_>>()?;
    Some(Rect::new(n[0], n[1], n[2] - n[0], n[3] - n[1]))
}

fn number(obj: &Object) -> Option<f32> {
    obj.as_f32()
        .ok()
        .or_else(|| obj.as_i64().ok().map(|i| i as f32))
}
