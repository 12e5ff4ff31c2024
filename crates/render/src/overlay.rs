use crate::path::RenderedPath;
use crate::transform::PageTransform;
use lopdf::content::Operation;
use scrawl_types::Size;

/// A named alpha graphics state referenced by the overlay's operations.
///
/// lopdf has no canvas-level opacity, so each distinct stroke alpha
/// becomes an `ExtGState` resource entry the compositor must install.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaState {
    pub name: String,
    pub alpha: f32,
}

/// The rendered annotations of one page, pre-composition.
///
/// Operations are expressed in layout space (width/height swapped for
/// landscape targets) and carry no `q`/`Q` isolation of their own; the
/// compositor wraps them, applying the 90° rotation when `rotated` is
/// set, and merges `alpha_states` into the page resources.
#[derive(Debug, Clone)]
pub struct OverlayPage {
    pub size: Size,
    pub rotated: bool,
    pub operations: Vec<Operation>,
    pub alpha_states: Vec<AlphaState>,
}

/// Write the content-stream operations for a page's rendered paths.
///
/// Each path sets its stroke color and alpha state once; every segment
/// is stroked on its own so the line width can follow the per-point
/// profile. Closed sub-paths get an explicit line back to their first
/// point.
pub fn render_overlay(paths: &[RenderedPath], transform: &PageTransform) -> OverlayPage {
    let mut operations = Vec::new();
    let mut alpha_states: Vec<AlphaState> = Vec::new();

    // Round caps hide the joints between individually stroked segments.
    operations.push(Operation::new("J", vec![1.into()]));

    for path in paths {
        operations.push(Operation::new(
            "RG",
            vec![
                (path.color.r as f32 / 255.0).into(),
                (path.color.g as f32 / 255.0).into(),
                (path.color.b as f32 / 255.0).into(),
            ],
        ));
        let state = alpha_state_name(&mut alpha_states, path.opacity);
        operations.push(Operation::new("gs", vec![lopdf::Object::Name(state.into_bytes())]));

        for sub in &path.subpaths {
            for pair in sub.points.windows(2) {
                stroke_segment(&mut operations, pair[0].x, pair[0].y, pair[1].x, pair[1].y, pair[1].width);
            }
            if sub.closed && sub.points.len() > 2 {
                let first = &sub.points[0];
                let last = &sub.points[sub.points.len() - 1];
                stroke_segment(&mut operations, last.x, last.y, first.x, first.y, last.width);
            }
        }
    }

    OverlayPage {
        size: transform.layout,
        rotated: transform.rotated,
        operations,
        alpha_states,
    }
}

fn stroke_segment(operations: &mut Vec<Operation>, x0: f32, y0: f32, x1: f32, y1: f32, width: f32) {
    operations.push(Operation::new("w", vec![width.into()]));
    operations.push(Operation::new("m", vec![x0.into(), y0.into()]));
    operations.push(Operation::new("l", vec![x1.into(), y1.into()]));
    operations.push(Operation::new("S", vec![]));
}

fn alpha_state_name(states: &mut Vec<AlphaState>, alpha: f32) -> String {
    if let Some(state) = states.iter().find(|s| s.alpha.to_bits() == alpha.to_bits()) {
        return state.name.clone();
    }
    let name = format!("GS{}", states.len());
    states.push(AlphaState { name: name.clone(), alpha });
    name
}
