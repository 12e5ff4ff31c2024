use crate::transform::PageTransform;
use scrawl_lines::{device_color, segment_width, stroke_style, LinesFile};
use scrawl_types::Color;

/// Points per sub-path before it is closed and a new one begins.
///
/// Reproduces the capture device's pen-lift artifacts; the next sub-path
/// starts at the closing point so the line stays visually continuous.
pub const SUBPATH_POINTS: usize = 5;

/// A transformed point with its own line width (already page-scaled).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub points: Vec<PathPoint>,
    /// A closed sub-path draws an implicit line back to its first point.
    pub closed: bool,
}

/// One stroke ready for the compositor: uniform color and alpha, a
/// per-point width profile. Lives only for the duration of a render call.
#[derive(Debug, Clone)]
pub struct RenderedPath {
    pub color: Color,
    pub opacity: f32,
    pub subpaths: Vec<SubPath>,
}

/// Turn a decoded file into drawable paths in page space.
///
/// Non-drawable strokes (erasers, area erases, unknown tools) and
/// strokes with fewer than two points are dropped here. Stroke color is
/// the layer override when one was resolved, otherwise the device
/// palette entry for the (possibly tool-forced) color index; an
/// override's alpha channel scales the tool opacity.
pub fn build_paths(file: &LinesFile, transform: &PageTransform) -> Vec<RenderedPath> {
    let mut paths = Vec::new();
    for layer in &file.layers {
        for stroke in &layer.strokes {
            if !stroke.tool.is_drawable() {
                continue;
            }
            let style = stroke_style(stroke.tool, stroke.color_index, stroke.pen_width);
            let color = layer
                .color_override
                .unwrap_or_else(|| device_color(style.color_index));

            let points: Vec<PathPoint> = stroke
                .segments
                .iter()
                .map(|seg| {
                    let (x, y) = transform.map(seg.x, seg.y);
                    let width = transform.scale_width(segment_width(
                        stroke.tool,
                        style.base_width,
                        seg.pressure,
                        seg.tilt,
                    ));
                    PathPoint { x, y, width }
                })
                .collect();

            let subpaths = chunk_subpaths(points);
            if subpaths.is_empty() {
                continue;
            }
            paths.push(RenderedPath {
                color,
                opacity: style.opacity * color.a,
                subpaths,
            });
        }
    }
    paths
}

fn chunk_subpaths(points: Vec<PathPoint>) -> Vec<SubPath> {
    let mut subpaths = Vec::new();
    let mut current: Vec<PathPoint> = Vec::with_capacity(SUBPATH_POINTS);
    for point in points {
        current.push(point);
        if current.len() == SUBPATH_POINTS {
            let carry = current[SUBPATH_POINTS - 1];
            subpaths.push(SubPath { points: std::mem::take(&mut current), closed: true });
            current.push(carry);
        }
    }
    // Trailing run stays open; a lone carried boundary point is not a path.
    if current.len() >= 2 {
        subpaths.push(SubPath { points: current, closed: false });
    }
    subpaths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::PageGeometry;
    use scrawl_lines::{Layer, Segment, Stroke, Tool, Version};

    fn device_transform() -> PageTransform {
        PageTransform::new(&PageGeometry::device())
    }

    fn stroke(tool: Tool, nsegments: usize) -> Stroke {
        let segments = (0..nsegments)
            .map(|i| Segment {
                x: i as f32 * 10.0,
                y: i as f32 * 10.0,
                pressure: 0.5,
                tilt: 0.0,
            })
            .collect();
        Stroke { tool, color_index: 0, pen_width: 2.0, segments }
    }

    fn file_with(strokes: Vec<Stroke>) -> LinesFile {
        LinesFile {
            version: Version::V5,
            layers: vec![Layer { strokes, color_override: None }],
        }
    }

    fn point(i: usize) -> PathPoint {
        PathPoint { x: i as f32, y: i as f32, width: 1.0 }
    }

    #[test]
    fn short_runs_stay_open() {
        let subs = chunk_subpaths((0..3).map(point).collect());
        assert_eq!(subs.len(), 1);
        assert!(!subs[0].closed);
        assert_eq!(subs[0].points.len(), 3);
    }

    #[test]
    fn every_fifth_point_closes_and_reopens_at_the_same_point() {
        let subs = chunk_subpaths((0..7).map(point).collect());
        assert_eq!(subs.len(), 2);
        assert!(subs[0].closed);
        assert_eq!(subs[0].points.len(), 5);
        assert!(!subs[1].closed);
        // The second sub-path starts where the first closed.
        assert_eq!(subs[1].points[0], point(4));
        assert_eq!(subs[1].points.len(), 3);
    }

    #[test]
    fn exactly_five_points_leave_no_dangling_subpath() {
        let subs = chunk_subpaths((0..5).map(point).collect());
        assert_eq!(subs.len(), 1);
        assert!(subs[0].closed);
    }

    #[test]
    fn erasers_and_unknown_strokes_never_become_paths() {
        let file = file_with(vec![
            stroke(Tool::Eraser, 4),
            stroke(Tool::EraserArea, 4),
            stroke(Tool::Unknown, 4),
            stroke(Tool::Fineliner, 4),
        ]);
        let paths = build_paths(&file, &device_transform());
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn single_point_strokes_are_dropped() {
        let file = file_with(vec![stroke(Tool::Brush, 1)]);
        assert!(build_paths(&file, &device_transform()).is_empty());
    }

    #[test]
    fn layer_override_replaces_the_palette_color() {
        let mut file = file_with(vec![stroke(Tool::Fineliner, 2)]);
        file.layers[0].color_override = Some(Color { r: 1, g: 2, b: 3, a: 0.5 });
        let paths = build_paths(&file, &device_transform());
        assert_eq!(paths[0].color.r, 1);
        // The override's alpha scales the tool opacity.
        assert!((paths[0].opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn highlighter_paths_carry_the_forced_style() {
        let file = file_with(vec![stroke(Tool::Highlighter, 2)]);
        let paths = build_paths(&file, &device_transform());
        assert_eq!(paths.len(), 1);
        assert!((paths[0].opacity - 0.2).abs() < 1e-6);
        assert_eq!(paths[0].color, device_color(3));
        for sub in &paths[0].subpaths {
            for p in &sub.points {
                assert_eq!(p.width, 30.0);
            }
        }
    }
}
