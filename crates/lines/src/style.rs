use crate::tool::Tool;
use scrawl_types::Color;

/// Device palette, indexed by a stroke's (possibly forced) color index.
const PALETTE: [Color; 5] = [
    Color::rgb(5, 60, 150),   // pen color 1
    Color::gray(125),         // pen color 2
    Color::rgb(255, 255, 255), // eraser
    Color::rgb(255, 255, 0),  // highlighter
    Color::gray(97),          // pencil
];

/// Resolve a color index against the device palette.
///
/// Indices outside the table fall back to pen color 1.
pub fn device_color(index: u32) -> Color {
    PALETTE
        .get(index as usize)
        .copied()
        .unwrap_or(PALETTE[0])
}

/// Uniform styling derived for one stroke.
///
/// `base_width` feeds the per-segment blend in [`segment_width`]; the
/// color index and opacity apply to the whole stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color_index: u32,
    pub base_width: f32,
    pub opacity: f32,
}

/// Map a tool kind and the stroke header's raw values to a stroke style.
///
/// Pure function of its inputs. Highlighters, erasers and pencils force
/// their palette index regardless of the recorded one.
pub fn stroke_style(tool: Tool, color_index: u32, raw_width: f32) -> StrokeStyle {
    let w = raw_width;
    match tool {
        Tool::Brush => StrokeStyle {
            color_index,
            base_width: w,
            opacity: 1.0,
        },
        Tool::Ballpoint | Tool::Fineliner => StrokeStyle {
            color_index,
            base_width: 32.0 * w * w - 116.0 * w + 107.0,
            opacity: 1.0,
        },
        Tool::Marker => StrokeStyle {
            color_index,
            base_width: 64.0 * w - 112.0,
            opacity: 0.9,
        },
        Tool::Highlighter => StrokeStyle {
            color_index: 3,
            base_width: 30.0,
            opacity: 0.2,
        },
        Tool::Eraser => StrokeStyle {
            color_index: 2,
            base_width: 1280.0 * w * w - 4800.0 * w + 4510.0,
            opacity: 1.0,
        },
        Tool::SharpPencil | Tool::TiltPencil => StrokeStyle {
            color_index: 4,
            base_width: 16.0 * w - 27.0,
            opacity: 0.9,
        },
        Tool::EraserArea => StrokeStyle {
            color_index,
            base_width: w,
            opacity: 0.0,
        },
        Tool::Unknown => StrokeStyle {
            color_index,
            base_width: w,
            opacity: 0.0,
        },
    }
}

/// Blend a segment's pressure and tilt into its line width.
///
/// Brush and ballpoint respond to pressure only; the highlighter keeps
/// its constant band width; everything else mixes tilt and pressure.
/// The result is clamped at zero — the quadratic base-width forms go
/// negative below the device-valid input range.
pub fn segment_width(tool: Tool, base_width: f32, pressure: f32, tilt: f32) -> f32 {
    let width = match tool {
        Tool::Brush | Tool::Ballpoint => (6.0 * base_width + 2.0 * pressure) / 8.0,
        Tool::Highlighter => base_width,
        _ => (5.0 * base_width + 2.0 * tilt + 1.0 * pressure) / 8.0,
    };
    width.max(0.0)
}
