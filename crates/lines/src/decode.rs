use crate::cursor::Cursor;
use crate::error::FormatError;
use crate::header::Version;
use crate::tool::Tool;
use scrawl_types::Color;

/// One sampled pen position in device space.
///
/// The format stores six floats per segment; two are reserved and
/// discarded on read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
    pub tilt: f32,
}

/// A decoded stroke: immutable once constructed.
#[derive(Debug, Clone)]
pub struct Stroke {
    pub tool: Tool,
    pub color_index: u32,
    pub pen_width: f32,
    pub segments: Vec<Segment>,
}

/// A layer of strokes, optionally carrying a color override resolved
/// from sidecar metadata after the decode.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub strokes: Vec<Stroke>,
    pub color_override: Option<Color>,
}

/// A fully decoded stroke file.
#[derive(Debug, Clone)]
pub struct LinesFile {
    pub version: Version,
    pub layers: Vec<Layer>,
}

impl LinesFile {
    /// Decode a whole stroke file from memory.
    ///
    /// Consumes the buffer exactly: a decode that runs past the end fails
    /// with [`FormatError::Truncated`], one that ends early with
    /// [`FormatError::TrailingBytes`]. Strokes with unrecognized tool ids
    /// are decoded in full so the cursor stays aligned with the declared
    /// counts; they are flagged [`Tool::Unknown`] and skipped at render
    /// time.
    pub fn decode(data: &[u8]) -> Result<LinesFile, FormatError> {
        let mut cursor = Cursor::new(data);
        let (version, nlayers) = Version::read_header(&mut cursor)?;

        let mut layers = Vec::with_capacity(nlayers as usize);
        for _ in 0..nlayers {
            layers.push(read_layer(&mut cursor, version)?);
        }

        if cursor.remaining() > 0 {
            return Err(FormatError::TrailingBytes(cursor.remaining()));
        }
        Ok(LinesFile { version, layers })
    }

    /// Attach per-layer color overrides resolved from sidecar metadata.
    ///
    /// Overrides are positional; extra entries on either side are ignored.
    pub fn apply_layer_overrides(&mut self, overrides: &[Option<Color>]) {
        for (layer, color) in self.layers.iter_mut().zip(overrides) {
            layer.color_override = *color;
        }
    }
}

fn read_layer(cursor: &mut Cursor<'_>, version: Version) -> Result<Layer, FormatError> {
    let nstrokes = cursor.read_u32()?;
    let mut strokes = Vec::with_capacity(nstrokes as usize);
    for _ in 0..nstrokes {
        strokes.push(read_stroke(cursor, version)?);
    }
    Ok(Layer { strokes, color_override: None })
}

fn read_stroke(cursor: &mut Cursor<'_>, version: Version) -> Result<Stroke, FormatError> {
    let pen_id = cursor.read_u32()?;
    let color_index = cursor.read_u32()?;
    let _reserved = cursor.read_u32()?;
    let pen_width = cursor.read_f32()?;
    if version == Version::V5 {
        let _ = cursor.read_f32()?;
    }
    let nsegments = cursor.read_u32()?;

    let tool = Tool::from_id(pen_id);
    if tool == Tool::Unknown {
        log::warn!("unknown tool id {pen_id}, stroke will not be drawn");
    }

    let mut segments = Vec::with_capacity(nsegments as usize);
    for _ in 0..nsegments {
        segments.push(read_segment(cursor)?);
    }

    Ok(Stroke { tool, color_index, pen_width, segments })
}

fn read_segment(cursor: &mut Cursor<'_>) -> Result<Segment, FormatError> {
    let x = cursor.read_f32()?;
    let y = cursor.read_f32()?;
    let _reserved = cursor.read_f32()?;
    let pressure = cursor.read_f32()?;
    let tilt = cursor.read_f32()?;
    let _reserved = cursor.read_f32()?;
    Ok(Segment { x, y, pressure, tilt })
}
