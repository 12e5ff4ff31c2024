//! Builders for synthetic stroke files and host PDFs.

/// Byte-level builder for `.lines` stroke files.
///
/// Emits the exact wire layout: 43-byte header tag, layer count, then
/// whatever layers/strokes/segments the test pushes. Counts are the
/// caller's responsibility so malformed files can be built too.
pub struct StrokeFile {
    buf: Vec<u8>,
    v5: bool,
}

impl StrokeFile {
    pub fn v3(nlayers: u32) -> Self {
        Self::with_tag(b"reMarkable .lines file, version=3          ", nlayers, false)
    }

    pub fn v5(nlayers: u32) -> Self {
        Self::with_tag(b"reMarkable .lines file, version=5          ", nlayers, true)
    }

    /// An arbitrary (usually wrong) header tag.
    pub fn with_tag(tag: &[u8], nlayers: u32, v5: bool) -> Self {
        let mut buf = tag.to_vec();
        buf.extend_from_slice(&nlayers.to_le_bytes());
        Self { buf, v5 }
    }

    pub fn layer(mut self, nstrokes: u32) -> Self {
        self.buf.extend_from_slice(&nstrokes.to_le_bytes());
        self
    }

    pub fn stroke(mut self, pen: u32, color: u32, width: f32, nsegments: u32) -> Self {
        self.buf.extend_from_slice(&pen.to_le_bytes());
        self.buf.extend_from_slice(&color.to_le_bytes());
        self.buf.extend_from_slice(&0u32.to_le_bytes());
        self.buf.extend_from_slice(&width.to_le_bytes());
        if self.v5 {
            self.buf.extend_from_slice(&0.0f32.to_le_bytes());
        }
        self.buf.extend_from_slice(&nsegments.to_le_bytes());
        self
    }

    pub fn segment(mut self, x: f32, y: f32, pressure: f32, tilt: f32) -> Self {
        for value in [x, y, 0.0, pressure, tilt, 0.0] {
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
        self
    }

    pub fn bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// A minimal valid stroke file: one layer, one two-segment ballpoint line.
pub fn simple_stroke_file() -> Vec<u8> {
    StrokeFile::v5(1)
        .layer(1)
        .stroke(2, 0, 2.0, 2)
        .segment(100.0, 100.0, 0.5, 0.0)
        .segment(200.0, 200.0, 0.5, 0.0)
        .bytes()
}
