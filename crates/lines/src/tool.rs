/// Pen/eraser/highlighter classification of a stroke.
///
/// Tool ids come in two numeric ranges, one per device generation; both
/// map onto the same nine kinds. Ids outside either range classify as
/// [`Tool::Unknown`] — the stroke is still decoded in full so the cursor
/// stays synchronized with the byte stream, it just never gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Brush,
    Ballpoint,
    Marker,
    Fineliner,
    Highlighter,
    Eraser,
    SharpPencil,
    TiltPencil,
    EraserArea,
    Unknown,
}

impl Tool {
    /// Classify a raw tool identifier from a stroke header.
    pub fn from_id(id: u32) -> Tool {
        match id {
            0 | 12 => Tool::Brush,
            1 | 14 => Tool::TiltPencil,
            2 | 15 => Tool::Ballpoint,
            3 | 16 => Tool::Marker,
            4 | 17 => Tool::Fineliner,
            5 | 18 => Tool::Highlighter,
            6 => Tool::Eraser,
            7 | 13 => Tool::SharpPencil,
            8 => Tool::EraserArea,
            _ => Tool::Unknown,
        }
    }

    /// Whether strokes of this kind appear in the rendered output.
    ///
    /// Erasers and area-erase gestures are decoded for cursor
    /// synchronization only.
    pub fn is_drawable(self) -> bool {
        !matches!(self, Tool::Eraser | Tool::EraserArea | Tool::Unknown)
    }
}
