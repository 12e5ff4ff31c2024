use scrawl_types::{Rect, Size};

/// The device capture canvas is a fixed portrait rectangle; every stroke
/// file positions its points inside it.
pub const DEVICE_WIDTH: f32 = 1404.0;
pub const DEVICE_HEIGHT: f32 = 1872.0;

/// Target page space: the media box dimensions plus an optional crop box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub media: Size,
    pub crop: Option<Rect>,
}

impl PageGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { media: Size::new(width, height), crop: None }
    }

    pub fn with_crop(mut self, crop: Rect) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Geometry of the device's own canvas, used for notebook pages.
    pub fn device() -> Self {
        Self::new(DEVICE_WIDTH, DEVICE_HEIGHT)
    }
}

/// Device-space → page-space mapping for one page.
///
/// A page wider than tall is laid out with width and height swapped and
/// the produced overlay tagged for a 90° rotation at composition time.
/// The scale ratio is uniform on both axes so strokes keep their shape.
#[derive(Debug, Clone, Copy)]
pub struct PageTransform {
    /// Dimensions layout happens in (media box, swapped when rotated).
    pub layout: Size,
    /// Whether the compositor must rotate the overlay 90°.
    pub rotated: bool,
    ratio: f32,
    offset: (f32, f32),
}

impl PageTransform {
    pub fn new(geometry: &PageGeometry) -> Self {
        let rotated = geometry.media.is_landscape();
        let layout = if rotated {
            geometry.media.transposed()
        } else {
            geometry.media
        };
        let ratio = layout.width / DEVICE_WIDTH;
        let offset = geometry
            .crop
            .map(|c| (c.x, c.y))
            .unwrap_or((0.0, 0.0));
        Self { layout, rotated, ratio, offset }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Map a device-space point into page space.
    ///
    /// The device origin is bottom-left with y growing downward relative
    /// to the page convention, so y is flipped against the layout height.
    pub fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.ratio + self.offset.0,
            self.layout.height - y * self.ratio + self.offset.1,
        )
    }

    /// Line widths scale by the same ratio as positions.
    pub fn scale_width(&self, width: f32) -> f32 {
        width * self.ratio
    }
}
