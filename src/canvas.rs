//! Physical print canvas and on-screen editing surface.
//!
//! ```
//! use zenposter::PrintCanvas;
//!
//! let canvas = PrintCanvas::default();
//! assert_eq!(canvas.export_size(), (6063, 4106));
//! assert_eq!(canvas.display_size(), (1100, 745));
//! ```

use crate::math;

/// Fewest photos a layout holds.
pub const PHOTO_MIN: u32 = 10;
/// Most photos a layout holds.
pub const PHOTO_MAX: u32 = 30;

const MM_PER_INCH: f64 = 25.4;

/// Spread dimensions, print resolution, and the editor's display width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrintCanvas {
    /// Physical width of the two-page spread in millimetres.
    pub width_mm: f64,
    /// Physical height in millimetres.
    pub height_mm: f64,
    /// Print resolution written into the exported JPEG.
    pub dpi: u16,
    /// Width of the editing surface in CSS pixels.
    pub display_width: u32,
    /// JPEG quality handed to the rasterizer, `0.0..=1.0`.
    pub jpeg_quality: f32,
}

impl Default for PrintCanvas {
    fn default() -> Self {
        Self {
            width_mm: 440.0,
            height_mm: 298.0,
            dpi: 350,
            display_width: 1100,
            jpeg_quality: 0.95,
        }
    }
}

impl PrintCanvas {
    /// Canvas of the given physical size at the default resolution.
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            ..Self::default()
        }
    }

    /// Set the print resolution.
    pub fn dpi(mut self, dpi: u16) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the editing surface width.
    pub fn display_width(mut self, width: u32) -> Self {
        self.display_width = width;
        self
    }

    /// Set the JPEG quality, clamped to `0.0..=1.0`.
    pub fn jpeg_quality(mut self, quality: f32) -> Self {
        self.jpeg_quality = quality.clamp(0.0, 1.0);
        self
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width_mm / self.height_mm
    }

    /// Pixel dimensions of the exported image at [`dpi`](Self::dpi).
    pub fn export_size(&self) -> (u32, u32) {
        (self.mm_to_px(self.width_mm), self.mm_to_px(self.height_mm))
    }

    /// Height of the editing surface, following the physical aspect ratio.
    pub fn display_height(&self) -> u32 {
        math::round(self.display_width as f64 / self.aspect()) as u32
    }

    pub fn display_size(&self) -> (u32, u32) {
        (self.display_width, self.display_height())
    }

    /// Rasterization scale from the editing surface to the export width.
    pub fn export_scale(&self) -> f64 {
        self.export_size().0 as f64 / self.display_width as f64
    }

    fn mm_to_px(&self, mm: f64) -> u32 {
        math::round(mm / MM_PER_INCH * self.dpi as f64) as u32
    }
}

/// Clamp a requested photo count to the supported range.
pub fn clamp_photo_count(count: i64) -> u32 {
    count.clamp(PHOTO_MIN as i64, PHOTO_MAX as i64) as u32
}

/// Step the photo count by `delta`, staying within the supported range.
///
/// Returns `None` when the count would not change.
pub fn step_photo_count(current: u32, delta: i32) -> Option<u32> {
    let next = clamp_photo_count(current as i64 + delta as i64);
    (next != current).then_some(next)
}
