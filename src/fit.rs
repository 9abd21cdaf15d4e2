//! Fitting photos into slots.
//!
//! Two pieces of geometry the editor needs once a photo is assigned:
//! [`fit_height`] grows or shrinks a slot to follow the photo's aspect ratio,
//! and [`cover_crop`] picks the centered source region that fills a frame
//! without distortion when the page is prepared for rasterization.

use crate::canvas::PrintCanvas;
use crate::layout::{Frame, Slot};
use crate::math;

/// Height changes at or below this many percentage points are ignored.
pub const FIT_THRESHOLD: f64 = 0.3;

/// Current geometry of a slot, in percent of the spread.
///
/// Starts as [`Slot::placement`] and is updated by whatever moves or resizes
/// the slot. `manual` marks a slot the user resized by hand; those are never
/// height-fitted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub manual: bool,
}

/// Height a slot should take to show a `image_w × image_h` photo at its
/// current width.
///
/// Terminal-framed slots may shrink to 45% of their generated height and grow
/// down to their `max_bottom`. Other slots stay within ±30% of the generated
/// height.
///
/// Returns `None` when nothing should change: manual placements, empty
/// images, or a difference of at most [`FIT_THRESHOLD`].
pub fn fit_height(
    slot: &Slot,
    placement: &Placement,
    image_w: u32,
    image_h: u32,
    canvas: &PrintCanvas,
) -> Option<f64> {
    if placement.manual || image_w == 0 || image_h == 0 {
        return None;
    }
    let (display_w, display_h) = canvas.display_size();
    if display_h == 0 {
        return None;
    }

    let slot_w_px = placement.width / 100.0 * display_w as f64;
    let image_aspect = image_h as f64 / image_w as f64;
    let wanted = slot_w_px * image_aspect / display_h as f64 * 100.0;

    let (min_h, max_h) = match slot.frame {
        Frame::Terminal { max_bottom } => (slot.height * 0.45, max_bottom - placement.top),
        _ => (slot.height * 0.7, slot.height * 1.3),
    };
    let height = wanted.min(max_h).max(min_h);

    (math::abs(height - placement.height) > FIT_THRESHOLD).then_some(height)
}

/// Source rectangle in image pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Centered crop of a `image_w × image_h` photo that matches the aspect ratio
/// of a `frame_w × frame_h` frame, the way CSS `object-fit: cover` fills it.
///
/// Wider photos lose their sides; taller photos lose top and bottom.
/// Returns `None` if any dimension is zero.
pub fn cover_crop(image_w: u32, image_h: u32, frame_w: u32, frame_h: u32) -> Option<CropRect> {
    if image_w == 0 || image_h == 0 || frame_w == 0 || frame_h == 0 {
        return None;
    }
    // Exact aspect match: keep the whole photo.
    if image_w as u64 * frame_h as u64 == image_h as u64 * frame_w as u64 {
        return Some(CropRect {
            x: 0,
            y: 0,
            width: image_w,
            height: image_h,
        });
    }

    let image_ratio = image_w as f64 / image_h as f64;
    let frame_ratio = frame_w as f64 / frame_h as f64;

    let rect = if image_ratio > frame_ratio {
        let width = (math::round(image_h as f64 * frame_ratio) as u32).clamp(1, image_w);
        CropRect {
            x: math::round((image_w - width) as f64 / 2.0) as u32,
            y: 0,
            width,
            height: image_h,
        }
    } else {
        let height = (math::round(image_w as f64 / frame_ratio) as u32).clamp(1, image_h);
        CropRect {
            x: 0,
            y: math::round((image_h - height) as f64 / 2.0) as u32,
            width: image_w,
            height,
        }
    };
    Some(rect)
}

/// Pixel size a frame of `display_w × display_h` CSS pixels is rasterized at.
pub fn export_pixels(display_w: u32, display_h: u32, canvas: &PrintCanvas) -> (u32, u32) {
    let scale = canvas.export_scale();
    (
        math::round(display_w as f64 * scale) as u32,
        math::round(display_h as f64 * scale) as u32,
    )
}
