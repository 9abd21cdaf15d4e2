//! Print-ready export: DPI patch, then ICC profile embedding.
//!
//! ```
//! use zenposter::{ColorSpace, ExportOptions};
//!
//! // SOI, an empty DQT, EOI. Any encoder output works the same way.
//! let rendered = vec![0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x02, 0xFF, 0xD9];
//!
//! let out = ExportOptions::new(350).wide_gamut(true).finalize(rendered).unwrap();
//! assert_eq!(zenposter::jpeg::jfif_density(&out).unwrap().x, 350);
//! assert!(zenposter::jpeg::segments(&out).any(|s| s.is_icc()));
//! ```

use alloc::vec::Vec;

use crate::canvas::PrintCanvas;
use crate::icc::{ColorSpace, build_profile};
use crate::jpeg::{self, ICC_MAX_SINGLE_CHUNK};

/// Export pipeline error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// Input does not start with the SOI marker.
    #[error("input is not a JPEG stream (missing SOI marker)")]
    NotJpeg,
    /// A resolution of zero cannot be printed.
    #[error("print resolution must be at least 1 dpi")]
    ZeroDpi,
    /// Profile does not fit in a single APP2 segment.
    #[error("ICC profile of {len} bytes exceeds the {max} byte single-segment limit", max = ICC_MAX_SINGLE_CHUNK)]
    ProfileTooLarge { len: usize },
}

/// Settings for turning a rendered JPEG into the print file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExportOptions {
    /// Resolution written into the JFIF header.
    pub dpi: u16,
    /// Color space the image was rendered in; selects the embedded profile.
    pub color_space: ColorSpace,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(350)
    }
}

impl ExportOptions {
    /// sRGB export at `dpi`.
    pub const fn new(dpi: u16) -> Self {
        Self {
            dpi,
            color_space: ColorSpace::Srgb,
        }
    }

    /// Export at the canvas resolution.
    pub fn for_canvas(canvas: &PrintCanvas) -> Self {
        Self::new(canvas.dpi)
    }

    /// Display P3 when the renderer produced wide-gamut pixels, sRGB otherwise.
    pub fn wide_gamut(mut self, supported: bool) -> Self {
        self.color_space = ColorSpace::for_wide_gamut(supported);
        self
    }

    pub fn color_space(mut self, space: ColorSpace) -> Self {
        self.color_space = space;
        self
    }

    /// Patch DPI and embed the matching ICC profile.
    ///
    /// Rejects input without an SOI marker and a zero resolution; otherwise
    /// identical to [`finalize_unchecked`](Self::finalize_unchecked).
    pub fn finalize(&self, jpeg: Vec<u8>) -> Result<Vec<u8>, ExportError> {
        if !jpeg::is_jpeg(&jpeg) {
            return Err(ExportError::NotJpeg);
        }
        if self.dpi == 0 {
            return Err(ExportError::ZeroDpi);
        }
        Ok(self.finalize_unchecked(jpeg))
    }

    /// Patch DPI and embed the matching ICC profile without validating input.
    ///
    /// Malformed input yields malformed output but never panics.
    pub fn finalize_unchecked(&self, jpeg: Vec<u8>) -> Vec<u8> {
        let input_len = jpeg.len();
        let patched = jpeg::patch_dpi(jpeg, self.dpi);
        let profile = build_profile(self.color_space);
        let out = jpeg::embed_profile(&patched, &profile);
        log::debug!(
            "exported {} -> {} bytes at {} dpi, {}",
            input_len,
            out.len(),
            self.dpi,
            self.color_space.description()
        );
        out
    }
}

/// [`embed_profile`](jpeg::embed_profile) for arbitrary profiles: rejects
/// input without SOI and profiles too large for one APP2 segment.
pub fn embed_profile_checked(jpeg: &[u8], profile: &[u8]) -> Result<Vec<u8>, ExportError> {
    if !jpeg::is_jpeg(jpeg) {
        return Err(ExportError::NotJpeg);
    }
    if profile.len() > ICC_MAX_SINGLE_CHUNK {
        return Err(ExportError::ProfileTooLarge { len: profile.len() });
    }
    Ok(jpeg::embed_profile(jpeg, profile))
}
