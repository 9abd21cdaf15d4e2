//! Deterministic photo poster layouts and print-ready JPEG metadata.
//!
//! Pure geometry and byte surgery: no pixel operations, no I/O, `no_std`
//! compatible. Layouts and the marker-splicing export path need `alloc`; ICC
//! profile construction works without it.
//!
//! # Modules
//!
//! - [`layout`] — Procedural slot layout for a two-page spread
//! - [`rng`] — Seeded Park–Miller stream and the [`RandomSource`](rng::RandomSource) seam
//! - [`style`] — Layout styles, frame kinds, tape colors
//! - [`fit`] — Height fitting of slots to photos, cover crops
//! - [`canvas`] — Physical spread size, resolution, display size
//! - [`jpeg`] — JFIF density patching and ICC APP2 embedding
//! - [`icc`] — sRGB and Display P3 display profiles
//! - [`export`] — The checked DPI + profile pipeline
//! - [`bytes`] — Big-endian writers for marker segments and profile fields
//! - `svg` — SVG preview of a layout (feature `svg`)
//!
//! # Example
//!
//! ```
//! use zenposter::{ExportOptions, PrintCanvas, generate_layout};
//!
//! let layout = generate_layout(18, 2);
//! assert_eq!(layout.slots.len(), 18);
//!
//! let canvas = PrintCanvas::default();
//! let encoded = vec![0xFF, 0xD8, 0xFF, 0xD9];
//! let print = ExportOptions::for_canvas(&canvas).finalize(encoded).unwrap();
//! assert_eq!(print.len(), 4 + 18 + 514);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod math;

pub mod bytes;
pub mod canvas;
#[cfg(feature = "alloc")]
pub mod export;
#[cfg(feature = "alloc")]
pub mod fit;
pub mod icc;
pub mod jpeg;
#[cfg(feature = "alloc")]
pub mod layout;
pub mod rng;
pub mod style;
#[cfg(feature = "svg")]
pub mod svg;

pub use canvas::{PHOTO_MAX, PHOTO_MIN, PrintCanvas, clamp_photo_count, step_photo_count};
pub use icc::{ColorSpace, PROFILE_SIZE, build_profile};
pub use jpeg::{Density, DensityUnit, jfif_density};
pub use style::{FrameKind, Style, TapeColor};

#[cfg(feature = "alloc")]
pub use export::{ExportError, ExportOptions, embed_profile_checked};
#[cfg(feature = "alloc")]
pub use fit::{CropRect, Placement, cover_crop, fit_height};
#[cfg(feature = "alloc")]
pub use jpeg::{embed_profile, patch_dpi};
#[cfg(feature = "alloc")]
pub use layout::{Band, Frame, Layout, Page, Slot, generate_layout};
