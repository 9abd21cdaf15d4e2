//! Marker-level surgery on encoded JPEG streams.
//!
//! Nothing here decodes pixels. Functions locate APPn segments by their
//! marker and length fields and rewrite or insert whole segments, leaving
//! every other byte, including the entropy-coded scan, untouched.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use crate::bytes::{FixedWriter, SegmentBuilder};

/// Start of image.
pub const SOI: [u8; 2] = [0xFF, 0xD8];
/// APP0 marker code (JFIF).
pub const APP0: u8 = 0xE0;
/// APP2 marker code (ICC profile chunks).
pub const APP2: u8 = 0xE2;
/// Start of scan. No APPn segments follow it.
const SOS: u8 = 0xDA;

/// Identifier at the start of a JFIF APP0 payload.
pub const JFIF_SIGNATURE: &[u8; 5] = b"JFIF\0";
/// Identifier at the start of an ICC APP2 payload.
pub const ICC_SIGNATURE: &[u8; 12] = b"ICC_PROFILE\0";

/// Size of a synthesized JFIF APP0 segment, marker included.
pub const JFIF_SEGMENT_LEN: usize = 18;
/// Smallest declared length of a JFIF APP0 that carries density fields.
const JFIF_MIN_LEN: u16 = 16;
/// Bytes of ICC APP2 payload ahead of the profile: signature, sequence
/// number, chunk count.
pub const ICC_HEADER_LEN: usize = ICC_SIGNATURE.len() + 2;
/// Largest profile that fits in a single APP2 segment.
pub const ICC_MAX_SINGLE_CHUNK: usize = u16::MAX as usize - 2 - ICC_HEADER_LEN;

/// True if `data` starts with the SOI marker.
pub fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&SOI)
}

/// A marker segment with a length field, borrowed from the stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Marker code, the byte after `0xFF`.
    pub marker: u8,
    /// Offset of the `0xFF` byte in the stream.
    pub offset: usize,
    /// Payload, excluding marker and length bytes.
    pub data: &'a [u8],
}

impl Segment<'_> {
    /// Total size in the stream: marker, length field, and payload.
    pub fn total_len(&self) -> usize {
        4 + self.data.len()
    }

    pub fn is_jfif(&self) -> bool {
        self.marker == APP0 && self.data.starts_with(JFIF_SIGNATURE)
    }

    pub fn is_icc(&self) -> bool {
        self.marker == APP2 && self.data.starts_with(ICC_SIGNATURE)
    }
}

/// Iterate over the length-carrying segments ahead of the first scan.
///
/// Yields nothing for data that does not start with SOI. Stops at SOS, at a
/// truncated segment, or at a length field below 2.
pub fn segments(data: &[u8]) -> Segments<'_> {
    Segments {
        data,
        pos: if is_jpeg(data) { 2 } else { data.len() },
    }
}

/// Iterator returned by [`segments`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let data = self.data;
        loop {
            if self.pos + 1 >= data.len() {
                return None;
            }
            if data[self.pos] != 0xFF {
                self.pos += 1;
                continue;
            }
            let marker = data[self.pos + 1];
            // Fill bytes before a marker.
            if marker == 0xFF {
                self.pos += 1;
                continue;
            }
            // Standalone markers: SOI, EOI, RSTn, TEM, stuffed zero.
            if matches!(marker, 0x00 | 0x01 | 0xD0..=0xD9) {
                self.pos += 2;
                continue;
            }
            if marker == SOS {
                self.pos = data.len();
                return None;
            }
            let offset = self.pos;
            let Some(len) = read_u16(data, offset + 2) else {
                self.pos = data.len();
                return None;
            };
            let len = len as usize;
            if len < 2 || offset + 2 + len > data.len() {
                self.pos = data.len();
                return None;
            }
            self.pos = offset + 2 + len;
            return Some(Segment {
                marker,
                offset,
                data: &data[offset + 4..offset + 2 + len],
            });
        }
    }
}

/// Pixel density unit of a JFIF header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DensityUnit {
    /// Aspect ratio only.
    None,
    PerInch,
    PerCentimetre,
    Other(u8),
}

impl DensityUnit {
    pub const fn from_byte(b: u8) -> Self {
        match b {
            0 => Self::None,
            1 => Self::PerInch,
            2 => Self::PerCentimetre,
            other => Self::Other(other),
        }
    }

    pub const fn to_byte(self) -> u8 {
        match self {
            Self::None => 0,
            Self::PerInch => 1,
            Self::PerCentimetre => 2,
            Self::Other(b) => b,
        }
    }
}

/// Density fields of a JFIF APP0 segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Density {
    pub unit: DensityUnit,
    pub x: u16,
    pub y: u16,
}

/// Read the density of the first JFIF APP0 segment, if there is one.
pub fn jfif_density(data: &[u8]) -> Option<Density> {
    let seg = segments(data).find(Segment::is_jfif)?;
    // JFIF\0, version (2), unit, Xdensity, Ydensity
    let payload = seg.data;
    Some(Density {
        unit: DensityUnit::from_byte(*payload.get(7)?),
        x: read_u16(payload, 8)?,
        y: read_u16(payload, 10)?,
    })
}

/// Offset of the first JFIF APP0 segment whose density fields can be patched.
///
/// Matches byte-for-byte from the start of the buffer rather than walking
/// segments, and only considers offsets with a full segment after them.
#[cfg(feature = "alloc")]
fn find_jfif(data: &[u8]) -> Option<usize> {
    let window = data.len().saturating_sub(JFIF_SEGMENT_LEN);
    (0..window).find(|&i| {
        data[i] == 0xFF
            && data[i + 1] == APP0
            && read_u16(data, i + 2).is_some_and(|len| len >= JFIF_MIN_LEN)
            && &data[i + 4..i + 9] == JFIF_SIGNATURE
    })
}

/// Set the JPEG's print resolution to `dpi` dots per inch in both axes.
///
/// An existing JFIF APP0 segment is patched in place and the length is
/// unchanged. Otherwise an 18-byte JFIF 1.1 segment is inserted right after
/// SOI. Never fails: input that is too short to hold a JFIF segment always
/// takes the insertion path.
#[cfg(feature = "alloc")]
pub fn patch_dpi(mut data: Vec<u8>, dpi: u16) -> Vec<u8> {
    if let Some(at) = find_jfif(&data) {
        log::trace!("patching JFIF density at offset {at} to {dpi} dpi");
        FixedWriter::new(&mut data)
            .u8_at(at + 11, DensityUnit::PerInch.to_byte())
            .u16_at(at + 12, dpi)
            .u16_at(at + 14, dpi);
        return data;
    }

    log::trace!("no JFIF segment, inserting one at {dpi} dpi");
    let app0 = jfif_segment(dpi);
    splice(&data, 2, &app0)
}

/// A JFIF 1.1 APP0 segment with square `dpi` density and no thumbnail.
#[cfg(feature = "alloc")]
pub fn jfif_segment(dpi: u16) -> Vec<u8> {
    SegmentBuilder::with_capacity(APP0, JFIF_SEGMENT_LEN - 4)
        .bytes(JFIF_SIGNATURE)
        .u8(1)
        .u8(1)
        .u8(DensityUnit::PerInch.to_byte())
        .u16(dpi)
        .u16(dpi)
        .u8(0)
        .u8(0)
        .finish()
}

/// Where an ICC segment goes: right after SOI, or after an APP0 segment that
/// immediately follows SOI.
///
/// Clamped to the buffer length, so truncated input cannot panic.
pub fn icc_insert_offset(data: &[u8]) -> usize {
    let at = if data.get(2..4) == Some(&[0xFF, APP0][..]) {
        read_u16(data, 4).map_or(2, |len| 4 + len as usize)
    } else {
        2
    };
    at.min(data.len())
}

/// The single APP2 segment carrying `profile`.
///
/// Profiles longer than [`ICC_MAX_SINGLE_CHUNK`] would overflow the length
/// field; [`embed_profile_checked`](crate::export::embed_profile_checked)
/// rejects them.
#[cfg(feature = "alloc")]
pub fn icc_segment(profile: &[u8]) -> Vec<u8> {
    SegmentBuilder::with_capacity(APP2, ICC_HEADER_LEN + profile.len())
        .bytes(ICC_SIGNATURE)
        // Sequence number, then total chunk count.
        .u8(1)
        .u8(1)
        .bytes(profile)
        .finish()
}

/// Embed `profile` as a single ICC APP2 segment ahead of every other marker
/// except SOI and a leading JFIF APP0.
///
/// Input is assumed to start with SOI and is not validated; see
/// [`ExportOptions::finalize`](crate::ExportOptions::finalize) for the
/// checked pipeline.
#[cfg(feature = "alloc")]
pub fn embed_profile(data: &[u8], profile: &[u8]) -> Vec<u8> {
    let at = icc_insert_offset(data);
    log::trace!("embedding {} byte ICC profile at offset {at}", profile.len());
    splice(data, at, &icc_segment(profile))
}

/// Copy of `data` with `segment` inserted at `at` (clamped to the length).
#[cfg(feature = "alloc")]
fn splice(data: &[u8], at: usize, segment: &[u8]) -> Vec<u8> {
    let at = at.min(data.len());
    let mut out = Vec::with_capacity(data.len() + segment.len());
    out.extend_from_slice(&data[..at]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&data[at..]);
    out
}

fn read_u16(buf: &[u8], offset: usize) -> Option<u16> {
    let b = buf.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([b[0], b[1]]))
}
