//! Big-endian writers for marker and profile surgery.
//!
//! [`FixedWriter`] writes at absolute offsets into an existing buffer (ICC
//! profile fields, JFIF density fields). [`SegmentBuilder`] assembles a JPEG
//! marker segment and fills in its length field on [`finish`](SegmentBuilder::finish).

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::math;

/// Encode `value` as ICC `s15Fixed16Number`: `round(value * 65536)` as a
/// two's complement 32-bit integer.
pub fn s15_fixed16(value: f64) -> u32 {
    math::round(value * 65536.0) as i32 as u32
}

/// Positioned big-endian writes into a fixed buffer.
///
/// Writes past the end of the buffer panic, like slice indexing.
pub struct FixedWriter<'a> {
    buf: &'a mut [u8],
}

impl<'a> FixedWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }

    pub fn u8_at(&mut self, offset: usize, value: u8) -> &mut Self {
        self.buf[offset] = value;
        self
    }

    pub fn u16_at(&mut self, offset: usize, value: u16) -> &mut Self {
        self.bytes_at(offset, &value.to_be_bytes())
    }

    pub fn u32_at(&mut self, offset: usize, value: u32) -> &mut Self {
        self.bytes_at(offset, &value.to_be_bytes())
    }

    /// Four-character signature such as `acsp` or `XYZ `.
    pub fn sig_at(&mut self, offset: usize, sig: &[u8; 4]) -> &mut Self {
        self.bytes_at(offset, sig)
    }

    pub fn s15_fixed16_at(&mut self, offset: usize, value: f64) -> &mut Self {
        self.u32_at(offset, s15_fixed16(value))
    }

    pub fn bytes_at(&mut self, offset: usize, bytes: &[u8]) -> &mut Self {
        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }
}

/// Builds one `FF xx <len> <payload>` marker segment.
///
/// ```
/// use zenposter::bytes::SegmentBuilder;
///
/// let seg = SegmentBuilder::new(0xE0).bytes(b"JFIF\0").u8(1).finish();
/// assert_eq!(seg, [0xFF, 0xE0, 0x00, 0x08, b'J', b'F', b'I', b'F', 0, 1]);
/// ```
#[cfg(feature = "alloc")]
pub struct SegmentBuilder {
    bytes: Vec<u8>,
}

#[cfg(feature = "alloc")]
impl SegmentBuilder {
    /// Start a segment with marker code `marker` (the byte after `0xFF`).
    pub fn new(marker: u8) -> Self {
        Self::with_capacity(marker, 0)
    }

    /// Start a segment with room for `payload` bytes.
    pub fn with_capacity(marker: u8, payload: usize) -> Self {
        let mut bytes = Vec::with_capacity(4 + payload);
        bytes.extend_from_slice(&[0xFF, marker, 0, 0]);
        Self { bytes }
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Length the segment's length field will hold: payload plus the two
    /// length bytes themselves.
    pub fn declared_len(&self) -> usize {
        self.bytes.len() - 2
    }

    /// Write the length field and return the segment bytes.
    ///
    /// Lengths above `u16::MAX` panic in debug builds and are truncated in
    /// release builds; callers that accept arbitrary payloads check
    /// [`declared_len`](Self::declared_len) first.
    pub fn finish(mut self) -> Vec<u8> {
        let declared = self.declared_len();
        debug_assert!(
            declared <= u16::MAX as usize,
            "segment length {declared} overflows the length field"
        );
        let len = declared as u16;
        self.bytes[2..4].copy_from_slice(&len.to_be_bytes());
        self.bytes
    }
}
