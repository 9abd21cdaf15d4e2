//! Minimal ICC v2.1 display profiles for sRGB and Display P3.
//!
//! Each profile is exactly [`PROFILE_SIZE`] bytes: a 128-byte header, a
//! nine-entry tag table, a description, a copyright, the D50 white point,
//! three D50-adapted primaries, and one gamma curve shared by all three
//! channels.
//!
//! ```text
//!   0 ┌────────────────────┐
//!     │ header             │
//! 128 ├────────────────────┤
//!     │ tag count + table  │  9 × (sig, offset, size)
//! 240 ├────────────────────┤
//!     │ desc               │  112
//! 352 │ cprt               │  48
//! 400 │ wtpt               │  20
//! 420 │ rXYZ  gXYZ  bXYZ   │  3 × 20
//! 480 │ curv (r/g/b TRC)   │  16
//! 496 └────────────────────┘
//! ```
//!
//! ```
//! use zenposter::{ColorSpace, build_profile};
//!
//! let p3 = build_profile(ColorSpace::DisplayP3);
//! assert_eq!(p3.len(), 496);
//! assert_eq!(&p3[36..40], b"acsp");
//! ```

use crate::bytes::FixedWriter;

/// Total size of every profile built here.
pub const PROFILE_SIZE: usize = 496;
/// Number of entries in the tag table.
pub const TAG_COUNT: u32 = 9;

/// ICC version 2.1.0.0.
const VERSION: u32 = 0x0210_0000;
/// Profile creation date and time: 1998-02-09 06:49:00.
const CREATED: [u16; 6] = [1998, 2, 9, 6, 49, 0];
/// D50 illuminant, also used as the media white point.
const D50: [f64; 3] = [0.96429, 1.0, 0.82513];
/// Gamma 563/256 ≈ 2.199 as `u8Fixed8Number`.
const GAMMA_U8F8: u16 = 563;
const COPYRIGHT: &[u8] = b"CC0 - No Rights Reserved";

const TAG_TABLE: usize = 128;
const DESC_OFFSET: usize = 240;
const DESC_SIZE: usize = 112;
const CPRT_OFFSET: usize = 352;
const CPRT_SIZE: usize = 48;
const WTPT_OFFSET: usize = 400;
const XYZ_SIZE: usize = 20;
const RXYZ_OFFSET: usize = 420;
const GXYZ_OFFSET: usize = 440;
const BXYZ_OFFSET: usize = 460;
const TRC_OFFSET: usize = 480;
const TRC_SIZE: usize = 16;

/// Tag signature, data offset, data size — in table order.
const TAGS: [(&[u8; 4], usize, usize); TAG_COUNT as usize] = [
    (b"desc", DESC_OFFSET, DESC_SIZE),
    (b"cprt", CPRT_OFFSET, CPRT_SIZE),
    (b"wtpt", WTPT_OFFSET, XYZ_SIZE),
    (b"rXYZ", RXYZ_OFFSET, XYZ_SIZE),
    (b"gXYZ", GXYZ_OFFSET, XYZ_SIZE),
    (b"bXYZ", BXYZ_OFFSET, XYZ_SIZE),
    (b"rTRC", TRC_OFFSET, TRC_SIZE),
    (b"gTRC", TRC_OFFSET, TRC_SIZE),
    (b"bTRC", TRC_OFFSET, TRC_SIZE),
];

/// Device color space the exported image was rendered in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// IEC 61966-2-1 sRGB.
    #[default]
    Srgb,
    /// Display P3: DCI-P3 primaries, D65 white, sRGB-like transfer.
    DisplayP3,
}

impl ColorSpace {
    /// Wide gamut when the renderer supports it, sRGB otherwise.
    pub const fn for_wide_gamut(supported: bool) -> Self {
        if supported { Self::DisplayP3 } else { Self::Srgb }
    }

    /// Profile description string.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Srgb => "sRGB IEC61966-2.1",
            Self::DisplayP3 => "Display P3",
        }
    }

    /// D50-adapted XYZ of the red, green, and blue primaries.
    pub const fn primaries(self) -> [[f64; 3]; 3] {
        match self {
            Self::Srgb => [
                [0.43607, 0.22249, 0.01392],
                [0.38515, 0.71689, 0.09707],
                [0.14307, 0.06061, 0.71393],
            ],
            Self::DisplayP3 => [
                [0.51512, 0.2412, -0.00105],
                [0.29198, 0.69225, 0.04189],
                [0.1571, 0.06657, 0.78407],
            ],
        }
    }
}

/// Build the display profile for `space`.
pub fn build_profile(space: ColorSpace) -> [u8; PROFILE_SIZE] {
    let mut buf = [0u8; PROFILE_SIZE];
    let mut w = FixedWriter::new(&mut buf);

    // Header
    w.u32_at(0, PROFILE_SIZE as u32)
        .u32_at(8, VERSION)
        .sig_at(12, b"mntr")
        .sig_at(16, b"RGB ")
        .sig_at(20, b"XYZ ");
    for (i, field) in CREATED.iter().enumerate() {
        w.u16_at(24 + i * 2, *field);
    }
    w.sig_at(36, b"acsp");
    // Rendering intent: perceptual.
    w.u32_at(64, 0);
    write_xyz_values(&mut w, 68, D50);

    // Tag table
    w.u32_at(TAG_TABLE, TAG_COUNT);
    for (i, (sig, offset, size)) in TAGS.iter().enumerate() {
        let entry = TAG_TABLE + 4 + i * 12;
        w.sig_at(entry, sig)
            .u32_at(entry + 4, *offset as u32)
            .u32_at(entry + 8, *size as u32);
    }

    // desc: ASCII count includes the terminating NUL.
    let desc = space.description().as_bytes();
    w.sig_at(DESC_OFFSET, b"desc")
        .u32_at(DESC_OFFSET + 4, 0)
        .u32_at(DESC_OFFSET + 8, desc.len() as u32 + 1)
        .bytes_at(DESC_OFFSET + 12, desc);

    w.sig_at(CPRT_OFFSET, b"text")
        .u32_at(CPRT_OFFSET + 4, 0)
        .bytes_at(CPRT_OFFSET + 8, COPYRIGHT);

    let [r, g, b] = space.primaries();
    write_xyz_tag(&mut w, WTPT_OFFSET, D50);
    write_xyz_tag(&mut w, RXYZ_OFFSET, r);
    write_xyz_tag(&mut w, GXYZ_OFFSET, g);
    write_xyz_tag(&mut w, BXYZ_OFFSET, b);

    // One-entry curve: pure gamma.
    w.sig_at(TRC_OFFSET, b"curv")
        .u32_at(TRC_OFFSET + 4, 0)
        .u32_at(TRC_OFFSET + 8, 1)
        .u16_at(TRC_OFFSET + 12, GAMMA_U8F8);

    log::trace!("built {} byte {} profile", PROFILE_SIZE, space.description());
    buf
}

fn write_xyz_tag(w: &mut FixedWriter<'_>, offset: usize, xyz: [f64; 3]) {
    w.sig_at(offset, b"XYZ ").u32_at(offset + 4, 0);
    write_xyz_values(w, offset + 8, xyz);
}

fn write_xyz_values(w: &mut FixedWriter<'_>, offset: usize, xyz: [f64; 3]) {
    for (i, v) in xyz.iter().enumerate() {
        w.s15_fixed16_at(offset + i * 4, *v);
    }
}

/// Tag table entries of a profile: `(signature, offset, size)`.
///
/// Stops early if the table runs past the end of `profile`.
pub fn tag_entries(profile: &[u8]) -> impl Iterator<Item = ([u8; 4], u32, u32)> + '_ {
    let count = read_u32(profile, TAG_TABLE).unwrap_or(0) as usize;
    (0..count).map_while(move |i| {
        let entry = TAG_TABLE + 4 + i * 12;
        let sig = profile.get(entry..entry + 4)?.try_into().ok()?;
        Some((sig, read_u32(profile, entry + 4)?, read_u32(profile, entry + 8)?))
    })
}

fn read_u32(buf: &[u8], offset: usize) -> Option<u32> {
    let b = buf.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn be32(p: &[u8], off: usize) -> u32 {
        read_u32(p, off).unwrap()
    }

    // ── Header ──────────────────────────────────────────────────────────

    #[test]
    fn header_fields() {
        for space in [ColorSpace::Srgb, ColorSpace::DisplayP3] {
            let p = build_profile(space);
            assert_eq!(be32(&p, 0), 496);
            assert_eq!(be32(&p, 8), 0x0210_0000);
            assert_eq!(&p[12..16], b"mntr");
            assert_eq!(&p[16..20], b"RGB ");
            assert_eq!(&p[20..24], b"XYZ ");
            assert_eq!(&p[24..26], &1998u16.to_be_bytes());
            assert_eq!(&p[36..40], b"acsp");
            assert_eq!(be32(&p, 64), 0);
            assert_eq!(be32(&p, 68), 63_196);
            assert_eq!(be32(&p, 72), 65_536);
        }
    }

    // ── Tag table ───────────────────────────────────────────────────────

    #[test]
    fn nine_tags_with_shared_curve() {
        let p = build_profile(ColorSpace::Srgb);
        let tags: alloc::vec::Vec<_> = tag_entries(&p).collect();
        assert_eq!(tags.len(), 9);
        assert_eq!(&tags[0].0, b"desc");
        assert_eq!((tags[0].1, tags[0].2), (240, 112));
        let trc: alloc::vec::Vec<_> = tags[6..].iter().map(|t| (t.1, t.2)).collect();
        assert_eq!(trc, [(480, 16); 3]);
        for (_, offset, size) in &tags {
            assert!((offset + size) as usize <= PROFILE_SIZE);
        }
    }

    #[test]
    fn tag_entries_tolerates_truncation() {
        let p = build_profile(ColorSpace::Srgb);
        assert_eq!(tag_entries(&p[..150]).count(), 1);
        assert_eq!(tag_entries(&p[..100]).count(), 0);
    }

    // ── Tag data ────────────────────────────────────────────────────────

    #[test]
    fn description_is_nul_padded() {
        let p = build_profile(ColorSpace::DisplayP3);
        assert_eq!(&p[240..244], b"desc");
        assert_eq!(be32(&p, 248), 11);
        assert_eq!(&p[252..262], b"Display P3");
        assert!(p[262..352].iter().all(|&b| b == 0));
    }

    #[test]
    fn copyright_and_curve() {
        let p = build_profile(ColorSpace::Srgb);
        assert_eq!(&p[352..356], b"text");
        assert_eq!(&p[360..384], b"CC0 - No Rights Reserved");
        assert_eq!(&p[480..484], b"curv");
        assert_eq!(be32(&p, 488), 1);
        assert_eq!(&p[492..494], &[0x02, 0x33]);
    }

    #[test]
    fn primaries_differ_between_spaces() {
        let s = build_profile(ColorSpace::Srgb);
        let p = build_profile(ColorSpace::DisplayP3);
        assert_eq!(&s[400..420], &p[400..420]);
        assert_ne!(&s[420..480], &p[420..480]);
        // P3 red has a small negative Z.
        assert_eq!(be32(&p, 436), 0xFFFF_FFBB);
        assert_eq!(&s[420..440], &[
            b'X', b'Y', b'Z', b' ', 0, 0, 0, 0, 0x00, 0x00, 0x6F, 0xA2, 0x00, 0x00, 0x38, 0xF5,
            0x00, 0x00, 0x03, 0x90
        ]);
    }

    #[test]
    fn wide_gamut_flag_selects_space() {
        assert_eq!(ColorSpace::for_wide_gamut(true), ColorSpace::DisplayP3);
        assert_eq!(ColorSpace::for_wide_gamut(false), ColorSpace::Srgb);
    }
}
