//! Procedural photo slot layout for a two-page spread.
//!
//! Given a photo count and a style, produces a reproducible arrangement of
//! uniformly sized slots. Each page half is cut into row bands; slots are
//! spread evenly across their row, jittered, and clamped so they never leave
//! their band. All coordinates are percentages of the spread.
//!
//! ```text
//!   5% ┌──────── left page ────────┐ fold ┌──────── right page ───────┐
//!      │ 1%                    44% │      │ 54%                   97% │
//!      │  ┌──┐    ┌──┐    ┌──┐     │      │  ┌──┐   ┌──┐    ┌──┐      │  row 0
//!      │  └──┘    └──┘    └──┘     │      │  └──┘   └──┘    └──┘      │
//!      │  ┌──┐    ┌──┐    ┌──┐     │      │  ┌──┐        ┌──┐         │  row 1
//!      │  └──┘    └──┘    └──┘     │      │  └──┘        └──┘         │
//!      │  ┌──┐         ┌──┐        │      │  ┌──┐        ┌──┐         │  row 2
//!  92% └───────────────────────────┘      └───────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use zenposter::{FrameKind, generate_layout};
//!
//! let layout = generate_layout(15, 0);
//! assert_eq!(layout.slots.len(), 15);
//! assert_eq!(layout.count_of(FrameKind::Terminal), 5);
//! assert_eq!(layout, generate_layout(15, 0));
//! ```

use alloc::vec::Vec;

use crate::canvas::{PHOTO_MAX, PHOTO_MIN};
use crate::math;
use crate::rng::{ParkMiller, RandomSource};
use crate::style::{FrameKind, Style, TapeColor};

/// Share of slots forced into terminal chrome.
pub const TERMINAL_SHARE: f64 = 0.3;

/// Top of the usable vertical area, in percent.
const USABLE_TOP: f64 = 5.0;
/// Bottom of the usable vertical area, in percent.
const USABLE_BOTTOM: f64 = 92.0;
/// Gap left under each row band, in percent.
const ROW_GAP: f64 = 2.0;
/// Full width of the horizontal and vertical jitter, in percent.
const JITTER: f64 = 3.0;
/// Full width of the tape rotation range, in degrees.
const TAPE_TILT: f64 = 6.0;
/// How far a terminal slot may grow past its row band when height-fitted.
const TERMINAL_OVERHANG: f64 = 5.0;

/// Which half of the spread a slot sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Left,
    Right,
}

impl Page {
    /// Horizontal span of this page's column band, `(left, right)` in percent.
    pub const fn columns(self) -> (f64, f64) {
        match self {
            Self::Left => (1.0, 44.0),
            Self::Right => (54.0, 97.0),
        }
    }
}

/// The rectangular zone a slot was generated into.
///
/// A slot's full extent (`left..left+width`, `top..top+height`) lies inside
/// its band, up to the one-decimal rounding of the slot position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Band {
    pub page: Page,
    /// Row index within the page, from the top.
    pub row: u8,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Band {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Decoration of a slot, with the data that only some decorations carry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Frame {
    Shadow,
    Polaroid,
    Tape {
        color: TapeColor,
        /// Tilt of the tape strip in degrees, independent of the slot's.
        rotation: f64,
    },
    Terminal {
        /// Lowest edge (percent) the slot may reach when its height is
        /// fitted to a photo. See [`fit_height`](crate::fit::fit_height).
        max_bottom: f64,
    },
}

impl Frame {
    pub const fn kind(&self) -> FrameKind {
        match self {
            Self::Shadow => FrameKind::Shadow,
            Self::Polaroid => FrameKind::Polaroid,
            Self::Tape { .. } => FrameKind::Tape,
            Self::Terminal { .. } => FrameKind::Terminal,
        }
    }
}

/// One photo placeholder.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Slot {
    /// 1-based id, contiguous within a layout.
    pub id: u32,
    /// Left edge in percent of the spread width.
    pub left: f64,
    /// Top edge in percent of the spread height.
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise tilt in degrees.
    pub rotation: f64,
    /// Stacking order, `10..=15`.
    pub z: u32,
    pub frame: Frame,
    pub band: Band,
}

impl Slot {
    pub const fn frame_kind(&self) -> FrameKind {
        self.frame.kind()
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Generated geometry, as the starting point for caller-held overrides.
    pub fn placement(&self) -> crate::fit::Placement {
        crate::fit::Placement {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
            manual: false,
        }
    }
}

/// A generated arrangement.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Name of the style the layout was generated with.
    pub name: &'static str,
    pub style: Style,
    /// Slots in id order: left page first, rows top to bottom, left to right.
    pub slots: Vec<Slot>,
}

impl Layout {
    /// Generate the layout for `count` photos in `style`.
    ///
    /// `count` is clamped to [`PHOTO_MIN`]`..=`[`PHOTO_MAX`] first; the seed
    /// uses the clamped value.
    pub fn generate(count: u32, style: Style) -> Self {
        let count = count.clamp(PHOTO_MIN, PHOTO_MAX);
        let mut rng = ParkMiller::for_layout(count, style.index());
        Self::generate_with(count, style, &mut rng)
    }

    /// Generate with a caller-supplied random stream.
    ///
    /// Draws happen in a fixed order: the terminal pre-selection shuffle,
    /// then for each slot the horizontal jitter, vertical offset (only when
    /// the row has slack), vertical jitter, rotation, frame pick (non-terminal
    /// slots only), stacking order, and tape color and tilt (tape slots only).
    /// Replaying the same stream reproduces the layout exactly.
    ///
    /// `count` is used as given; zero yields an empty layout.
    pub fn generate_with(count: u32, style: Style, rng: &mut impl RandomSource) -> Self {
        let size = SizeTier::for_count(count).size();
        let rows = row_count(count);
        let terminal = select_terminal_ids(count, rng);

        let left_count = count.div_ceil(2);
        let right_count = count - left_count;

        let mut builder = PageBuilder {
            rng,
            style,
            size,
            rows,
            terminal: &terminal,
            next_id: 1,
            slots: Vec::with_capacity(count as usize),
        };
        builder.fill(Page::Left, left_count);
        builder.fill(Page::Right, right_count);

        let slots = builder.slots;
        log::debug!(
            "generated {} with {} slots ({} terminal, {}% slots, {} rows)",
            style.name(),
            slots.len(),
            terminal.len(),
            size,
            rows
        );
        Self {
            name: style.name(),
            style,
            slots,
        }
    }

    /// Look up a slot by id.
    pub fn slot(&self, id: u32) -> Option<&Slot> {
        // Ids are contiguous and in order.
        let i = usize::try_from(id.checked_sub(1)?).ok()?;
        self.slots.get(i).filter(|s| s.id == id)
    }

    /// Number of slots with the given frame kind.
    pub fn count_of(&self, kind: FrameKind) -> usize {
        self.slots.iter().filter(|s| s.frame_kind() == kind).count()
    }

    /// Highest stacking order of any slot, or `None` for an empty layout.
    pub fn max_z(&self) -> Option<u32> {
        self.slots.iter().map(|s| s.z).max()
    }
}

/// Generate the layout for `count` photos (10–30) in style `style_index` (0–2).
///
/// Out-of-range inputs are clamped before seeding.
pub fn generate_layout(count: u32, style_index: u32) -> Layout {
    Layout::generate(count, Style::from_index(style_index))
}

/// Uniform slot size by photo count: fewer photos, bigger slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SizeTier {
    /// Up to 12 photos: 20%.
    Large,
    /// 13–16 photos: 17%.
    Medium,
    /// 17–20 photos: 14%.
    Compact,
    /// 21–24 photos: 12%.
    Small,
    /// 25 or more photos: 10%.
    Tiny,
}

impl SizeTier {
    pub const fn for_count(count: u32) -> Self {
        match count {
            0..=12 => Self::Large,
            13..=16 => Self::Medium,
            17..=20 => Self::Compact,
            21..=24 => Self::Small,
            _ => Self::Tiny,
        }
    }

    /// Slot width and height in percent.
    pub const fn size(self) -> f64 {
        match self {
            Self::Large => 20.0,
            Self::Medium => 17.0,
            Self::Compact => 14.0,
            Self::Small => 12.0,
            Self::Tiny => 10.0,
        }
    }
}

/// Rows per page: 3 up to 18 photos, 4 above.
pub const fn row_count(count: u32) -> usize {
    if count <= 18 { 3 } else { 4 }
}

/// How many slots go into each row: `floor(n / rows)` each, with the
/// remainder handed to the first rows.
pub fn distribute_rows(n: u32, rows: usize) -> Vec<u32> {
    let rows_u = rows as u32;
    let base = n / rows_u;
    let rem = n % rows_u;
    (0..rows_u).map(|i| base + u32::from(i < rem)).collect()
}

/// Number of terminal-framed slots for `count` photos: `round(count * 0.3)`.
pub fn terminal_count(count: u32) -> usize {
    math::round(count as f64 * TERMINAL_SHARE) as usize
}

/// Row band `row` of `rows` on `page`.
pub fn row_band(page: Page, row: usize, rows: usize) -> Band {
    let row_h = (USABLE_BOTTOM - USABLE_TOP) / rows as f64;
    let (left, right) = page.columns();
    Band {
        page,
        row: row as u8,
        left,
        right,
        top: USABLE_TOP + row_h * row as f64,
        bottom: USABLE_TOP + row_h * (row + 1) as f64 - ROW_GAP,
    }
}

/// Shuffle all ids and keep the first `terminal_count` of them.
///
/// Consumes `count - 1` draws, ahead of any per-slot draw.
fn select_terminal_ids(count: u32, rng: &mut impl RandomSource) -> Vec<u32> {
    let mut ids: Vec<u32> = (1..=count).collect();
    rng.shuffle(&mut ids);
    ids.truncate(terminal_count(count));
    ids
}

struct PageBuilder<'a, R: RandomSource> {
    rng: &'a mut R,
    style: Style,
    size: f64,
    rows: usize,
    terminal: &'a [u32],
    next_id: u32,
    slots: Vec<Slot>,
}

impl<R: RandomSource> PageBuilder<'_, R> {
    fn fill(&mut self, page: Page, count: u32) {
        for (row, in_row) in distribute_rows(count, self.rows).into_iter().enumerate() {
            if in_row == 0 {
                continue;
            }
            let band = row_band(page, row, self.rows);
            for col in 0..in_row {
                let slot = self.place(band, col, in_row);
                log::trace!(
                    "slot {} at ({}, {}) rot {} z {} {}",
                    slot.id,
                    slot.left,
                    slot.top,
                    slot.rotation,
                    slot.z,
                    slot.frame_kind()
                );
                self.slots.push(slot);
            }
        }
    }

    fn place(&mut self, band: Band, col: u32, in_row: u32) -> Slot {
        let size = self.size;
        let id = self.next_id;
        self.next_id += 1;

        let avail_w = band.right - band.left - size;
        let spacing = if in_row > 1 {
            avail_w / (in_row - 1) as f64
        } else {
            avail_w / 2.0
        };
        let mut left = band.left + spacing * col as f64;
        left += (self.rng.next_f64() - 0.5) * JITTER;
        let left = left.min(band.right - size).max(band.left);

        let slack = band.bottom - band.top - size;
        let offset = if slack > 0.0 {
            self.rng.next_f64() * slack
        } else {
            0.0
        };
        let mut top = band.top + offset;
        top += (self.rng.next_f64() - 0.5) * JITTER;
        let top = top.min(band.bottom - size).max(band.top);

        let max_rot = self.style.max_rotation();
        let rotation = math::round_tenth((self.rng.next_f64() - 0.5) * 2.0 * max_rot);

        let is_terminal = self.terminal.contains(&id);
        let kind = if is_terminal {
            FrameKind::Terminal
        } else {
            *self.rng.pick(self.style.frame_weights())
        };

        let z = 10 + math::floor(self.rng.next_f64() * 6.0) as u32;

        let frame = match kind {
            FrameKind::Shadow => Frame::Shadow,
            FrameKind::Polaroid => Frame::Polaroid,
            FrameKind::Tape => {
                let color = *self.rng.pick(&TapeColor::PALETTE);
                let rotation = math::round_tenth((self.rng.next_f64() - 0.5) * TAPE_TILT);
                Frame::Tape { color, rotation }
            }
            FrameKind::Terminal => Frame::Terminal {
                max_bottom: band.bottom + TERMINAL_OVERHANG,
            },
        };

        Slot {
            id,
            left: math::round_tenth(left),
            top: math::round_tenth(top),
            width: size,
            height: size,
            rotation,
            z,
            frame,
            band,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Tiers and distribution ──────────────────────────────────────────

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(SizeTier::for_count(12).size(), 20.0);
        assert_eq!(SizeTier::for_count(13).size(), 17.0);
        assert_eq!(SizeTier::for_count(16).size(), 17.0);
        assert_eq!(SizeTier::for_count(20).size(), 14.0);
        assert_eq!(SizeTier::for_count(24).size(), 12.0);
        assert_eq!(SizeTier::for_count(25).size(), 10.0);
        assert_eq!(SizeTier::for_count(30).size(), 10.0);
    }

    #[test]
    fn rows_switch_above_eighteen() {
        assert_eq!(row_count(18), 3);
        assert_eq!(row_count(19), 4);
    }

    #[test]
    fn remainder_goes_to_first_rows() {
        assert_eq!(distribute_rows(8, 3), [3, 3, 2]);
        assert_eq!(distribute_rows(7, 3), [3, 2, 2]);
        assert_eq!(distribute_rows(5, 3), [2, 2, 1]);
        assert_eq!(distribute_rows(15, 4), [4, 4, 4, 3]);
        assert_eq!(distribute_rows(2, 3), [1, 1, 0]);
    }

    #[test]
    fn terminal_count_rounds() {
        assert_eq!(terminal_count(10), 3);
        assert_eq!(terminal_count(12), 4); // 3.6
        assert_eq!(terminal_count(15), 5); // 4.5 rounds up
        assert_eq!(terminal_count(25), 8); // 7.5 rounds up
        assert_eq!(terminal_count(28), 8); // 8.4
        assert_eq!(terminal_count(30), 9);
    }

    // ── Bands ───────────────────────────────────────────────────────────

    #[test]
    fn three_row_bands() {
        let b = row_band(Page::Left, 0, 3);
        assert_eq!((b.top, b.bottom), (5.0, 32.0));
        let b = row_band(Page::Right, 2, 3);
        assert_eq!((b.top, b.bottom), (63.0, 90.0));
        assert_eq!((b.left, b.right), (54.0, 97.0));
    }

    #[test]
    fn four_row_bands() {
        let b = row_band(Page::Left, 1, 4);
        assert_eq!(b.top, 26.75);
        assert_eq!(b.bottom, 46.5);
        assert_eq!(b.height(), 19.75);
        assert_eq!(b.width(), 43.0);
    }

    // ── Generation ──────────────────────────────────────────────────────

    #[test]
    fn ids_are_contiguous() {
        let l = generate_layout(23, 1);
        for (i, s) in l.slots.iter().enumerate() {
            assert_eq!(s.id, i as u32 + 1);
        }
        assert_eq!(l.slot(23).map(|s| s.id), Some(23));
        assert!(l.slot(0).is_none());
        assert!(l.slot(24).is_none());
    }

    #[test]
    fn left_page_takes_the_larger_half() {
        let l = generate_layout(15, 0);
        let left = l.slots.iter().filter(|s| s.band.page == Page::Left).count();
        assert_eq!(left, 8);
        // Left page ids come first.
        assert!(l.slots[..8].iter().all(|s| s.band.page == Page::Left));
    }

    #[test]
    fn count_is_clamped() {
        assert_eq!(generate_layout(3, 0), generate_layout(10, 0));
        assert_eq!(generate_layout(99, 0), generate_layout(30, 0));
        assert_eq!(generate_layout(12, 7), generate_layout(12, 2));
    }

    #[test]
    fn styles_share_grid_but_not_jitter() {
        let a = generate_layout(20, 0);
        let b = generate_layout(20, 1);
        assert_eq!(a.slots.len(), b.slots.len());
        assert_ne!(a.slots, b.slots);
        assert_eq!(a.name, "layout_A // editorial");
        assert_eq!(b.style, Style::Scattered);
    }

    #[test]
    fn stacking_and_rotation_bounds() {
        for style in Style::ALL {
            let l = Layout::generate(27, style);
            for s in &l.slots {
                assert!((10..=15).contains(&s.z), "{s:?}");
                assert!(s.rotation.abs() <= style.max_rotation(), "{s:?}");
            }
            assert!(l.max_z().is_some_and(|z| z <= 15));
        }
    }

    #[test]
    fn terminal_slots_carry_row_limit() {
        let l = generate_layout(19, 2);
        for s in &l.slots {
            if let Frame::Terminal { max_bottom } = s.frame {
                assert_eq!(max_bottom, s.band.bottom + 5.0);
            }
            if let Frame::Tape { rotation, .. } = s.frame {
                assert!(rotation.abs() <= 3.0);
            }
        }
    }

    #[test]
    fn empty_when_count_is_zero() {
        let mut rng = ParkMiller::new(1);
        let l = Layout::generate_with(0, Style::Editorial, &mut rng);
        assert!(l.slots.is_empty());
        assert_eq!(l.max_z(), None);
    }

    #[test]
    fn injected_stream_drives_every_draw() {
        // A stream stuck at 0.5 zeroes every jitter and rotation.
        struct Half;
        impl RandomSource for Half {
            fn next_f64(&mut self) -> f64 {
                0.5
            }
        }
        let l = Layout::generate_with(10, Style::Scattered, &mut Half);
        assert_eq!(l.slots.len(), 10);
        assert!(l.slots.iter().all(|s| s.rotation == 0.0 && s.z == 13));
        // First slot sits on the band's left edge, offset by half the slack.
        let first = &l.slots[0];
        assert_eq!(first.left, 1.0);
        assert_eq!(first.top, 5.0 + (27.0 - 20.0) / 2.0);
    }
}
