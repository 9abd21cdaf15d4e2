//! Layout styles, frame decorations, and the tape palette.

use core::fmt;

/// One of the three arrangement styles.
///
/// Styles differ in how far slots may rotate and how often each frame
/// decoration is drawn. Slot positions come from the same grid for all
/// three; the seed differs per style, so the jitter does too.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Style {
    /// Gentle tilt, polaroid-heavy. Index 0.
    #[default]
    Editorial,
    /// Strong tilt, tape-heavy. Index 1.
    Scattered,
    /// Almost straight, shadow-heavy. Index 2.
    TechGrid,
}

impl Style {
    /// All styles in index order.
    pub const ALL: [Self; 3] = [Self::Editorial, Self::Scattered, Self::TechGrid];

    /// Style for index 0–2. Out-of-range indices clamp to the last style.
    pub const fn from_index(index: u32) -> Self {
        match index {
            0 => Self::Editorial,
            1 => Self::Scattered,
            _ => Self::TechGrid,
        }
    }

    /// Index of this style (0–2), as used in the layout seed.
    pub const fn index(self) -> u32 {
        match self {
            Self::Editorial => 0,
            Self::Scattered => 1,
            Self::TechGrid => 2,
        }
    }

    /// Display name shown on the layout badge.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Editorial => "layout_A // editorial",
            Self::Scattered => "layout_B // scattered",
            Self::TechGrid => "layout_C // tech_grid",
        }
    }

    /// Maximum rotation magnitude in degrees.
    pub const fn max_rotation(self) -> f64 {
        match self {
            Self::Editorial => 3.5,
            Self::Scattered => 8.0,
            Self::TechGrid => 1.5,
        }
    }

    /// Weighted list of decorations for slots that are not terminal-framed.
    ///
    /// Repeated entries carry the weight; a pick is uniform over the list.
    pub const fn frame_weights(self) -> &'static [FrameKind] {
        use FrameKind::*;
        match self {
            Self::Editorial => &[Polaroid, Polaroid, Tape, Shadow],
            Self::Scattered => &[Polaroid, Tape, Tape, Shadow, Shadow],
            Self::TechGrid => &[Shadow, Shadow, Polaroid, Tape],
        }
    }

    /// The style after this one, wrapping back to [`Style::Editorial`].
    pub const fn next(self) -> Self {
        Self::from_index((self.index() + 1) % 3)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoration drawn around a photo slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Plain photo with a drop shadow.
    Shadow,
    /// A strip of translucent tape across the top edge.
    Tape,
    /// White polaroid border with a thick bottom margin.
    Polaroid,
    /// Terminal window chrome (title bar with traffic-light dots).
    Terminal,
}

impl FrameKind {
    /// Lower-case identifier, suitable for CSS class names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shadow => "shadow",
            Self::Tape => "tape",
            Self::Polaroid => "polaroid",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translucent tape color. `Display` renders a CSS `rgba()` value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
}

impl TapeColor {
    /// The five tape colors, in draw order.
    pub const PALETTE: [Self; 5] = [
        Self::new(0, 200, 170, 0.55),
        Self::new(255, 77, 120, 0.5),
        Self::new(139, 92, 246, 0.58),
        Self::new(34, 197, 94, 0.52),
        Self::new(245, 200, 0, 0.5),
    ];

    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }
}

impl fmt::Display for TapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn index_round_trip() {
        for (i, style) in Style::ALL.iter().enumerate() {
            assert_eq!(style.index(), i as u32);
            assert_eq!(Style::from_index(i as u32), *style);
        }
        assert_eq!(Style::from_index(9), Style::TechGrid);
    }

    #[test]
    fn next_cycles() {
        assert_eq!(Style::Editorial.next(), Style::Scattered);
        assert_eq!(Style::Scattered.next(), Style::TechGrid);
        assert_eq!(Style::TechGrid.next(), Style::Editorial);
    }

    #[test]
    fn weights_never_include_terminal() {
        for style in Style::ALL {
            assert!(!style.frame_weights().contains(&FrameKind::Terminal));
        }
        assert_eq!(Style::Scattered.frame_weights().len(), 5);
    }

    #[test]
    fn tape_colors_render_as_css() {
        assert_eq!(TapeColor::PALETTE[0].to_string(), "rgba(0,200,170,0.55)");
        assert_eq!(TapeColor::PALETTE[1].to_string(), "rgba(255,77,120,0.5)");
    }

    #[test]
    fn names() {
        assert_eq!(Style::TechGrid.to_string(), "layout_C // tech_grid");
        assert_eq!(FrameKind::Terminal.to_string(), "terminal");
    }
}
