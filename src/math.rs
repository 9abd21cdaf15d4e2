//! Float rounding that works with and without `std`.
//!
//! Routed through [`num_traits::Float`] so `no_std` builds get the `libm`
//! implementations. All rounding is half away from zero.

use num_traits::Float;

#[inline]
pub(crate) fn round(x: f64) -> f64 {
    Float::round(x)
}

#[inline]
pub(crate) fn floor(x: f64) -> f64 {
    Float::floor(x)
}

#[cfg(feature = "alloc")]
#[inline]
pub(crate) fn abs(x: f64) -> f64 {
    Float::abs(x)
}

#[cfg(feature = "alloc")]
/// Round to one decimal place (`12.34` → `12.3`, `-0.25` → `-0.3`).
#[inline]
pub(crate) fn round_tenth(x: f64) -> f64 {
    round(x * 10.0) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenth_rounds_half_away_from_zero() {
        assert_eq!(round_tenth(2.25), 2.3);
        assert_eq!(round_tenth(-2.25), -2.3);
        assert_eq!(round_tenth(12.34), 12.3);
        assert_eq!(round_tenth(0.0), 0.0);
    }

    #[test]
    fn floor_and_round() {
        assert_eq!(floor(5.9), 5.0);
        assert_eq!(round(4.5), 5.0);
        assert_eq!(abs(-1.5), 1.5);
    }
}
