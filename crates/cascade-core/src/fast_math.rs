//! Fast arctangent approximation for audio-rate waveshaping.
//!
//! The waveshaper calls atan twice per stage per sample, up to ten stages
//! deep. A libm `atanf` costs a range reduction plus a long polynomial and
//! a branch on sign; this module replaces it with a branch-free low-order
//! rational form:
//!
//! ```text
//! atan(x) ≈ (π/4)·x − x·(|x| − 1)·(0.2447 + 0.0663·|x|)
//! ```
//!
//! `|x|` comes from clearing the sign bit of the raw bit pattern
//! ([`Lane::abs`]), so there is no comparison anywhere in the function.
//!
//! # Accuracy
//!
//! | Input range | Max absolute error |
//! |-------------|--------------------|
//! | \[-1, 1\] | < 0.002 rad |
//! | \|x\| = 1.2 | ≈ 0.012 rad |
//! | \|x\| = 2.0 | ≈ 0.29 rad |
//!
//! The fit is tight on \[-1, 1\] and degrades quickly past it: the curve
//! peaks near `|x| ≈ 1.55` and turns back down. Drive coefficients above
//! ~1.5 push `coef · sample` into that region, which is part of the
//! character of the high-drive settings rather than something to correct.
//!
//! # Exactness at the anchors
//!
//! At `x = ±1` the correction term vanishes, so `fast_atan(±1) = ±π/4`
//! exactly. At `x = 0` the result is exactly `0`.

use core::f32::consts::FRAC_PI_4;

use wide::f32x4;

use crate::lanes::Lane;

/// Constant term of the correction polynomial.
pub const ATAN_A: f32 = 0.2447;

/// Linear term of the correction polynomial.
pub const ATAN_B: f32 = 0.0663;

/// Branch-free atan approximation over any [`Lane`] width.
///
/// Both [`fast_atan`] and [`fast_atan_x4`] are instantiations of this
/// function, which guarantees they run the same operation sequence.
#[inline(always)]
pub fn fast_atan_lanes<V: Lane>(x: V) -> V {
    let abs_x = x.abs();
    V::splat(FRAC_PI_4) * x
        - x * (abs_x - V::splat(1.0)) * (V::splat(ATAN_A) + V::splat(ATAN_B) * abs_x)
}

/// Fast arctangent of a single value.
///
/// # Examples
///
/// ```
/// use cascade_core::fast_math::fast_atan;
///
/// assert_eq!(fast_atan(0.0), 0.0);
/// assert_eq!(fast_atan(1.0), core::f32::consts::FRAC_PI_4);
/// assert!((fast_atan(0.5) - libm::atanf(0.5)).abs() < 0.002);
/// ```
#[inline]
pub fn fast_atan(x: f32) -> f32 {
    fast_atan_lanes(x)
}

/// Fast arctangent of four packed values.
///
/// Lane-for-lane identical to [`fast_atan`].
///
/// # Examples
///
/// ```
/// use cascade_core::fast_math::{fast_atan, fast_atan_x4};
/// use wide::f32x4;
///
/// let x = [-1.5, -0.25, 0.25, 1.5];
/// let packed = fast_atan_x4(f32x4::new(x)).to_array();
/// for lane in 0..4 {
///     assert_eq!(packed[lane], fast_atan(x[lane]));
/// }
/// ```
#[inline]
pub fn fast_atan_x4(x: f32x4) -> f32x4 {
    fast_atan_lanes(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atan_exact_anchors() {
        assert_eq!(fast_atan(0.0), 0.0);
        assert_eq!(fast_atan(1.0), FRAC_PI_4);
        assert_eq!(fast_atan(-1.0), -FRAC_PI_4);
    }

    #[test]
    fn atan_is_odd() {
        for i in 0..=200 {
            let x = i as f32 * 0.01;
            assert_eq!(
                fast_atan(-x).to_bits(),
                (-fast_atan(x)).to_bits(),
                "fast_atan not odd at {x}"
            );
        }
    }

    #[test]
    fn atan_accuracy_unit_range() {
        let mut max_err: f32 = 0.0;
        for i in -1000..=1000 {
            let x = i as f32 * 0.001;
            let err = (fast_atan(x) - libm::atanf(x)).abs();
            max_err = max_err.max(err);
        }
        assert!(max_err < 0.002, "max error {max_err} over [-1, 1]");
    }

    #[test]
    fn atan_monotonic_below_peak() {
        let mut prev = fast_atan(-1.5);
        for i in -1499..=1500 {
            let next = fast_atan(i as f32 * 0.001);
            assert!(next > prev, "not increasing at {}", i as f32 * 0.001);
            prev = next;
        }
    }

    #[test]
    fn atan_vector_matches_scalar() {
        for i in -100..100 {
            let base = i as f32 * 0.02;
            let x = [base, base + 0.005, base + 0.01, base + 0.015];
            let packed = fast_atan_x4(f32x4::new(x)).to_array();
            for lane in 0..4 {
                assert_eq!(
                    packed[lane].to_bits(),
                    fast_atan(x[lane]).to_bits(),
                    "lane {lane} diverged at {}",
                    x[lane]
                );
            }
        }
    }
}
