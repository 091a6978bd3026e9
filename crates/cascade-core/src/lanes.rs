//! Branch-free sign-bit primitives shared by the scalar and 4-lane kernels.
//!
//! Every sign decision in the waveshaper is made on raw IEEE 754 bit
//! patterns rather than with comparisons. The [`Lane`] trait exposes those
//! bit tricks over a single `f32` and over a packed [`f32x4`] with the same
//! operation sequence, so the generic stage code in
//! [`waveshaper`](crate::waveshaper) compiles to a scalar loop and a SIMD loop
//! that are arithmetically identical.
//!
//! | Operation | Scalar | 4-lane |
//! |-----------|--------|--------|
//! | [`abs`](Lane::abs) | `bits & 0x7FFF_FFFF` | `i32x4 & splat(0x7FFF_FFFF)` |
//! | [`sign_mask`](Lane::sign_mask) | `(bits as i32) >> 31` | `i32x4 >> 31` |
//! | [`select`](Lane::select) | `(m & a) \| (!m & b)` | `(m & a) \| ((m ^ !0) & b)` |
//! | [`flip_sign`](Lane::flip_sign) | `bits ^ pattern` | `i32x4 ^ splat(pattern)` |

use core::ops::{Add, Div, Mul, Sub};

use bytemuck::cast;
use wide::{f32x4, i32x4};

/// IEEE 754 single-precision sign bit.
pub const SIGN_BIT: u32 = 0x8000_0000;

/// Mask that clears the sign bit, leaving exponent and mantissa.
pub const ABS_MASK: u32 = 0x7FFF_FFFF;

/// A group of `f32` lanes that supports the waveshaper's bit-level tricks.
///
/// Implemented for `f32` (one lane) and [`f32x4`] (four lanes). Arithmetic
/// comes from the standard operator traits; the sign-bit helpers below never
/// branch on the value.
pub trait Lane:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
    /// Per-lane all-ones / all-zeros selection mask.
    type Mask: Copy;

    /// Number of samples carried by one value.
    const WIDTH: usize;

    /// Broadcast a scalar into every lane.
    fn splat(value: f32) -> Self;

    /// Absolute value by clearing the sign bit of the raw bit pattern.
    fn abs(self) -> Self;

    /// All-ones in each lane whose sign bit is set, all-zeros otherwise.
    ///
    /// `-0.0` has its sign bit set and therefore yields all-ones.
    fn sign_mask(self) -> Self::Mask;

    /// Bitwise blend: lanes where `mask` is all-ones take `if_set`,
    /// the rest take `if_clear`.
    fn select(mask: Self::Mask, if_set: Self, if_clear: Self) -> Self;

    /// XOR every lane's bit pattern with `pattern`.
    ///
    /// `pattern` is either `0` (no-op) or [`SIGN_BIT`] (polarity flip).
    fn flip_sign(self, pattern: u32) -> Self;
}

impl Lane for f32 {
    type Mask = u32;

    const WIDTH: usize = 1;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        value
    }

    #[inline(always)]
    fn abs(self) -> Self {
        f32::from_bits(self.to_bits() & ABS_MASK)
    }

    #[inline(always)]
    fn sign_mask(self) -> u32 {
        ((self.to_bits() as i32) >> 31) as u32
    }

    #[inline(always)]
    fn select(mask: u32, if_set: Self, if_clear: Self) -> Self {
        f32::from_bits((mask & if_set.to_bits()) | (!mask & if_clear.to_bits()))
    }

    #[inline(always)]
    fn flip_sign(self, pattern: u32) -> Self {
        f32::from_bits(self.to_bits() ^ pattern)
    }
}

impl Lane for f32x4 {
    type Mask = i32x4;

    const WIDTH: usize = 4;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        f32x4::splat(value)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        let bits: i32x4 = cast(self);
        cast(bits & i32x4::splat(ABS_MASK as i32))
    }

    #[inline(always)]
    fn sign_mask(self) -> i32x4 {
        let bits: i32x4 = cast(self);
        bits >> 31_i32
    }

    #[inline(always)]
    fn select(mask: i32x4, if_set: Self, if_clear: Self) -> Self {
        let set: i32x4 = cast(if_set);
        let clear: i32x4 = cast(if_clear);
        let inverted = mask ^ i32x4::splat(-1);
        cast((mask & set) | (inverted & clear))
    }

    #[inline(always)]
    fn flip_sign(self, pattern: u32) -> Self {
        let bits: i32x4 = cast(self);
        cast(bits ^ i32x4::splat(pattern as i32))
    }
}
