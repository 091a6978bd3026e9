//! Stage-sequenced asymmetric waveshaper.
//!
//! Each sample runs through `num_stages` normalized atan soft-clips. Every
//! stage re-reads the sign of the *running* sample to choose its drive
//! coefficient, so a stage that pushes a value across zero hands the next
//! stage the other coefficient. Optionally every odd-indexed stage flips the
//! polarity of its output. A single gain multiply follows the last stage.
//!
//! ```text
//! for j in 0..num_stages:
//!     coef   = sign_bit(x) ? coef_negative : coef_positive
//!     x      = fast_atan(coef · x) / fast_atan(coef)     // x = 1 stays 1
//!     x      = (invert && j odd) ? -x : x
//! y = x · output_gain
//! ```
//!
//! # Scalar and vector paths
//!
//! The stage loop is written once, generic over [`Lane`], and instantiated
//! for `f32` ([`process_scalar`]) and [`f32x4`] ([`process_simd`]). The
//! vector path walks the buffer in groups of four and hands the
//! `len % 4` tail to the scalar path. Both paths therefore execute the same
//! IEEE operations in the same order for every sample.
//!
//! # Real-time contract
//!
//! No allocation, no locking, no I/O, no error returns, no clamping.
//! Samples depend only on their own input value and the
//! [`WaveshaperParams`]; there is no state between calls.

use wide::f32x4;

use crate::fast_math::fast_atan_lanes;
use crate::lanes::{Lane, SIGN_BIT};
use crate::params::WaveshaperParams;

/// Samples per vector iteration.
pub const SIMD_WIDTH: usize = <f32x4 as Lane>::WIDTH;

/// Kernel flavour used for block processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kernel {
    /// Four samples per iteration with a scalar tail.
    #[default]
    Simd,
    /// One sample per iteration. Reference path.
    Scalar,
}

/// XOR pattern for stage `stage`: [`SIGN_BIT`] on odd stages when inversion
/// is enabled, `0` otherwise.
///
/// `(flag & stage) - 1` wraps to all-ones exactly when the product is zero,
/// so its complement keeps the sign bit only for odd stages with the flag set.
#[inline(always)]
pub fn stage_flip_pattern(stage: u32, invert_alternate_stages: bool) -> u32 {
    SIGN_BIT & !((u32::from(invert_alternate_stages) & stage).wrapping_sub(1))
}

/// One normalized soft-clip over any lane width.
#[inline(always)]
fn soft_clip_lanes<V: Lane>(sample: V, coef: V) -> V {
    (V::splat(1.0) / fast_atan_lanes(coef)) * fast_atan_lanes(coef * sample)
}

/// Normalized atan soft-clip for a single value and coefficient.
///
/// `normalized_soft_clip(1.0, coef)` returns `1.0` for every coefficient in
/// the drive domain: the coefficient bends the knee of the curve without
/// moving the unity point.
///
/// # Examples
///
/// ```
/// use cascade_core::waveshaper::normalized_soft_clip;
///
/// for coef in [0.1, 0.5, 1.0, 2.0] {
///     assert!((normalized_soft_clip(1.0, coef) - 1.0).abs() < 1e-6);
/// }
/// assert!(normalized_soft_clip(0.5, 0.5) < 0.5 + 0.1);
/// ```
#[inline]
pub fn normalized_soft_clip(sample: f32, coef: f32) -> f32 {
    soft_clip_lanes(sample, coef)
}

/// All stages for one lane group, without the output gain.
#[inline(always)]
fn run_stages<V: Lane>(
    mut sample: V,
    coef_positive: V,
    coef_negative: V,
    params: &WaveshaperParams,
) -> V {
    for stage in 0..params.num_stages {
        let coef = V::select(sample.sign_mask(), coef_negative, coef_positive);
        sample = soft_clip_lanes(sample, coef);
        sample = sample.flip_sign(stage_flip_pattern(stage, params.invert_alternate_stages));
    }
    sample
}

/// Shape a single sample, output gain included.
///
/// This is the per-sample body of [`process_scalar`].
#[inline]
pub fn shape_sample(sample: f32, params: &WaveshaperParams) -> f32 {
    run_stages(sample, params.coef_positive, params.coef_negative, params) * params.output_gain
}

/// Shape four packed samples, output gain included.
#[inline]
pub fn shape_x4(samples: f32x4, params: &WaveshaperParams) -> f32x4 {
    let coef_positive = f32x4::splat(params.coef_positive);
    let coef_negative = f32x4::splat(params.coef_negative);
    run_stages(samples, coef_positive, coef_negative, params) * f32x4::splat(params.output_gain)
}

/// Scalar waveshaper: one sample per iteration over the whole buffer.
///
/// Processes `min(input.len(), output.len())` samples; the lengths are
/// expected to match.
pub fn process_scalar(input: &[f32], output: &mut [f32], params: WaveshaperParams) {
    debug_assert_eq!(
        input.len(),
        output.len(),
        "Input and output buffers must have same length"
    );
    for (inp, out) in input.iter().zip(output.iter_mut()) {
        *out = shape_sample(*inp, &params);
    }
}

/// Scalar waveshaper, in place.
pub fn process_scalar_inplace(buffer: &mut [f32], params: WaveshaperParams) {
    for sample in buffer.iter_mut() {
        *sample = shape_sample(*sample, &params);
    }
}

/// Vector waveshaper: groups of four, scalar tail for the remainder.
///
/// Output matches [`process_scalar`] sample for sample.
///
/// # Example
///
/// ```rust
/// use cascade_core::WaveshaperParams;
/// use cascade_core::waveshaper::{process_scalar, process_simd};
///
/// let params = WaveshaperParams::new(0.9, 0.4, 3, true, 0.8);
/// let input = [0.1, -0.2, 0.3, -0.4, 0.5, -0.6, 0.7];
/// let mut fast = [0.0; 7];
/// let mut reference = [0.0; 7];
///
/// process_simd(&input, &mut fast, params);
/// process_scalar(&input, &mut reference, params);
/// assert_eq!(fast, reference);
/// ```
pub fn process_simd(input: &[f32], output: &mut [f32], params: WaveshaperParams) {
    debug_assert_eq!(
        input.len(),
        output.len(),
        "Input and output buffers must have same length"
    );
    let len = input.len().min(output.len());
    let split = len & !(SIMD_WIDTH - 1);

    let coef_positive = f32x4::splat(params.coef_positive);
    let coef_negative = f32x4::splat(params.coef_negative);
    let gain = f32x4::splat(params.output_gain);

    for (src, dst) in input[..split]
        .chunks_exact(SIMD_WIDTH)
        .zip(output[..split].chunks_exact_mut(SIMD_WIDTH))
    {
        let samples = f32x4::new([src[0], src[1], src[2], src[3]]);
        let shaped = run_stages(samples, coef_positive, coef_negative, &params) * gain;
        dst.copy_from_slice(&shaped.to_array());
    }

    process_scalar(&input[split..len], &mut output[split..len], params);
}

/// Vector waveshaper, in place.
///
/// Each group of four is loaded, shaped and stored back before the next
/// group is touched.
pub fn process_simd_inplace(buffer: &mut [f32], params: WaveshaperParams) {
    let split = buffer.len() & !(SIMD_WIDTH - 1);
    let (body, tail) = buffer.split_at_mut(split);

    let coef_positive = f32x4::splat(params.coef_positive);
    let coef_negative = f32x4::splat(params.coef_negative);
    let gain = f32x4::splat(params.output_gain);

    for group in body.chunks_exact_mut(SIMD_WIDTH) {
        let samples = f32x4::new([group[0], group[1], group[2], group[3]]);
        let shaped = run_stages(samples, coef_positive, coef_negative, &params) * gain;
        group.copy_from_slice(&shaped.to_array());
    }

    process_scalar_inplace(tail, params);
}

/// Dispatch a block to the requested kernel.
#[inline]
pub fn process_block(kernel: Kernel, input: &[f32], output: &mut [f32], params: WaveshaperParams) {
    match kernel {
        Kernel::Simd => process_simd(input, output, params),
        Kernel::Scalar => process_scalar(input, output, params),
    }
}

/// Dispatch an in-place block to the requested kernel.
#[inline]
pub fn process_block_inplace(kernel: Kernel, buffer: &mut [f32], params: WaveshaperParams) {
    match kernel {
        Kernel::Simd => process_simd_inplace(buffer, params),
        Kernel::Scalar => process_scalar_inplace(buffer, params),
    }
}
