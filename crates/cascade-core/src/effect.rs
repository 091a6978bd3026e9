//! Effect trait and the [`Waveshaper`] effect.
//!
//! The [`Effect`] trait is the block-processing interface the host adapter
//! drives. It is object-safe and allocation-free. [`Waveshaper`] wraps the
//! stage kernel from [`waveshaper`](crate::waveshaper) behind it, holding the
//! current [`WaveshaperParams`] record and the selected [`Kernel`].

use crate::params::WaveshaperParams;
use crate::waveshaper::{self, Kernel};

/// Core trait for audio effects.
///
/// # Example
///
/// ```rust
/// use cascade_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
/// }
///
/// let mut g = Gain { gain: 0.5 };
/// let mut out = [0.0; 2];
/// g.process_block(&[1.0, -1.0], &mut out);
/// assert_eq!(out, [0.5, -0.5]);
/// ```
pub trait Effect {
    /// Process a single sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample. Effects
    /// may override this with a vectorized path.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Multi-stage asymmetric atan waveshaper.
///
/// Memoryless and latency-free: each output sample depends only on the
/// matching input sample and the current record. Parameters are replaced wholesale once per block with
/// [`set_params`](Self::set_params).
///
/// # Example
///
/// ```rust
/// use cascade_core::{Effect, Kernel, Waveshaper, WaveshaperParams};
///
/// let mut shaper = Waveshaper::new(WaveshaperParams::new(0.5, 0.5, 1, false, 1.0));
/// let mut out = [0.0; 3];
/// shaper.process_block(&[1.0, 0.0, -1.0], &mut out);
/// assert!((out[0] - 1.0).abs() < 1e-6);
/// assert_eq!(out[1], 0.0);
///
/// shaper.set_kernel(Kernel::Scalar);
/// assert_eq!(shaper.kernel(), Kernel::Scalar);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Waveshaper {
    params: WaveshaperParams,
    kernel: Kernel,
}

impl Waveshaper {
    /// New waveshaper using the vectorized kernel.
    pub fn new(params: WaveshaperParams) -> Self {
        Self {
            params: params.clamped(),
            kernel: Kernel::Simd,
        }
    }

    /// Replace the parameter record. Out-of-domain fields are clamped.
    #[inline]
    pub fn set_params(&mut self, params: WaveshaperParams) {
        self.params = params.clamped();
    }

    /// Current parameter record.
    #[inline]
    pub fn params(&self) -> WaveshaperParams {
        self.params
    }

    /// Select the block kernel.
    pub fn set_kernel(&mut self, kernel: Kernel) {
        self.kernel = kernel;
    }

    /// Block kernel in use.
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }
}

impl Effect for Waveshaper {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        waveshaper::shape_sample(input, &self.params)
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        waveshaper::process_block(self.kernel, input, output, self.params);
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        waveshaper::process_block_inplace(self.kernel, buffer, self.params);
    }
}
