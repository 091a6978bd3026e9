//! Block processor driven by the host's audio callback.
//!
//! Per block: resolve queued parameter changes into the shared cache, take one
//! snapshot, then either copy every channel through (bypass) or run the
//! waveshaper on it. Parameters never change inside a block.

use cascade_core::{Effect, Kernel, Waveshaper};

use crate::error::ProcessError;
use crate::events::{self, ParamChange};
use crate::shared::ShaperShared;

/// Audio-side processor wrapping a [`Waveshaper`].
///
/// # Example
///
/// ```rust
/// use cascade_core::ParamId;
/// use cascade_plugin::{ParamChange, ShaperShared, WaveshaperProcessor};
///
/// let mut processor = WaveshaperProcessor::new(ShaperShared::new());
/// let input = [0.5_f32; 8];
/// let mut output = [0.0_f32; 8];
///
/// // Bypass on: output is a verbatim copy.
/// let changes = [ParamChange::new(ParamId(106), 0, 1.0)];
/// processor
///     .process(&changes, &[&input[..]], &mut [&mut output[..]])
///     .unwrap();
/// assert_eq!(output, input);
/// ```
#[derive(Debug)]
pub struct WaveshaperProcessor {
    shared: ShaperShared,
    shaper: Waveshaper,
    bypassed: bool,
}

impl WaveshaperProcessor {
    /// Processor reading from `shared`, using the vectorized kernel.
    pub fn new(shared: ShaperShared) -> Self {
        let snapshot = shared.snapshot();
        Self {
            shaper: Waveshaper::new(snapshot.params),
            bypassed: snapshot.bypass,
            shared,
        }
    }

    /// The parameter cache this processor reads.
    pub fn shared(&self) -> &ShaperShared {
        &self.shared
    }

    /// Select the block kernel.
    pub fn set_kernel(&mut self, kernel: Kernel) {
        self.shaper.set_kernel(kernel);
    }

    /// Block kernel in use.
    pub fn kernel(&self) -> Kernel {
        self.shaper.kernel()
    }

    /// Process one block.
    ///
    /// `inputs[c]` feeds `outputs[c]` for every channel present on both
    /// sides. Output channels without a matching input are left untouched.
    /// Parameter changes are applied even when the block holds no samples.
    ///
    /// # Errors
    ///
    /// [`ProcessError::ChannelLengthMismatch`] if any paired channels differ
    /// in length. Nothing is applied or written in that case.
    pub fn process(
        &mut self,
        changes: &[ParamChange],
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
    ) -> Result<(), ProcessError> {
        for (channel, (input, output)) in inputs.iter().zip(outputs.iter()).enumerate() {
            if input.len() != output.len() {
                return Err(ProcessError::ChannelLengthMismatch {
                    channel,
                    input: input.len(),
                    output: output.len(),
                });
            }
        }

        let bypass = self.begin_block(changes);
        for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
            if bypass {
                output.copy_from_slice(input);
            } else {
                self.shaper.process_block(input, output);
            }
        }

        Ok(())
    }

    /// Process one block in place, one buffer per channel.
    pub fn process_inplace(&mut self, changes: &[ParamChange], buffers: &mut [&mut [f32]]) {
        if self.begin_block(changes) {
            return;
        }
        for buffer in buffers.iter_mut() {
            self.shaper.process_block_inplace(buffer);
        }
    }

    /// Apply the block's changes, snapshot the cache into the shaper and
    /// return whether the block is bypassed.
    fn begin_block(&mut self, changes: &[ParamChange]) -> bool {
        for (index, value) in events::last_values(changes).into_iter().enumerate() {
            if let Some(normalized) = value {
                self.shared.set_normalized(index, normalized);
            }
        }

        let snapshot = self.shared.snapshot();
        if snapshot.bypass != self.bypassed {
            tracing::debug!(bypass = snapshot.bypass, "bypass changed");
            self.bypassed = snapshot.bypass;
        }
        self.shaper.set_params(snapshot.params);
        snapshot.bypass
    }
}
