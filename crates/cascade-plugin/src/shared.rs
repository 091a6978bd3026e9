//! Thread-safe parameter cache shared between the control and audio sides.
//!
//! `ShaperShared` lives for the lifetime of the plugin instance. The control
//! side (host automation, state restore, controller queries) writes plain
//! parameter values; the audio side takes one [`BlockSnapshot`] at the start
//! of every block. Values are stored as atomic `u32` (f32 bit-cast) so
//! neither side ever blocks.

use std::io::{Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use cascade_core::param_info::{
    self, BYPASS, COEF_NEGATIVE, COEF_POSITIVE, GAIN, INVERT_STAGES, NUM_STAGES, PARAM_COUNT,
    PARAMS,
};
use cascade_core::{ParamDescriptor, ParamId, WaveshaperParams};

use crate::error::StateError;
use crate::state::PersistedState;

/// Parameter values for one block, taken in a single pass over the cache.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlockSnapshot {
    /// Record handed to the kernel.
    pub params: WaveshaperParams,
    /// Copy input to output instead of shaping.
    pub bypass: bool,
}

struct ShaperSharedData {
    /// Current plain values as f32 bits, indexed like [`PARAMS`].
    values: [AtomicU32; PARAM_COUNT],
}

/// Last-value parameter cache accessible from all plugin threads.
///
/// Cheap to clone; all clones share the same atomics.
#[derive(Clone)]
pub struct ShaperShared {
    inner: Arc<ShaperSharedData>,
}

impl Default for ShaperShared {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShaperShared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaperShared")
            .field("values", &self.values())
            .finish()
    }
}

impl ShaperShared {
    /// Cache initialized to every parameter's default.
    pub fn new() -> Self {
        let values = param_info::default_values().map(|v| AtomicU32::new(v.to_bits()));
        Self {
            inner: Arc::new(ShaperSharedData { values }),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    /// Get parameter descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        PARAMS.get(index)
    }

    /// All parameter descriptors.
    pub fn descriptors(&self) -> &'static [ParamDescriptor] {
        &PARAMS
    }

    /// Find parameter index by stable ID.
    pub fn index_by_id(&self, id: ParamId) -> Option<usize> {
        param_info::index_of(id)
    }

    /// Read the current plain value of a parameter (lock-free).
    pub fn get_value(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// All current plain values, indexed like [`PARAMS`].
    pub fn values(&self) -> [f32; PARAM_COUNT] {
        let mut out = [0.0; PARAM_COUNT];
        for (slot, atomic) in out.iter_mut().zip(self.inner.values.iter()) {
            *slot = f32::from_bits(atomic.load(Ordering::Acquire));
        }
        out
    }

    /// Write a plain value (lock-free). Clamps to descriptor bounds;
    /// out-of-range indices are ignored.
    pub fn set_value(&self, index: usize, value: f32) {
        if let Some((atomic, desc)) = self.inner.values.get(index).zip(PARAMS.get(index)) {
            atomic.store(desc.clamp(value).to_bits(), Ordering::Release);
        }
    }

    /// Write a normalized host value, mapped through the descriptor's scale.
    pub fn set_normalized(&self, index: usize, normalized: f64) {
        if let Some(desc) = PARAMS.get(index) {
            self.set_value(index, desc.denormalize(normalized));
        }
    }

    /// Host-facing normalized value of a parameter.
    ///
    /// This is the controller's view: what a host displays and automates
    /// against after state has been restored.
    pub fn normalized_value(&self, id: ParamId) -> Option<f64> {
        let index = param_info::index_of(id)?;
        let value = self.get_value(index)?;
        Some(f64::from(PARAMS[index].normalize(value)))
    }

    /// Whether bypass is currently on.
    pub fn is_bypassed(&self) -> bool {
        self.get_value(BYPASS).is_some_and(|v| v > 0.5)
    }

    /// Snapshot all values into a kernel record plus the bypass flag.
    pub fn snapshot(&self) -> BlockSnapshot {
        let v = self.values();
        BlockSnapshot {
            params: WaveshaperParams::new(
                v[COEF_POSITIVE],
                v[COEF_NEGATIVE],
                v[NUM_STAGES] as u32,
                v[INVERT_STAGES] > 0.5,
                v[GAIN],
            ),
            bypass: v[BYPASS] > 0.5,
        }
    }

    /// Current values as a persistable record.
    pub fn to_state(&self) -> PersistedState {
        let snapshot = self.snapshot();
        PersistedState {
            params: snapshot.params,
            bypass: snapshot.bypass,
        }
    }

    /// Overwrite every value from a decoded record.
    pub fn apply_state(&self, state: &PersistedState) {
        let p = &state.params;
        self.set_value(COEF_POSITIVE, p.coef_positive);
        self.set_value(COEF_NEGATIVE, p.coef_negative);
        self.set_value(NUM_STAGES, p.num_stages as f32);
        self.set_value(INVERT_STAGES, bool_value(p.invert_alternate_stages));
        self.set_value(GAIN, p.output_gain);
        self.set_value(BYPASS, bool_value(state.bypass));
    }

    /// Serialize the current values to `writer`.
    ///
    /// # Errors
    ///
    /// [`StateError::Io`] if the write fails.
    pub fn save_state<W: Write>(&self, writer: &mut W) -> Result<(), StateError> {
        let state = self.to_state();
        state.write_to(writer)?;
        tracing::debug!(?state, "saved waveshaper state");
        Ok(())
    }

    /// Restore values from `reader`.
    ///
    /// The record is fully decoded and validated before any value changes;
    /// on error the cache is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Any [`StateError`] from decoding.
    pub fn load_state<R: Read>(&self, reader: &mut R) -> Result<(), StateError> {
        let state = PersistedState::read_from(reader).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected waveshaper state");
        })?;
        self.apply_state(&state);
        tracing::debug!(?state, "loaded waveshaper state");
        Ok(())
    }
}

fn bool_value(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}
