//! Persisted plugin state.
//!
//! The state is a fixed 24-byte little-endian record of physical (not
//! normalized) values:
//!
//! | Offset | Type | Field |
//! |--------|------|-------|
//! | 0  | f32 | `coef_positive` |
//! | 4  | f32 | `coef_negative` |
//! | 8  | f32 | `num_stages` |
//! | 12 | i32 | `invert_alternate_stages` (non-zero = on) |
//! | 16 | f32 | `output_gain` |
//! | 20 | i32 | `bypass` (non-zero = on) |
//!
//! Decoding reads the whole record before producing anything, so a short or
//! malformed stream never yields a partial update. Bytes past offset 24 are
//! ignored.

use std::io::{ErrorKind, Read, Write};

use cascade_core::WaveshaperParams;

use crate::error::StateError;

/// Encoded size of a state record.
pub const STATE_LEN: usize = 24;

/// Everything the host saves and restores.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PersistedState {
    /// Waveshaper parameters.
    pub params: WaveshaperParams,
    /// Bypass switch.
    pub bypass: bool,
}

impl PersistedState {
    /// Encode to the 24-byte layout.
    pub fn to_bytes(&self) -> [u8; STATE_LEN] {
        let p = &self.params;
        let mut out = [0u8; STATE_LEN];
        out[0..4].copy_from_slice(&p.coef_positive.to_le_bytes());
        out[4..8].copy_from_slice(&p.coef_negative.to_le_bytes());
        out[8..12].copy_from_slice(&(p.num_stages as f32).to_le_bytes());
        out[12..16].copy_from_slice(&i32::from(p.invert_alternate_stages).to_le_bytes());
        out[16..20].copy_from_slice(&p.output_gain.to_le_bytes());
        out[20..24].copy_from_slice(&i32::from(self.bypass).to_le_bytes());
        out
    }

    /// Decode from at least 24 bytes.
    ///
    /// Float fields must be finite. In-range checking is lenient: values
    /// outside a parameter's domain are clamped, and a fractional stage
    /// count is truncated toward zero.
    ///
    /// # Errors
    ///
    /// [`StateError::Truncated`] if fewer than 24 bytes are given,
    /// [`StateError::NonFinite`] if a float field is NaN or infinite.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        let Some(record) = bytes.get(..STATE_LEN) else {
            return Err(StateError::truncated(STATE_LEN, bytes.len()));
        };

        let coef_positive = finite_f32(record, 0, "coef_positive")?;
        let coef_negative = finite_f32(record, 4, "coef_negative")?;
        let num_stages = finite_f32(record, 8, "num_stages")?;
        let invert = read_i32(record, 12) != 0;
        let output_gain = finite_f32(record, 16, "output_gain")?;
        let bypass = read_i32(record, 20) != 0;

        Ok(Self {
            params: WaveshaperParams::new(
                coef_positive,
                coef_negative,
                num_stages as u32,
                invert,
                output_gain,
            ),
            bypass,
        })
    }

    /// Write the encoded record to `writer`.
    ///
    /// # Errors
    ///
    /// [`StateError::Io`] if the write fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), StateError> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read exactly one record from `reader`.
    ///
    /// Stops after 24 bytes; anything the stream holds beyond that is left
    /// unread.
    ///
    /// # Errors
    ///
    /// [`StateError::Truncated`] on early end of stream, [`StateError::Io`]
    /// on read failure, or any [`from_bytes`](Self::from_bytes) error.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, StateError> {
        let mut buf = [0u8; STATE_LEN];
        let mut filled = 0;
        while filled < STATE_LEN {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => return Err(StateError::truncated(STATE_LEN, filled)),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Self::from_bytes(&buf)
    }
}

fn read_i32(record: &[u8], offset: usize) -> i32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&record[offset..offset + 4]);
    i32::from_le_bytes(word)
}

fn finite_f32(record: &[u8], offset: usize, field: &'static str) -> Result<f32, StateError> {
    let mut word = [0u8; 4];
    word.copy_from_slice(&record[offset..offset + 4]);
    let value = f32::from_le_bytes(word);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StateError::non_finite(field, value))
    }
}
