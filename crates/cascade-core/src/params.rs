//! Per-block parameter record for the waveshaper.
//!
//! [`WaveshaperParams`] is the only input the kernel takes besides the
//! sample buffers. It is a plain `Copy` value: the host adapter builds one
//! at the start of every block from its latest control values and hands it
//! to the kernel by value. Nothing in the kernel mutates or retains it.
//!
//! The kernel trusts the record. Every field must already be inside its
//! domain; [`WaveshaperParams::new`] and [`WaveshaperParams::clamped`] are
//! the places where that is enforced.

/// Smallest drive coefficient.
pub const COEF_MIN: f32 = 0.1;
/// Largest drive coefficient.
pub const COEF_MAX: f32 = 2.0;
/// Default drive coefficient for both polarities.
pub const COEF_DEFAULT: f32 = 0.5;

/// Fewest shaping stages.
pub const NUM_STAGES_MIN: u32 = 1;
/// Most shaping stages.
pub const NUM_STAGES_MAX: u32 = 10;
/// Default stage count.
pub const NUM_STAGES_DEFAULT: u32 = 6;

/// Smallest output gain (silence).
pub const GAIN_MIN: f32 = 0.0;
/// Largest output gain (unity).
pub const GAIN_MAX: f32 = 1.0;
/// Default output gain.
pub const GAIN_DEFAULT: f32 = 1.0;

/// Parameter snapshot consumed by the waveshaper for one block.
///
/// | Field | Domain |
/// |-------|--------|
/// | `coef_positive` | \[0.1, 2.0\] |
/// | `coef_negative` | \[0.1, 2.0\] |
/// | `num_stages` | \[1, 10\] |
/// | `invert_alternate_stages` | bool |
/// | `output_gain` | \[0.0, 1.0\] |
///
/// # Example
///
/// ```rust
/// use cascade_core::WaveshaperParams;
///
/// let params = WaveshaperParams::new(0.8, 0.3, 4, true, 0.5);
/// assert!(params.is_in_domain());
///
/// // Out-of-range values are pulled back to the nearest bound.
/// let wild = WaveshaperParams::new(5.0, 0.0, 40, false, 2.0);
/// assert_eq!(wild.coef_positive, 2.0);
/// assert_eq!(wild.coef_negative, 0.1);
/// assert_eq!(wild.num_stages, 10);
/// assert_eq!(wild.output_gain, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveshaperParams {
    /// Drive coefficient while the running sample's sign bit is clear.
    pub coef_positive: f32,
    /// Drive coefficient while the running sample's sign bit is set.
    pub coef_negative: f32,
    /// Number of sequential shaping stages.
    pub num_stages: u32,
    /// Flip polarity after every odd-indexed stage.
    pub invert_alternate_stages: bool,
    /// Linear gain applied once after the last stage.
    pub output_gain: f32,
}

impl WaveshaperParams {
    /// Build a record, clamping every field into its domain.
    pub fn new(
        coef_positive: f32,
        coef_negative: f32,
        num_stages: u32,
        invert_alternate_stages: bool,
        output_gain: f32,
    ) -> Self {
        Self {
            coef_positive,
            coef_negative,
            num_stages,
            invert_alternate_stages,
            output_gain,
        }
        .clamped()
    }

    /// Copy of `self` with every field pulled into its domain.
    ///
    /// NaN coefficients or gain fall back to their defaults, since a NaN
    /// cannot be ordered against the bounds.
    pub fn clamped(self) -> Self {
        let clamped = Self {
            coef_positive: clamp_or(self.coef_positive, COEF_MIN, COEF_MAX, COEF_DEFAULT),
            coef_negative: clamp_or(self.coef_negative, COEF_MIN, COEF_MAX, COEF_DEFAULT),
            num_stages: self.num_stages.clamp(NUM_STAGES_MIN, NUM_STAGES_MAX),
            invert_alternate_stages: self.invert_alternate_stages,
            output_gain: clamp_or(self.output_gain, GAIN_MIN, GAIN_MAX, GAIN_DEFAULT),
        };

        #[cfg(feature = "tracing")]
        if clamped != self {
            tracing::debug!(requested = ?self, ?clamped, "waveshaper params clamped into domain");
        }

        clamped
    }

    /// Whether every field already lies inside its domain.
    pub fn is_in_domain(&self) -> bool {
        (COEF_MIN..=COEF_MAX).contains(&self.coef_positive)
            && (COEF_MIN..=COEF_MAX).contains(&self.coef_negative)
            && (NUM_STAGES_MIN..=NUM_STAGES_MAX).contains(&self.num_stages)
            && (GAIN_MIN..=GAIN_MAX).contains(&self.output_gain)
    }

    /// Same record with a different output gain (clamped).
    pub fn with_output_gain(mut self, gain: f32) -> Self {
        self.output_gain = clamp_or(gain, GAIN_MIN, GAIN_MAX, GAIN_DEFAULT);
        self
    }
}

impl Default for WaveshaperParams {
    fn default() -> Self {
        Self {
            coef_positive: COEF_DEFAULT,
            coef_negative: COEF_DEFAULT,
            num_stages: NUM_STAGES_DEFAULT,
            invert_alternate_stages: true,
            output_gain: GAIN_DEFAULT,
        }
    }
}

#[inline]
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
