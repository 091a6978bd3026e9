//! Host-visible parameter registry.
//!
//! The waveshaper exposes six parameters to a host. Each one is described by a
//! [`ParamDescriptor`] carrying its stable [`ParamId`], display names, plain
//! range, default, normalization curve and capability flags. The registry is a
//! `const` table ([`PARAMS`]) so it can be walked from any thread without
//! locking or allocation.
//!
//! | Index | ID  | Name          | Range     | Default | Scale        |
//! |-------|-----|---------------|-----------|---------|--------------|
//! | 0     | 101 | Coef Positive | 0.1 – 2.0 | 0.5     | Linear       |
//! | 1     | 102 | Coef Negative | 0.1 – 2.0 | 0.5     | Linear       |
//! | 2     | 103 | Num Stages    | 1 – 10    | 6       | Stepped(9)   |
//! | 3     | 104 | Invert Stages | 0 – 1     | 1       | Toggle       |
//! | 4     | 105 | Gain          | 0.0 – 1.0 | 1.0     | Linear       |
//! | 5     | 106 | Bypass        | 0 – 1     | 0       | Toggle       |
//!
//! # Example
//!
//! ```rust
//! use cascade_core::param_info::{self, ParamId};
//!
//! let stages = param_info::descriptor(ParamId(103)).unwrap();
//! assert_eq!(stages.denormalize(0.0), 1.0);
//! assert_eq!(stages.denormalize(1.0), 10.0);
//! assert_eq!(param_info::find_by_name("coef+"), Some(param_info::COEF_POSITIVE));
//! ```

use crate::params::{
    COEF_DEFAULT, COEF_MAX, COEF_MIN, GAIN_DEFAULT, GAIN_MAX, GAIN_MIN, NUM_STAGES_DEFAULT,
    NUM_STAGES_MAX, NUM_STAGES_MIN,
};

/// Normalization curve between a plain value and the host's \[0, 1\] range.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Stepped(steps)**: `plain = min + trunc(n · steps)`
/// - **Toggle**: `plain = n > 0.5 ? 1 : 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Continuous linear mapping.
    #[default]
    Linear,
    /// Integer parameter with `steps + 1` discrete values starting at `min`.
    Stepped(u32),
    /// Two-state switch thresholded at 0.5.
    Toggle,
}

/// Stable parameter identifier.
///
/// Part of the persisted automation contract with the host: an ID never
/// changes once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Parameter capability flags for the host.
///
/// ```rust
/// use cascade_core::param_info::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!flags.contains(ParamFlags::BYPASS));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter takes discrete values.
    pub const STEPPED: Self = Self(1 << 1);
    /// Parameter is the plugin's bypass switch.
    pub const BYPASS: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Metadata for one host-visible parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name.
    pub name: &'static str,
    /// Short display name, at most 8 characters.
    pub short_name: &'static str,
    /// Smallest plain value.
    pub min: f32,
    /// Largest plain value.
    pub max: f32,
    /// Plain value on a fresh instance.
    pub default: f32,
    /// Stable host ID.
    pub id: ParamId,
    /// Stable snake-case key used by presets and config files.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Host capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Continuous linear parameter.
    pub const fn linear(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Integer parameter covering `min..=max`.
    pub const fn stepped(
        name: &'static str,
        short_name: &'static str,
        min: u32,
        max: u32,
        default: u32,
    ) -> Self {
        Self {
            name,
            short_name,
            min: min as f32,
            max: max as f32,
            default: default as f32,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Stepped(max - min),
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// On/off switch stored as `0.0` / `1.0`.
    pub const fn toggle(name: &'static str, short_name: &'static str, default_on: bool) -> Self {
        Self {
            name,
            short_name,
            min: 0.0,
            max: 1.0,
            default: if default_on { 1.0 } else { 0.0 },
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Toggle,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamps a plain value to this parameter's range.
    ///
    /// NaN maps to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Converts a plain value to the host's normalized range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cascade_core::param_info::{PARAMS, NUM_STAGES, GAIN};
    ///
    /// assert_eq!(PARAMS[GAIN].normalize(0.25), 0.25);
    /// assert_eq!(PARAMS[NUM_STAGES].normalize(10.0), 1.0);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let value = self.clamp(value);
        match self.scale {
            ParamScale::Linear => {
                let range = self.max - self.min;
                if range == 0.0 {
                    0.0
                } else {
                    (value - self.min) / range
                }
            }
            ParamScale::Stepped(0) => 0.0,
            ParamScale::Stepped(steps) => libm::floorf(value - self.min) / steps as f32,
            ParamScale::Toggle => {
                if value > 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Converts a normalized host value to a plain value.
    ///
    /// Out-of-range input is clamped to \[0, 1\] first.
    #[inline]
    pub fn denormalize(&self, normalized: f64) -> f32 {
        if normalized.is_nan() {
            return self.default;
        }
        let normalized = normalized.clamp(0.0, 1.0);
        match self.scale {
            ParamScale::Linear => self.min + normalized as f32 * (self.max - self.min),
            ParamScale::Stepped(steps) => {
                let step = libm::floor(normalized * f64::from(steps) + STEP_SNAP);
                self.min + step as f32
            }
            ParamScale::Toggle => {
                if normalized > 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Slack added before truncating a stepped value, so that `k / steps`
/// carried through an `f32` still lands on step `k`.
const STEP_SNAP: f64 = 1e-5;

/// Index of the positive drive coefficient.
pub const COEF_POSITIVE: usize = 0;
/// Index of the negative drive coefficient.
pub const COEF_NEGATIVE: usize = 1;
/// Index of the stage count.
pub const NUM_STAGES: usize = 2;
/// Index of the alternating-inversion switch.
pub const INVERT_STAGES: usize = 3;
/// Index of the output gain.
pub const GAIN: usize = 4;
/// Index of the bypass switch.
pub const BYPASS: usize = 5;

/// Number of host-visible parameters.
pub const PARAM_COUNT: usize = 6;

/// The parameter table, in host index order.
pub const PARAMS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::linear("Coef Positive", "Coef+", COEF_MIN, COEF_MAX, COEF_DEFAULT)
        .with_id(ParamId(101), "coef_positive"),
    ParamDescriptor::linear("Coef Negative", "Coef-", COEF_MIN, COEF_MAX, COEF_DEFAULT)
        .with_id(ParamId(102), "coef_negative"),
    ParamDescriptor::stepped(
        "Num Stages",
        "Stages",
        NUM_STAGES_MIN,
        NUM_STAGES_MAX,
        NUM_STAGES_DEFAULT,
    )
    .with_id(ParamId(103), "num_stages"),
    ParamDescriptor::toggle("Invert Stages", "Invert", true)
        .with_id(ParamId(104), "invert_stages"),
    ParamDescriptor::linear("Gain", "Gain", GAIN_MIN, GAIN_MAX, GAIN_DEFAULT)
        .with_id(ParamId(105), "gain"),
    ParamDescriptor::toggle("Bypass", "Bypass", false)
        .with_id(ParamId(106), "bypass")
        .with_flags(
            ParamFlags::AUTOMATABLE
                .union(ParamFlags::STEPPED)
                .union(ParamFlags::BYPASS),
        ),
];

/// Index of the parameter with the given ID.
///
/// Linear scan over six entries; fine on the audio thread.
#[inline]
pub fn index_of(id: ParamId) -> Option<usize> {
    PARAMS.iter().position(|d| d.id == id)
}

/// Descriptor of the parameter with the given ID.
#[inline]
pub fn descriptor(id: ParamId) -> Option<&'static ParamDescriptor> {
    index_of(id).map(|i| &PARAMS[i])
}

/// Index of a parameter by name, short name or string ID (case-insensitive).
pub fn find_by_name(name: &str) -> Option<usize> {
    PARAMS.iter().position(|d| {
        d.name.eq_ignore_ascii_case(name)
            || d.short_name.eq_ignore_ascii_case(name)
            || d.string_id.eq_ignore_ascii_case(name)
    })
}

/// Plain defaults in index order.
pub fn default_values() -> [f32; PARAM_COUNT] {
    let mut values = [0.0; PARAM_COUNT];
    for (value, desc) in values.iter_mut().zip(PARAMS.iter()) {
        *value = desc.default;
    }
    values
}
