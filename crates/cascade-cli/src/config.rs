//! TOML render configuration.
//!
//! ```toml
//! block_size = 256
//! kernel = "scalar"
//!
//! [params]
//! coef_positive = 1.2
//! coef_negative = 0.4
//! num_stages = 4
//! invert_stages = false
//! gain = 0.8
//! bypass = false
//! ```
//!
//! Every key is optional. Parameter values are physical, not normalized.

use std::path::{Path, PathBuf};

use cascade_core::Kernel;
use cascade_core::param_info::{
    BYPASS, COEF_NEGATIVE, COEF_POSITIVE, GAIN, INVERT_STAGES, NUM_STAGES,
};
use cascade_plugin::ShaperShared;
use serde::Deserialize;
use thiserror::Error;

use crate::commands::common::toggle;

/// Errors from loading a render configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }
}

/// Kernel choice as spelled in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelChoice {
    /// Four samples per iteration.
    Simd,
    /// Reference scalar loop.
    Scalar,
}

impl From<KernelChoice> for Kernel {
    fn from(choice: KernelChoice) -> Self {
        match choice {
            KernelChoice::Simd => Kernel::Simd,
            KernelChoice::Scalar => Kernel::Scalar,
        }
    }
}

/// Physical parameter values; unset keys leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsConfig {
    /// Drive coefficient for positive samples.
    pub coef_positive: Option<f32>,
    /// Drive coefficient for negative samples.
    pub coef_negative: Option<f32>,
    /// Stage count.
    pub num_stages: Option<u32>,
    /// Alternating-stage inversion.
    pub invert_stages: Option<bool>,
    /// Output gain.
    pub gain: Option<f32>,
    /// Bypass switch.
    pub bypass: Option<bool>,
}

impl ParamsConfig {
    /// Write every set key into `shared`.
    pub fn apply(&self, shared: &ShaperShared) {
        if let Some(v) = self.coef_positive {
            shared.set_value(COEF_POSITIVE, v);
        }
        if let Some(v) = self.coef_negative {
            shared.set_value(COEF_NEGATIVE, v);
        }
        if let Some(v) = self.num_stages {
            shared.set_value(NUM_STAGES, v as f32);
        }
        if let Some(v) = self.invert_stages {
            shared.set_value(INVERT_STAGES, toggle(v));
        }
        if let Some(v) = self.gain {
            shared.set_value(GAIN, v);
        }
        if let Some(v) = self.bypass {
            shared.set_value(BYPASS, toggle(v));
        }
    }
}

/// A render configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Samples per processing block.
    pub block_size: Option<usize>,
    /// Kernel to render with.
    pub kernel: Option<KernelChoice>,
    /// Parameter values.
    #[serde(default)]
    pub params: ParamsConfig,
}

impl RenderConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&text)
    }
}
