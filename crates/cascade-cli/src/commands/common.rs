//! Parameter flags shared by `process` and `preset save`.

use cascade_core::param_info::{
    BYPASS, COEF_NEGATIVE, COEF_POSITIVE, GAIN, INVERT_STAGES, NUM_STAGES,
};
use cascade_core::{ParamDescriptor, ParamScale};
use cascade_plugin::ShaperShared;
use clap::Args;

/// Physical parameter overrides. Unset flags leave the current value alone.
#[derive(Args, Debug, Default, Clone)]
pub struct ParamArgs {
    /// Drive coefficient for positive samples (0.1 - 2.0)
    #[arg(long, value_name = "COEF")]
    pub coef_pos: Option<f32>,

    /// Drive coefficient for negative samples (0.1 - 2.0)
    #[arg(long, value_name = "COEF")]
    pub coef_neg: Option<f32>,

    /// Number of shaping stages (1 - 10)
    #[arg(long, value_name = "N")]
    pub stages: Option<u32>,

    /// Flip polarity on every odd stage
    #[arg(long, value_name = "BOOL")]
    pub invert: Option<bool>,

    /// Output gain (0.0 - 1.0)
    #[arg(long)]
    pub gain: Option<f32>,

    /// Copy input to output untouched
    #[arg(long, value_name = "BOOL")]
    pub bypass: Option<bool>,
}

impl ParamArgs {
    /// Write every flag that was given into `shared`.
    pub fn apply(&self, shared: &ShaperShared) {
        if let Some(v) = self.coef_pos {
            shared.set_value(COEF_POSITIVE, v);
        }
        if let Some(v) = self.coef_neg {
            shared.set_value(COEF_NEGATIVE, v);
        }
        if let Some(v) = self.stages {
            shared.set_value(NUM_STAGES, v as f32);
        }
        if let Some(v) = self.invert {
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

/// Plain value of a switch.
pub fn toggle(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

/// Human-readable plain value for a parameter.
pub fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    match desc.scale {
        ParamScale::Toggle => {
            if value > 0.5 {
                "On".to_string()
            } else {
                "Off".to_string()
            }
        }
        ParamScale::Stepped(_) => format!("{}", value as u32),
        ParamScale::Linear => format!("{value:.3}"),
    }
}
