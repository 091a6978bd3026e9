//! Cascade Core - multi-stage asymmetric waveshaping kernel
//!
//! A real-time distortion kernel built from a branch-free arctangent
//! approximation. Each sample passes through up to ten normalized soft-clip
//! stages whose drive coefficient follows the running sample's sign, with
//! optional polarity inversion on alternating stages and one output gain
//! multiply at the end.
//!
//! # Modules
//!
//! - [`lanes`] - sign-bit tricks over `f32` and `f32x4` ([`Lane`])
//! - [`fast_math`] - [`fast_atan`] and [`fast_atan_x4`]
//! - [`params`] - the per-block [`WaveshaperParams`] record and its domains
//! - [`waveshaper`] - scalar and 4-lane stage kernels
//! - [`effect`] - the [`Effect`] trait and the [`Waveshaper`] effect
//! - [`param_info`] - host-visible parameter registry
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! cascade-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use cascade_core::{Effect, Waveshaper, WaveshaperParams};
//!
//! let mut shaper = Waveshaper::new(WaveshaperParams::new(0.8, 0.3, 4, true, 0.9));
//! let input = [0.0, 0.25, -0.25, 0.5, -0.5];
//! let mut output = [0.0; 5];
//! shaper.process_block(&input, &mut output);
//! assert!(output.iter().all(|s| s.is_finite()));
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocation, locking or I/O in any kernel
//! - **Branch-free**: sign decisions are bit masks, not comparisons
//! - **One stage body**: scalar and vector paths share generic code
//! - **No unsafe**: SIMD goes through `wide`, bit casts through `bytemuck`

#![cfg_attr(not(feature = "std"), no_std)]

pub mod effect;
pub mod fast_math;
pub mod lanes;
pub mod param_info;
pub mod params;
pub mod waveshaper;

pub use effect::{Effect, Waveshaper};
pub use fast_math::{fast_atan, fast_atan_x4};
pub use lanes::Lane;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale};
pub use params::WaveshaperParams;
pub use waveshaper::{Kernel, process_scalar, process_simd};
