//! Host adapter for the cascade waveshaper.
//!
//! Everything between a plugin host and the real-time kernel in
//! `cascade-core`:
//!
//! | Concern | Type |
//! |---------|------|
//! | Lock-free last-value parameter cache | [`ShaperShared`] |
//! | Queued automation points | [`ParamChange`] |
//! | Per-block apply, snapshot, bypass, shape | [`WaveshaperProcessor`] |
//! | 24-byte persisted state | [`PersistedState`] |
//!
//! The control side writes into [`ShaperShared`]; the audio side owns a
//! [`WaveshaperProcessor`] holding a clone of the same cache.
//!
//! ```rust
//! use cascade_plugin::{ShaperShared, WaveshaperProcessor};
//!
//! let shared = ShaperShared::new();
//! let mut processor = WaveshaperProcessor::new(shared.clone());
//!
//! // Control side: restore a preset.
//! let mut preset = Vec::new();
//! shared.save_state(&mut preset).unwrap();
//! shared.load_state(&mut preset.as_slice()).unwrap();
//!
//! // Audio side: one block.
//! let input = [0.25_f32; 64];
//! let mut output = [0.0_f32; 64];
//! processor.process(&[], &[&input[..]], &mut [&mut output[..]]).unwrap();
//! ```

pub mod error;
pub mod events;
pub mod processor;
pub mod shared;
pub mod state;

pub use error::{ProcessError, StateError};
pub use events::ParamChange;
pub use processor::WaveshaperProcessor;
pub use shared::{BlockSnapshot, ShaperShared};
pub use state::{PersistedState, STATE_LEN};
