//! Queued parameter changes delivered with an audio block.

use cascade_core::ParamId;
use cascade_core::param_info::{self, PARAM_COUNT};

/// One host automation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    /// Target parameter.
    pub id: ParamId,
    /// Position of the point inside the block, in samples.
    pub sample_offset: u32,
    /// New value in the host's \[0, 1\] range.
    pub normalized: f64,
}

impl ParamChange {
    /// Change for `id` at `sample_offset`.
    pub fn new(id: ParamId, sample_offset: u32, normalized: f64) -> Self {
        Self {
            id,
            sample_offset,
            normalized,
        }
    }
}

/// Collapse a block's changes to one value per parameter.
///
/// For each parameter the point with the greatest `sample_offset` wins;
/// among points at the same offset the one later in `changes` wins.
/// Unknown IDs are skipped. The result is indexed like
/// [`PARAMS`](cascade_core::param_info::PARAMS).
pub fn last_values(changes: &[ParamChange]) -> [Option<f64>; PARAM_COUNT] {
    let mut latest: [Option<(u32, f64)>; PARAM_COUNT] = [None; PARAM_COUNT];
    for change in changes {
        let Some(index) = param_info::index_of(change.id) else {
            continue;
        };
        match latest[index] {
            Some((offset, _)) if offset > change.sample_offset => {}
            _ => latest[index] = Some((change.sample_offset, change.normalized)),
        }
    }
    latest.map(|slot| slot.map(|(_, value)| value))
}
