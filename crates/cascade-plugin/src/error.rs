//! Error types for the host adapter.

use thiserror::Error;

/// Errors from decoding or encoding persisted state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The stream ended before a full state record was read.
    #[error("state truncated: expected {expected} bytes, found {found}")]
    Truncated {
        /// Bytes required for a complete record.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },

    /// A float field held NaN or infinity.
    #[error("state field '{field}' is not finite: {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The decoded value.
        value: f32,
    },

    /// Underlying stream failure.
    #[error("state I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StateError {
    /// Create a truncation error.
    pub fn truncated(expected: usize, found: usize) -> Self {
        StateError::Truncated { expected, found }
    }

    /// Create a non-finite field error.
    pub fn non_finite(field: &'static str, value: f32) -> Self {
        StateError::NonFinite { field, value }
    }
}

/// Errors from the block processor.
///
/// Returned before any output sample is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// An input/output channel pair had different lengths.
    #[error("channel {channel}: input has {input} samples, output has {output}")]
    ChannelLengthMismatch {
        /// Zero-based channel index.
        channel: usize,
        /// Input buffer length.
        input: usize,
        /// Output buffer length.
        output: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn truncated_factory_and_display() {
        let err = StateError::truncated(24, 10);
        assert!(matches!(
            err,
            StateError::Truncated {
                expected: 24,
                found: 10
            }
        ));
        assert_eq!(err.to_string(), "state truncated: expected 24 bytes, found 10");
    }

    #[test]
    fn non_finite_names_field() {
        let err = StateError::non_finite("output_gain", f32::INFINITY);
        assert!(err.to_string().contains("output_gain"));
        assert!(err.source().is_none());
    }

    #[test]
    fn io_error_chains_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "mock");
        let err = StateError::from(io);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("mock"));
    }

    #[test]
    fn mismatch_display() {
        let err = ProcessError::ChannelLengthMismatch {
            channel: 1,
            input: 64,
            output: 32,
        };
        assert_eq!(
            err.to_string(),
            "channel 1: input has 64 samples, output has 32"
        );
    }
}
