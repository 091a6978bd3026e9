//! WAV file I/O with per-channel sample buffers.
//!
//! Integer formats are scaled to \[-1.0, 1.0); float files are read as is.
//! Output is always 32-bit float.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};
use thiserror::Error;

/// WAV I/O errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the WAV codec.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// The file declared zero channels.
    #[error("WAV file has no channels")]
    NoChannels,

    /// More channels than a WAV header can declare.
    #[error("{0} channels exceeds the WAV limit of {max}", max = u16::MAX)]
    TooManyChannels(usize),
}

/// Result type for WAV operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Deinterleaved audio.
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    /// One buffer per channel, all the same length.
    pub channels: Vec<Vec<f32>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Audio {
    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Silent audio with the same shape.
    pub fn silent_like(&self) -> Self {
        Self {
            channels: vec![vec![0.0; self.frames()]; self.channels.len()],
            sample_rate: self.sample_rate,
        }
    }
}

/// Read a WAV file into per-channel buffers.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<Audio> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channel_count = usize::from(spec.channels);
    if channel_count == 0 {
        return Err(Error::NoChannels);
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channel_count;
    let mut channels = vec![Vec::with_capacity(frames); channel_count];
    for frame in interleaved.chunks_exact(channel_count) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok(Audio {
        channels,
        sample_rate: spec.sample_rate,
    })
}

/// Write per-channel buffers as a 32-bit float WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &Audio) -> Result<()> {
    let channel_count = u16::try_from(audio.channels.len())
        .map_err(|_| Error::TooManyChannels(audio.channels.len()))?;
    if channel_count == 0 {
        return Err(Error::NoChannels);
    }
    let spec = hound::WavSpec {
        channels: channel_count,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for frame in 0..audio.frames() {
        for channel in &audio.channels {
            writer.write_sample(channel[frame])?;
        }
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_stereo_float() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let audio = Audio {
            channels: vec![vec![0.1, -0.2, 0.3], vec![-0.4, 0.5, -0.6]],
            sample_rate: 44100,
        };
        write_wav(&path, &audio).unwrap();
        assert_eq!(read_wav(&path).unwrap(), audio);
    }

    #[test]
    fn reads_int16_scaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("int.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(16384_i16).unwrap();
        writer.write_sample(-32768_i16).unwrap();
        writer.finalize().unwrap();

        let audio = read_wav(&path).unwrap();
        assert_eq!(audio.channels, vec![vec![0.5, -1.0]]);
        assert_eq!(audio.sample_rate, 48000);
    }

    #[test]
    fn channel_count_limits_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wav");

        let empty = Audio {
            channels: Vec::new(),
            sample_rate: 48000,
        };
        assert!(matches!(write_wav(&path, &empty), Err(Error::NoChannels)));

        let wide = Audio {
            channels: vec![Vec::new(); usize::from(u16::MAX) + 1],
            sample_rate: 48000,
        };
        let err = write_wav(&path, &wide).unwrap_err();
        assert!(matches!(err, Error::TooManyChannels(65536)));
        assert!(err.to_string().contains("65536 channels"));
        assert!(!path.exists());
    }

    #[test]
    fn silent_like_keeps_shape() {
        let audio = Audio {
            channels: vec![vec![1.0; 5], vec![1.0; 5]],
            sample_rate: 8000,
        };
        let silent = audio.silent_like();
        assert_eq!(silent.channels.len(), 2);
        assert_eq!(silent.frames(), 5);
        assert!(silent.channels.iter().flatten().all(|s| *s == 0.0));
    }
}
