//! Integration tests for cascade-cli.
//!
//! Drives the built `cascade` binary against WAV and preset files in
//! temporary directories.

use std::path::Path;
use std::process::Command;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Helper to get the path to the `cascade` binary built by cargo.
fn cascade_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cascade"))
}

fn write_float_wav(path: &Path, channels: &[Vec<f32>]) {
    let spec = WavSpec {
        channels: channels.len() as u16,
        sample_rate: 48000,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for frame in 0..channels[0].len() {
        for channel in channels {
            writer.write_sample(channel[frame]).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn read_float_wav(path: &Path) -> (WavSpec, Vec<f32>) {
    let reader = WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader
        .into_samples::<f32>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    (spec, samples)
}

fn test_signal(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i as f32 * 0.05).sin() * 0.7).collect()
}

// ---------------------------------------------------------------------------
// `cascade params`
// ---------------------------------------------------------------------------

#[test]
fn cli_params_lists_registry() {
    let output = cascade_bin()
        .arg("params")
        .output()
        .expect("failed to run cascade params");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "Coef Positive",
        "Coef Negative",
        "Num Stages",
        "Invert Stages",
        "Gain",
        "Bypass",
    ] {
        assert!(stdout.contains(name), "params listing should contain '{name}'");
    }
    assert!(stdout.contains("101"));
    assert!(stdout.contains("stepped (9)"));
}

// ---------------------------------------------------------------------------
// `cascade process`
// ---------------------------------------------------------------------------

#[test]
fn cli_process_stereo_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_float_wav(&input, &[test_signal(1001), test_signal(1001)]);

    let status = cascade_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .args(["--stages", "4", "--coef-pos", "1.5", "--block-size", "100"])
        .status()
        .expect("failed to run cascade process");
    assert!(status.success());

    let (spec, samples) = read_float_wav(&output);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(spec.sample_format, SampleFormat::Float);
    assert_eq!(samples.len(), 2002);
    assert!(samples.iter().all(|s| s.is_finite()));
    assert!(samples.iter().any(|s| *s != 0.0));
}

#[test]
fn cli_process_bypass_is_bit_exact() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let signal = test_signal(777);
    write_float_wav(&input, std::slice::from_ref(&signal));

    let status = cascade_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .args(["--bypass", "true"])
        .status()
        .unwrap();
    assert!(status.success());

    let (_, samples) = read_float_wav(&output);
    assert_eq!(samples, signal);
}

#[test]
fn cli_scalar_and_simd_render_identically() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let simd = dir.path().join("simd.wav");
    let scalar = dir.path().join("scalar.wav");
    write_float_wav(&input, &[test_signal(515)]);

    for (out, extra) in [(&simd, None), (&scalar, Some("--scalar"))] {
        let mut cmd = cascade_bin();
        cmd.arg("process").arg(&input).arg(out).args(["--block-size", "33"]);
        if let Some(flag) = extra {
            cmd.arg(flag);
        }
        assert!(cmd.status().unwrap().success());
    }

    assert_eq!(read_float_wav(&simd).1, read_float_wav(&scalar).1);
}

#[test]
fn cli_flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let silenced = dir.path().join("silenced.wav");
    let restored = dir.path().join("restored.wav");
    let config = dir.path().join("render.toml");
    write_float_wav(&input, &[test_signal(64)]);
    std::fs::write(&config, "block_size = 16\n\n[params]\ngain = 0.0\n").unwrap();

    let status = cascade_bin()
        .arg("process")
        .arg(&input)
        .arg(&silenced)
        .arg("--config")
        .arg(&config)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(read_float_wav(&silenced).1.iter().all(|s| *s == 0.0));

    let status = cascade_bin()
        .arg("process")
        .arg(&input)
        .arg(&restored)
        .arg("--config")
        .arg(&config)
        .args(["--gain", "1.0"])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(read_float_wav(&restored).1.iter().any(|s| *s != 0.0));
}

#[test]
fn cli_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let config = dir.path().join("bad.toml");
    write_float_wav(&input, &[test_signal(16)]);
    std::fs::write(&config, "[params]\ndrive = 9\n").unwrap();

    let result = cascade_bin()
        .arg("process")
        .arg(&input)
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn cli_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = cascade_bin()
        .arg("process")
        .arg(dir.path().join("nope.wav"))
        .arg(dir.path().join("out.wav"))
        .output()
        .unwrap();
    assert!(!result.status.success());
}

// ---------------------------------------------------------------------------
// `cascade preset`
// ---------------------------------------------------------------------------

#[test]
fn cli_preset_save_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let preset = dir.path().join("crunch.bin");

    let status = cascade_bin()
        .args(["preset", "save"])
        .arg(&preset)
        .args(["--stages", "3", "--invert", "false"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(std::fs::metadata(&preset).unwrap().len(), 24);

    let output = cascade_bin()
        .args(["preset", "show"])
        .arg(&preset)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stages_line = stdout
        .lines()
        .find(|l| l.contains("Num Stages"))
        .expect("stage count listed");
    assert!(stages_line.trim_end().ends_with('3'), "{stages_line}");
    let invert_line = stdout
        .lines()
        .find(|l| l.contains("Invert Stages"))
        .expect("invert listed");
    assert!(invert_line.contains("Off"), "{invert_line}");
}

#[test]
fn cli_preset_feeds_process() {
    let dir = tempfile::tempdir().unwrap();
    let preset = dir.path().join("bypass.bin");
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let signal = test_signal(200);
    write_float_wav(&input, std::slice::from_ref(&signal));

    assert!(
        cascade_bin()
            .args(["preset", "save"])
            .arg(&preset)
            .args(["--bypass", "true"])
            .status()
            .unwrap()
            .success()
    );
    assert!(
        cascade_bin()
            .arg("process")
            .arg(&input)
            .arg(&output)
            .arg("--preset")
            .arg(&preset)
            .status()
            .unwrap()
            .success()
    );
    assert_eq!(read_float_wav(&output).1, signal);
}

#[test]
fn cli_truncated_preset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let preset = dir.path().join("short.bin");
    std::fs::write(&preset, [0u8; 10]).unwrap();

    let output = cascade_bin()
        .args(["preset", "show"])
        .arg(&preset)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("truncated"), "{stderr}");
}

#[test]
fn cli_flag_turns_preset_bypass_off() {
    let dir = tempfile::tempdir().unwrap();
    let preset = dir.path().join("bypass.bin");
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let signal = test_signal(200);
    write_float_wav(&input, std::slice::from_ref(&signal));

    assert!(
        cascade_bin()
            .args(["preset", "save"])
            .arg(&preset)
            .args(["--bypass", "true"])
            .status()
            .unwrap()
            .success()
    );
    assert!(
        cascade_bin()
            .arg("process")
            .arg(&input)
            .arg(&output)
            .arg("--preset")
            .arg(&preset)
            .args(["--bypass", "false"])
            .status()
            .unwrap()
            .success()
    );
    assert_ne!(read_float_wav(&output).1, signal);
}
