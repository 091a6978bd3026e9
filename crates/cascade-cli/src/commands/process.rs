//! Offline rendering of a WAV file.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use cascade_core::Kernel;
use cascade_plugin::{ShaperShared, WaveshaperProcessor};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use super::common::ParamArgs;
use crate::config::RenderConfig;
use crate::wav::{read_wav, write_wav};

const DEFAULT_BLOCK_SIZE: usize = 512;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (32-bit float)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Render configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Binary preset to start from
    #[arg(short, long)]
    preset: Option<PathBuf>,

    #[command(flatten)]
    params: ParamArgs,

    /// Processing block size [default: 512]
    #[arg(long)]
    block_size: Option<usize>,

    /// Use the scalar reference kernel
    #[arg(long)]
    scalar: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let shared = ShaperShared::new();

    if let Some(preset_path) = &args.preset {
        let file = File::open(preset_path)
            .with_context(|| format!("failed to open preset '{}'", preset_path.display()))?;
        shared
            .load_state(&mut BufReader::new(file))
            .with_context(|| format!("failed to load preset '{}'", preset_path.display()))?;
        tracing::info!(path = %preset_path.display(), "loaded preset");
    }

    let config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    config.params.apply(&shared);
    args.params.apply(&shared);

    let block_size = args
        .block_size
        .or(config.block_size)
        .unwrap_or(DEFAULT_BLOCK_SIZE);
    if block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }
    let kernel = if args.scalar {
        Kernel::Scalar
    } else {
        config.kernel.map_or(Kernel::Simd, Kernel::from)
    };

    println!("Reading {}...", args.input.display());
    let input = read_wav(&args.input)
        .with_context(|| format!("failed to read '{}'", args.input.display()))?;
    let frames = input.frames();
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        input.channels.len(),
        input.sample_rate,
        frames as f32 / input.sample_rate as f32
    );

    let snapshot = shared.snapshot();
    tracing::debug!(?snapshot, block_size, ?kernel, "render settings");

    let mut processor = WaveshaperProcessor::new(shared);
    processor.set_kernel(kernel);
    let mut output = input.silent_like();

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut start = 0;
    while start < frames {
        let end = (start + block_size).min(frames);
        let inputs: Vec<&[f32]> = input.channels.iter().map(|c| &c[start..end]).collect();
        let mut outputs: Vec<&mut [f32]> = output
            .channels
            .iter_mut()
            .map(|c| &mut c[start..end])
            .collect();
        processor.process(&[], &inputs, &mut outputs)?;
        start = end;
        pb.set_position(start as u64);
    }
    pb.finish_with_message("done");

    let input_peak = peak(&input.channels);
    let output_peak = peak(&output.channels);
    println!("\nStats:");
    println!("  Input:  Peak {:.1} dB", linear_to_db(input_peak));
    println!("  Output: Peak {:.1} dB", linear_to_db(output_peak));

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;
    println!("Done!");

    Ok(())
}

fn peak(channels: &[Vec<f32>]) -> f32 {
    channels
        .iter()
        .flatten()
        .map(|s| s.abs())
        .fold(0.0, f32::max)
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
