//! Binary preset files in the plugin's persisted-state layout.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use cascade_plugin::ShaperShared;
use clap::{Args, Subcommand};

use super::common::{ParamArgs, format_value};

#[derive(Args)]
pub struct PresetArgs {
    #[command(subcommand)]
    command: PresetCommand,
}

#[derive(Subcommand)]
enum PresetCommand {
    /// Write a preset from defaults plus the given flags
    Save {
        /// Preset file to create
        file: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Print the values stored in a preset
    Show {
        /// Preset file to read
        file: PathBuf,
    },
}

pub fn run(args: PresetArgs) -> anyhow::Result<()> {
    match args.command {
        PresetCommand::Save { file, params } => save(&file, &params),
        PresetCommand::Show { file } => show(&file),
    }
}

fn save(path: &Path, params: &ParamArgs) -> anyhow::Result<()> {
    let shared = ShaperShared::new();
    params.apply(&shared);

    let file =
        File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    shared.save_state(&mut writer)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), "saved preset");
    println!("Saved preset to {}", path.display());
    Ok(())
}

fn show(path: &Path) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    let shared = ShaperShared::new();
    shared
        .load_state(&mut BufReader::new(file))
        .with_context(|| format!("failed to load preset '{}'", path.display()))?;

    println!("Preset: {}\n", path.display());
    for (desc, value) in shared.descriptors().iter().zip(shared.values()) {
        println!("  {:<16} {}", desc.name, format_value(desc, value));
    }
    Ok(())
}
