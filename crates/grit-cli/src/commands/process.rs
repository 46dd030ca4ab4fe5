//! File-based distortion rendering command.

use super::common::{parse_bit_depth, parse_mode_arg, peak, rms};
use anyhow::Context;
use clap::Args;
use grit_config::RenderSettings;
use grit_core::linear_to_db;
use grit_io::{WavSpec, read_wav, write_wav};
use grit_shaper::{DistortionMode, DistortionProcessor, ProcessSpec};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output_path: PathBuf,

    /// Render settings file (TOML); flags below override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Distortion mode (id, name or index; see `grit modes`)
    #[arg(short, long, value_parser = parse_mode_arg)]
    mode: Option<DistortionMode>,

    /// Drive in dB (0 to 24)
    #[arg(short, long, value_name = "DB")]
    drive: Option<f32>,

    /// Dry/wet mix (0 to 1)
    #[arg(long)]
    mix: Option<f32>,

    /// Tone cutoff in Hz (1 to 20000)
    #[arg(short, long, value_name = "HZ")]
    tone: Option<f32>,

    /// Output trim in dB (-24 to 24)
    #[arg(long = "output", value_name = "DB", allow_negative_numbers = true)]
    output_db: Option<f32>,

    /// Processing block size in frames
    #[arg(long)]
    block_size: Option<usize>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

impl ProcessArgs {
    /// Settings file (or defaults) with command-line overrides applied.
    fn settings(&self) -> anyhow::Result<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => RenderSettings::load(path)?,
            None => RenderSettings::default(),
        };

        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if let Some(drive) = self.drive {
            settings.drive_db = drive;
        }
        if let Some(mix) = self.mix {
            settings.mix = mix;
        }
        if let Some(tone) = self.tone {
            settings.tone_hz = tone;
        }
        if let Some(output_db) = self.output_db {
            settings.output_db = output_db;
        }
        if let Some(block_size) = self.block_size {
            settings.block_size = block_size;
        }

        settings.validated().context("invalid render settings")
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let settings = args.settings()?;

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let channels = usize::from(spec.channels);
    if channels == 0 {
        anyhow::bail!("{} has no channels", args.input.display());
    }
    let frames = samples.len() / channels;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} ch, {} Hz, {:.2}s",
        frames,
        channels,
        spec.sample_rate,
        frames as f32 / sample_rate
    );

    let mut processor = DistortionProcessor::new();
    settings.apply(processor.params());
    processor.prepare(&ProcessSpec::new(sample_rate, settings.block_size, channels));

    println!(
        "Processing: {} | drive {:.1} dB | mix {:.2} | tone {:.0} Hz | output {:.1} dB",
        settings.mode, settings.drive_db, settings.mix, settings.tone_hz, settings.output_db
    );
    tracing::debug!(block_size = settings.block_size, channels, "render started");

    let input_rms = rms(&samples);
    let input_peak = peak(&samples);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let block_samples = settings.block_size * channels;
    let mut done = 0u64;
    for block in samples.chunks_mut(block_samples) {
        processor.process_interleaved(block, channels);
        done += (block.len() / channels) as u64;
        pb.set_position(done);
    }
    pb.finish_with_message("done");

    let output_rms = rms(&samples);
    let output_peak = peak(&samples);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(output_rms),
        linear_to_db(output_peak)
    );

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output_path.display());
    write_wav(&args.output_path, &samples, out_spec)
        .with_context(|| format!("failed to write {}", args.output_path.display()))?;
    tracing::info!(
        output = %args.output_path.display(),
        frames,
        bits = args.bit_depth,
        "render complete"
    );
    println!("Done!");

    Ok(())
}
