//! Static transfer curve dump.

use super::common::parse_mode_arg;
use anyhow::Context;
use clap::Args;
use grit_config::validation::validate_param;
use grit_core::db_to_linear;
use grit_shaper::params::{DRIVE, PARAMS};
use grit_shaper::{DistortionMode, transfer};
use std::io::Write;

#[derive(Args)]
pub struct CurveArgs {
    /// Distortion mode (id, name or index)
    #[arg(short, long, value_parser = parse_mode_arg)]
    mode: DistortionMode,

    /// Drive in dB (0 to 24)
    #[arg(short, long, value_name = "DB", default_value_t = 0.0)]
    drive: f32,

    /// Number of points across [-1, 1]
    #[arg(short, long, default_value_t = 101, value_parser = clap::value_parser!(u32).range(2..=1_000_000))]
    points: u32,
}

/// `points` evenly spaced `(x, wet(x))` pairs over \[-1, 1\].
pub fn curve(mode: DistortionMode, drive_db: f32, points: u32) -> Vec<(f32, f32)> {
    let gain = db_to_linear(drive_db);
    let last = points.saturating_sub(1).max(1) as f32;
    (0..points)
        .map(|i| {
            let x = -1.0 + 2.0 * i as f32 / last;
            (x, transfer::shape(mode, x, gain, drive_db))
        })
        .collect()
}

pub fn run(args: CurveArgs) -> anyhow::Result<()> {
    validate_param(&PARAMS[DRIVE], "drive", args.drive).context("invalid --drive")?;
    tracing::debug!(mode = args.mode.id(), drive_db = args.drive, points = args.points, "curve");

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    writeln!(out, "input,output")?;
    for (x, y) in curve(args.mode, args.drive, args.points) {
        writeln!(out, "{x:.6},{y:.6}")?;
    }
    out.flush()?;
    Ok(())
}
