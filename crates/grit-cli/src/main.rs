//! grit CLI - offline rendering and inspection for the grit distortion engine.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grit")]
#[command(author, version, about = "Waveshaping distortion for WAV files", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a WAV file through the distortion processor
    Process(commands::process::ProcessArgs),

    /// List the distortion modes
    Modes,

    /// List the processor parameters and their ranges
    Params,

    /// Print a mode's static transfer curve as CSV
    Curve(commands::curve::CurveArgs),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Modes => commands::modes::run(),
        Commands::Params => commands::params::run(),
        Commands::Curve(args) => commands::curve::run(args),
    }
}
