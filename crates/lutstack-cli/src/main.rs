//! lutstack - 3D LUT color grading CLI
//!
//! Inspects `.cube` tables, samples them, and applies layer stacks to raw
//! interleaved pixel buffers.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::{InterpName, LutSpec, PolicyName};

#[derive(Parser)]
#[command(name = "lutstack")]
#[command(author, version, about = "3D LUT color grading")]
#[command(long_about = "
Layered 3D LUT color grading on raw pixel buffers.

Examples:
  lutstack info look.cube                      # Show table info
  lutstack sample look.cube --rgb 1,0.5,0      # Sample one color
  lutstack apply in.rgba -o out.rgba -W 1920 -H 1080 -c 4 --lut warm.cube@0.26
  lutstack apply in.rgb -o out.rgb -W 640 -H 480 --config stack.yaml
  lutstack identity -s 33 -o identity.cube
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display table information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Sample a table at one color
    #[command(visible_alias = "s")]
    Sample(SampleArgs),

    /// Apply a layer stack to a raw pixel buffer
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Write an identity table
    Identity(IdentityArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input .cube file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct SampleArgs {
    /// Input .cube file
    lut: PathBuf,

    /// Color to sample, as r,g,b in [0, 1]
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
    rgb: Vec<f32>,

    /// Interpolation method
    #[arg(long, value_enum, default_value_t = InterpName::Trilinear)]
    interp: InterpName,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input raw buffer (interleaved, no header)
    input: PathBuf,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,

    /// Image width
    #[arg(short = 'W', long)]
    width: usize,

    /// Image height
    #[arg(short = 'H', long)]
    height: usize,

    /// Channels: 3 (RGB) or 4 (RGBA)
    #[arg(short, long, default_value = "3")]
    channels: usize,

    /// Bits per channel: 8 or 16 (little-endian)
    #[arg(short, long, default_value = "8")]
    depth: u8,

    /// YAML layer stack description
    #[arg(long, conflicts_with = "lut")]
    config: Option<PathBuf>,

    /// Layer as PATH[@OPACITY], bottom first (repeatable)
    #[arg(short, long)]
    lut: Vec<LutSpec>,

    /// Blend policy (overrides the config file)
    #[arg(short, long, value_enum)]
    policy: Option<PolicyName>,

    /// Contrast enhancement applied after grading
    #[arg(long)]
    contrast: Option<f32>,
}

#[derive(Args)]
struct IdentityArgs {
    /// Grid size per axis
    #[arg(short, long, default_value = "33")]
    size: usize,

    /// Output .cube file
    #[arg(short, long)]
    output: PathBuf,

    /// TITLE written to the file
    #[arg(short, long)]
    title: Option<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Sample(args) => commands::sample::run(args, cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::Identity(args) => commands::identity::run(args, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_apply_with_luts() {
        let cli = Cli::try_parse_from([
            "lutstack", "apply", "in.rgb", "-o", "out.rgb", "-W", "4", "-H", "2", "--lut",
            "a.cube@0.5", "--lut", "b.cube", "--policy", "editor-compat",
        ])
        .unwrap();
        let Commands::Apply(args) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.lut.len(), 2);
        assert_eq!(args.lut[0].opacity, 0.5);
        assert_eq!(args.lut[1].opacity, 1.0);
        assert!(matches!(args.policy, Some(PolicyName::EditorCompat)));
        assert_eq!(args.channels, 3);
        assert_eq!(args.depth, 8);
    }

    #[test]
    fn config_conflicts_with_lut() {
        let res = Cli::try_parse_from([
            "lutstack", "apply", "in.rgb", "-o", "out.rgb", "-W", "1", "-H", "1", "--lut",
            "a.cube", "--config", "s.yaml",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_sample_rgb() {
        let cli = Cli::try_parse_from(["lutstack", "-v", "sample", "x.cube", "--rgb", "1,0.5,0"])
            .unwrap();
        assert!(cli.verbose);
        let Commands::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.rgb, vec![1.0, 0.5, 0.0]);
        assert_eq!(args.interp, InterpName::Trilinear);
    }

    #[test]
    fn sample_interp_is_validated() {
        let cli = Cli::try_parse_from([
            "lutstack", "sample", "x.cube", "--rgb", "0,0,0", "--interp", "tetrahedral",
        ])
        .unwrap();
        let Commands::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.interp, InterpName::Tetrahedral);

        let cli = Cli::try_parse_from([
            "lutstack", "sample", "x.cube", "--rgb", "0,0,0", "--interp", "tetra",
        ])
        .unwrap();
        let Commands::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.interp, InterpName::Tetrahedral);

        let res = Cli::try_parse_from([
            "lutstack", "sample", "x.cube", "--rgb", "0,0,0", "--interp", "cubic",
        ]);
        assert!(res.is_err());
    }
}
