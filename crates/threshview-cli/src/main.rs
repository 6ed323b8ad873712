mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "threshview", about = "Luminance thresholding and mask export tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image and buffer geometry for one or more files
    Info(commands::info::InfoArgs),
    /// Export binary luminance masks
    Mask(commands::mask::MaskArgs),
    /// Export color-overlay composites
    Overlay(commands::overlay::OverlayArgs),
    /// Print or save the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Mask(args) => commands::mask::run(args),
        Commands::Overlay(args) => commands::overlay::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
