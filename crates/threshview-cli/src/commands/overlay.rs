use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use threshview_core::error::ThreshViewError;
use threshview_core::export::write_overlay;
use threshview_core::loader::load_document;

use crate::summary;

#[derive(Args)]
pub struct OverlayArgs {
    /// Input image files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Luminance threshold in [0, 255]
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Select pixels below the threshold instead of at-or-above it
    #[arg(long)]
    pub less_than: bool,

    /// Overlay color as RRGGBB or RRGGBBAA hex
    #[arg(short, long)]
    pub color: Option<String>,

    /// Output file (single input) or directory (multiple inputs);
    /// defaults to `<input>_overlay.png`
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Engine configuration TOML
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &OverlayArgs) -> Result<()> {
    let config = super::load_engine_config(args.config.as_deref())?;
    let params = super::resolve_params(
        &config,
        args.threshold,
        args.less_than,
        args.color.as_deref(),
    )?;

    let many = args.files.len() > 1;
    let pb = super::mask::batch_progress(args.files.len());

    let start = Instant::now();
    let mut written = 0usize;
    let mut skipped = 0usize;
    for file in &args.files {
        let doc = load_document(file, &config)?;
        let out_path = super::output_path(file, args.output.as_deref(), many, "overlay");

        let out = BufWriter::new(
            File::create(&out_path)
                .with_context(|| format!("Failed to create {}", out_path.display()))?,
        );
        match write_overlay(&doc, &params, out) {
            Ok(()) => written += 1,
            Err(ThreshViewError::ExportSkipped) => {
                let _ = std::fs::remove_file(&out_path);
                skipped += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to export {}", file.display()))
            }
        }

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    summary::print_export_summary("Overlay", &params, written, skipped, start.elapsed());
    Ok(())
}
