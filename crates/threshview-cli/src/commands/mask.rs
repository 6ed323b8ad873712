use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use threshview_core::error::ThreshViewError;
use threshview_core::export::write_mask;
use threshview_core::loader::load_document;

use crate::summary;

#[derive(Args)]
pub struct MaskArgs {
    /// Input image files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Luminance threshold in [0, 255]
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Select pixels below the threshold instead of at-or-above it
    #[arg(long)]
    pub less_than: bool,

    /// Output file (single input) or directory (multiple inputs);
    /// defaults to `<input>_mask.png`
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Engine configuration TOML
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &MaskArgs) -> Result<()> {
    let config = super::load_engine_config(args.config.as_deref())?;
    let params = super::resolve_params(&config, args.threshold, args.less_than, None)?;

    let many = args.files.len() > 1;
    let pb = batch_progress(args.files.len());

    let start = Instant::now();
    let mut written = 0usize;
    let mut skipped = 0usize;
    for file in &args.files {
        let doc = load_document(file, &config)?;
        let out_path = super::output_path(file, args.output.as_deref(), many, "mask");

        let out = BufWriter::new(
            File::create(&out_path)
                .with_context(|| format!("Failed to create {}", out_path.display()))?,
        );
        match write_mask(&doc, &params, out) {
            Ok(()) => written += 1,
            Err(ThreshViewError::ExportSkipped) => {
                // Nothing to serialize: drop the empty placeholder file.
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

    summary::print_export_summary("Mask", &params, written, skipped, start.elapsed());
    Ok(())
}

pub fn batch_progress(total: usize) -> Option<ProgressBar> {
    if total < 2 {
        return None;
    }
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );
    Some(pb)
}
