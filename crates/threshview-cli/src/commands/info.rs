use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use threshview_core::loader::load_document;

use crate::summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Engine configuration TOML
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = super::load_engine_config(args.config.as_deref())?;

    for (i, file) in args.files.iter().enumerate() {
        if i > 0 {
            println!();
        }

        let doc = load_document(file, &config)?;

        println!("File:          {}", file.display());
        println!("Source:        {}x{}", doc.source_width, doc.source_height);
        println!("Preview:       {}x{}", doc.width, doc.height);
        println!(
            "Thumbnail:     {}x{}",
            doc.thumbnail.width(),
            doc.thumbnail.height()
        );
        println!("Gray buffer:   {} bytes", doc.grayscale.len());
        println!("Color buffer:  {} bytes", doc.color.len());
    }

    summary::print_config_summary(&config);
    Ok(())
}
