pub mod config;
pub mod info;
pub mod mask;
pub mod overlay;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use threshview_core::config::EngineConfig;
use threshview_core::params::{Comparison, OverlayColor, ThresholdParams};

/// Load the engine config from a TOML file, or fall back to defaults.
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Resolve threshold parameters from CLI flags over config defaults.
pub fn resolve_params(
    config: &EngineConfig,
    threshold: Option<u8>,
    less_than: bool,
    color: Option<&str>,
) -> Result<ThresholdParams> {
    let mut params = config.initial_params;
    if let Some(t) = threshold {
        params.threshold = t;
    }
    if less_than {
        params.direction = Comparison::LessThan;
    }
    if let Some(hex) = color {
        params.overlay = parse_overlay_color(hex)?;
    }
    Ok(params)
}

/// Parse "RRGGBB" or "RRGGBBAA" hex into an overlay color.
pub fn parse_overlay_color(hex: &str) -> Result<OverlayColor> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        anyhow::bail!("Overlay color must be RRGGBB or RRGGBBAA hex, got {hex:?}");
    }
    let channel = |i: usize| -> Result<u8> {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .with_context(|| format!("Invalid hex color component in {hex:?}"))
    };
    Ok(OverlayColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
        a: if hex.len() == 8 { channel(6)? } else { 255 },
    })
}

/// Output path for one input: either the explicit file (single input
/// only), or `<stem>_<suffix>.png` next to the input or under the given
/// directory.
pub fn output_path(input: &Path, output: Option<&Path>, many: bool, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".into());
    let derived = format!("{stem}_{suffix}.png");

    match output {
        Some(out) if many || out.is_dir() => out.join(derived),
        Some(out) => out.to_path_buf(),
        None => input.with_file_name(derived),
    }
}
