use std::path::Path;

use image::imageops::FilterType;
use image::RgbaImage;
use ndarray::Array2;
use tracing::debug;

use crate::config::EngineConfig;
use crate::document::ImageDocument;
use crate::error::{Result, ThreshViewError};

/// ITU-R BT.709 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.0722;

/// Luminance of one RGB sample, truncated to an integer and clamped to
/// [0, 255].
///
/// Truncation (not rounding) is load-bearing: the exporter reruns this
/// derivation and must reproduce the stored grayscale plane bit for bit.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let l = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    (l as i32).clamp(0, 255) as u8
}

/// Decode an image file and produce a document with preview-resolution
/// buffers and display bitmaps.
///
/// A decode failure yields `Load` with the offending path; no partial
/// document is ever returned.
pub fn load_document(path: &Path, config: &EngineConfig) -> Result<ImageDocument> {
    let img = image::open(path)
        .map_err(|source| ThreshViewError::Load {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    Ok(document_from_rgba(path, &img, config))
}

/// Build a document from already-decoded RGBA samples.
///
/// Preview and thumbnail are two independent resamples of the source,
/// not of each other. The grayscale and color buffers are extracted from
/// the resized preview.
pub fn document_from_rgba(path: &Path, source: &RgbaImage, config: &EngineConfig) -> ImageDocument {
    let (preview, thumbnail) = rayon::join(
        || resize_to_fit(source, config.preview_max_side),
        || resize_to_fit(source, config.thumbnail_max_side),
    );

    let width = preview.width() as usize;
    let height = preview.height() as usize;

    let mut gray = Vec::with_capacity(width * height);
    let mut color = Vec::with_capacity(width * height * 4);
    for p in preview.pixels() {
        let [r, g, b, a] = p.0;
        gray.push(luminance(r, g, b));
        color.push(b);
        color.push(g);
        color.push(r);
        color.push(a);
    }

    let grayscale = Array2::from_shape_vec((height, width), gray)
        .expect("buffer length matches preview dimensions");

    debug!(
        path = %path.display(),
        source_w = source.width(),
        source_h = source.height(),
        preview_w = width,
        preview_h = height,
        "document buffers produced"
    );

    ImageDocument {
        path: path.to_path_buf(),
        source_width: source.width(),
        source_height: source.height(),
        width,
        height,
        grayscale,
        color,
        preview,
        thumbnail,
    }
}

/// Uniform scale-to-fit within a square bounding box, aspect preserved.
pub fn resize_to_fit(source: &RgbaImage, max_side: u32) -> RgbaImage {
    let (w, h) = source.dimensions();
    if w == 0 || h == 0 || max_side == 0 {
        return source.clone();
    }

    let scale = (max_side as f64 / w as f64).min(max_side as f64 / h as f64);
    let new_w = ((w as f64 * scale).round() as u32).max(1);
    let new_h = ((h as f64 * scale).round() as u32).max(1);
    if (new_w, new_h) == (w, h) {
        return source.clone();
    }

    image::imageops::resize(source, new_w, new_h, FilterType::CatmullRom)
}
