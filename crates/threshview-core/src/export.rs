use std::io::{Cursor, Write};

use image::{GrayImage, ImageFormat, Luma, RgbaImage};
use tracing::debug;

use crate::document::ImageDocument;
use crate::error::{Result, ThreshViewError};
use crate::params::ThresholdParams;
use crate::threshold::{composite_overlay, CancelToken};

/// Write a single-channel PNG mask: 255 where the predicate selects the
/// pixel, 0 elsewhere.
///
/// Runs against the document's stored buffers, the same resolution the
/// on-screen preview uses. An empty grayscale plane yields
/// `ExportSkipped` and nothing is written.
pub fn write_mask<W: Write>(
    doc: &ImageDocument,
    params: &ThresholdParams,
    mut output: W,
) -> Result<()> {
    if !doc.is_processable() {
        return Err(ThreshViewError::ExportSkipped);
    }

    let mut img = GrayImage::new(doc.width as u32, doc.height as u32);
    for ((y, x), &g) in doc.grayscale.indexed_iter() {
        let v = if params.selects(g) { 255 } else { 0 };
        img.put_pixel(x as u32, y as u32, Luma([v]));
    }

    write_png(img.as_raw(), doc, image::ExtendedColorType::L8, &mut output)?;
    debug!(path = %doc.path.display(), "mask exported");
    Ok(())
}

/// Write a full RGBA PNG with the overlay color blended onto selected
/// pixels, using the exact same compositing rule as the interactive
/// preview.
///
/// A missing grayscale or color buffer yields `ExportSkipped` and
/// nothing is written.
pub fn write_overlay<W: Write>(
    doc: &ImageDocument,
    params: &ThresholdParams,
    mut output: W,
) -> Result<()> {
    if !doc.is_processable() || !doc.has_color() {
        return Err(ThreshViewError::ExportSkipped);
    }

    let composited = composite_overlay(&doc.grayscale, &doc.color, params, &CancelToken::new())?;

    let mut img = RgbaImage::new(doc.width as u32, doc.height as u32);
    for (x, y, p) in img.enumerate_pixels_mut() {
        let [b, g, r, a] = composited
            .pixel(x as usize, y as usize)
            .expect("composite dimensions match document");
        p.0 = [r, g, b, a];
    }

    write_png(
        img.as_raw(),
        doc,
        image::ExtendedColorType::Rgba8,
        &mut output,
    )?;
    debug!(path = %doc.path.display(), "overlay exported");
    Ok(())
}

/// Encode into memory first so a failed encode never leaves a partial
/// file behind.
fn write_png<W: Write>(
    raw: &[u8],
    doc: &ImageDocument,
    color: image::ExtendedColorType,
    output: &mut W,
) -> Result<()> {
    let mut encoded = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut encoded,
        raw,
        doc.width as u32,
        doc.height as u32,
        color,
        ImageFormat::Png,
    )?;
    output.write_all(encoded.get_ref())?;
    Ok(())
}
