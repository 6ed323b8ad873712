use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use ndarray::Array2;
use threshview_core::document::ImageDocument;

/// Build an RGBA test image where each pixel encodes its own coordinates
/// (r = x, g = y, b = x + y, a = 255 - x).
pub fn coordinate_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x + y) % 256) as u8,
            (255 - x % 256) as u8,
        ])
    })
}

/// Build a document directly from a grayscale plane and a BGRA color
/// buffer, bypassing the loader. Preview/thumbnail bitmaps are not used
/// by the engine and stay empty.
pub fn document_from_buffers(
    width: usize,
    height: usize,
    grayscale: Vec<u8>,
    color: Vec<u8>,
) -> ImageDocument {
    ImageDocument {
        path: PathBuf::from("synthetic.png"),
        source_width: width as u32,
        source_height: height as u32,
        width,
        height,
        grayscale: Array2::from_shape_vec((height, width), grayscale)
            .expect("grayscale length matches dimensions"),
        color,
        preview: RgbaImage::new(0, 0),
        thumbnail: RgbaImage::new(0, 0),
    }
}

/// Document with both buffers populated: gray values cycle the given row
/// pattern, the color buffer holds a distinct BGRA value per pixel.
pub fn document_with_gray_rows(width: usize, height: usize, row: &[u8]) -> ImageDocument {
    assert_eq!(row.len(), width);
    let gray: Vec<u8> = (0..height).flat_map(|_| row.iter().copied()).collect();
    let color: Vec<u8> = (0..width * height)
        .flat_map(|i| {
            let v = (i % 200) as u8;
            [v, v.wrapping_add(10), v.wrapping_add(20), 200]
        })
        .collect();
    document_from_buffers(width, height, gray, color)
}

/// Document whose color buffer is empty (threshold-only fallback path).
pub fn grayscale_only_document(width: usize, height: usize, row: &[u8]) -> ImageDocument {
    let mut doc = document_with_gray_rows(width, height, row);
    doc.color = Vec::new();
    doc
}

/// Unprocessable document: both buffers empty.
pub fn empty_document() -> ImageDocument {
    let mut doc = document_from_buffers(0, 0, Vec::new(), Vec::new());
    doc.width = 4;
    doc.height = 4;
    doc
}
