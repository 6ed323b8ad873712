use std::path::PathBuf;

use image::RgbaImage;
use ndarray::Array2;

/// A displayable BGRA bitmap, 8 bits per channel, row-major, no padding.
///
/// This is the type a recompute produces. A finished bitmap is never
/// mutated; the scheduler replaces a document's current bitmap wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BgraBitmap {
    pub width: usize,
    pub height: usize,
    /// `width * height * 4` bytes in B,G,R,A order.
    pub data: Vec<u8>,
}

impl BgraBitmap {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * 4);
        Self {
            width,
            height,
            data,
        }
    }

    /// Read one pixel as `[b, g, r, a]`, or `None` outside the bitmap.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }
}

/// One loaded image: preview-resolution pixel buffers plus the display
/// bitmaps derived once at load time.
///
/// The buffers are written exactly once by the loader and read-only
/// afterwards, so concurrent threshold computations need no locking.
#[derive(Clone, Debug)]
pub struct ImageDocument {
    pub path: PathBuf,
    /// Decoded source dimensions, before any resampling.
    pub source_width: u32,
    pub source_height: u32,
    /// Buffer dimensions (preview resolution).
    pub width: usize,
    pub height: usize,
    /// Luminance plane, shape = (height, width).
    pub grayscale: Array2<u8>,
    /// Interleaved B,G,R,A samples, `width * height * 4` bytes.
    pub color: Vec<u8>,
    /// Display bitmaps, independent of threshold state.
    pub preview: RgbaImage,
    pub thumbnail: RgbaImage,
}

impl ImageDocument {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// A document with an empty grayscale plane has nothing to threshold.
    pub fn is_processable(&self) -> bool {
        !self.grayscale.is_empty() && self.grayscale.len() == self.width * self.height
    }

    /// Whether the composite path can be used instead of the plain
    /// black/white fallback.
    pub fn has_color(&self) -> bool {
        self.color.len() == self.width * self.height * 4 && !self.color.is_empty()
    }
}
