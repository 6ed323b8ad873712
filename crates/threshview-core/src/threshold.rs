use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ndarray::Array2;

use crate::document::BgraBitmap;
use crate::error::{Result, ThreshViewError};
use crate::params::ThresholdParams;

/// Explicit cooperative cancellation handle.
///
/// Cloned into every scheduled computation; the engine checks it between
/// rows and abandons the remaining work once it is set. Cancellation is
/// best-effort: a computation that misses the signal runs to completion,
/// and the scheduler discards its result instead.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Black/white threshold bitmap: white where the predicate selects the
/// luminance sample, black elsewhere, alpha always 255.
///
/// This is the fallback path for documents without a color buffer.
pub fn threshold_bitmap(
    grayscale: &Array2<u8>,
    params: &ThresholdParams,
    cancel: &CancelToken,
) -> Result<BgraBitmap> {
    let (height, width) = grayscale.dim();
    let mut dest = vec![0u8; width * height * 4];

    for (y, row) in grayscale.rows().into_iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(ThreshViewError::Cancelled);
        }
        let row_start = y * width * 4;
        for (x, &g) in row.iter().enumerate() {
            let v = if params.selects(g) { 255 } else { 0 };
            let idx = row_start + x * 4;
            dest[idx] = v; // B
            dest[idx + 1] = v; // G
            dest[idx + 2] = v; // R
            dest[idx + 3] = 255; // A
        }
    }

    Ok(BgraBitmap::new(width, height, dest))
}

/// Composite overlay bitmap: unselected pixels pass the original BGRA
/// sample through unchanged; selected pixels blend the overlay color over
/// the original and come out fully opaque.
///
/// Forcing alpha to 255 only for selected pixels is a deliberate display
/// rule, not general alpha compositing.
pub fn composite_overlay(
    grayscale: &Array2<u8>,
    color: &[u8],
    params: &ThresholdParams,
    cancel: &CancelToken,
) -> Result<BgraBitmap> {
    let (height, width) = grayscale.dim();
    if color.len() != width * height * 4 {
        return Err(ThreshViewError::Processing(format!(
            "color buffer length {} does not match {}x{} grayscale plane",
            color.len(),
            width,
            height
        )));
    }

    let overlay = params.overlay;
    let alpha = overlay.a as f32 / 255.0;
    let mut dest = vec![0u8; width * height * 4];

    for (y, row) in grayscale.rows().into_iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(ThreshViewError::Cancelled);
        }
        let row_start = y * width * 4;
        for (x, &g) in row.iter().enumerate() {
            let idx = row_start + x * 4;
            let orig_b = color[idx];
            let orig_g = color[idx + 1];
            let orig_r = color[idx + 2];
            let orig_a = color[idx + 3];

            let (out_b, out_g, out_r, out_a) = if params.selects(g) {
                (
                    blend(overlay.b, orig_b, alpha),
                    blend(overlay.g, orig_g, alpha),
                    blend(overlay.r, orig_r, alpha),
                    255,
                )
            } else {
                (orig_b, orig_g, orig_r, orig_a)
            };

            dest[idx] = out_b;
            dest[idx + 1] = out_g;
            dest[idx + 2] = out_r;
            dest[idx + 3] = out_a;
        }
    }

    Ok(BgraBitmap::new(width, height, dest))
}

/// `overlay * a + orig * (1 - a)`, truncated then clamped to [0, 255].
#[inline]
pub fn blend(overlay: u8, orig: u8, alpha: f32) -> u8 {
    let v = overlay as f32 * alpha + orig as f32 * (1.0 - alpha);
    (v as i32).clamp(0, 255) as u8
}
