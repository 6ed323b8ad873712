mod common;

use ndarray::Array2;
use threshview_core::error::ThreshViewError;
use threshview_core::params::{Comparison, OverlayColor, ThresholdParams};
use threshview_core::threshold::{blend, composite_overlay, threshold_bitmap, CancelToken};

fn params(threshold: u8, direction: Comparison) -> ThresholdParams {
    ThresholdParams {
        threshold,
        direction,
        overlay: OverlayColor::default(),
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

#[test]
fn test_predicates_partition_sample_space() {
    // For every threshold (including the degenerate 0 and 255), each
    // sample is selected by exactly one direction: no overlap, no gap.
    for t in [0u8, 1, 100, 254, 255] {
        for g in 0u8..=255 {
            let ge = Comparison::GreaterOrEqual.selects(g, t);
            let lt = Comparison::LessThan.selects(g, t);
            assert_ne!(ge, lt, "g={g} t={t}");
        }
    }
}

#[test]
fn test_threshold_zero_selects_everything() {
    assert!((0u8..=255).all(|g| Comparison::GreaterOrEqual.selects(g, 0)));
    assert!(!(0u8..=255).any(|g| Comparison::LessThan.selects(g, 0)));
}

#[test]
fn test_comparison_flipped() {
    assert_eq!(
        Comparison::GreaterOrEqual.flipped(),
        Comparison::LessThan
    );
    assert_eq!(Comparison::LessThan.flipped(), Comparison::GreaterOrEqual);
}

// ---------------------------------------------------------------------------
// Threshold-only bitmap
// ---------------------------------------------------------------------------

#[test]
fn test_threshold_bitmap_black_white() {
    let gray = Array2::from_shape_vec((2, 2), vec![0u8, 99, 100, 255]).unwrap();
    let bmp = threshold_bitmap(&gray, &params(100, Comparison::GreaterOrEqual), &CancelToken::new())
        .unwrap();

    assert_eq!(bmp.width, 2);
    assert_eq!(bmp.height, 2);
    assert_eq!(bmp.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(bmp.pixel(1, 0), Some([0, 0, 0, 255]));
    assert_eq!(bmp.pixel(0, 1), Some([255, 255, 255, 255]));
    assert_eq!(bmp.pixel(1, 1), Some([255, 255, 255, 255]));
}

#[test]
fn test_threshold_bitmap_honors_direction() {
    let gray = Array2::from_shape_vec((1, 3), vec![10u8, 100, 200]).unwrap();
    let bmp =
        threshold_bitmap(&gray, &params(100, Comparison::LessThan), &CancelToken::new()).unwrap();

    assert_eq!(bmp.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(bmp.pixel(1, 0), Some([0, 0, 0, 255]));
    assert_eq!(bmp.pixel(2, 0), Some([0, 0, 0, 255]));
}

#[test]
fn test_four_by_four_scenario_selects_eight_pixels() {
    // Rows of [0, 50, 100, 150] at threshold 100: exactly the two
    // right-hand pixels of each row are selected.
    let doc = common::document_with_gray_rows(4, 4, &[0, 50, 100, 150]);
    let bmp = threshold_bitmap(
        &doc.grayscale,
        &params(100, Comparison::GreaterOrEqual),
        &CancelToken::new(),
    )
    .unwrap();

    let selected = (0..4)
        .flat_map(|y| (0..4).map(move |x| (x, y)))
        .filter(|&(x, y)| bmp.pixel(x, y).unwrap()[0] == 255)
        .count();
    assert_eq!(selected, 8);

    for y in 0..4 {
        assert_eq!(bmp.pixel(0, y).unwrap()[0], 0);
        assert_eq!(bmp.pixel(1, y).unwrap()[0], 0);
        assert_eq!(bmp.pixel(2, y).unwrap()[0], 255);
        assert_eq!(bmp.pixel(3, y).unwrap()[0], 255);
    }
}

// ---------------------------------------------------------------------------
// Composite overlay
// ---------------------------------------------------------------------------

#[test]
fn test_composite_unselected_pixels_pass_through() {
    let gray = Array2::from_shape_vec((1, 2), vec![10u8, 200]).unwrap();
    // BGRA per pixel; the first pixel is below the threshold.
    let color = vec![1, 2, 3, 40, 5, 6, 7, 80];
    let p = params(100, Comparison::GreaterOrEqual);
    let bmp = composite_overlay(&gray, &color, &p, &CancelToken::new()).unwrap();

    // Pass-through keeps every channel, including the original alpha.
    assert_eq!(bmp.pixel(0, 0), Some([1, 2, 3, 40]));
    // Selected pixel is forced opaque.
    assert_eq!(bmp.pixel(1, 0).unwrap()[3], 255);
}

#[test]
fn test_composite_opaque_overlay_replaces_color() {
    let gray = Array2::from_shape_vec((1, 1), vec![200u8]).unwrap();
    let color = vec![5, 6, 7, 80];
    let mut p = params(100, Comparison::GreaterOrEqual);
    p.overlay = OverlayColor::new(10, 20, 30, 255);

    let bmp = composite_overlay(&gray, &color, &p, &CancelToken::new()).unwrap();
    // Stored as BGRA.
    assert_eq!(bmp.pixel(0, 0), Some([30, 20, 10, 255]));
}

#[test]
fn test_composite_transparent_overlay_keeps_color_forces_alpha() {
    let gray = Array2::from_shape_vec((1, 1), vec![200u8]).unwrap();
    let color = vec![5, 6, 7, 80];
    let mut p = params(100, Comparison::GreaterOrEqual);
    p.overlay = OverlayColor::new(10, 20, 30, 0);

    let bmp = composite_overlay(&gray, &color, &p, &CancelToken::new()).unwrap();
    assert_eq!(bmp.pixel(0, 0), Some([5, 6, 7, 255]));
}

#[test]
fn test_composite_alpha_rules_for_all_overlay_alphas() {
    let gray = Array2::from_shape_vec((1, 2), vec![0u8, 255]).unwrap();
    let color = vec![50, 60, 70, 90, 110, 120, 130, 140];

    for a in (0u16..=255).step_by(17) {
        let mut p = params(128, Comparison::GreaterOrEqual);
        p.overlay = OverlayColor::new(200, 100, 0, a as u8);
        let bmp = composite_overlay(&gray, &color, &p, &CancelToken::new()).unwrap();

        assert_eq!(bmp.pixel(0, 0).unwrap()[3], 90, "unselected keeps alpha");
        assert_eq!(bmp.pixel(1, 0).unwrap()[3], 255, "selected forced opaque");
    }
}

#[test]
fn test_blend_truncates_then_clamps() {
    // 10 * (128/255) + 200 * (127/255) = 104.627..., truncated to 104.
    assert_eq!(blend(10, 200, 128.0 / 255.0), 104);
    assert_eq!(blend(255, 0, 100.0 / 255.0), 100);
    assert_eq!(blend(0, 0, 1.0), 0);
    assert_eq!(blend(255, 255, 0.5), 255);
}

#[test]
fn test_composite_rejects_mismatched_color_buffer() {
    let gray = Array2::from_shape_vec((2, 2), vec![0u8, 1, 2, 3]).unwrap();
    let color = vec![0u8; 12]; // 3 pixels worth, not 4
    let err = composite_overlay(
        &gray,
        &color,
        &params(100, Comparison::GreaterOrEqual),
        &CancelToken::new(),
    )
    .unwrap_err();
    assert!(matches!(err, ThreshViewError::Processing(_)));
}

#[test]
fn test_composite_is_deterministic() {
    let doc = common::document_with_gray_rows(8, 8, &[0, 30, 60, 90, 120, 150, 180, 210]);
    let p = ThresholdParams::default();

    let a = composite_overlay(&doc.grayscale, &doc.color, &p, &CancelToken::new()).unwrap();
    let b = composite_overlay(&doc.grayscale, &doc.color, &p, &CancelToken::new()).unwrap();
    assert_eq!(a.data, b.data);
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[test]
fn test_cancelled_token_abandons_threshold_pass() {
    let gray = Array2::from_shape_vec((2, 2), vec![0u8; 4]).unwrap();
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = threshold_bitmap(&gray, &ThresholdParams::default(), &cancel).unwrap_err();
    assert!(matches!(err, ThreshViewError::Cancelled));
}

#[test]
fn test_cancelled_token_abandons_composite_pass() {
    let doc = common::document_with_gray_rows(4, 4, &[0, 50, 100, 150]);
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = composite_overlay(
        &doc.grayscale,
        &doc.color,
        &ThresholdParams::default(),
        &cancel,
    )
    .unwrap_err();
    assert!(matches!(err, ThreshViewError::Cancelled));
}
