mod common;

use image::DynamicImage;
use threshview_core::error::ThreshViewError;
use threshview_core::export::{write_mask, write_overlay};
use threshview_core::params::{Comparison, OverlayColor, ThresholdParams};

#[test]
fn test_mask_roundtrip_matches_selected_set() {
    let doc = common::document_with_gray_rows(4, 4, &[0, 50, 100, 150]);
    let params = ThresholdParams {
        threshold: 100,
        direction: Comparison::GreaterOrEqual,
        overlay: OverlayColor::default(),
    };

    let mut out = Vec::new();
    write_mask(&doc, &params, &mut out).unwrap();

    let decoded = image::load_from_memory(&out).unwrap();
    let mask = match decoded {
        DynamicImage::ImageLuma8(img) => img,
        other => other.to_luma8(),
    };
    assert_eq!(mask.dimensions(), (4, 4));

    for (x, y, p) in mask.enumerate_pixels() {
        let g = doc.grayscale[[y as usize, x as usize]];
        let expected = if params.selects(g) { 255 } else { 0 };
        assert_eq!(p.0[0], expected, "pixel ({x},{y})");
    }
}

#[test]
fn test_mask_respects_less_than_direction() {
    let doc = common::document_with_gray_rows(4, 1, &[0, 99, 100, 255]);
    let params = ThresholdParams {
        threshold: 100,
        direction: Comparison::LessThan,
        overlay: OverlayColor::default(),
    };

    let mut out = Vec::new();
    write_mask(&doc, &params, &mut out).unwrap();
    let mask = image::load_from_memory(&out).unwrap().to_luma8();

    assert_eq!(mask.get_pixel(0, 0).0[0], 255);
    assert_eq!(mask.get_pixel(1, 0).0[0], 255);
    assert_eq!(mask.get_pixel(2, 0).0[0], 0);
    assert_eq!(mask.get_pixel(3, 0).0[0], 0);
}

#[test]
fn test_overlay_roundtrip_applies_blend_rule() {
    let doc = common::document_with_gray_rows(2, 1, &[10, 200]);
    let params = ThresholdParams {
        threshold: 100,
        direction: Comparison::GreaterOrEqual,
        overlay: OverlayColor::new(255, 0, 0, 255),
    };

    let mut out = Vec::new();
    write_overlay(&doc, &params, &mut out).unwrap();
    let img = image::load_from_memory(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));

    // Unselected pixel: original color (color buffer is BGRA) and alpha.
    let [b, g, r, a] = [doc.color[0], doc.color[1], doc.color[2], doc.color[3]];
    assert_eq!(img.get_pixel(0, 0).0, [r, g, b, a]);

    // Selected pixel at full overlay alpha: exactly the overlay color,
    // forced opaque.
    assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 255]);
}

#[test]
fn test_export_skipped_on_empty_grayscale() {
    let doc = common::empty_document();
    let params = ThresholdParams::default();

    let mut out = Vec::new();
    let err = write_mask(&doc, &params, &mut out).unwrap_err();
    assert!(matches!(err, ThreshViewError::ExportSkipped));
    assert!(out.is_empty(), "no partial output written");

    let err = write_overlay(&doc, &params, &mut out).unwrap_err();
    assert!(matches!(err, ThreshViewError::ExportSkipped));
    assert!(out.is_empty());
}

#[test]
fn test_overlay_skipped_when_color_buffer_missing() {
    let doc = common::grayscale_only_document(4, 4, &[0, 50, 100, 150]);
    let params = ThresholdParams::default();

    let mut out = Vec::new();
    let err = write_overlay(&doc, &params, &mut out).unwrap_err();
    assert!(matches!(err, ThreshViewError::ExportSkipped));
    assert!(out.is_empty());

    // The mask path only needs the grayscale plane and still works.
    write_mask(&doc, &params, &mut out).unwrap();
    assert!(!out.is_empty());
}
