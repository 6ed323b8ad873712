use threshview_core::document::BgraBitmap;
use threshview_core::image::RgbaImage;

/// Convert a BGRA threshold result to an egui ColorImage.
pub fn bgra_to_color_image(bitmap: &BgraBitmap) -> egui::ColorImage {
    let mut pixels = Vec::with_capacity(bitmap.width * bitmap.height);
    for chunk in bitmap.data.chunks_exact(4) {
        let [b, g, r, a] = [chunk[0], chunk[1], chunk[2], chunk[3]];
        pixels.push(egui::Color32::from_rgba_unmultiplied(r, g, b, a));
    }

    egui::ColorImage {
        size: [bitmap.width, bitmap.height],
        pixels,
        source_size: Default::default(),
    }
}

/// Convert a loaded RGBA bitmap (preview/thumbnail) to an egui ColorImage.
pub fn rgba_to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let (w, h) = image.dimensions();
    let mut pixels = Vec::with_capacity((w * h) as usize);
    for p in image.pixels() {
        let [r, g, b, a] = p.0;
        pixels.push(egui::Color32::from_rgba_unmultiplied(r, g, b, a));
    }

    egui::ColorImage {
        size: [w as usize, h as usize],
        pixels,
        source_size: Default::default(),
    }
}
