use crate::app::ThreshViewApp;
use crate::states::ViewTransform;

/// One mouse-wheel notch multiplies the scale by this factor.
const ZOOM_STEP: f32 = 1.1;
const SCROLL_POINTS_PER_TICK: f32 = 50.0;

pub fn show(ctx: &egui::Context, app: &mut ThreshViewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let Some(id) = app.ui_state.selected else {
            app.viewport.probe = None;
            show_placeholder(ui, "Open images to begin");
            return;
        };

        let texture_info = app
            .viewport
            .texture
            .as_ref()
            .filter(|_| app.viewport.texture_doc == Some(id))
            .map(|t| (t.id(), egui::vec2(t.size()[0] as f32, t.size()[1] as f32)));
        let Some((texture_id, image_size)) = texture_info else {
            app.viewport.probe = None;
            show_placeholder(ui, "Computing...");
            return;
        };

        // Refit when the document changes, the panel is resized, or the
        // transform was cleared (View > Fit Image).
        if app.viewport.transform.is_none()
            || app.viewport.viewed_doc != Some(id)
            || app.viewport.last_view_size != rect.size()
        {
            app.viewport.transform = Some(ViewTransform::fit(rect.size(), image_size));
            app.viewport.viewed_doc = Some(id);
            app.viewport.last_view_size = rect.size();
        }

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        handle_zoom(ui, &response, app, rect);
        handle_pan(&response, app);

        if response.double_clicked() {
            app.viewport.transform = Some(ViewTransform::fit(rect.size(), image_size));
        }

        if let Some(t) = app.viewport.transform {
            // The transform works in panel-local coordinates.
            let img_rect = t.image_rect(image_size).translate(rect.min.to_vec2());
            draw_image(ui, texture_id, img_rect);
        }

        update_probe(ui, &response, app, rect);
        if let Some(probe) = app.viewport.probe {
            draw_probe_readout(ui, rect, probe);
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut ThreshViewApp, rect: egui::Rect) {
    let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    let (Some(transform), Some(pointer)) = (
        app.viewport.transform.as_mut(),
        ui.input(|i| i.pointer.hover_pos()),
    ) else {
        return;
    };

    let ticks = scroll_delta / SCROLL_POINTS_PER_TICK;
    let factor = ZOOM_STEP.powf(ticks);
    transform.zoom_at(pointer - rect.min, factor);
}

fn handle_pan(response: &egui::Response, app: &mut ThreshViewApp) {
    app.viewport.dragging = response.dragged_by(egui::PointerButton::Primary)
        || response.dragged_by(egui::PointerButton::Middle);
    if app.viewport.dragging {
        if let Some(transform) = app.viewport.transform.as_mut() {
            transform.pan_by(response.drag_delta());
        }
    }
}

fn update_probe(ui: &egui::Ui, response: &egui::Response, app: &mut ThreshViewApp, rect: egui::Rect) {
    app.viewport.probe = None;
    if !response.hovered() || app.viewport.dragging {
        return;
    }
    let (Some(transform), Some(pointer)) =
        (app.viewport.transform, ui.input(|i| i.pointer.hover_pos()))
    else {
        return;
    };
    let Some(id) = app.ui_state.selected else {
        return;
    };
    let Some(bitmap) = app.scheduler.result(id) else {
        return;
    };

    app.viewport.probe = transform.probe(pointer - rect.min, &bitmap);
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_probe_readout(ui: &egui::Ui, rect: egui::Rect, probe: crate::states::ProbeSample) {
    let [b, g, r, a] = probe.bgra;
    let text = format!(
        "({}, {})  R{r} G{g} B{b} A{a}  L={}",
        probe.x, probe.y, probe.luminance
    );

    let galley = ui.painter().layout_no_wrap(
        text,
        egui::FontId::monospace(12.0),
        egui::Color32::from_white_alpha(220),
    );
    let padding = egui::vec2(6.0, 4.0);
    let pos = rect.left_bottom() + egui::vec2(8.0, -8.0 - galley.size().y - padding.y * 2.0);
    let bg = egui::Rect::from_min_size(pos, galley.size() + padding * 2.0);

    ui.painter()
        .rect_filled(bg, 3.0, egui::Color32::from_black_alpha(180));
    ui.painter().galley(pos + padding, galley, egui::Color32::WHITE);
}

fn show_placeholder(ui: &mut egui::Ui, message: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(message)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
