use threshview_core::params::Comparison;
use threshview_core::scheduler::ComputePhase;

use crate::app::ThreshViewApp;
use crate::panels::menu_bar::{self, Export};
use crate::panels::section_header;

const LEFT_PANEL_WIDTH: f32 = 260.0;
const THUMBNAIL_HEIGHT: f32 = 48.0;

pub fn show(ctx: &egui::Context, app: &mut ThreshViewApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                documents_section(ui, app);
                ui.separator();
                threshold_section(ui, app);
                ui.separator();
                export_section(ui, app);
            });
        });
}

fn documents_section(ui: &mut egui::Ui, app: &mut ThreshViewApp) {
    let status = match app.scheduler.len() {
        0 => None,
        n => Some(format!("{n} open")),
    };
    section_header(ui, "Documents", status.as_deref());
    ui.add_space(4.0);

    if ui.button("Open Images...").clicked() {
        menu_bar::open_images(app);
    }
    ui.add_space(4.0);

    let mut to_close = None;
    for id in app.scheduler.ids() {
        let Some(document) = app.scheduler.document(id) else {
            continue;
        };
        let selected = app.ui_state.selected == Some(id);

        ui.horizontal(|ui| {
            if let Some(texture) = app.ui_state.thumbnails.get(&id) {
                let tex_size = texture.size_vec2();
                let size = egui::vec2(
                    tex_size.x / tex_size.y * THUMBNAIL_HEIGHT,
                    THUMBNAIL_HEIGHT,
                );
                let thumb = egui::Button::image(egui::load::SizedTexture::new(texture.id(), size))
                    .selected(selected);
                if ui.add(thumb).clicked() {
                    app.ui_state.selected = Some(id);
                }
            }

            ui.vertical(|ui| {
                if ui.selectable_label(selected, document.file_name()).clicked() {
                    app.ui_state.selected = Some(id);
                }
                ui.small(format!("{}x{}", document.width, document.height));
                match app.scheduler.phase(id) {
                    ComputePhase::Computing => {
                        ui.small("computing...");
                    }
                    ComputePhase::Failed => {
                        ui.small(egui::RichText::new("failed").color(egui::Color32::LIGHT_RED));
                    }
                    _ => {}
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").on_hover_text("Close").clicked() {
                    to_close = Some(id);
                }
            });
        });
    }

    if let Some(id) = to_close {
        let name = app
            .scheduler
            .document(id)
            .map(|d| d.file_name())
            .unwrap_or_default();
        app.scheduler.close(id);
        app.ui_state.forget_document(id);
        if app.ui_state.selected.is_none() {
            app.ui_state.selected = app.scheduler.ids().first().copied();
        }
        app.ui_state.add_log(format!("Closed {name}"));
    }
}

fn threshold_section(ui: &mut egui::Ui, app: &mut ThreshViewApp) {
    section_header(ui, "Threshold", Some(&app.params.direction.to_string()));
    ui.add_space(4.0);

    let mut changed = false;

    let mut threshold = app.params.threshold;
    changed |= ui
        .add(
            egui::Slider::new(&mut threshold, 0..=255)
                .text("Level")
                .clamping(egui::SliderClamping::Always),
        )
        .changed();
    app.params.threshold = threshold;

    ui.horizontal(|ui| {
        ui.label("Select pixels");
        changed |= ui
            .selectable_value(&mut app.params.direction, Comparison::GreaterOrEqual, "≥")
            .changed();
        changed |= ui
            .selectable_value(&mut app.params.direction, Comparison::LessThan, "<")
            .changed();
    });

    ui.horizontal(|ui| {
        ui.label("Overlay");
        let overlay = &mut app.params.overlay;
        let mut color =
            egui::Color32::from_rgba_unmultiplied(overlay.r, overlay.g, overlay.b, overlay.a);
        if ui
            .color_edit_button_srgba(&mut color)
            .on_hover_text("Overlay color and opacity for selected pixels")
            .changed()
        {
            let [r, g, b, a] = color.to_srgba_unmultiplied();
            *overlay = threshview_core::params::OverlayColor::new(r, g, b, a);
            changed = true;
        }
    });

    if changed {
        app.scheduler.trigger_all(&app.params);
    }
}

fn export_section(ui: &mut egui::Ui, app: &mut ThreshViewApp) {
    section_header(ui, "Export", None);
    ui.add_space(4.0);

    let document = app
        .ui_state
        .selected
        .and_then(|id| app.scheduler.document(id));
    let can_mask = document.as_ref().is_some_and(|d| d.is_processable());
    let can_overlay = document.is_some_and(|d| d.is_processable() && d.has_color());

    ui.horizontal(|ui| {
        if ui.add_enabled(can_mask, egui::Button::new("Mask...")).clicked() {
            menu_bar::export_selected(app, Export::Mask);
        }
        if ui.add_enabled(can_overlay, egui::Button::new("Overlay...")).clicked() {
            menu_bar::export_selected(app, Export::Overlay);
        }
    });
}
