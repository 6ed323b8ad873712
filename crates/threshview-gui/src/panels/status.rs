use crate::app::ThreshViewApp;

pub fn show(ctx: &egui::Context, app: &mut ThreshViewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area — fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let document = app
                .ui_state
                .selected
                .and_then(|id| app.scheduler.document(id));
            if let Some(document) = document {
                ui.label(format!("{}x{}", document.width, document.height));
                ui.separator();
            }
            if let Some(ref t) = app.viewport.transform {
                ui.label(format!("Zoom: {:.0}%", t.scale * 100.0));
                ui.separator();
            }
            ui.label(format!(
                "Threshold: {} ({})",
                app.params.threshold, app.params.direction
            ));

            if let Some(probe) = app.viewport.probe {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let [b, g, r, a] = probe.bgra;
                    ui.label(format!(
                        "({}, {})  R{r} G{g} B{b} A{a}  L={}",
                        probe.x, probe.y, probe.luminance
                    ));
                });
            }
        });

        ui.add_space(2.0);
    });
}
