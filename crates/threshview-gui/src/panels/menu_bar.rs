use std::path::Path;

use threshview_core::config::EngineConfig;

use crate::app::ThreshViewApp;
use crate::messages::{IoCommand, IoResult};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];

pub fn show(ctx: &egui::Context, app: &mut ThreshViewApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Images...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_images(app);
                }

                ui.separator();

                let has_document = app.ui_state.selected.is_some();
                let mask_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::E);
                if ui
                    .add_enabled(
                        has_document,
                        egui::Button::new("Export Mask...").shortcut_text(ctx.format_shortcut(&mask_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    export_selected(app, Export::Mask);
                }
                if ui.add_enabled(has_document, egui::Button::new("Export Overlay...")).clicked() {
                    ui.close();
                    export_selected(app, Export::Overlay);
                }

                ui.separator();

                if ui.button("Import Settings...").clicked() {
                    ui.close();
                    import_settings(app, ctx);
                }
                if ui.button("Export Settings...").clicked() {
                    ui.close();
                    export_settings(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Parameters").clicked() {
                    ui.close();
                    app.params = app.config.initial_params;
                    app.scheduler.trigger_all(&app.params);
                    app.ui_state.add_log("Parameters reset to defaults".into());
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Fit Image").clicked() {
                    ui.close();
                    // Cleared transforms are refit on the next frame.
                    app.viewport.transform = None;
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_images(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::E))) {
            export_selected(app, Export::Mask);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

#[derive(Clone, Copy)]
pub enum Export {
    Mask,
    Overlay,
}

pub fn open_images(app: &ThreshViewApp) {
    let cmd_tx = app.cmd_tx.clone();
    let config = app.config.clone();
    std::thread::spawn(move || {
        let paths = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_files()
            .unwrap_or_default();
        if !paths.is_empty() {
            let _ = cmd_tx.send(IoCommand::LoadImages { paths, config });
        }
    });
}

pub fn export_selected(app: &mut ThreshViewApp, kind: Export) {
    let Some(id) = app.ui_state.selected else {
        return;
    };
    let Some(document) = app.scheduler.document(id) else {
        return;
    };
    let ready = match kind {
        Export::Mask => document.is_processable(),
        Export::Overlay => document.is_processable() && document.has_color(),
    };
    if !ready {
        app.ui_state
            .add_log(format!("Nothing to export for {}", document.file_name()));
        return;
    }

    let suffix = match kind {
        Export::Mask => "mask",
        Export::Overlay => "overlay",
    };
    let file_name = default_export_name(&document.path, suffix);
    let params = app.params;
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(file_name)
            .save_file()
        {
            let cmd = match kind {
                Export::Mask => IoCommand::ExportMask { document, params, path },
                Export::Overlay => IoCommand::ExportOverlay { document, params, path },
            };
            let _ = cmd_tx.send(cmd);
        }
    });
}

fn default_export_name(source: &Path, suffix: &str) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".into());
    format!("{stem}_{suffix}.png")
}

fn import_settings(app: &ThreshViewApp, ctx: &egui::Context) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let parsed: Result<EngineConfig, String> = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
        let result = match parsed {
            Ok(config) => IoResult::SettingsImported { config },
            Err(message) => IoResult::Error {
                message: format!("Failed to import {}: {message}", path.display()),
            },
        };
        let _ = result_tx.send(result);
        ctx.request_repaint();
    });
}

fn export_settings(app: &ThreshViewApp) {
    let mut config = app.config.clone();
    config.initial_params = app.params;
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("threshview.toml")
            .save_file()
        {
            if let Ok(content) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, content);
            }
        }
    });
}
