use std::sync::mpsc;

use threshview_core::config::EngineConfig;
use threshview_core::params::ThresholdParams;
use threshview_core::scheduler::{RecomputeScheduler, DEFAULT_WORKERS};

use crate::convert::{bgra_to_color_image, rgba_to_color_image};
use crate::io_worker;
use crate::messages::{IoCommand, IoResult};
use crate::panels;
use crate::states::{UIState, ViewportState};

pub struct ThreshViewApp {
    pub cmd_tx: mpsc::Sender<IoCommand>,
    pub result_tx: mpsc::Sender<IoResult>,
    pub result_rx: mpsc::Receiver<IoResult>,
    pub scheduler: RecomputeScheduler,
    pub params: ThresholdParams,
    pub config: EngineConfig,
    pub ui_state: UIState,
    pub viewport: ViewportState,
}

impl ThreshViewApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = io_worker::spawn_worker(result_tx.clone(), ctx.clone());

        let repaint_ctx = ctx.clone();
        let scheduler =
            RecomputeScheduler::with_notify(DEFAULT_WORKERS, move || repaint_ctx.request_repaint());

        let config = EngineConfig::default();
        let params = config.initial_params;

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            scheduler,
            params,
            config,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
        }
    }

    /// Drain all pending results from the IO worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                IoResult::DocumentLoaded { document } => {
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{})",
                        document.file_name(),
                        document.width,
                        document.height
                    ));

                    let thumbnail = ctx.load_texture(
                        format!("thumb-{}", document.path.display()),
                        rgba_to_color_image(&document.thumbnail),
                        egui::TextureOptions::LINEAR,
                    );
                    let id = self.scheduler.insert(document, &self.params);
                    self.ui_state.thumbnails.insert(id, thumbnail);
                    self.ui_state.selected = Some(id);
                }
                IoResult::LoadFailed { path, message } => {
                    self.ui_state
                        .add_log(format!("ERROR: {}: {message}", path.display()));
                }
                IoResult::Exported { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                IoResult::ExportSkipped { path } => {
                    self.ui_state
                        .add_log(format!("Skipped {}: nothing to export", path.display()));
                }
                IoResult::SettingsImported { config } => {
                    self.params = config.initial_params;
                    self.config = config;
                    self.scheduler.trigger_all(&self.params);
                    self.ui_state.add_log("Settings imported".into());
                }
                IoResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    /// Apply finished recomputes and refresh the viewport texture when the
    /// displayed document got a new result.
    fn poll_scheduler(&mut self, ctx: &egui::Context) {
        let applied = self.scheduler.drain();

        let Some(selected) = self.ui_state.selected else {
            self.viewport.texture = None;
            self.viewport.texture_doc = None;
            return;
        };

        let stale = self.viewport.texture_doc != Some(selected)
            || self.viewport.texture.is_none()
            || applied.contains(&selected);
        if !stale {
            return;
        }

        self.viewport.texture = self.scheduler.result(selected).map(|bitmap| {
            ctx.load_texture(
                "viewport",
                bgra_to_color_image(&bitmap),
                egui::TextureOptions::NEAREST,
            )
        });
        self.viewport.texture_doc = self.viewport.texture.is_some().then_some(selected);
    }
}

impl eframe::App for ThreshViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);
        self.poll_scheduler(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About ThreshView")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("ThreshView");
                        ui.label("Interactive Luminance Thresholding");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
