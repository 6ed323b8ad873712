use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;

use threshview_core::config::EngineConfig;
use threshview_core::document::ImageDocument;
use threshview_core::error::ThreshViewError;
use threshview_core::export::{write_mask, write_overlay};
use threshview_core::loader::load_document;
use threshview_core::params::ThresholdParams;

use crate::messages::{IoCommand, IoResult};

/// Spawn the IO worker thread (decode/resize and export encode+write run
/// here, off the UI thread). Returns the command sender.
pub fn spawn_worker(result_tx: mpsc::Sender<IoResult>, ctx: egui::Context) -> mpsc::Sender<IoCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<IoCommand>();

    std::thread::Builder::new()
        .name("threshview-io".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn IO worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<IoResult>, ctx: &egui::Context, result: IoResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<IoCommand>,
    tx: mpsc::Sender<IoResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            IoCommand::LoadImages { paths, config } => {
                handle_load(&paths, &config, &tx, &ctx);
            }
            IoCommand::ExportMask {
                document,
                params,
                path,
            } => {
                handle_export(&document, &params, &path, true, &tx, &ctx);
            }
            IoCommand::ExportOverlay {
                document,
                params,
                path,
            } => {
                handle_export(&document, &params, &path, false, &tx, &ctx);
            }
        }
    }
}

fn handle_load(
    paths: &[std::path::PathBuf],
    config: &EngineConfig,
    tx: &mpsc::Sender<IoResult>,
    ctx: &egui::Context,
) {
    for path in paths {
        match load_document(path, config) {
            Ok(document) => send(
                tx,
                ctx,
                IoResult::DocumentLoaded {
                    document: Arc::new(document),
                },
            ),
            // One bad file leaves the rest of the batch untouched.
            Err(e) => send(
                tx,
                ctx,
                IoResult::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                },
            ),
        }
    }
}

fn handle_export(
    document: &Arc<ImageDocument>,
    params: &ThresholdParams,
    path: &Path,
    mask: bool,
    tx: &mpsc::Sender<IoResult>,
    ctx: &egui::Context,
) {
    let result = File::create(path)
        .map_err(ThreshViewError::from)
        .and_then(|file| {
            let out = BufWriter::new(file);
            if mask {
                write_mask(document, params, out)
            } else {
                write_overlay(document, params, out)
            }
        });

    match result {
        Ok(()) => send(tx, ctx, IoResult::Exported {
            path: path.to_path_buf(),
        }),
        Err(ThreshViewError::ExportSkipped) => {
            let _ = std::fs::remove_file(path);
            send(tx, ctx, IoResult::ExportSkipped {
                path: path.to_path_buf(),
            });
        }
        Err(e) => send(tx, ctx, IoResult::Error {
            message: format!("Export failed: {e}"),
        }),
    }
}
