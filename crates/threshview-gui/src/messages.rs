use std::path::PathBuf;
use std::sync::Arc;

use threshview_core::config::EngineConfig;
use threshview_core::document::ImageDocument;
use threshview_core::params::ThresholdParams;

/// Commands sent from the UI thread to the IO worker thread.
pub enum IoCommand {
    /// Decode + resize one or more files into documents.
    LoadImages {
        paths: Vec<PathBuf>,
        config: EngineConfig,
    },

    /// Export a black/white mask for one document.
    ExportMask {
        document: Arc<ImageDocument>,
        params: ThresholdParams,
        path: PathBuf,
    },

    /// Export a color-overlay composite for one document.
    ExportOverlay {
        document: Arc<ImageDocument>,
        params: ThresholdParams,
        path: PathBuf,
    },
}

/// Results sent from the IO worker back to the UI thread.
pub enum IoResult {
    DocumentLoaded {
        document: Arc<ImageDocument>,
    },
    /// One file failed to load; other files in the batch are unaffected.
    LoadFailed {
        path: PathBuf,
        message: String,
    },
    Exported {
        path: PathBuf,
    },
    /// Export found nothing to serialize; no file was written.
    ExportSkipped {
        path: PathBuf,
    },
    /// Settings file parsed off-thread (file dialogs run on their own
    /// threads, so this arrives like any other worker result).
    SettingsImported {
        config: EngineConfig,
    },
    Error {
        message: String,
    },
}
