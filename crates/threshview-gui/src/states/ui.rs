use std::collections::BTreeMap;

use threshview_core::scheduler::DocumentId;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Document shown in the viewport (None = empty session).
    pub selected: Option<DocumentId>,

    /// Thumbnail textures for the document strip.
    pub thumbnails: BTreeMap<DocumentId, egui::TextureHandle>,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Drop per-document UI resources when a document is closed.
    pub fn forget_document(&mut self, id: DocumentId) {
        self.thumbnails.remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }
}
