use serde::{Deserialize, Serialize};

use crate::params::ThresholdParams;

/// Engine configuration: buffer resolutions and initial parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Longest side of the preview buffers, in pixels. The source is
    /// scaled to fit inside this bound, aspect preserved.
    #[serde(default = "default_preview_max_side")]
    pub preview_max_side: u32,

    /// Longest side of the thumbnail bitmap, in pixels.
    #[serde(default = "default_thumbnail_max_side")]
    pub thumbnail_max_side: u32,

    /// Parameters applied to a freshly opened session.
    #[serde(default)]
    pub initial_params: ThresholdParams,
}

fn default_preview_max_side() -> u32 {
    1024
}

fn default_thumbnail_max_side() -> u32 {
    128
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preview_max_side: default_preview_max_side(),
            thumbnail_max_side: default_thumbnail_max_side(),
            initial_params: ThresholdParams::default(),
        }
    }
}
