use serde::{Deserialize, Serialize};

/// Which side of the threshold a pixel must fall on to be selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Select samples with `g >= threshold`.
    #[default]
    GreaterOrEqual,
    /// Select samples with `g < threshold`.
    LessThan,
}

impl Comparison {
    /// Apply the threshold predicate to one luminance sample.
    ///
    /// The two directions partition [0, 255] for every threshold: each
    /// sample is selected by exactly one of them.
    pub fn selects(self, sample: u8, threshold: u8) -> bool {
        match self {
            Comparison::GreaterOrEqual => sample >= threshold,
            Comparison::LessThan => sample < threshold,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Comparison::GreaterOrEqual => Comparison::LessThan,
            Comparison::LessThan => Comparison::GreaterOrEqual,
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::GreaterOrEqual => write!(f, ">= threshold"),
            Comparison::LessThan => write!(f, "< threshold"),
        }
    }
}

/// Highlight color blended onto selected pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl OverlayColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for OverlayColor {
    /// Translucent red.
    fn default() -> Self {
        Self::new(255, 0, 0, 100)
    }
}

/// The user-chosen thresholding parameters, shared by every open document.
///
/// Copied into each scheduled computation; a computation never reads
/// parameters that changed after it started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Luminance cut point in [0, 255].
    pub threshold: u8,
    pub direction: Comparison,
    pub overlay: OverlayColor,
}

impl ThresholdParams {
    pub fn selects(&self, sample: u8) -> bool {
        self.direction.selects(sample, self.threshold)
    }
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            threshold: 100,
            direction: Comparison::GreaterOrEqual,
            overlay: OverlayColor::default(),
        }
    }
}
