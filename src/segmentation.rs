//! Interface to the external layout-segmentation collaborator.
//!
//! The segmentation model itself is out of scope: given an image it returns
//! a per-pixel class-id grid, possibly at a different resolution than the
//! input. This module only fixes the seam — the trait a collaborator
//! implements and the explicit configuration struct it receives instead of
//! ambient process state (environment variables, module globals).

use crate::error::Result;
use std::path::Path;

/// Pixel class id for background.
pub const BACKGROUND_ID: u8 = 0;
/// Pixel class id for text regions.
pub const TEXT_ID: u8 = 1;
/// Pixel class id for figures.
pub const FIGURE_ID: u8 = 2;
/// Pixel class id for separator lines.
pub const LINE_ID: u8 = 3;
/// Pixel class id for tables.
pub const TABLE_ID: u8 = 4;

/// Configuration handed to a segmentation collaborator.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Compute device identifier (e.g. `"0"` for the first GPU), or `None`
    /// to let the collaborator choose.
    pub device: Option<String>,

    /// Connected-component connectivity: 4 or 8.
    pub connectivity: u8,

    /// Regions smaller than this fraction of the label-map area are
    /// discarded as noise.
    pub small_zone_ratio: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            device: None,
            connectivity: 4,
            small_zone_ratio: 0.005,
        }
    }
}

impl SegmenterConfig {
    /// Select a compute device.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Set the small-zone removal ratio.
    pub fn with_small_zone_ratio(mut self, ratio: f64) -> Self {
        self.small_zone_ratio = ratio;
        self
    }
}

/// A per-pixel class-id grid produced by a segmentation collaborator.
#[derive(Debug, Clone)]
pub struct LabelMap {
    /// Grid width in pixels (may differ from the input image's width)
    pub width: usize,
    /// Grid height in pixels
    pub height: usize,
    /// Row-major class ids, `width * height` entries
    pub labels: Vec<u8>,
}

impl LabelMap {
    /// Class id at `(x, y)`, or `None` when out of bounds.
    pub fn class_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.labels.get(y * self.width + x).copied()
    }
}

/// The segmentation collaborator seam.
pub trait Segmenter {
    /// Run segmentation on the image at `path`.
    fn segment(&self, path: &Path) -> Result<LabelMap>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SegmenterConfig::default();
        assert_eq!(config.device, None);
        assert_eq!(config.connectivity, 4);
        assert_eq!(config.small_zone_ratio, 0.005);
    }

    #[test]
    fn test_label_map_lookup() {
        let map = LabelMap {
            width: 2,
            height: 2,
            labels: vec![BACKGROUND_ID, TEXT_ID, FIGURE_ID, TABLE_ID],
        };
        assert_eq!(map.class_at(1, 0), Some(TEXT_ID));
        assert_eq!(map.class_at(1, 1), Some(TABLE_ID));
        assert_eq!(map.class_at(2, 0), None);
    }
}
