//! Configuration for a mapping run.

use crate::error::{Error, Result};
use crate::matcher::Usecase;

/// Default IoU threshold for block-level matching.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.1;

/// Mapping run configuration.
#[derive(Debug, Clone)]
pub struct MappingConfig {
    /// IoU threshold gating block-level matches, in `[0, 1]`.
    pub iou_threshold: f64,

    /// Aggregation policy.
    pub usecase: Usecase,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            usecase: Usecase::ZonePlusOcr,
        }
    }

    /// Set the IoU threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.iou_threshold = threshold;
        self
    }

    /// Set the aggregation usecase.
    pub fn with_usecase(mut self, usecase: Usecase) -> Self {
        self.usecase = usecase;
        self
    }

    /// Validate the configuration.
    ///
    /// An out-of-range threshold is a programmer error and fatal at
    /// startup, before any page is processed.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.iou_threshold) || self.iou_threshold.is_nan() {
            return Err(Error::Config(format!(
                "IoU threshold must be in [0, 1], got {}",
                self.iou_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MappingConfig::default();
        assert_eq!(config.iou_threshold, DEFAULT_IOU_THRESHOLD);
        assert_eq!(config.usecase, Usecase::ZonePlusOcr);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = MappingConfig::new()
            .with_threshold(0.25)
            .with_usecase(Usecase::OcrOnly);
        assert_eq!(config.iou_threshold, 0.25);
        assert_eq!(config.usecase, Usecase::OcrOnly);
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(MappingConfig::new().with_threshold(0.0).validate().is_ok());
        assert!(MappingConfig::new().with_threshold(1.0).validate().is_ok());
        assert!(MappingConfig::new().with_threshold(-0.1).validate().is_err());
        assert!(MappingConfig::new().with_threshold(1.1).validate().is_err());
        assert!(MappingConfig::new().with_threshold(f64::NAN).validate().is_err());
    }
}
