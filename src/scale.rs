//! Coordinate normalization between zone space and OCR space.
//!
//! Zone and OCR documents describe the same physical page at independently
//! declared resolutions. A single scalar factor, derived once per page from
//! the two declared page widths, projects OCR-space coordinates into zone
//! space. Axis-aligned scaling only; no rotation or skew correction.

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Multiplicative constant reconciling OCR-space coordinates into zone
/// space: `zone_page_width / ocr_page_width`.
///
/// Invariant: the factor is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// The raw scale value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Derive the per-page scale factor from the two pages' declared widths.
///
/// Fails with [`Error::InvalidPageMetadata`] if either width is zero or
/// negative.
///
/// # Examples
///
/// ```
/// use zonemap::scale::compute_scale_factor;
///
/// let factor = compute_scale_factor(2000, 1000).unwrap();
/// assert_eq!(factor.value(), 2.0);
///
/// // Equal widths mean the two spaces already agree.
/// assert_eq!(compute_scale_factor(1500, 1500).unwrap().value(), 1.0);
/// ```
pub fn compute_scale_factor(zone_page_width: i64, ocr_page_width: i64) -> Result<ScaleFactor> {
    if zone_page_width <= 0 {
        return Err(Error::InvalidPageMetadata(format!(
            "zone page width must be positive, got {}",
            zone_page_width
        )));
    }
    if ocr_page_width <= 0 {
        return Err(Error::InvalidPageMetadata(format!(
            "OCR page width must be positive, got {}",
            ocr_page_width
        )));
    }
    Ok(ScaleFactor(zone_page_width as f64 / ocr_page_width as f64))
}

impl Rect {
    /// Project an OCR-space rectangle into zone space.
    ///
    /// Each of `hpos`, `vpos`, `width`, `height` is multiplied by the factor
    /// and truncated (not rounded) toward zero to integer pixels. Truncation
    /// is a deliberately preserved behavior of the upstream contract: it can
    /// shift boundaries by up to one pixel, which matters for IoU values
    /// near the matching threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonemap::geometry::Rect;
    /// use zonemap::scale::compute_scale_factor;
    ///
    /// let factor = compute_scale_factor(1000, 1500).unwrap();
    /// let scaled = Rect::new(300, 600, 150, 90).scale(factor);
    /// assert_eq!(scaled, Rect::new(200, 400, 100, 60));
    /// ```
    pub fn scale(&self, factor: ScaleFactor) -> Rect {
        Rect {
            hpos: (self.hpos as f64 * factor.0) as i64,
            vpos: (self.vpos as f64 * factor.0) as i64,
            width: (self.width as f64 * factor.0) as i64,
            height: (self.height as f64 * factor.0) as i64,
        }
    }
}
