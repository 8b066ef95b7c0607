//! Geometric primitives for region matching.
//!
//! All regions handled by this crate are axis-aligned rectangles; polygons
//! are the fixed-winding four-corner representation consumers expect when
//! coordinates are re-serialized. Because every polygon is constructed from
//! a rectangle, overlap areas are computed exactly from the rectangle
//! envelopes.

use crate::error::{Error, Result};

/// A 2D point in page space, in integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// X coordinate
    pub x: i64,
    /// Y coordinate
    pub y: i64,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonemap::geometry::Point;
    ///
    /// let point = Point::new(10, 20);
    /// assert_eq!(point.x, 10);
    /// assert_eq!(point.y, 20);
    /// ```
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
///
/// Immutable once extracted from an input document. Negative dimensions are
/// representable (malformed input can carry them) and are rejected when the
/// rectangle is turned into a [`Polygon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Horizontal position of the top-left corner
    pub hpos: i64,
    /// Vertical position of the top-left corner
    pub vpos: i64,
    /// Width of the rectangle
    pub width: i64,
    /// Height of the rectangle
    pub height: i64,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonemap::geometry::Rect;
    ///
    /// let rect = Rect::new(0, 0, 100, 50);
    /// assert_eq!(rect.width, 100);
    /// assert_eq!(rect.height, 50);
    /// ```
    pub fn new(hpos: i64, vpos: i64, width: i64, height: i64) -> Self {
        Self {
            hpos,
            vpos,
            width,
            height,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> i64 {
        self.hpos
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> i64 {
        self.hpos + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> i64 {
        self.vpos
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> i64 {
        self.vpos + self.height
    }

    /// Compute the area of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonemap::geometry::Rect;
    ///
    /// let rect = Rect::new(0, 0, 100, 50);
    /// assert_eq!(rect.area(), 5000);
    /// ```
    pub fn area(&self) -> i64 {
        self.width * self.height
    }

    /// Convert to the four-corner polygon representation.
    ///
    /// Corner order is bottom-left, bottom-right, top-right, top-left.
    /// This exact ordering is a serialization contract.
    ///
    /// Fails with [`Error::InvalidGeometry`] if either dimension is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonemap::geometry::{Point, Rect};
    ///
    /// let poly = Rect::new(10, 20, 100, 50).to_polygon().unwrap();
    /// assert_eq!(poly.points()[0], Point::new(10, 70));   // bottom-left
    /// assert_eq!(poly.points()[1], Point::new(110, 70));  // bottom-right
    /// assert_eq!(poly.points()[2], Point::new(110, 20));  // top-right
    /// assert_eq!(poly.points()[3], Point::new(10, 20));   // top-left
    /// ```
    pub fn to_polygon(&self) -> Result<Polygon> {
        if self.width < 0 || self.height < 0 {
            return Err(Error::InvalidGeometry {
                hpos: self.hpos,
                vpos: self.vpos,
                width: self.width,
                height: self.height,
            });
        }
        Ok(Polygon {
            points: [
                Point::new(self.hpos, self.vpos + self.height),
                Point::new(self.hpos + self.width, self.vpos + self.height),
                Point::new(self.hpos + self.width, self.vpos),
                Point::new(self.hpos, self.vpos),
            ],
        })
    }
}

/// A quadrilateral built from a [`Rect`], with the fixed corner order
/// bottom-left, bottom-right, top-right, top-left.
///
/// Read-only from the moment it is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polygon {
    points: [Point; 4],
}

impl Polygon {
    /// The four corners, in the fixed winding order.
    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    /// Compute the polygon's area.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonemap::geometry::Rect;
    ///
    /// let poly = Rect::new(0, 0, 100, 50).to_polygon().unwrap();
    /// assert_eq!(poly.area(), 5000.0);
    /// ```
    pub fn area(&self) -> f64 {
        ((self.max_x() - self.min_x()) * (self.max_y() - self.min_y())) as f64
    }

    fn min_x(&self) -> i64 {
        self.points.iter().map(|p| p.x).min().unwrap_or(0)
    }

    fn max_x(&self) -> i64 {
        self.points.iter().map(|p| p.x).max().unwrap_or(0)
    }

    fn min_y(&self) -> i64 {
        self.points.iter().map(|p| p.y).min().unwrap_or(0)
    }

    fn max_y(&self) -> i64 {
        self.points.iter().map(|p| p.y).max().unwrap_or(0)
    }
}

/// Area of the geometric intersection of two polygons.
fn intersection_area(a: &Polygon, b: &Polygon) -> f64 {
    let w = a.max_x().min(b.max_x()) - a.min_x().max(b.min_x());
    let h = a.max_y().min(b.max_y()) - a.min_y().max(b.min_y());
    if w <= 0 || h <= 0 {
        return 0.0;
    }
    (w * h) as f64
}

/// Compute intersection-over-union for two polygons.
///
/// Returns `0.0` for disjoint polygons. Fails with
/// [`Error::DegenerateGeometry`] when the union area is zero (both polygons
/// are zero-area); the caller must guard that case rather than divide by
/// zero.
///
/// # Examples
///
/// ```
/// use zonemap::geometry::{intersection_over_union, Rect};
///
/// let a = Rect::new(0, 0, 100, 100).to_polygon().unwrap();
/// let b = Rect::new(10, 10, 100, 100).to_polygon().unwrap();
///
/// let iou = intersection_over_union(&a, &b).unwrap();
/// assert!((iou - 8100.0 / 18100.0).abs() < 1e-9);
/// ```
pub fn intersection_over_union(a: &Polygon, b: &Polygon) -> Result<f64> {
    let inter = intersection_area(a, b);
    let union = a.area() + b.area() - inter;
    if union == 0.0 {
        return Err(Error::DegenerateGeometry);
    }
    Ok(inter / union)
}

/// Check whether two polygons share any area or boundary.
///
/// Boundary-inclusive: polygons that merely touch along an edge or at a
/// corner intersect. Used for fine-grained line attribution, where any
/// contact counts, as opposed to IoU-thresholded overlap.
///
/// # Examples
///
/// ```
/// use zonemap::geometry::{intersects, Rect};
///
/// let a = Rect::new(0, 0, 100, 100).to_polygon().unwrap();
/// let touching = Rect::new(100, 0, 50, 100).to_polygon().unwrap();
/// let apart = Rect::new(101, 0, 50, 100).to_polygon().unwrap();
///
/// assert!(intersects(&a, &touching));
/// assert!(!intersects(&a, &apart));
/// ```
pub fn intersects(a: &Polygon, b: &Polygon) -> bool {
    a.min_x() <= b.max_x()
        && a.max_x() >= b.min_x()
        && a.min_y() <= b.max_y()
        && a.max_y() >= b.min_y()
}
