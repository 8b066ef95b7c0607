//! Exported match record shapes.
//!
//! This module is the only place where polygons are flattened into plain
//! coordinate pairs for serialization. Pairs follow the polygon's fixed
//! corner order: bottom-left, bottom-right, top-right, top-left.

use crate::geometry::Polygon;
use serde::{Deserialize, Serialize};

/// A polygon flattened to four `[x, y]` pairs.
pub type CoordPairs = [[i64; 2]; 4];

fn flatten(polygon: &Polygon) -> CoordPairs {
    let pts = polygon.points();
    [
        [pts[0].x, pts[0].y],
        [pts[1].x, pts[1].y],
        [pts[2].x, pts[2].y],
        [pts[3].x, pts[3].y],
    ]
}

/// One OCR block in the OCR-only usecase: its own coordinates and full
/// concatenated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrRecord {
    /// Normalized block polygon
    pub ocr_coords: CoordPairs,
    /// Full concatenated block text
    pub ocr_texts: String,
}

impl OcrRecord {
    /// Build a record from a block polygon and its text.
    pub fn new(polygon: &Polygon, text: impl Into<String>) -> Self {
        Self {
            ocr_coords: flatten(polygon),
            ocr_texts: text.into(),
        }
    }
}

/// One zone and the OCR blocks matched to it.
///
/// The three parallel lists share one index per matched OCR block:
/// `ocr_coords[i]` / `ocr_texts[i]` / `zone_texts[i]`. An unmatched zone
/// keeps all three lists empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Zone polygon, in zone space
    pub zone_coord: CoordPairs,
    /// Per-match text restricted to the lines that intersect the zone
    pub zone_texts: Vec<String>,
    /// Polygons of the matched OCR blocks, in match order
    pub ocr_coords: Vec<CoordPairs>,
    /// Full concatenated text of each matched OCR block
    pub ocr_texts: Vec<String>,
}

impl ZoneRecord {
    /// Start a record for a zone with no matches yet.
    pub fn new(zone: &Polygon) -> Self {
        Self {
            zone_coord: flatten(zone),
            zone_texts: Vec::new(),
            ocr_coords: Vec::new(),
            ocr_texts: Vec::new(),
        }
    }

    /// Append one matching OCR block.
    pub fn push_match(
        &mut self,
        ocr: &Polygon,
        ocr_text: impl Into<String>,
        zone_text: impl Into<String>,
    ) {
        self.ocr_coords.push(flatten(ocr));
        self.ocr_texts.push(ocr_text.into());
        self.zone_texts.push(zone_text.into());
    }

    /// Number of OCR blocks matched to this zone.
    pub fn match_count(&self) -> usize {
        self.ocr_coords.len()
    }
}

/// The output unit of a matching run. Shape depends on the usecase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchRecord {
    /// OCR-only pass-through record
    Ocr(OcrRecord),
    /// Zone record with its matched OCR blocks
    Zone(ZoneRecord),
}
