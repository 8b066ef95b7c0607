//! The region matcher.
//!
//! Given zone regions and OCR regions in one coordinate space, the matcher
//! associates each zone with the OCR blocks whose IoU clears a threshold.
//! Matching is a plain O(Z×O) pairwise scan — per-page block counts are
//! small (typically tens of regions), so no spatial index is used.
//!
//! Block-level IoU decides which OCR blocks belong to a zone; line-level
//! intersection decides which of a block's lines are attributed to the zone.
//! The two levels exist because OCR blocks can span several visually
//! distinct zones: line attribution avoids double-counting text that
//! physically belongs to a neighbor, while the coarser block IoU stays
//! robust for candidate selection.

use crate::error::Error;
use crate::extract::TextRegion;
use crate::geometry::{intersection_over_union, intersects, Polygon};
use crate::record::{MatchRecord, OcrRecord, ZoneRecord};
use log::{debug, warn};

/// Aggregation policy governing matching and output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usecase {
    /// Identity pass-through: one record per OCR block, no zone involvement.
    OcrOnly,
    /// Per-zone records; each matched block contributes its entire text.
    ZonePlusOcr,
    /// Per-zone records; text attribution restricted to the block's lines
    /// that intersect the zone.
    ZonePlusOcrExclusive,
}

impl Usecase {
    /// Parse a usecase from its CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ocr-only" => Some(Self::OcrOnly),
            "zone-plus-ocr" => Some(Self::ZonePlusOcr),
            "zone-plus-ocr-exclusive" => Some(Self::ZonePlusOcrExclusive),
            _ => None,
        }
    }

    /// The CLI name of this usecase.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OcrOnly => "ocr-only",
            Self::ZonePlusOcr => "zone-plus-ocr",
            Self::ZonePlusOcrExclusive => "zone-plus-ocr-exclusive",
        }
    }
}

/// Polygon of a region, or `None` (with a warning) when its rectangle is
/// degenerate in a way extraction could not catch.
fn region_polygon(region: &TextRegion, kind: &str) -> Option<Polygon> {
    match region.rect.to_polygon() {
        Ok(polygon) => Some(polygon),
        Err(err) => {
            warn!("skipping {} region: {}", kind, err);
            None
        },
    }
}

/// Match zone regions against OCR regions under the given usecase.
///
/// `iou_threshold` must lie in `[0, 1]`; the caller validates it before any
/// page is processed. Matches for a zone are appended in OCR input order
/// with no re-ranking by IoU magnitude, and a zone with no qualifying block
/// still yields a record with empty match lists.
///
/// A pair of zero-area polygons cannot produce an IoU; such pairs are
/// treated as non-matches rather than aborting the page.
pub fn match_regions(
    zones: &[TextRegion],
    ocrs: &[TextRegion],
    iou_threshold: f64,
    usecase: Usecase,
) -> Vec<MatchRecord> {
    match usecase {
        Usecase::OcrOnly => ocr_only(ocrs),
        Usecase::ZonePlusOcr | Usecase::ZonePlusOcrExclusive => {
            zone_matches(zones, ocrs, iou_threshold)
        },
    }
}

/// Identity pass-through: each OCR block becomes one record.
fn ocr_only(ocrs: &[TextRegion]) -> Vec<MatchRecord> {
    let mut records = Vec::with_capacity(ocrs.len());
    for ocr in ocrs {
        let Some(polygon) = region_polygon(ocr, "OCR") else {
            continue;
        };
        records.push(MatchRecord::Ocr(OcrRecord::new(&polygon, ocr.text.clone())));
    }
    records
}

/// Pairwise IoU matching for the zone usecases.
///
/// Every record carries both the full block text (`ocr_texts`) and the
/// line-restricted text (`zone_texts`); the usecase selects which of the
/// two downstream consumers read.
fn zone_matches(zones: &[TextRegion], ocrs: &[TextRegion], iou_threshold: f64) -> Vec<MatchRecord> {
    let candidates: Vec<(&TextRegion, Polygon)> = ocrs
        .iter()
        .filter_map(|ocr| region_polygon(ocr, "OCR").map(|p| (ocr, p)))
        .collect();

    let mut records = Vec::with_capacity(zones.len());

    for zone in zones {
        let Some(zone_polygon) = region_polygon(zone, "zone") else {
            continue;
        };
        let mut record = ZoneRecord::new(&zone_polygon);

        for (ocr, ocr_polygon) in &candidates {
            let iou = match intersection_over_union(&zone_polygon, ocr_polygon) {
                Ok(value) => value,
                // Two zero-area polygons; treat as a non-match.
                Err(Error::DegenerateGeometry) => continue,
                Err(err) => {
                    warn!("skipping region pair: {}", err);
                    continue;
                },
            };
            if iou < iou_threshold {
                continue;
            }

            record.push_match(ocr_polygon, ocr.text.clone(), attributed_text(&zone_polygon, ocr));
        }

        debug!(
            "zone at ({},{}) matched {} OCR block(s)",
            zone.rect.hpos,
            zone.rect.vpos,
            record.match_count()
        );
        records.push(MatchRecord::Zone(record));
    }

    records
}

/// Text of the block's lines that intersect the zone polygon.
///
/// Any contact counts (boundary-inclusive), independent of the IoU
/// threshold used for block membership.
fn attributed_text(zone: &Polygon, ocr: &TextRegion) -> String {
    let mut text = String::new();
    for line in &ocr.lines {
        let Ok(line_polygon) = line.rect.to_polygon() else {
            continue;
        };
        if intersects(zone, &line_polygon) {
            text.push_str(&line.text);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::record::MatchRecord;

    fn zone(hpos: i64, vpos: i64, width: i64, height: i64) -> TextRegion {
        TextRegion::bare(Rect::new(hpos, vpos, width, height))
    }

    fn ocr_block(rect: Rect, lines: Vec<(Rect, &str)>) -> TextRegion {
        let mut text = String::new();
        let children: Vec<TextRegion> = lines
            .into_iter()
            .map(|(line_rect, line_text)| {
                text.push_str(line_text);
                TextRegion {
                    rect: line_rect,
                    text: line_text.to_string(),
                    lines: Vec::new(),
                }
            })
            .collect();
        TextRegion {
            rect,
            text,
            lines: children,
        }
    }

    fn as_zone(record: &MatchRecord) -> &crate::record::ZoneRecord {
        match record {
            MatchRecord::Zone(z) => z,
            MatchRecord::Ocr(_) => panic!("expected a zone record"),
        }
    }

    #[test]
    fn test_usecase_names_round_trip() {
        for usecase in [
            Usecase::OcrOnly,
            Usecase::ZonePlusOcr,
            Usecase::ZonePlusOcrExclusive,
        ] {
            assert_eq!(Usecase::from_name(usecase.name()), Some(usecase));
        }
        assert_eq!(Usecase::from_name("bogus"), None);
    }

    #[test]
    fn test_worked_example_clears_low_threshold_only() {
        let zones = vec![zone(0, 0, 100, 100)];
        let ocrs = vec![ocr_block(
            Rect::new(10, 10, 100, 100),
            vec![(Rect::new(10, 10, 100, 40), "hello ")],
        )];

        // IoU = 8100 / 18100 ~ 0.4475
        let records = match_regions(&zones, &ocrs, 0.05, Usecase::ZonePlusOcr);
        assert_eq!(as_zone(&records[0]).match_count(), 1);

        let records = match_regions(&zones, &ocrs, 0.5, Usecase::ZonePlusOcr);
        assert_eq!(as_zone(&records[0]).match_count(), 0);
    }

    #[test]
    fn test_unmatched_zone_yields_empty_record() {
        let zones = vec![zone(0, 0, 100, 100)];
        let ocrs = vec![ocr_block(Rect::new(500, 500, 50, 50), vec![])];

        let records = match_regions(&zones, &ocrs, 0.1, Usecase::ZonePlusOcr);
        assert_eq!(records.len(), 1);
        let record = as_zone(&records[0]);
        assert!(record.ocr_coords.is_empty());
        assert!(record.ocr_texts.is_empty());
        assert!(record.zone_texts.is_empty());
    }

    #[test]
    fn test_matches_follow_ocr_input_order() {
        let zones = vec![zone(0, 0, 100, 100)];
        // The second block overlaps more strongly than the first; order must
        // still follow the input, not IoU magnitude.
        let ocrs = vec![
            ocr_block(
                Rect::new(50, 50, 100, 100),
                vec![(Rect::new(50, 50, 100, 40), "weak ")],
            ),
            ocr_block(
                Rect::new(5, 5, 95, 95),
                vec![(Rect::new(5, 5, 95, 40), "strong ")],
            ),
        ];

        let records = match_regions(&zones, &ocrs, 0.1, Usecase::ZonePlusOcr);
        let record = as_zone(&records[0]);
        assert_eq!(record.ocr_texts, vec!["weak ", "strong "]);
    }

    #[test]
    fn test_exclusive_line_attribution() {
        let zones = vec![zone(0, 0, 100, 100)];
        // Block overlaps the zone, first line is inside, second line is
        // entirely below the zone.
        let ocrs = vec![ocr_block(
            Rect::new(0, 50, 100, 100),
            vec![
                (Rect::new(0, 50, 100, 40), "inside "),
                (Rect::new(0, 110, 100, 40), "outside "),
            ],
        )];

        let records = match_regions(&zones, &ocrs, 0.1, Usecase::ZonePlusOcrExclusive);
        let record = as_zone(&records[0]);
        assert_eq!(record.match_count(), 1);
        assert_eq!(record.ocr_texts, vec!["inside outside "]);
        assert_eq!(record.zone_texts, vec!["inside "]);
    }

    #[test]
    fn test_exclusive_block_match_with_no_intersecting_line() {
        // The block clears the IoU gate but its only line lies entirely
        // outside the zone: the coordinate entry is kept with empty
        // attributed text while the full block text stays populated.
        let zones = vec![zone(0, 0, 100, 100)];
        let ocrs = vec![ocr_block(
            Rect::new(0, 40, 100, 120),
            vec![(Rect::new(0, 120, 100, 30), "elsewhere ")],
        )];

        let records = match_regions(&zones, &ocrs, 0.1, Usecase::ZonePlusOcrExclusive);
        let record = as_zone(&records[0]);
        assert_eq!(record.match_count(), 1);
        assert_eq!(record.zone_texts, vec![""]);
        assert_eq!(record.ocr_texts, vec!["elsewhere "]);
    }

    #[test]
    fn test_ocr_only_is_identity_pass_through() {
        let ocrs = vec![
            ocr_block(
                Rect::new(0, 0, 50, 50),
                vec![(Rect::new(0, 0, 50, 20), "first ")],
            ),
            ocr_block(
                Rect::new(0, 100, 50, 50),
                vec![(Rect::new(0, 100, 50, 20), "second ")],
            ),
        ];

        // Zones are ignored entirely in this mode.
        let zones = vec![zone(0, 0, 10, 10)];
        let records = match_regions(&zones, &ocrs, 0.9, Usecase::OcrOnly);
        assert_eq!(records.len(), 2);
        match (&records[0], &records[1]) {
            (MatchRecord::Ocr(a), MatchRecord::Ocr(b)) => {
                assert_eq!(a.ocr_texts, "first ");
                assert_eq!(b.ocr_texts, "second ");
            },
            _ => panic!("expected OCR records"),
        }
    }

    #[test]
    fn test_zero_area_pair_is_skipped_not_fatal() {
        // A degenerate zone against a degenerate block must not abort the
        // page; the empty record is still emitted.
        let zones = vec![zone(10, 10, 0, 0)];
        let ocrs = vec![ocr_block(Rect::new(10, 10, 0, 0), vec![])];

        let records = match_regions(&zones, &ocrs, 0.1, Usecase::ZonePlusOcr);
        assert_eq!(records.len(), 1);
        assert_eq!(as_zone(&records[0]).match_count(), 0);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // IoU of nested half-area block is exactly 0.5; a threshold of 0.5
        // must still match (>=, not >).
        let zones = vec![zone(0, 0, 100, 100)];
        let ocrs = vec![ocr_block(Rect::new(0, 0, 100, 50), vec![])];

        let records = match_regions(&zones, &ocrs, 0.5, Usecase::ZonePlusOcr);
        assert_eq!(as_zone(&records[0]).match_count(), 1);
    }
}
